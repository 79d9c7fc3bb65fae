//! Application configuration loaded from the environment.
//!
//! A `.env` file in the working directory is loaded first (if present), then the
//! following variables are read:
//!
//! | Variable | Default |
//! |---|---|
//! | `FOODHUB_API_URL` | `http://localhost:5000/api` |
//! | `FOODHUB_CART_DIR` | `.foodhub` |
//! | `FOODHUB_CART_KEY` | `foodhub-cart` |
//! | `FOODHUB_DELIVERY_FEE` | `60` |
//! | `FOODHUB_HTTP_TIMEOUT_SECS` | `10` |

use crate::checkout::DEFAULT_DELIVERY_FEE;
use crate::persistence::CART_STORAGE_KEY;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_CART_DIR: &str = ".foodhub";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub cart_dir: PathBuf,
    pub cart_key: String,
    pub delivery_fee: f64,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            cart_key: CART_STORAGE_KEY.to_string(),
            delivery_fee: DEFAULT_DELIVERY_FEE,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|var| env::var(var).ok())?;
        tracing::info!(api_url = %config.api_url, cart_dir = %config.cart_dir.display(), "Configuration loaded");
        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let delivery_fee = match get("FOODHUB_DELIVERY_FEE") {
            Some(raw) => {
                let fee = raw.parse::<f64>().map_err(|e| ConfigError::Invalid {
                    var: "FOODHUB_DELIVERY_FEE",
                    reason: e.to_string(),
                })?;
                if !fee.is_finite() || fee < 0.0 {
                    return Err(ConfigError::Invalid {
                        var: "FOODHUB_DELIVERY_FEE",
                        reason: format!("must be a non-negative amount, got {}", raw),
                    });
                }
                fee
            }
            None => defaults.delivery_fee,
        };

        let http_timeout = match get("FOODHUB_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "FOODHUB_HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            api_url: get("FOODHUB_API_URL").unwrap_or(defaults.api_url),
            cart_dir: get("FOODHUB_CART_DIR").map(PathBuf::from).unwrap_or(defaults.cart_dir),
            cart_key: get("FOODHUB_CART_KEY").unwrap_or(defaults.cart_key),
            delivery_fee,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cart_key, "foodhub-cart");
        assert_eq!(config.delivery_fee, 60.0);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FOODHUB_API_URL", "https://api.foodhub.test/api"),
            ("FOODHUB_CART_DIR", "/tmp/cart"),
            ("FOODHUB_DELIVERY_FEE", "45.5"),
            ("FOODHUB_HTTP_TIMEOUT_SECS", "3"),
            ("FOODHUB_CART_KEY", " "),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://api.foodhub.test/api");
        assert_eq!(config.cart_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.delivery_fee, 45.5);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.cart_key, "foodhub-cart");
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("FOODHUB_DELIVERY_FEE", "free")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FOODHUB_DELIVERY_FEE", .. }));

        let err = AppConfig::from_lookup(lookup(&[("FOODHUB_DELIVERY_FEE", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FOODHUB_DELIVERY_FEE", .. }));

        let err = AppConfig::from_lookup(lookup(&[("FOODHUB_HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FOODHUB_HTTP_TIMEOUT_SECS", .. }));
    }
}
