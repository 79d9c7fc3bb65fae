//! Persisted representation of the cart.
//!
//! The cart is stored as JSON wrapped in a versioned envelope:
//!
//! ```text
//! {"state":{"items":[{"id":"m1","name":"Naan","price":60,"quantity":2}]},"version":0}
//! ```
//!
//! Each item is the meal as it was added, with `quantity` next to its fields. Items
//! are decoded one by one: a line that no longer parses is dropped and the rest of
//! the cart survives.

use crate::model::{Cart, CartLineItem};
use crate::persistence::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Fixed storage key for the cart.
pub const CART_STORAGE_KEY: &str = "foodhub-cart";

/// Envelope version written by this crate.
pub const CART_STORAGE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState<T> {
    items: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart<T> {
    state: PersistedState<T>,
    #[serde(default)]
    version: u32,
}

/// Why a stored value could not be turned back into a cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed cart JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported cart version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Serializes the cart into its stored form.
pub fn encode_cart(cart: &Cart) -> Result<String, StorageError> {
    let envelope = PersistedCart {
        state: PersistedState {
            items: cart.items().to_vec(),
        },
        version: CART_STORAGE_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a stored value back into a cart, normalizing its items.
pub fn decode_cart(raw: &str) -> Result<Cart, DecodeError> {
    let envelope: PersistedCart<Value> = serde_json::from_str(raw)?;
    if envelope.version != CART_STORAGE_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: envelope.version,
            expected: CART_STORAGE_VERSION,
        });
    }
    let items = envelope
        .state
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<CartLineItem>(item) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable cart line");
                None
            }
        });
    Ok(Cart::from_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Meal;
    use serde_json::{json, Value};

    #[test]
    fn test_encoded_shape_matches_stored_format() {
        let mut cart = Cart::new();
        cart.add_item(&Meal::new("m1", "Butter Naan", 60.0), 2);

        let encoded: Value = serde_json::from_str(&encode_cart(&cart).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "state": { "items": [
                    { "id": "m1", "name": "Butter Naan", "price": 60.0, "isAvailable": true, "quantity": 2 }
                ]},
                "version": 0
            })
        );
    }

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let raw = r#"{"state":{"items":[
            {"id":"m1","name":"Tehari","price":320,"quantity":1,"spiceLevel":"hot"}
        ]},"version":0}"#;

        let cart = decode_cart(raw).unwrap();
        let reencoded: Value = serde_json::from_str(&encode_cart(&cart).unwrap()).unwrap();
        assert_eq!(reencoded["state"]["items"][0]["spiceLevel"], json!("hot"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_cart("not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode_cart(r#"{"items":[]}"#), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_other_versions() {
        let raw = r#"{"state":{"items":[]},"version":3}"#;
        assert!(matches!(
            decode_cart(raw),
            Err(DecodeError::UnsupportedVersion { found: 3, expected: 0 })
        ));
    }

    #[test]
    fn test_decode_skips_unreadable_lines() {
        let raw = r#"{"state":{"items":[
            {"id":"a","name":"A","price":null,"quantity":1},
            {"id":"b","name":"B","price":2,"quantity":3},
            {"id":"c","name":"C","price":"cheap","quantity":1},
            "not a line"
        ]},"version":0}"#;

        let cart = decode_cart(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 6.0);
    }

    #[test]
    fn test_decode_drops_zero_quantity_lines() {
        let raw = r#"{"state":{"items":[
            {"id":"a","name":"A","price":1,"quantity":0},
            {"id":"b","name":"B","price":2,"quantity":2}
        ]},"version":0}"#;

        let cart = decode_cart(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), 4.0);
    }
}
