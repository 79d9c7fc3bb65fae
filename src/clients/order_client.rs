//! # Order Client
//!
//! The order-creation collaborator used at checkout.
//!
//! [`OrderApi`] is the seam: checkout only needs "submit these lines, give me the new
//! order id". [`HttpOrderClient`] talks to the real backend; tests substitute
//! [`MockOrderApi`](crate::clients::mock::MockOrderApi).
use crate::clients::ApiError;
use crate::model::{ApiResponse, CreateOrderRequest, CreatedOrder};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Creates orders on the backend.
///
/// Implementations are responsible for authoritative validation (price, availability);
/// the cart only submits meal ids and quantities.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError>;
}

#[async_trait]
impl<T: OrderApi + ?Sized> OrderApi for Arc<T> {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        (**self).create_order(request).await
    }
}

/// HTTP client for the backend's `/orders` endpoint.
///
/// Keeps a cookie store so the session cookie set at login rides along with
/// every request.
#[derive(Clone, Debug)]
pub struct HttpOrderClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpOrderClient {
    /// Builds a client for the API rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Uses an already configured `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl OrderApi for HttpOrderClient {
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        let url = self.url("/orders");
        debug!(%url, ?request, "POST");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = error_from_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %error, "Order rejected");
            return Err(error);
        }

        let parsed: ApiResponse<CreatedOrder> =
            serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        info!(order_id = %parsed.data.id, "Order created");
        Ok(parsed.data)
    }
}

/// Turns an error response into an [`ApiError`], preferring the backend's message.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("API Error: {}", status));
    ApiError::status(status, message)
}
