//! # Mock Order API
//!
//! Test double for [`OrderApi`] with a fluent expectation API.
//!
//! Queue the responses the backend should give, hand a clone of the mock to the code
//! under test, then call [`MockOrderApi::verify`] to check every expectation was used.
//!
//! ```rust
//! use foodhub_cart::clients::{mock::MockOrderApi, ApiError, OrderApi};
//! use foodhub_cart::model::CreateOrderRequest;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockOrderApi::new();
//! mock.expect_create_order().return_ok("order_1");
//! mock.expect_create_order().return_err(ApiError::status(409, "Meal sold out"));
//!
//! let request = CreateOrderRequest {
//!     items: vec![],
//!     delivery_address: "Somewhere 1".into(),
//!     delivery_notes: None,
//! };
//! assert!(mock.create_order(&request).await.is_ok());
//! assert!(mock.create_order(&request).await.is_err());
//! mock.verify();
//! # }
//! ```

use crate::clients::{ApiError, OrderApi};
use crate::model::{CreateOrderRequest, CreatedOrder, OrderId};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Default)]
struct State {
    expectations: VecDeque<Result<CreatedOrder, ApiError>>,
    requests: Vec<CreateOrderRequest>,
}

/// A mock [`OrderApi`] with expectation tracking.
///
/// Clones share state. A call with no queued expectation panics.
#[derive(Clone, Default)]
pub struct MockOrderApi {
    state: Arc<Mutex<State>>,
}

impl MockOrderApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one `create_order` call.
    pub fn expect_create_order(&self) -> CreateOrderExpectationBuilder {
        CreateOrderExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.state.lock().requests.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl OrderApi for MockOrderApi {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        match state.expectations.pop_front() {
            Some(response) => response,
            None => panic!("Unexpected create_order call: {:?}", request),
        }
    }
}

/// Builder for `create_order` expectations.
pub struct CreateOrderExpectationBuilder {
    state: Arc<Mutex<State>>,
}

impl CreateOrderExpectationBuilder {
    /// Sets the expectation to return a created order with `id`.
    pub fn return_ok(self, id: impl Into<String>) {
        self.state.lock().expectations.push_back(Ok(CreatedOrder {
            id: OrderId(id.into()),
        }));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.state.lock().expectations.push_back(Err(error));
    }
}
