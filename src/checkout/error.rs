//! Error types for checkout.

use crate::cart_actor::CartError;
use crate::clients::ApiError;
use thiserror::Error;

/// Errors that can occur while placing an order.
///
/// Whatever the error, the cart is left exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Another order from this checkout is still being submitted.
    #[error("An order is already being placed")]
    InProgress,

    /// The delivery details failed validation.
    #[error("Checkout validation error: {0}")]
    Validation(String),

    /// The backend rejected the order or could not be reached.
    #[error("Failed to place order: {0}")]
    Submit(#[from] ApiError),

    /// The shared cart could not be reached.
    #[error("Cart unavailable: {0}")]
    Cart(#[from] CartError),
}
