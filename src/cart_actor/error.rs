//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur while talking to the cart actor.
///
/// Cart operations themselves never fail; only the channel to the actor can.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The actor has shut down and no longer accepts requests.
    #[error("Cart actor closed")]
    ActorClosed,

    /// The actor dropped the request without replying.
    #[error("Cart actor dropped response channel")]
    ActorDropped,
}
