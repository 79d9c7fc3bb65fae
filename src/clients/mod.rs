//! Type-safe clients: the shared cart handle and the backend order API.

pub mod cart_client;
pub mod error;
pub mod mock;
pub mod order_client;

pub use cart_client::*;
pub use error::*;
pub use order_client::*;
