//! The cart store: the in-memory cart plus write-through persistence and change
//! notification.

pub mod cart_store;

pub use cart_store::*;
