//! # System Lifecycle
//!
//! Wires the cart together and tears it down.
//!
//! The cart is process-wide state, but it is never a bare global: [`CartSystem`]
//! constructs exactly one [`CartStore`](crate::store::CartStore), moves it into the
//! cart actor, and hands out [`CartClient`](crate::clients::CartClient)s. Tests build
//! as many independent systems as they like through [`CartSystem::with_parts`].
//!
//! ## Dependency Injection
//!
//! - **Storage**: any [`Storage`](crate::persistence::Storage); `FileStorage` in
//!   production, `MemoryStorage` in tests
//! - **Order API**: any [`OrderApi`](crate::clients::OrderApi); `HttpOrderClient` in
//!   production, `MockOrderApi` in tests
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all cart clients** - closes the actor's channel
//! 2. **Actor drains** - pending requests are still answered, then the loop ends
//! 3. **Await completion** - [`CartSystem::shutdown`] joins the actor task

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use self::tracing::setup_tracing;
