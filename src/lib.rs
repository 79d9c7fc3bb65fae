//! # FoodHub Cart
//!
//! > **The client-side shopping cart of the FoodHub food-delivery marketplace.**
//!
//! Customers add meals from many providers, adjust quantities, and check out. Pricing,
//! authentication, and order state all live in the backend; this crate owns the one
//! piece of client state that must behave exactly right: the persisted cart.
//!
//! ## 🏗️ Design
//!
//! ### Pure core, explicit side effects
//! [`model::Cart`] holds the line items and enforces the invariants (one line per meal,
//! quantities always ≥ 1, prices locked at add time). It performs no I/O.
//! [`store::CartStore`] wraps it: mutate in memory, then persist through a
//! [`persistence::Storage`] and publish a [`model::CartSnapshot`] to subscribers.
//!
//! ### One cart, many consumers
//! The cart is shared by every screen that shows it, but it is not a global. The
//! [`cart_actor`] owns the single store and serializes all requests; consumers hold
//! cloned [`clients::CartClient`]s.
//!
//! ### Checkout ordering
//! [`checkout::Checkout`] submits `{mealId, quantity}` lines to the backend and clears
//! the cart only after the order was created. On failure the cart is untouched.
//!
//! ### Observability
//! `tracing` is used everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - meals, line items, the cart collection, order wire types
//! - [`persistence`] - storage adapters and the stored cart format
//! - [`store`] - the persisted cart store
//! - [`cart_actor`] - the shared single-instance cart
//! - [`clients`] - cart handle, backend order API, mocks for tests
//! - [`checkout`] - delivery details, order summary, placing orders
//! - [`config`] - environment configuration
//! - [`lifecycle`] - wiring, shutdown, tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod persistence;
pub mod store;
