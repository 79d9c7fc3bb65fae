//! # Observability & Tracing
//!
//! Structured logging for the cart, built on `tracing`.
//!
//! ## What Gets Traced
//!
//! - **Store**: restores, every committed change (lines, total items, total price),
//!   persistence failures
//! - **Actor**: startup and shutdown with the final cart size
//! - **Checkout**: order submission, backend rejections, cart clearing
//! - **Clients**: one span per request via `#[instrument]`
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Full payloads (meal snapshots, order requests)
//! RUST_LOG=debug cargo run
//!
//! # Only the store
//! RUST_LOG=foodhub_cart::store=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a short session looks like:
//!
//! ```text
//! INFO Cart system started cart_key="foodhub-cart" delivery_fee=60.0
//! INFO Cart actor started lines=0
//! INFO add_item: Cart updated lines=1 total_items=2 total_price=700.0
//! INFO place_order_shared: Placing order lines=1 total=760.0
//! INFO place_order_shared: Order placed, clearing cart order_id=ord_1
//! ```

/// Initializes the global subscriber. Filtering is controlled by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
