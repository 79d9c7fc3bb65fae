//! # Cart Actor
//!
//! The process-wide cart as an explicitly constructed, single-instance actor.
//!
//! ## Overview
//!
//! Every part of the application that shows or changes the cart holds a cloned
//! [`CartClient`]. The [`CartActor`] owns the one [`CartStore`] and handles requests
//! strictly one at a time, so two quick "add to cart" clicks from different tasks are
//! serialized instead of raced. No locks are needed around the cart.
//!
//! ## Usage
//!
//! ```rust
//! use foodhub_cart::cart_actor;
//! use foodhub_cart::model::Meal;
//! use foodhub_cart::persistence::MemoryStorage;
//! use foodhub_cart::store::CartStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = cart_actor::new(CartStore::open(MemoryStorage::new()));
//!     let handle = tokio::spawn(actor.run());
//!
//!     client.add_one(Meal::new("m1", "Margherita Pizza", 650.0)).await?;
//!     assert_eq!(client.total_price().await?, 650.0);
//!
//!     drop(client);
//!     handle.await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod message;

pub use error::*;
pub use message::*;

use crate::clients::CartClient;
use crate::persistence::Storage;
use crate::store::CartStore;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Queue depth for pending cart requests.
pub const CART_BUFFER_SIZE: usize = 32;

/// Creates a new Cart actor around `store` and its client.
pub fn new<S: Storage>(store: CartStore<S>) -> (CartActor<S>, CartClient) {
    CartActor::new(store, CART_BUFFER_SIZE)
}

/// The server half of the cart: owns the store and the receiving end of the channel.
pub struct CartActor<S: Storage> {
    receiver: mpsc::Receiver<CartRequest>,
    store: CartStore<S>,
}

impl<S: Storage> CartActor<S> {
    pub fn new(store: CartStore<S>, buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, store }, CartClient::new(sender))
    }

    /// Processes requests until every client has been dropped, then returns the store.
    pub async fn run(mut self) -> CartStore<S> {
        info!(lines = self.store.items().len(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem {
                    meal,
                    quantity,
                    respond_to,
                } => {
                    self.store.add_item(&meal, quantity);
                    let _ = respond_to.send(self.store.snapshot());
                }
                CartRequest::RemoveItem { id, respond_to } => {
                    self.store.remove_item(&id);
                    let _ = respond_to.send(self.store.snapshot());
                }
                CartRequest::UpdateQuantity {
                    id,
                    quantity,
                    respond_to,
                } => {
                    self.store.update_quantity(&id, quantity);
                    let _ = respond_to.send(self.store.snapshot());
                }
                CartRequest::Clear { respond_to } => {
                    self.store.clear_cart();
                    let _ = respond_to.send(self.store.snapshot());
                }
                CartRequest::Snapshot { respond_to } => {
                    debug!("Snapshot");
                    let _ = respond_to.send(self.store.snapshot());
                }
                CartRequest::Subscribe { respond_to } => {
                    debug!("Subscribe");
                    let _ = respond_to.send(self.store.subscribe());
                }
            }
        }

        info!(
            lines = self.store.items().len(),
            total_items = self.store.total_items(),
            "Cart actor shutdown"
        );
        self.store
    }
}
