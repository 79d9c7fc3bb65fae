use crate::cart_actor::{self, CartError};
use crate::checkout::{Checkout, CheckoutError, DeliveryDetails, OrderSummary};
use crate::clients::{ApiError, CartClient, HttpOrderClient, OrderApi};
use crate::config::{AppConfig, ConfigError};
use crate::model::OrderId;
use crate::persistence::{FileStorage, Storage};
use crate::store::CartStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while starting or stopping the [`CartSystem`].
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build order client: {0}")]
    OrderClient(#[from] ApiError),

    #[error("Cart actor task failed: {0}")]
    ActorFailed(String),
}

/// The runtime orchestrator for the client-side cart.
///
/// `CartSystem` is responsible for:
/// - **Construction**: restoring the persisted cart and spawning the single cart actor
/// - **Dependency Wiring**: pairing the cart with the order API used at checkout
/// - **Shutdown**: closing the cart channel and waiting for the actor to finish
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::new(&AppConfig::from_env()?)?;
///
/// system.cart_client.add_one(meal).await?;
/// let order_id = system.place_order(&details).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Shared handle to the cart actor. Clone it into every consumer.
    pub cart_client: CartClient,

    /// Checkout wired to the backend order API.
    pub checkout: Checkout<Arc<dyn OrderApi>>,

    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Builds the production system: file-backed cart and HTTP order client.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &AppConfig) -> Result<Self, SystemError> {
        let storage = FileStorage::new(&config.cart_dir);
        let orders = HttpOrderClient::new(&config.api_url, config.http_timeout)?;
        Ok(Self::with_parts(
            storage,
            &config.cart_key,
            Arc::new(orders),
            config.delivery_fee,
        ))
    }

    /// Builds a system from injected parts. Tests pass a `MemoryStorage` and a mock API.
    pub fn with_parts<S: Storage>(
        storage: S,
        cart_key: &str,
        orders: Arc<dyn OrderApi>,
        delivery_fee: f64,
    ) -> Self {
        let store = CartStore::open_with_key(storage, cart_key);
        let (actor, cart_client) = cart_actor::new(store);
        let handle = tokio::spawn(async move {
            actor.run().await;
        });

        info!(cart_key, delivery_fee, "Cart system started");

        Self {
            cart_client,
            checkout: Checkout::new(orders).with_delivery_fee(delivery_fee),
            handle,
        }
    }

    /// Current subtotal, delivery fee and total.
    pub async fn summary(&self) -> Result<OrderSummary, CartError> {
        let snapshot = self.cart_client.snapshot().await?;
        Ok(self.checkout.summary(&snapshot.items))
    }

    /// Places an order for the current cart; clears it only on success.
    pub async fn place_order(&self, details: &DeliveryDetails) -> Result<OrderId, CheckoutError> {
        self.checkout
            .place_order_shared(&self.cart_client, details)
            .await
    }

    /// Gracefully shuts the system down.
    ///
    /// Drops this system's cart client and waits for the actor to exit. Clones handed
    /// out to other tasks must be dropped too, otherwise this waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system...");
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(SystemError::ActorFailed(e.to_string()));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
