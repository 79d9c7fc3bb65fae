//! # Cart Client
//!
//! Cloneable async handle to the [`CartActor`](crate::cart_actor::CartActor).
use crate::cart_actor::{CartError, CartRequest};
use crate::model::{CartLineItem, CartSnapshot, Meal, MealId};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Holds only a sender, so cloning is cheap. Every mutating method resolves once the
/// actor has applied and persisted the change, and returns the resulting snapshot.
#[derive(Clone, Debug)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> CartRequest,
    ) -> Result<T, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CartError::ActorClosed)?;
        response.await.map_err(|_| CartError::ActorDropped)
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id))]
    pub async fn add_item(&self, meal: Meal, quantity: u32) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::AddItem {
            meal: Box::new(meal),
            quantity,
            respond_to,
        })
        .await
    }

    pub async fn add_one(&self, meal: Meal) -> Result<CartSnapshot, CartError> {
        self.add_item(meal, 1).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: MealId) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::RemoveItem { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: MealId,
        quantity: i64,
    ) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::UpdateQuantity {
            id,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<CartSnapshot, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Clear { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        self.request(|respond_to| CartRequest::Snapshot { respond_to })
            .await
    }

    pub async fn items(&self) -> Result<Vec<CartLineItem>, CartError> {
        Ok(self.snapshot().await?.items)
    }

    pub async fn total_items(&self) -> Result<u64, CartError> {
        Ok(self.snapshot().await?.total_items)
    }

    pub async fn total_price(&self) -> Result<f64, CartError> {
        Ok(self.snapshot().await?.total_price)
    }

    /// Returns a receiver that observes every committed change to the cart.
    pub async fn subscribe(&self) -> Result<watch::Receiver<CartSnapshot>, CartError> {
        self.request(|respond_to| CartRequest::Subscribe { respond_to })
            .await
    }
}
