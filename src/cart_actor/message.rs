//! Messages understood by the Cart actor.

use crate::model::{CartSnapshot, Meal, MealId};
use tokio::sync::{oneshot, watch};

/// Type alias for the one-shot reply channel.
pub type Reply<T> = oneshot::Sender<T>;

/// Requests sent from a [`CartClient`](crate::clients::CartClient) to the actor.
///
/// Mutations reply with the snapshot after the change has been applied and persisted,
/// so the caller always observes its own write.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        meal: Box<Meal>,
        quantity: u32,
        respond_to: Reply<CartSnapshot>,
    },
    RemoveItem {
        id: MealId,
        respond_to: Reply<CartSnapshot>,
    },
    UpdateQuantity {
        id: MealId,
        quantity: i64,
        respond_to: Reply<CartSnapshot>,
    },
    Clear {
        respond_to: Reply<CartSnapshot>,
    },
    Snapshot {
        respond_to: Reply<CartSnapshot>,
    },
    Subscribe {
        respond_to: Reply<watch::Receiver<CartSnapshot>>,
    },
}
