//! Wire types for the backend's order-creation endpoint.

use crate::model::MealId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders created by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One requested meal. Prices are never sent; the backend prices the order itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub meal_id: MealId,
    pub quantity: u32,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    pub delivery_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_notes: Option<String>,
}

/// The part of the created order the client needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

/// Envelope the backend wraps every payload in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}
