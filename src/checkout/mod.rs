//! # Checkout
//!
//! Turns the current cart into an order on the backend.
//!
//! ## Ordering guarantee
//!
//! The cart is cleared **only** after the backend confirmed the order. Any failure
//! (empty cart, invalid delivery details, rejected or unreachable backend) leaves the
//! cart untouched so the customer can retry without losing items.
//!
//! The request carries meal ids and quantities only. Whether prices and availability
//! are still valid is for the backend to decide when it creates the order.
//!
//! One order is in flight per [`Checkout`] at a time. A second call made while the
//! first is still waiting on the backend fails with [`CheckoutError::InProgress`]
//! instead of submitting the same cart twice.
//!
//! ## Delivery details
//!
//! Address and phone are trimmed before the length checks, so padding does not count
//! toward the minimum and a whitespace-only field is rejected. Notes that are empty
//! after trimming are left out of the request rather than sent as `""`.

pub mod error;

pub use error::*;

use crate::clients::{CartClient, OrderApi};
use crate::model::{CartLineItem, CreateOrderRequest, OrderId, OrderLine};
use crate::persistence::Storage;
use crate::store::CartStore;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

/// Flat delivery fee in BDT.
pub const DEFAULT_DELIVERY_FEE: f64 = 60.0;

const MIN_ADDRESS_LEN: usize = 5;
const MIN_PHONE_LEN: usize = 10;

/// Where and how to deliver the order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDetails {
    pub address: String,
    pub phone: String,
    pub notes: Option<String>,
}

impl DeliveryDetails {
    pub fn new(address: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            phone: phone.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the minimum lengths the checkout form enforces.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.address.trim().chars().count() < MIN_ADDRESS_LEN {
            return Err(CheckoutError::Validation(
                "Address is required (min 5 characters)".to_string(),
            ));
        }
        if self.phone.trim().chars().count() < MIN_PHONE_LEN {
            return Err(CheckoutError::Validation(
                "Phone number is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Price breakdown shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

impl OrderSummary {
    /// The delivery fee is only charged when there is something to deliver.
    pub fn for_items(items: &[CartLineItem], delivery_fee: f64) -> Self {
        let subtotal: f64 = items.iter().map(CartLineItem::line_total).sum();
        let delivery_fee = if items.is_empty() { 0.0 } else { delivery_fee };
        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// Builds the `POST /orders` payload for the given cart lines.
///
/// The phone number is folded into the delivery address; blank notes are omitted.
pub fn build_order_request(items: &[CartLineItem], details: &DeliveryDetails) -> CreateOrderRequest {
    CreateOrderRequest {
        items: items
            .iter()
            .map(|line| OrderLine {
                meal_id: line.id().clone(),
                quantity: line.quantity,
            })
            .collect(),
        delivery_address: format!("{} (Phone: {})", details.address.trim(), details.phone.trim()),
        delivery_notes: details
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string),
    }
}

/// Marks a checkout as running until dropped.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CheckoutError> {
        if flag.swap(true, Ordering::AcqRel) {
            warn!("Checkout already in progress");
            return Err(CheckoutError::InProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Places orders for a cart through an [`OrderApi`].
pub struct Checkout<O: OrderApi> {
    orders: O,
    delivery_fee: f64,
    submitting: AtomicBool,
}

impl<O: OrderApi> Checkout<O> {
    pub fn new(orders: O) -> Self {
        Self {
            orders,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether an order is currently being submitted.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn with_delivery_fee(mut self, delivery_fee: f64) -> Self {
        self.delivery_fee = delivery_fee;
        self
    }

    pub fn delivery_fee(&self) -> f64 {
        self.delivery_fee
    }

    pub fn orders(&self) -> &O {
        &self.orders
    }

    pub fn summary(&self, items: &[CartLineItem]) -> OrderSummary {
        OrderSummary::for_items(items, self.delivery_fee)
    }

    /// Submits the store's cart and clears it once the backend created the order.
    #[instrument(skip_all)]
    pub async fn place_order<S: Storage>(
        &self,
        store: &mut CartStore<S>,
        details: &DeliveryDetails,
    ) -> Result<OrderId, CheckoutError> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        let order_id = self.submit(store.items(), details).await?;
        store.clear_cart();
        Ok(order_id)
    }

    /// Same as [`Checkout::place_order`] but through the shared cart actor.
    #[instrument(skip_all)]
    pub async fn place_order_shared(
        &self,
        cart: &CartClient,
        details: &DeliveryDetails,
    ) -> Result<OrderId, CheckoutError> {
        let _guard = SubmitGuard::acquire(&self.submitting)?;
        let snapshot = cart.snapshot().await?;
        let order_id = self.submit(&snapshot.items, details).await?;
        cart.clear_cart().await?;
        Ok(order_id)
    }

    async fn submit(
        &self,
        items: &[CartLineItem],
        details: &DeliveryDetails,
    ) -> Result<OrderId, CheckoutError> {
        if items.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        details.validate()?;

        let request = build_order_request(items, details);
        let summary = self.summary(items);
        debug!(?request, "Submitting order");
        info!(lines = request.items.len(), total = summary.total, "Placing order");

        match self.orders.create_order(&request).await {
            Ok(created) => {
                info!(order_id = %created.id, "Order placed, clearing cart");
                Ok(created.id)
            }
            Err(e) => {
                warn!(error = %e, "Order failed, cart left unchanged");
                Err(CheckoutError::Submit(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Meal;

    fn lines() -> Vec<CartLineItem> {
        vec![
            CartLineItem::new(Meal::new("a", "Burger", 350.0), 2),
            CartLineItem::new(Meal::new("b", "Naan", 60.0), 1),
        ]
    }

    #[test]
    fn test_request_folds_phone_into_address() {
        let details = DeliveryDetails::new("  House 4, Road 7 ", "01712345678").with_notes("   ");
        let request = build_order_request(&lines(), &details);

        assert_eq!(request.delivery_address, "House 4, Road 7 (Phone: 01712345678)");
        assert_eq!(request.delivery_notes, None);
        assert_eq!(
            request.items,
            vec![
                OrderLine { meal_id: "a".into(), quantity: 2 },
                OrderLine { meal_id: "b".into(), quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_validation_rules() {
        assert!(DeliveryDetails::new("Road 1", "01712345678").validate().is_ok());
        assert_eq!(
            DeliveryDetails::new(" ab ", "01712345678").validate(),
            Err(CheckoutError::Validation("Address is required (min 5 characters)".to_string()))
        );
        assert_eq!(
            DeliveryDetails::new("Road 1", "0171").validate(),
            Err(CheckoutError::Validation("Phone number is required".to_string()))
        );
    }

    #[test]
    fn test_padding_does_not_count_toward_minimums() {
        assert!(DeliveryDetails::new("   ab    ", "01712345678").validate().is_err());
        assert!(DeliveryDetails::new("Road 1", "          ").validate().is_err());
        assert!(DeliveryDetails::new("  Road 1  ", " 01712345678 ").validate().is_ok());
    }

    #[test]
    fn test_summary_charges_fee_only_when_populated() {
        let summary = OrderSummary::for_items(&lines(), DEFAULT_DELIVERY_FEE);
        assert_eq!(summary.subtotal, 760.0);
        assert_eq!(summary.total, 820.0);

        let empty = OrderSummary::for_items(&[], DEFAULT_DELIVERY_FEE);
        assert_eq!(empty.delivery_fee, 0.0);
        assert_eq!(empty.total, 0.0);
    }
}
