//! Cart line items and the in-memory cart collection.
//!
//! [`Cart`] is the pure half of the cart store: it holds the line items and enforces the
//! collection invariants, but knows nothing about storage or subscribers. The
//! [`CartStore`](crate::store::CartStore) wraps it with persistence and change notification.
//!
//! ## Invariants
//!
//! - At most one [`CartLineItem`] per [`MealId`]. Adding a meal that is already in the cart
//!   increments the existing line.
//! - Every line has `quantity >= 1`. Anything that would bring a line to zero removes it.
//! - Line items are point-in-time copies of the meal. Re-adding a meal never refreshes the
//!   copied name, image or price.

use crate::model::{Meal, MealId};
use serde::{Deserialize, Serialize};

/// One distinct meal in the cart plus the requested quantity.
///
/// Serialized as the meal's fields with `quantity` alongside them, which is the shape
/// the persisted cart uses. The line's own keys win over same-named meal fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub meal: Meal,
    pub quantity: u32,
}

/// Keys owned by the line itself, never taken from the meal payload.
const LINE_KEYS: &[&str] = &["quantity"];

impl CartLineItem {
    pub fn new(mut meal: Meal, quantity: u32) -> Self {
        for key in LINE_KEYS {
            meal.extra.remove(*key);
        }
        Self { meal, quantity }
    }

    pub fn id(&self) -> &MealId {
        &self.meal.id
    }

    /// The price captured when the meal was first added.
    pub fn unit_price(&self) -> f64 {
        self.meal.price
    }

    pub fn line_total(&self) -> f64 {
        self.meal.price * f64::from(self.quantity)
    }
}

/// Whether checkout is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Empty,
    Populated,
}

/// The ordered collection of cart line items.
///
/// Insertion order is kept for stable display. All mutators return `true` when the
/// collection actually changed, which lets callers skip persisting no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw line items, restoring the invariants.
    ///
    /// Zero-quantity lines are dropped and repeated ids are merged into the first
    /// occurrence. Used when rehydrating from storage.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for line in items {
            if line.quantity == 0 {
                continue;
            }
            let line = CartLineItem::new(line.meal, line.quantity);
            match cart.items.iter_mut().find(|existing| existing.meal.id == line.meal.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => cart.items.push(line),
            }
        }
        cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    pub fn get(&self, id: &MealId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| &line.meal.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> CartStatus {
        if self.items.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Populated
        }
    }

    /// Adds `quantity` of `meal`, merging into an existing line for the same id.
    ///
    /// A new line snapshots the meal as it is now. An existing line keeps its original
    /// snapshot and only its quantity grows. A zero quantity changes nothing.
    pub fn add_item(&mut self, meal: &Meal, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self.items.iter_mut().find(|line| line.meal.id == meal.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartLineItem::new(meal.clone(), quantity)),
        }
        true
    }

    /// Removes the line for `id`. Absent ids are ignored.
    pub fn remove_item(&mut self, id: &MealId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.meal.id != id);
        self.items.len() != before
    }

    /// Sets the line's quantity to exactly `quantity`; zero or less removes the line.
    pub fn update_quantity(&mut self, id: &MealId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|line| &line.meal.id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `unit price * quantity` using the snapshotted prices.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

/// Read-only view of the cart published to subscribers after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total_items: u64,
    pub total_price: f64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> CartStatus {
        if self.items.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Populated
        }
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.clone(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: &str, price: f64) -> Meal {
        Meal::new(id, format!("Meal {}", id), price)
    }

    fn assert_totals_consistent(cart: &Cart) {
        let items: u64 = cart.items().iter().map(|l| u64::from(l.quantity)).sum();
        let price: f64 = cart.items().iter().map(|l| l.meal.price * f64::from(l.quantity)).sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_price(), price);
        assert!(cart.items().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        let a = meal("A", 100.0);

        cart.add_item(&a, 2);
        cart.add_item(&a, 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 3);
        assert_eq!(cart.total_price(), 300.0);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_totals_over_multiple_lines() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 100.0), 1);
        cart.add_item(&meal("B", 50.0), 3);

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 250.0);
        assert_eq!(cart.status(), CartStatus::Populated);
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 10.0), 5);

        assert!(cart.update_quantity(&"A".into(), 2));
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 2);
        assert!(!cart.update_quantity(&"A".into(), 2));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_update_quantity_to_zero_or_less_removes() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 10.0), 2);
        cart.add_item(&meal("B", 10.0), 2);

        assert!(cart.update_quantity(&"A".into(), 0));
        assert!(cart.update_quantity(&"B".into(), -3));
        assert!(cart.is_empty());
        assert_eq!(cart.status(), CartStatus::Empty);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 10.0), 1);

        assert!(!cart.update_quantity(&"missing".into(), 4));
        assert!(!cart.update_quantity(&"missing".into(), 0));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 10.0), 1);

        assert!(cart.remove_item(&"A".into()));
        assert!(!cart.remove_item(&"A".into()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.add_item(&meal("A", 10.0), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_is_locked_at_first_add() {
        let mut cart = Cart::new();
        let original = meal("A", 100.0);
        cart.add_item(&original, 1);

        let mut repriced = original.clone();
        repriced.price = 150.0;
        repriced.name = "Renamed".to_string();
        cart.add_item(&repriced, 1);

        let line = cart.get(&"A".into()).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price(), 100.0);
        assert_eq!(line.meal.name, "Meal A");
        assert_eq!(cart.total_price(), 200.0);
    }

    #[test]
    fn test_clear_then_add_starts_fresh() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 10.0), 1);
        cart.add_item(&meal("B", 20.0), 2);

        assert!(cart.clear());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0.0);

        cart.add_item(&meal("C", 30.0), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id(), &MealId::from("C"));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_from_items_restores_invariants() {
        let cart = Cart::from_items(vec![
            CartLineItem::new(meal("A", 10.0), 1),
            CartLineItem::new(meal("B", 10.0), 0),
            CartLineItem::new(meal("A", 10.0), 2),
        ]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"A".into()).unwrap().quantity, 3);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut cart = Cart::new();
        for id in ["C", "A", "B"] {
            cart.add_item(&meal(id, 1.0), 1);
        }
        cart.add_item(&meal("A", 1.0), 1);

        let ids: Vec<&str> = cart.items().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_snapshot_carries_derived_totals() {
        let mut cart = Cart::new();
        cart.add_item(&meal("A", 12.5), 2);

        let snapshot = CartSnapshot::from(&cart);
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.total_price, 25.0);
        assert_eq!(snapshot.status(), CartStatus::Populated);
    }

    #[test]
    fn test_line_quantity_wins_over_meal_field() {
        let mut payload = meal("A", 10.0);
        payload.extra.insert("quantity".to_string(), serde_json::json!(50));
        payload.extra.insert("spiceLevel".to_string(), serde_json::json!("hot"));

        let mut cart = Cart::new();
        cart.add_item(&payload, 2);

        let line = cart.get(&"A".into()).unwrap();
        assert!(!line.meal.extra.contains_key("quantity"));
        assert_eq!(line.meal.extra["spiceLevel"], "hot");

        let encoded = serde_json::to_string(line).unwrap();
        assert_eq!(encoded.matches("\"quantity\"").count(), 1);
        let decoded: CartLineItem = serde_json::from_str(&encoded).unwrap();
        assert_eq!(&decoded, line);
    }
}
