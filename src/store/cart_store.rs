use crate::model::{Cart, CartLineItem, CartSnapshot, CartStatus, Meal, MealId};
use crate::persistence::{decode_cart, encode_cart, Storage, CART_STORAGE_KEY};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// The persisted shopping cart.
///
/// Owns the in-memory [`Cart`] and a [`Storage`] adapter. Every mutating call runs in
/// two steps: the cart is changed in memory, then (only if something changed) the new
/// state is written to storage and published to subscribers. A failed write is
/// logged and otherwise ignored; the in-memory cart remains the source of truth for
/// the rest of the session.
///
/// # Example
///
/// ```rust
/// use foodhub_cart::model::Meal;
/// use foodhub_cart::persistence::MemoryStorage;
/// use foodhub_cart::store::CartStore;
///
/// let mut store = CartStore::open(MemoryStorage::new());
/// store.add_item(&Meal::new("m1", "Beef Tehari", 320.0), 2);
/// assert_eq!(store.total_items(), 2);
/// assert_eq!(store.total_price(), 640.0);
/// ```
pub struct CartStore<S: Storage> {
    cart: Cart,
    storage: S,
    key: String,
    publisher: watch::Sender<CartSnapshot>,
}

impl<S: Storage> CartStore<S> {
    /// Opens the cart stored under [`CART_STORAGE_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the cart stored under `key`.
    ///
    /// A missing, unreadable, or corrupted value yields an empty cart.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = Self::restore(&storage, &key);
        let (publisher, _) = watch::channel(CartSnapshot::from(&cart));
        Self {
            cart,
            storage,
            key,
            publisher,
        }
    }

    fn restore(storage: &S, key: &str) -> Cart {
        let raw = match storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "No stored cart");
                return Cart::new();
            }
            Err(e) => {
                warn!(key, error = %e, "Could not read stored cart, starting empty");
                return Cart::new();
            }
        };
        match decode_cart(&raw) {
            Ok(cart) => {
                info!(key, lines = cart.len(), total_items = cart.total_items(), "Restored cart");
                cart
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupted cart");
                Cart::new()
            }
        }
    }

    // --- Mutations ---

    /// Adds `quantity` of `meal`, merging with an existing line for the same meal.
    pub fn add_item(&mut self, meal: &Meal, quantity: u32) {
        debug!(meal_id = %meal.id, quantity, "add_item");
        let changed = self.cart.add_item(meal, quantity);
        self.commit(changed);
    }

    /// Adds a single unit of `meal`.
    pub fn add_one(&mut self, meal: &Meal) {
        self.add_item(meal, 1);
    }

    /// Removes the line for `id`; absent ids are ignored.
    pub fn remove_item(&mut self, id: &MealId) {
        debug!(meal_id = %id, "remove_item");
        let changed = self.cart.remove_item(id);
        self.commit(changed);
    }

    /// Sets the quantity for `id`; zero or below removes the line.
    pub fn update_quantity(&mut self, id: &MealId, quantity: i64) {
        debug!(meal_id = %id, quantity, "update_quantity");
        let changed = self.cart.update_quantity(id, quantity);
        self.commit(changed);
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        debug!("clear_cart");
        let changed = self.cart.clear();
        self.commit(changed);
    }

    // --- Reads ---

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn get(&self, id: &MealId) -> Option<&CartLineItem> {
        self.cart.get(id)
    }

    pub fn status(&self) -> CartStatus {
        self.cart.status()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&self.cart)
    }

    /// Returns a receiver that observes every committed change.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.publisher.subscribe()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- Side effects ---

    fn commit(&mut self, changed: bool) {
        if !changed {
            debug!("No change");
            return;
        }
        self.persist();
        let snapshot = CartSnapshot::from(&self.cart);
        info!(
            lines = snapshot.items.len(),
            total_items = snapshot.total_items,
            total_price = snapshot.total_price,
            "Cart updated"
        );
        self.publisher.send_replace(snapshot);
    }

    fn persist(&self) {
        let result = encode_cart(&self.cart).and_then(|raw| self.storage.write(&self.key, &raw));
        if let Err(e) = result {
            warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn meal(id: &str, price: f64) -> Meal {
        Meal::new(id, format!("Meal {}", id), price)
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.add_item(&meal("A", 100.0), 2);
        let stored = decode_cart(&storage.raw(CART_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.total_items(), 2);

        store.update_quantity(&"A".into(), 5);
        let stored = decode_cart(&storage.raw(CART_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.get(&"A".into()).unwrap().quantity, 5);

        store.clear_cart();
        let stored = decode_cart(&storage.raw(CART_STORAGE_KEY).unwrap()).unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_noop_does_not_touch_storage() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.remove_item(&"missing".into());
        store.update_quantity(&"missing".into(), 3);
        store.clear_cart();

        assert_eq!(storage.raw(CART_STORAGE_KEY), None);
    }

    #[test]
    fn test_corrupted_storage_starts_empty() {
        let storage = MemoryStorage::seeded(CART_STORAGE_KEY, "{not json");
        let store = CartStore::open(storage);
        assert!(store.is_empty());
        assert_eq!(store.total_price(), 0.0);
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let storage = MemoryStorage::seeded(CART_STORAGE_KEY, "{}");
        storage.set_failing(true);
        let store = CartStore::open(storage);
        assert_eq!(store.status(), CartStatus::Empty);
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        storage.set_failing(true);

        store.add_item(&meal("A", 10.0), 3);

        assert_eq!(store.total_items(), 3);
        assert_eq!(storage.raw(CART_STORAGE_KEY), None);
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        store.add_item(&meal("A", 100.0), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_price, 100.0);

        store.remove_item(&"nope".into());
        assert!(!rx.has_changed().unwrap());

        store.update_quantity(&"A".into(), 0);
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open_with_key(storage.clone(), "guest-cart");
        store.add_one(&meal("A", 1.0));

        assert!(storage.raw("guest-cart").is_some());
        assert!(storage.raw(CART_STORAGE_KEY).is_none());
        assert_eq!(store.key(), "guest-cart");
    }
}
