//! Client-local storage for wishlist and recently-viewed products.
//!
//! Both live entirely on the client: state is JSON under a single key in a
//! `KeyValueStore` (localStorage in a browser shell, a file or in-memory map
//! elsewhere) and never touches the server.

use crate::constants::{
    RECENTLY_VIEWED_CAPACITY, RECENTLY_VIEWED_STORAGE_KEY, WISHLIST_STORAGE_KEY,
};
use crate::dto::ProductSummary;
use std::collections::HashMap;
use uuid::Uuid;

/// Minimal string key-value storage seam.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store, used directly in tests and as the default backing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

fn load_items<S: KeyValueStore>(store: &S, key: &str) -> Vec<ProductSummary> {
    // Unreadable state is discarded rather than propagated; the lists are
    // convenience caches, not records.
    store
        .get(key)
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn persist_items<S: KeyValueStore>(store: &mut S, key: &str, items: &[ProductSummary]) {
    if let Ok(json) = serde_json::to_string(items) {
        store.set(key, json);
    }
}

/// Saved-for-later products with set semantics: adding twice is a no-op,
/// toggling flips membership.
#[derive(Debug)]
pub struct Wishlist<S: KeyValueStore> {
    store: S,
    items: Vec<ProductSummary>,
}

impl<S: KeyValueStore> Wishlist<S> {
    pub fn load(store: S) -> Self {
        let items = load_items(&store, WISHLIST_STORAGE_KEY);
        Self { store, items }
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    /// Returns false when the product was already wishlisted.
    pub fn add(&mut self, product: ProductSummary) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        self.persist();
        true
    }

    /// Returns false when the product was not wishlisted.
    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != product_id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips membership; returns whether the product is wishlisted afterwards.
    pub fn toggle(&mut self, product: ProductSummary) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    fn persist(&mut self) {
        persist_items(&mut self.store, WISHLIST_STORAGE_KEY, &self.items);
    }
}

/// Most-recently-viewed products, newest first, deduplicated, capped.
#[derive(Debug)]
pub struct RecentlyViewed<S: KeyValueStore> {
    store: S,
    items: Vec<ProductSummary>,
}

impl<S: KeyValueStore> RecentlyViewed<S> {
    pub fn load(store: S) -> Self {
        let items = load_items(&store, RECENTLY_VIEWED_STORAGE_KEY);
        Self { store, items }
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    /// Records a view. A re-view moves the product to the front; the list
    /// never exceeds its capacity.
    pub fn push(&mut self, product: ProductSummary) {
        self.items.retain(|item| item.id != product.id);
        self.items.insert(0, product);
        self.items.truncate(RECENTLY_VIEWED_CAPACITY);
        persist_items(&mut self.store, RECENTLY_VIEWED_STORAGE_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(n: u32) -> ProductSummary {
        ProductSummary {
            id: Uuid::from_u128(n as u128),
            name: format!("Product {n}"),
            image: None,
            price: Decimal::new(n as i64 * 100, 2),
            discount: Decimal::ZERO,
            rating: 4.0,
        }
    }

    #[test]
    fn wishlist_add_is_idempotent() {
        let mut wishlist = Wishlist::load(MemoryStore::new());
        assert!(wishlist.add(product(1)));
        assert!(!wishlist.add(product(1)));
        assert_eq!(wishlist.count(), 1);
    }

    #[test]
    fn wishlist_toggle_flips_membership() {
        let mut wishlist = Wishlist::load(MemoryStore::new());
        assert!(wishlist.toggle(product(1)));
        assert!(wishlist.contains(product(1).id));
        assert!(!wishlist.toggle(product(1)));
        assert!(!wishlist.contains(product(1).id));
        assert_eq!(wishlist.count(), 0);
    }

    #[test]
    fn wishlist_remove_missing_is_a_noop() {
        let mut wishlist = Wishlist::load(MemoryStore::new());
        assert!(!wishlist.remove(product(9).id));
    }

    #[test]
    fn wishlist_survives_reload_from_the_same_store() {
        let mut store = MemoryStore::new();
        {
            let mut wishlist = Wishlist::load(&mut store);
            wishlist.add(product(1));
            wishlist.add(product(2));
        }
        let wishlist = Wishlist::load(&mut store);
        assert_eq!(wishlist.count(), 2);
        assert!(wishlist.contains(product(2).id));
    }

    #[test]
    fn corrupted_storage_resets_to_empty() {
        let mut store = MemoryStore::new();
        store.set(WISHLIST_STORAGE_KEY, "not json".to_string());
        let wishlist = Wishlist::load(store);
        assert_eq!(wishlist.count(), 0);
    }

    #[test]
    fn recently_viewed_is_newest_first_and_deduplicated() {
        let mut viewed = RecentlyViewed::load(MemoryStore::new());
        viewed.push(product(1));
        viewed.push(product(2));
        viewed.push(product(1));
        let ids: Vec<_> = viewed.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![product(1).id, product(2).id]);
    }

    #[test]
    fn recently_viewed_caps_at_capacity() {
        let mut viewed = RecentlyViewed::load(MemoryStore::new());
        for n in 1..=15 {
            viewed.push(product(n));
        }
        assert_eq!(viewed.items().len(), RECENTLY_VIEWED_CAPACITY);
        assert_eq!(viewed.items()[0].id, product(15).id);
        assert_eq!(viewed.items()[9].id, product(6).id);
    }
}
