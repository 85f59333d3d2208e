//! Wishlist manager.
//!
//! A set of product ids kept in insertion order and persisted as a JSON
//! array of strings. Membership is all there is; wishlist entries carry no
//! quantity.

use std::collections::HashSet;

use shelf_core::ProductId;
use tracing::{debug, instrument};

use crate::storage::KeyValueStorage;
use crate::store::{ListStore, Persisted};

/// Wishlist state backed by a list store.
#[derive(Debug)]
pub struct Wishlist<S> {
    ids: Vec<ProductId>,
    store: ListStore<S>,
    key: String,
    last_save: Option<Persisted>,
}

impl<S: KeyValueStorage> Wishlist<S> {
    /// Load the wishlist stored under `key`.
    ///
    /// Missing or corrupt data yields an empty wishlist; repeated ids are
    /// collapsed to their first occurrence.
    pub fn load(store: ListStore<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored: Vec<ProductId> = store.load(&key, Vec::new());

        let mut seen = HashSet::new();
        let ids: Vec<ProductId> = stored
            .into_iter()
            .filter(|id| !id.is_empty() && seen.insert(id.clone()))
            .collect();
        debug!(key = %key, entries = ids.len(), "Loaded wishlist");

        Self {
            ids,
            store,
            key,
            last_save: None,
        }
    }

    /// Whether `id` is on the wishlist.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|entry| entry.as_str() == id)
    }

    /// Wishlist ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Outcome of the most recent save, if any mutation has happened.
    #[must_use]
    pub const fn last_save(&self) -> Option<Persisted> {
        self.last_save
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Returns whether `id` is on the wishlist afterwards.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id)
        }
    }

    /// Add `id` to the end of the wishlist.
    ///
    /// Returns `false` if it was already present.
    pub fn add(&mut self, id: &str) -> bool {
        if id.is_empty() || self.contains(id) {
            return false;
        }
        self.ids.push(ProductId::new(id));
        debug!(product_id = %id, "Added to wishlist");
        self.persist();
        true
    }

    /// Remove `id` from the wishlist.
    ///
    /// Returns `false` if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|entry| entry.as_str() != id);
        if self.ids.len() == before {
            return false;
        }
        debug!(product_id = %id, "Removed from wishlist");
        self.persist();
        true
    }

    fn persist(&mut self) {
        self.last_save = Some(self.store.save(&self.key, &self.ids));
    }
}
