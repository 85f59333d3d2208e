//! Cart manager.
//!
//! The cart is an ordered list of [`CartLine`]s, at most one per product
//! id, persisted as a JSON array under a fixed storage key. Every
//! successful mutation is saved immediately; a failed save is logged and
//! the in-memory cart stays authoritative for the rest of the session.

use std::collections::HashSet;

use shelf_core::{CartLine, Price, ProductId};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::catalog::CatalogIndex;
use crate::storage::KeyValueStorage;
use crate::store::{ListStore, Persisted};

/// Errors from cart operations. None of them change the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product id is not in the catalog index.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Quantities added to the cart must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Result of [`Cart::change_qty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyChange {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
    /// There was no line for the id.
    NotInCart,
}

/// Cart state backed by a list store.
#[derive(Debug)]
pub struct Cart<S> {
    lines: Vec<CartLine>,
    store: ListStore<S>,
    key: String,
    last_save: Option<Persisted>,
}

impl<S: KeyValueStorage> Cart<S> {
    /// Load the cart stored under `key`.
    ///
    /// Missing or corrupt data yields an empty cart. Stored lines with a
    /// zero quantity are dropped and repeated ids keep their first line.
    pub fn load(store: ListStore<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored: Vec<CartLine> = store.load(&key, Vec::new());
        let lines = normalize(stored);
        debug!(key = %key, lines = lines.len(), "Loaded cart");

        Self {
            lines,
            store,
            key,
            last_save: None,
        }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id.as_str() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.qty))
    }

    /// Sum of `price * qty` over all lines; zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Outcome of the most recent save, if any mutation has happened.
    #[must_use]
    pub const fn last_save(&self) -> Option<Persisted> {
        self.last_save
    }

    /// The storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add `qty` of product `id`.
    ///
    /// Increments an existing line, or creates one with title, price, image
    /// and variant reference copied from the catalog.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the catalog has no such
    /// product and `CartError::InvalidQuantity` if `qty` is zero. The cart
    /// is left untouched in both cases.
    #[instrument(skip(self, catalog), fields(product_id = %id))]
    pub fn add(&mut self, catalog: &CatalogIndex, id: &str, qty: u32) -> Result<u32, CartError> {
        if qty == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let Some(product) = catalog.get(id) else {
            warn!("Ignoring add for product missing from catalog");
            return Err(CartError::UnknownProduct(ProductId::new(id)));
        };

        let new_qty = if let Some(line) = self.lines.iter_mut().find(|l| l.id.as_str() == id) {
            line.qty = line.qty.saturating_add(qty);
            line.qty
        } else {
            self.lines.push(CartLine::from_product(product, qty));
            qty
        };

        debug!(qty = new_qty, "Added to cart");
        self.persist();
        Ok(new_qty)
    }

    /// Remove the line for `id`.
    ///
    /// Returns whether a line was removed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id.as_str() != id);
        if self.lines.len() == before {
            return false;
        }

        debug!("Removed from cart");
        self.persist();
        true
    }

    /// Add `delta` (which may be negative) to the quantity of `id`.
    ///
    /// A resulting quantity of zero or less removes the line.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn change_qty(&mut self, id: &str, delta: i64) -> QtyChange {
        let Some(position) = self.lines.iter().position(|l| l.id.as_str() == id) else {
            return QtyChange::NotInCart;
        };

        let change = match self.lines.get_mut(position) {
            Some(line) => {
                let next = i64::from(line.qty).saturating_add(delta);
                if next <= 0 {
                    QtyChange::Removed
                } else {
                    line.qty = u32::try_from(next).unwrap_or(u32::MAX);
                    QtyChange::Updated(line.qty)
                }
            }
            None => return QtyChange::NotInCart,
        };

        if change == QtyChange::Removed {
            self.lines.remove(position);
        }

        debug!(?change, "Changed cart quantity");
        self.persist();
        change
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        let removed = self.lines.len();
        self.lines.clear();
        debug!(removed, "Cleared cart");
        self.persist();
    }

    fn persist(&mut self) {
        self.last_save = Some(self.store.save(&self.key, &self.lines));
    }
}

/// Enforce the cart invariants on stored data.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| line.qty > 0 && !line.id.is_empty())
        .filter(|line| seen.insert(line.id.clone()))
        .collect()
}
