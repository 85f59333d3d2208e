//! Application context shared with the bind layer.
//!
//! [`ShopContext`] owns everything the storefront mutates: the catalog
//! index, the cart and the wishlist. UI collaborators receive the context
//! instead of reaching for globals, and subscribe to [`ShopEvent`]s to know
//! when to re-render.

use tokio::sync::broadcast;
use tracing::instrument;
use url::Url;

use shelf_core::Price;

use crate::cart::{Cart, CartError, QtyChange};
use crate::catalog::CatalogIndex;
use crate::checkout::{self, CheckoutError};
use crate::config::ShelfConfig;
use crate::search::{self, SearchHit};
use crate::storage::{FileStorage, KeyValueStorage};
use crate::store::ListStore;
use crate::view::{CartView, ProductCardView, WishlistView};
use crate::wishlist::Wishlist;

/// Capacity of the change-event channel.
const EVENT_CAPACITY: usize = 64;

/// Notifications emitted after state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEvent {
    /// The cart changed; `item_count` is the new badge count.
    CartUpdated { item_count: u32 },
    /// The wishlist changed; `count` is the new number of entries.
    WishlistUpdated { count: usize },
}

/// Storefront state owned by the application.
#[derive(Debug)]
pub struct ShopContext<S> {
    config: ShelfConfig,
    catalog: CatalogIndex,
    cart: Cart<S>,
    wishlist: Wishlist<S>,
    events: broadcast::Sender<ShopEvent>,
}

impl ShopContext<FileStorage> {
    /// Open the context on file storage under `config.data_dir`.
    #[must_use]
    pub fn open(config: ShelfConfig, catalog: CatalogIndex) -> Self {
        let storage = FileStorage::new(&config.data_dir);
        Self::new(config, catalog, storage)
    }
}

impl<S: KeyValueStorage + Clone> ShopContext<S> {
    /// Create a context, loading the cart and wishlist from `storage`.
    #[must_use]
    pub fn new(config: ShelfConfig, catalog: CatalogIndex, storage: S) -> Self {
        let cart = Cart::load(ListStore::new(storage.clone()), config.cart_key.clone());
        let wishlist = Wishlist::load(ListStore::new(storage), config.wishlist_key.clone());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            config,
            catalog,
            cart,
            wishlist,
            events,
        }
    }
}

impl<S: KeyValueStorage> ShopContext<S> {
    /// Get a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Get a reference to the catalog index.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Replace the catalog index, e.g. after new product cards rendered.
    ///
    /// Existing cart lines keep their snapshotted prices.
    pub fn set_catalog(&mut self, catalog: CatalogIndex) {
        self.catalog = catalog;
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart<S> {
        &self.cart
    }

    /// Get a reference to the wishlist.
    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist<S> {
        &self.wishlist
    }

    /// Subscribe to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ShopEvent> {
        self.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add `qty` of `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the product is unknown or `qty` is zero; the
    /// cart is unchanged and no event is emitted.
    pub fn add_to_cart(&mut self, id: &str, qty: u32) -> Result<u32, CartError> {
        let new_qty = self.cart.add(&self.catalog, id, qty)?;
        self.cart_changed();
        Ok(new_qty)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            self.cart_changed();
        }
        removed
    }

    /// Change the quantity of `id` by `delta`.
    pub fn change_qty(&mut self, id: &str, delta: i64) -> QtyChange {
        let change = self.cart.change_qty(id, delta);
        if change != QtyChange::NotInCart {
            self.cart_changed();
        }
        change
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.cart_changed();
    }

    /// Cart subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    // -------------------------------------------------------------------------
    // Wishlist
    // -------------------------------------------------------------------------

    /// Toggle `id` on the wishlist. Returns membership afterwards.
    ///
    /// Emits `WishlistUpdated` only if membership changed.
    pub fn toggle_wishlist(&mut self, id: &str) -> bool {
        let before = self.wishlist.contains(id);
        let present = self.wishlist.toggle(id);
        if present != before {
            self.wishlist_changed();
        }
        present
    }

    /// Whether `id` is on the wishlist.
    #[must_use]
    pub fn in_wishlist(&self, id: &str) -> bool {
        self.wishlist.contains(id)
    }

    // -------------------------------------------------------------------------
    // Checkout & search
    // -------------------------------------------------------------------------

    /// Build the hosted checkout link for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when the cart is empty.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<Url, CheckoutError> {
        checkout::begin_checkout(&self.config.store_origin, self.cart.lines())
    }

    /// Search the catalog for the overlay, using the configured limit.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        search::search(&self.catalog, query, self.config.search_limit)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Cart drawer view.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from_lines(self.cart.lines(), self.config.currency)
    }

    /// Wishlist panel view.
    #[must_use]
    pub fn wishlist_view(&self) -> WishlistView {
        WishlistView::build(&self.wishlist, &self.catalog, self.config.currency, |id| {
            self.cart.get(id).is_some()
        })
    }

    /// Product grid cards, in catalog order.
    #[must_use]
    pub fn product_cards(&self) -> Vec<ProductCardView> {
        self.catalog
            .iter()
            .map(|product| self.card(product))
            .collect()
    }

    /// Product cards for search hits.
    #[must_use]
    pub fn search_cards(&self, query: &str) -> Vec<ProductCardView> {
        self.search(query)
            .into_iter()
            .map(|hit| self.card(hit.product))
            .collect()
    }

    fn card(&self, product: &shelf_core::Product) -> ProductCardView {
        let id = product.id.as_str();
        ProductCardView::new(
            product,
            self.config.currency,
            self.wishlist.contains(id),
            self.cart.get(id).is_some(),
        )
    }

    fn cart_changed(&self) {
        // No subscribers is fine
        let _ = self.events.send(ShopEvent::CartUpdated {
            item_count: self.cart.item_count(),
        });
    }

    fn wishlist_changed(&self) {
        let _ = self.events.send(ShopEvent::WishlistUpdated {
            count: self.wishlist.len(),
        });
    }
}
