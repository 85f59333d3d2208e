//! Display data for the render layer.
//!
//! These views are what product grids, the cart drawer and the wishlist
//! panel are rendered from. They carry preformatted strings only; the
//! render layer never touches cart or catalog state directly.

use shelf_core::{CartLine, CurrencyCode, Price, Product};

use crate::catalog::CatalogIndex;
use crate::storage::KeyValueStorage;
use crate::wishlist::Wishlist;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<ImageView>,
    pub variant_ref: Option<String>,
}

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Price::ZERO, currency),
            item_count: 0,
        }
    }

    /// Build the view from cart lines.
    #[must_use]
    pub fn from_lines(lines: &[CartLine], currency: CurrencyCode) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| CartItemView::from_line(line, currency))
                .collect(),
            subtotal: format_price(lines.iter().map(CartLine::line_total).sum(), currency),
            item_count: lines
                .iter()
                .fold(0_u32, |count, line| count.saturating_add(line.qty)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn from_line(line: &CartLine, currency: CurrencyCode) -> Self {
        Self {
            id: line.id.to_string(),
            title: line.title.clone(),
            quantity: line.qty,
            price: format_price(line.price, currency),
            line_price: format_price(line.line_total(), currency),
            image: (!line.image.is_empty()).then(|| ImageView {
                url: line.image.clone(),
            }),
            variant_ref: (!line.variant_ref.is_empty()).then(|| line.variant_ref.to_string()),
        }
    }
}

/// Product card display data for grids and search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: Option<ImageView>,
    pub url: String,
    pub in_wishlist: bool,
    pub in_cart: bool,
}

impl ProductCardView {
    /// Build the card for `product`.
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode, in_wishlist: bool, in_cart: bool) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: format_price(product.price, currency),
            image: (!product.image.is_empty()).then(|| ImageView {
                url: product.image.clone(),
            }),
            url: product.url.clone(),
            in_wishlist,
            in_cart,
        }
    }
}

/// Wishlist panel display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistView {
    pub items: Vec<ProductCardView>,
    /// Wishlisted ids no longer in the catalog.
    pub missing: Vec<String>,
}

impl WishlistView {
    /// Build the panel, resolving ids through the catalog.
    ///
    /// `in_cart` reports whether an id currently has a cart line.
    #[must_use]
    pub fn build<S: KeyValueStorage>(
        wishlist: &Wishlist<S>,
        catalog: &CatalogIndex,
        currency: CurrencyCode,
        in_cart: impl Fn(&str) -> bool,
    ) -> Self {
        let mut items = Vec::new();
        let mut missing = Vec::new();

        for id in wishlist.ids() {
            match catalog.get(id.as_str()) {
                Some(product) => items.push(ProductCardView::new(
                    product,
                    currency,
                    true,
                    in_cart(id.as_str()),
                )),
                None => missing.push(id.to_string()),
            }
        }

        Self { items, missing }
    }
}

/// Format a whole-unit price with currency symbol and thousands separators.
#[must_use]
pub fn format_price(price: Price, currency: CurrencyCode) -> String {
    let amount = price.amount();
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{}{grouped}", currency.symbol())
}
