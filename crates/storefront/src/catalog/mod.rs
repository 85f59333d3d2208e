//! Catalog index.
//!
//! Maps product ids to product attributes for the current session. The
//! index is seeded from a static product list and then augmented with
//! attributes read from product elements rendered on the page.
//!
//! # Merge rules
//!
//! Every field is written at most once per product id: a value is taken
//! only while the field is still absent (unset, empty string, or a zero
//! price). The seed is applied first, so seed values always win over page
//! values, and among page elements sharing an id the first one wins.

pub mod page;
pub mod seed;

use std::collections::HashMap;

use shelf_core::{Price, Product, ProductId, VariantRef};
use tracing::debug;

pub use page::scan_markup;
pub use seed::{CatalogError, SeedIssue, default_products, load_seed_file, validate_seed};

/// Product attributes read from a rendered product element.
///
/// Every attribute is optional; elements without an id are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductElement {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Raw price text as rendered (e.g. `"$1,099"`).
    pub price: Option<String>,
    pub url: Option<String>,
    pub variant_ref: Option<String>,
    pub image: Option<String>,
}

/// In-memory lookup from product id to product.
///
/// Iteration follows index order: seed products first, then products only
/// found on the page, each in the order first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl CatalogIndex {
    /// Build the index from a static seed and page elements.
    ///
    /// Building twice from the same inputs yields identical indexes.
    #[must_use]
    pub fn build(seed: &[Product], page: &[ProductElement]) -> Self {
        let mut drafts: HashMap<ProductId, Draft> = HashMap::new();
        let mut order: Vec<ProductId> = Vec::with_capacity(seed.len() + page.len());

        for product in seed {
            if product.id.is_empty() {
                continue;
            }
            draft_for(&mut drafts, &mut order, &product.id).merge_product(product);
        }

        let seeded = order.len();
        for element in page {
            let Some(id) = element.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
            else {
                continue;
            };
            draft_for(&mut drafts, &mut order, &ProductId::new(id)).merge_element(element);
        }

        let from_page = order.len() - seeded;
        let products: Vec<Product> = order
            .iter()
            .filter_map(|id| drafts.remove(id))
            .map(Draft::finish)
            .collect();
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();

        debug!(products = products.len(), from_page, "Built catalog index");

        Self { products, by_id }
    }

    /// Build the index from the static seed alone.
    #[must_use]
    pub fn from_products(seed: &[Product]) -> Self {
        Self::build(seed, &[])
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id
            .get(id)
            .and_then(|&index| self.products.get(index))
    }

    /// Whether the index knows `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Products in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products as a slice, in index order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Parse rendered price text.
///
/// Every non-digit character is stripped and the remaining digits are read
/// as an integer. Text without digits, or too long to fit, yields 0.
#[must_use]
pub fn parse_price(raw: &str) -> Price {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    Price::new(digits.parse::<i64>().unwrap_or(0))
}

/// Product fields accumulated during a build.
#[derive(Debug)]
struct Draft {
    id: ProductId,
    title: Option<String>,
    price: Option<Price>,
    image: Option<String>,
    url: Option<String>,
    variant_ref: Option<String>,
}

impl Draft {
    const fn new(id: ProductId) -> Self {
        Self {
            id,
            title: None,
            price: None,
            image: None,
            url: None,
            variant_ref: None,
        }
    }

    fn merge_product(&mut self, product: &Product) {
        fill_text(&mut self.title, Some(&product.title));
        fill_price(&mut self.price, Some(product.price));
        fill_text(&mut self.image, Some(&product.image));
        fill_text(&mut self.url, Some(&product.url));
        fill_text(&mut self.variant_ref, Some(product.variant_ref.as_str()));
    }

    fn merge_element(&mut self, element: &ProductElement) {
        fill_text(&mut self.title, element.title.as_deref());
        fill_price(&mut self.price, element.price.as_deref().map(parse_price));
        fill_text(&mut self.image, element.image.as_deref());
        fill_text(&mut self.url, element.url.as_deref());
        fill_text(&mut self.variant_ref, element.variant_ref.as_deref());
    }

    fn finish(self) -> Product {
        Product {
            id: self.id,
            title: self.title.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            variant_ref: VariantRef::new(self.variant_ref.unwrap_or_default()),
        }
    }
}

fn draft_for<'a>(
    drafts: &'a mut HashMap<ProductId, Draft>,
    order: &mut Vec<ProductId>,
    id: &ProductId,
) -> &'a mut Draft {
    drafts.entry(id.clone()).or_insert_with(|| {
        order.push(id.clone());
        Draft::new(id.clone())
    })
}

fn fill_text(slot: &mut Option<String>, value: Option<&str>) {
    if slot.as_deref().is_some_and(|current| !current.is_empty()) {
        return;
    }
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        *slot = Some(value.to_string());
    }
}

fn fill_price(slot: &mut Option<Price>, value: Option<Price>) {
    if slot.is_some_and(|current| !current.is_zero()) {
        return;
    }
    if let Some(value) = value.filter(|v| !v.is_zero()) {
        *slot = Some(value);
    }
}
