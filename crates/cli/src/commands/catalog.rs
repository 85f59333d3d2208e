//! Catalog loading and listing.

use std::path::Path;

use tracing::info;

use shelf_storefront::ShopContext;
use shelf_storefront::catalog::{self, CatalogIndex};
use shelf_storefront::storage::KeyValueStorage;

/// Build the catalog index from the seed list and an optional rendered page.
///
/// Without `seed` the built-in products are used.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the seed is invalid.
pub async fn load(seed: Option<&Path>, page: Option<&Path>) -> shelf_storefront::Result<CatalogIndex> {
    let products = match seed {
        Some(path) => catalog::load_seed_file(path)?,
        None => catalog::default_products(),
    };

    let elements = match page {
        Some(path) => {
            let html = tokio::fs::read_to_string(path).await?;
            let elements = catalog::scan_markup(&html);
            info!(path = %path.display(), cards = elements.len(), "Scanned page markup");
            elements
        }
        None => Vec::new(),
    };

    Ok(CatalogIndex::build(&products, &elements))
}

/// Print every product card in catalog order.
pub fn list<S: KeyValueStorage>(ctx: &ShopContext<S>) {
    let cards = ctx.product_cards();
    if cards.is_empty() {
        println!("The catalog is empty.");
        return;
    }

    for card in cards {
        let mut badges = String::new();
        if card.in_cart {
            badges.push_str(" [in cart]");
        }
        if card.in_wishlist {
            badges.push_str(" [wishlist]");
        }
        println!("{:<8} {:<28} {:>10}{badges}", card.id, card.title, card.price);
    }
}
