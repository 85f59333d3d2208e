//! Search command.

use shelf_storefront::ShopContext;
use shelf_storefront::storage::KeyValueStorage;

/// Print products whose titles match `query`, prefix matches first.
pub fn run<S: KeyValueStorage>(ctx: &ShopContext<S>, query: &str) {
    let cards = ctx.search_cards(query);
    if cards.is_empty() {
        println!("No products match \"{}\".", query.trim());
        return;
    }

    for card in cards {
        println!("{:<8} {:<28} {:>10}", card.id, card.title, card.price);
    }
}
