//! Wishlist commands.

use shelf_storefront::ShopContext;
use shelf_storefront::storage::KeyValueStorage;

/// Print wishlisted products.
pub fn show<S: KeyValueStorage>(ctx: &ShopContext<S>) {
    let view = ctx.wishlist_view();
    if view.items.is_empty() && view.missing.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }

    for card in &view.items {
        let badge = if card.in_cart { " [in cart]" } else { "" };
        println!("{:<8} {:<28} {:>10}{badge}", card.id, card.title, card.price);
    }
    for id in &view.missing {
        println!("{id:<8} (no longer available)");
    }
}

/// Add `id` to the wishlist, or remove it if present.
pub fn toggle<S: KeyValueStorage>(ctx: &mut ShopContext<S>, id: &str) {
    let title = ctx
        .catalog()
        .get(id)
        .map_or_else(|| id.to_string(), |product| product.title.clone());

    let before = ctx.in_wishlist(id);
    match (before, ctx.toggle_wishlist(id)) {
        (false, true) => println!("Saved {title} to wishlist."),
        (true, false) => println!("Removed {title} from wishlist."),
        _ => println!("Nothing to change for \"{id}\"."),
    }
}
