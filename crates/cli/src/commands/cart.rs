//! Cart commands.

use shelf_storefront::ShopContext;
use shelf_storefront::cart::QtyChange;
use shelf_storefront::storage::KeyValueStorage;

use super::CliError;

/// Print cart lines and the subtotal.
pub fn show<S: KeyValueStorage>(ctx: &ShopContext<S>) {
    let view = ctx.cart_view();
    if view.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &view.items {
        println!(
            "{:<8} {:<28} {:>3} x {:>8} = {:>10}",
            item.id, item.title, item.quantity, item.price, item.line_price
        );
    }
    println!("Items: {}", view.item_count);
    println!("Subtotal: {}", view.subtotal);
}

/// Add `qty` of `id` to the cart.
///
/// # Errors
///
/// Returns an error if the product is not in the catalog or `qty` is zero.
pub fn add<S: KeyValueStorage>(
    ctx: &mut ShopContext<S>,
    id: &str,
    qty: u32,
) -> shelf_storefront::Result<()> {
    let new_qty = ctx.add_to_cart(id, qty)?;
    let title = ctx.cart().get(id).map_or(id, |line| line.title.as_str());
    println!("Added {title} to cart (quantity {new_qty}).");
    Ok(())
}

/// Remove the line for `id`.
pub fn remove<S: KeyValueStorage>(ctx: &mut ShopContext<S>, id: &str) {
    if ctx.remove_from_cart(id) {
        println!("Removed {id} from cart.");
    } else {
        println!("{id} is not in the cart.");
    }
}

/// Change the quantity of `id` by `delta`.
pub fn change_qty<S: KeyValueStorage>(ctx: &mut ShopContext<S>, id: &str, delta: i64) {
    match ctx.change_qty(id, delta) {
        QtyChange::Updated(qty) => println!("Quantity of {id} is now {qty}."),
        QtyChange::Removed => println!("Removed {id} from cart."),
        QtyChange::NotInCart => println!("{id} is not in the cart."),
    }
}

/// Empty the cart. A non-empty cart needs `yes`.
///
/// # Errors
///
/// Returns `CliError::NotConfirmed` when the cart has items and `yes` is
/// not set.
pub fn clear<S: KeyValueStorage>(ctx: &mut ShopContext<S>, yes: bool) -> Result<(), CliError> {
    let items = ctx.cart().item_count();
    if items > 0 && !yes {
        return Err(CliError::NotConfirmed { items });
    }

    ctx.clear_cart();
    println!("Cart cleared.");
    Ok(())
}
