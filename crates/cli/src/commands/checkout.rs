//! Checkout command.

use shelf_storefront::ShopContext;
use shelf_storefront::storage::KeyValueStorage;

/// Print the hosted checkout link for the cart.
///
/// # Errors
///
/// Returns an error when the cart is empty.
pub fn run<S: KeyValueStorage>(ctx: &ShopContext<S>) -> shelf_storefront::Result<()> {
    let url = ctx.checkout()?;
    println!("{url}");
    Ok(())
}
