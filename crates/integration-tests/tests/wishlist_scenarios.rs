//! Wishlist scenarios across page reloads.

#![allow(clippy::unwrap_used)]

use shelf_integration_tests::TestShop;

#[test]
fn test_toggle_twice_restores_membership() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();

    assert!(ctx.toggle_wishlist("201"));
    assert!(ctx.in_wishlist("201"));
    assert!(shop.open().in_wishlist("201"));

    assert!(!ctx.toggle_wishlist("201"));
    assert!(!ctx.in_wishlist("201"));
    assert!(!shop.open().in_wishlist("201"));
}

#[test]
fn test_wishlist_order_and_reload() {
    let shop = TestShop::new().unwrap();
    {
        let mut ctx = shop.open();
        ctx.toggle_wishlist("103");
        ctx.toggle_wishlist("101");
        ctx.toggle_wishlist("105");
        ctx.toggle_wishlist("101");
    }

    let ctx = shop.open();
    let ids: Vec<&str> = ctx.wishlist().ids().iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["103", "105"]);
}

#[test]
fn test_corrupt_wishlist_loads_empty() {
    let shop = TestShop::new().unwrap();
    shop.write_raw_wishlist("{\"ids\": [\"101\"]}").unwrap();
    assert!(shop.open().wishlist().is_empty());
}

#[test]
fn test_duplicate_ids_collapse_on_load() {
    let shop = TestShop::new().unwrap();
    shop.write_raw_wishlist(r#"["101", "102", "101", 7]"#).unwrap();

    let ctx = shop.open();
    assert_eq!(ctx.wishlist().len(), 2);
}

#[test]
fn test_wishlist_view_marks_cart_lines() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.toggle_wishlist("101");
    ctx.toggle_wishlist("102");
    ctx.toggle_wishlist("retired");
    ctx.add_to_cart("102", 1).unwrap();

    let view = ctx.wishlist_view();
    let in_cart: Vec<(&str, bool)> = view
        .items
        .iter()
        .map(|card| (card.id.as_str(), card.in_cart))
        .collect();
    assert_eq!(in_cart, [("101", false), ("102", true)]);
    assert_eq!(view.missing, ["retired"]);
}

#[test]
fn test_cart_and_wishlist_are_independent() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.toggle_wishlist("101");
    ctx.add_to_cart("101", 1).unwrap();
    ctx.clear_cart();

    let ctx = shop.open();
    assert!(ctx.cart().is_empty());
    assert!(ctx.in_wishlist("101"));
    assert!(shop.path().join("store").is_dir());
}
