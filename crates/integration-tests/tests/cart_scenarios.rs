//! Cart and checkout scenarios across page reloads.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shelf_core::Price;
use shelf_storefront::ShopEvent;
use shelf_storefront::cart::{CartError, QtyChange};
use shelf_storefront::checkout::CheckoutError;
use shelf_integration_tests::TestShop;

// =============================================================================
// Adding & Quantities
// =============================================================================

#[test]
fn test_repeated_add_merges_into_one_line() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();

    ctx.add_to_cart("101", 1).unwrap();
    ctx.add_to_cart("101", 2).unwrap();

    assert_eq!(ctx.cart().len(), 1);
    assert_eq!(ctx.cart().get("101").unwrap().qty, 3);
    assert_eq!(ctx.subtotal(), Price::new(3297));
}

#[test]
fn test_large_negative_change_removes_line() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("101", 3).unwrap();

    assert_eq!(ctx.change_qty("101", -5), QtyChange::Removed);
    assert!(ctx.cart().is_empty());
    assert_eq!(ctx.subtotal(), Price::ZERO);

    let reloaded = shop.open();
    assert!(reloaded.cart().is_empty());
}

#[test]
fn test_unknown_product_leaves_cart_untouched() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("102", 1).unwrap();
    let before = shop.read_raw_cart().unwrap();

    let err = ctx.add_to_cart("999", 1).unwrap_err();
    assert!(matches!(err, CartError::UnknownProduct(ref id) if id.as_str() == "999"));
    assert_eq!(ctx.cart().len(), 1);
    assert_eq!(shop.read_raw_cart().unwrap(), before);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let shop = TestShop::new().unwrap();
    {
        let mut ctx = shop.open();
        ctx.add_to_cart("101", 2).unwrap();
        ctx.add_to_cart("103", 1).unwrap();
        ctx.change_qty("103", 4);
    }

    let ctx = shop.open();
    let ids: Vec<&str> = ctx.cart().lines().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["101", "103"]);
    assert_eq!(ctx.cart().get("103").unwrap().qty, 5);
    assert_eq!(ctx.cart().item_count(), 7);
}

#[test]
fn test_persisted_layout() {
    let shop = TestShop::new().unwrap();
    shop.open().add_to_cart("101", 2).unwrap();

    let raw = shop.read_raw_cart().unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = &value.as_array().unwrap()[0];
    assert_eq!(line["id"], "101");
    assert_eq!(line["title"], "Pineapple Soap");
    assert_eq!(line["price"], 1099);
    assert_eq!(line["qty"], 2);
    assert_eq!(line["variantRef"], "44012");
    assert!(line["image"].as_str().unwrap().ends_with("soap.jpg"));
}

#[test]
fn test_corrupt_stored_cart_loads_empty() {
    for raw in ["not json", "{\"101\": 1}", "42", "null"] {
        let shop = TestShop::new().unwrap();
        shop.write_raw_cart(raw).unwrap();

        let mut ctx = shop.open();
        assert!(ctx.cart().is_empty(), "{raw} should load as empty");

        // The next mutation overwrites the bad value
        ctx.add_to_cart("101", 1).unwrap();
        assert_eq!(shop.open().cart().len(), 1);
    }
}

#[test]
fn test_hand_edited_cart_is_normalized() {
    let shop = TestShop::new().unwrap();
    shop.write_raw_cart(
        r#"[
            {"id": "101", "title": "Pineapple Soap", "price": 1099, "qty": 2},
            {"id": "101", "title": "Duplicate", "price": 1, "qty": 9},
            {"id": "102", "title": "Coconut Body Butter", "price": 1899, "qty": 0},
            {"title": "No id"},
            "junk"
        ]"#,
    )
    .unwrap();

    let ctx = shop.open();
    assert_eq!(ctx.cart().len(), 1);
    assert_eq!(ctx.cart().get("101").unwrap().title, "Pineapple Soap");
    assert_eq!(ctx.subtotal(), Price::new(2198));
}

#[test]
fn test_cart_lines_keep_snapshot_prices() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("104", 1).unwrap();

    let mut repriced = shop.open().catalog().products().to_vec();
    for product in &mut repriced {
        product.price = Price::new(1);
    }
    ctx.set_catalog(shelf_storefront::catalog::CatalogIndex::from_products(&repriced));

    assert_eq!(ctx.subtotal(), Price::new(1499));
    ctx.add_to_cart("104", 1).unwrap();
    assert_eq!(ctx.subtotal(), Price::new(2998));
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_checkout_link_skips_lines_without_variant() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("101", 2).unwrap();
    ctx.add_to_cart("105", 1).unwrap();
    ctx.add_to_cart("102", 1).unwrap();

    let url = ctx.checkout().unwrap();
    assert_eq!(
        url.as_str(),
        "https://shop.example.com/cart/44012:2,44013:1"
    );
}

#[test]
fn test_checkout_without_variants_goes_to_store() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("106", 1).unwrap();

    let url = ctx.checkout().unwrap();
    assert_eq!(url, shop.config().store_origin);
}

#[test]
fn test_checkout_empty_cart_is_blocked() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    ctx.add_to_cart("101", 1).unwrap();
    ctx.clear_cart();

    assert!(matches!(ctx.checkout(), Err(CheckoutError::EmptyCart)));
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn test_badge_count_follows_events() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    let mut events = ctx.subscribe();

    ctx.add_to_cart("101", 2).unwrap();
    ctx.add_to_cart("102", 1).unwrap();
    ctx.clear_cart();

    let counts: Vec<u32> = std::iter::from_fn(|| events.try_recv().ok())
        .filter_map(|event| match event {
            ShopEvent::CartUpdated { item_count } => Some(item_count),
            ShopEvent::WishlistUpdated { .. } => None,
        })
        .collect();
    assert_eq!(counts, [2, 3, 0]);
}
