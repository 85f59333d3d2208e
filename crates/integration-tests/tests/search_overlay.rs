//! Search-as-you-type: debounced queries against the catalog.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use shelf_integration_tests::TestShop;
use shelf_storefront::timer::{Debouncer, Toaster};

#[tokio::test(start_paused = true)]
async fn test_typing_burst_runs_one_search() {
    let shop = TestShop::new().unwrap();
    let ctx = shop.open();
    let (mut debouncer, mut queries) = Debouncer::new(ctx.config().search_debounce);

    for query in ["m", "ma", "man", "mang"] {
        debouncer.call(query.to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let settled = queries.recv().await.unwrap();
    assert_eq!(settled, "mang");
    let titles: Vec<String> = ctx
        .search_cards(&settled)
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, ["Mango Lip Balm"]);

    let more = tokio::time::timeout(Duration::from_secs(1), queries.recv()).await;
    assert!(more.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_closing_overlay_cancels_pending_search() {
    let shop = TestShop::new().unwrap();
    let ctx = shop.open();
    let (mut debouncer, mut queries) = Debouncer::new(ctx.config().search_debounce);

    debouncer.call("soap".to_string());
    assert!(debouncer.cancel());

    let more = tokio::time::timeout(Duration::from_secs(1), queries.recv()).await;
    assert!(more.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_add_toast_is_replaced_by_wishlist_toast() {
    let shop = TestShop::new().unwrap();
    let mut ctx = shop.open();
    let mut toaster = Toaster::new(ctx.config().toast_duration);

    ctx.add_to_cart("101", 1).unwrap();
    toaster.show("Added to cart");
    ctx.toggle_wishlist("101");
    toaster.show("Saved to wishlist");
    assert_eq!(toaster.current().as_deref(), Some("Saved to wishlist"));

    tokio::time::sleep(ctx.config().toast_duration + Duration::from_millis(1)).await;
    assert_eq!(toaster.current(), None);
}

#[test]
fn test_search_respects_limit() {
    let shop = TestShop::new().unwrap();
    let ctx = shop.open();

    assert!(ctx.search("").is_empty());
    assert!(ctx.search("   ").is_empty());
    assert!(ctx.search("e").len() <= ctx.config().search_limit);
}
