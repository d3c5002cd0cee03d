use super::*;
use client_core::StorefrontSession;
use shared::domain::Product;

fn baklava() -> Product {
    Product::new(5_i64, "Pistachio Baklava", "Baklava", 4.0)
}

#[test]
fn loading_page_shows_only_the_message() {
    let session = StorefrontSession::new();
    assert_eq!(render_view(&session.view()), "Loading products...");
}

#[test]
fn empty_cart_has_message_and_no_submit() {
    let mut session = StorefrontSession::new();
    session.apply_catalog(Ok(vec![baklava()]));

    let page = render_view(&session.view());
    assert!(page.starts_with("Dessert Storefront"));
    assert!(page.contains("Your cart is empty"));
    assert!(!page.contains("Make Order"));
    assert!(page.contains("Pistachio Baklava"));
    assert!(page.contains("$4.00"));
    assert!(page.contains("[Add to Cart]"));
}

#[test]
fn cart_lines_show_quantity_and_submit() {
    let mut session = StorefrontSession::new();
    session.apply_catalog(Ok(vec![baklava()]));
    session.add_to_cart(&baklava());
    session.add_to_cart(&baklava());

    let page = render_view(&session.view());
    assert!(page.contains("Pistachio Baklava x2 ($4.00 each)"));
    assert!(page.contains("[Make Order]"));
    assert!(!page.contains("Your cart is empty"));
}
