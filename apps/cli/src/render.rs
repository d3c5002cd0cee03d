use std::fmt::Write as _;

use client_core::{
    session::{ADD_TO_CART_LABEL, CART_HEADING, PAGE_TITLE},
    CartSection, StorefrontView, EMPTY_CART_MESSAGE, LOADING_MESSAGE,
    SUBMIT_LABEL,
};

/// Plain-text rendering of the page, cart above products.
pub fn render_view(view: &StorefrontView<'_>) -> String {
    let (cart, products) = match view {
        StorefrontView::Loading => return LOADING_MESSAGE.to_string(),
        StorefrontView::Ready { cart, products } => (cart, products),
    };

    let mut out = format!("{PAGE_TITLE}\n\n{CART_HEADING}\n");
    match cart {
        CartSection::Empty => {
            let _ = writeln!(out, "  {EMPTY_CART_MESSAGE}");
        }
        CartSection::Items(items) => {
            for item in items.iter() {
                let _ = writeln!(
                    out,
                    "  {} x{} ({} each)",
                    item.product.name,
                    item.quantity,
                    item.product.price_label()
                );
            }
            let _ = writeln!(out, "  [{SUBMIT_LABEL}]");
        }
    }

    out.push_str("\nProducts\n");
    for product in products.iter() {
        let _ = writeln!(
            out,
            "  {:>3}  {:<28} {:<12} {:>8}  [{ADD_TO_CART_LABEL}]",
            product.id.to_string(),
            product.name,
            product.category,
            product.price_label()
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
