use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product identifier as it appears on the wire.
///
/// Catalog services are free to use numeric ids or string slugs; the id is
/// echoed back in whichever representation it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Compares against user input without caring about the wire representation.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Number(n) => raw.trim().parse::<i64>().is_ok_and(|parsed| parsed == *n),
            Self::Text(text) => text == raw.trim(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    pub fn price_label(&self) -> String {
        format_price(self.price)
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// A product placed in the cart. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

/// Ordered cart contents, one entry per product id in first-add order.
///
/// The only way to grow a cart is [`Cart::merge_add`], which keeps ids unique
/// and quantities positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns a new cart with `product` added once.
    ///
    /// An existing line for the same id has its quantity bumped in place; a new
    /// product is appended with quantity 1.
    pub fn merge_add(&self, product: &Product) -> Cart {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Cart { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waffle() -> Product {
        Product::new(1_i64, "Waffle with Berries", "Waffle", 6.5)
    }

    fn baklava() -> Product {
        Product::new("5", "Pistachio Baklava", "Baklava", 4.0)
    }

    #[test]
    fn adding_same_product_twice_bumps_quantity() {
        let cart = Cart::new().merge_add(&waffle()).merge_add(&waffle());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn distinct_products_keep_first_add_order() {
        let cart = Cart::new()
            .merge_add(&baklava())
            .merge_add(&waffle())
            .merge_add(&baklava());
        let ids: Vec<String> = cart
            .items()
            .iter()
            .map(|item| item.product.id.to_string())
            .collect();
        assert_eq!(ids, vec!["5", "1"]);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn merge_add_leaves_original_cart_untouched() {
        let before = Cart::new().merge_add(&waffle());
        let after = before.merge_add(&waffle());
        assert_eq!(before.items()[0].quantity, 1);
        assert_eq!(after.items()[0].quantity, 2);
    }

    #[test]
    fn product_id_keeps_wire_representation() {
        let numeric: ProductId = serde_json::from_str("1").expect("numeric id");
        let text: ProductId = serde_json::from_str("\"1\"").expect("text id");
        assert_eq!(numeric, ProductId::Number(1));
        assert_eq!(text, ProductId::Text("1".into()));
        assert_eq!(serde_json::to_string(&numeric).expect("json"), "1");
        assert_eq!(serde_json::to_string(&text).expect("json"), "\"1\"");
        assert!(numeric.matches("1"));
        assert!(text.matches(" 1 "));
        assert!(!numeric.matches("one"));
    }

    #[test]
    fn formats_prices_with_two_decimals() {
        assert_eq!(format_price(6.5), "$6.50");
        assert_eq!(format_price(10.0), "$10.00");
        assert_eq!(waffle().price_label(), "$6.50");
    }
}
