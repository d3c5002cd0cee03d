use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Cart, OrderId, Product, ProductId};

pub fn product_route() -> &'static str {
    "/api/product"
}

pub fn order_route() -> &'static str {
    "/api/order"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl OrderRequest {
    pub fn new(items: Vec<OrderLine>) -> Self {
        Self {
            items,
            coupon_code: None,
        }
    }

    /// Attaches a coupon code. Blank codes are dropped.
    pub fn with_coupon(mut self, code: Option<&str>) -> Self {
        self.coupon_code = code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);
        self
    }
}

/// Strips a cart down to what the order service needs: id and quantity per
/// line, in cart order. Prices are re-derived server side.
pub fn to_order_payload(cart: &Cart) -> OrderRequest {
    OrderRequest::new(
        cart.items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /api/product/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookupResponse {
    pub products: Vec<Product>,
    pub not_found: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mirrors_cart_lines() {
        let waffle = Product::new(1_i64, "Waffle", "Waffle", 6.5);
        let pie = Product::new(2_i64, "Pie", "Pie", 5.0);
        let cart = Cart::new()
            .merge_add(&waffle)
            .merge_add(&pie)
            .merge_add(&waffle);

        let payload = to_order_payload(&cart);
        assert_eq!(payload.items.len(), cart.len());
        for (line, item) in payload.items.iter().zip(cart.items()) {
            assert_eq!(line.product_id, item.product.id);
            assert_eq!(line.quantity, item.quantity);
        }
    }

    #[test]
    fn payload_serializes_without_name_or_price() {
        let cart = Cart::new().merge_add(&Product::new("3", "Macaron", "Macaron", 8.0));
        let json = serde_json::to_value(to_order_payload(&cart)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "items": [{ "productId": "3", "quantity": 1 }] })
        );
    }

    #[test]
    fn coupon_code_is_optional_on_the_wire() {
        let without: OrderRequest =
            serde_json::from_str(r#"{"items":[{"productId":"1","quantity":1}]}"#).expect("json");
        assert_eq!(without.coupon_code, None);

        let with: OrderRequest = serde_json::from_str(
            r#"{"couponCode":"HAPPYHRS","items":[{"productId":"1","quantity":1}]}"#,
        )
        .expect("json");
        assert_eq!(with.coupon_code.as_deref(), Some("HAPPYHRS"));

        let json = serde_json::to_value(with.clone().with_coupon(Some("  "))).expect("json");
        assert!(json.get("couponCode").is_none());
    }

    #[test]
    fn empty_cart_yields_empty_payload() {
        assert!(to_order_payload(&Cart::new()).items.is_empty());
    }
}
