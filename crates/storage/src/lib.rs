use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use shared::{
    domain::{OrderId, Product, ProductId},
    protocol::OrderLine,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

mod seed;

pub use seed::seed_products;

const CENTS_PER_UNIT: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("no products found for ids {0:?}")]
    ProductsNotFound(Vec<String>),
    #[error("product {0} not found")]
    ProductNotFound(String),
    #[error("order {0} already exists")]
    DuplicateOrder(OrderId),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Catalog row. Prices are kept in whole cents to avoid float drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
}

impl StoredProduct {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price_cents,
        }
    }

    pub fn to_product(&self) -> Product {
        Product {
            id: ProductId::Text(self.id.clone()),
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price_cents as f64 / CENTS_PER_UNIT as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub order_id: OrderId,
    pub lines: Vec<OrderLine>,
    /// Catalog snapshot of every ordered product, taken at creation time.
    pub products: Vec<StoredProduct>,
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// In-memory product and order store. Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct Storage {
    products: Arc<RwLock<HashMap<String, StoredProduct>>>,
    orders: Arc<RwLock<HashMap<OrderId, StoredOrder>>>,
    coupon_matches: Arc<RwLock<HashMap<String, usize>>>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seeded() -> Self {
        let storage = Self::new();
        for product in seed_products() {
            storage.insert_product(product).await;
        }
        storage
    }

    pub async fn insert_product(&self, product: StoredProduct) {
        debug!(product_id = %product.id, "storing product");
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
    }

    /// All products, sorted by name.
    pub async fn list_products(&self) -> Vec<StoredProduct> {
        let products = self.products.read().await;
        let mut listed: Vec<StoredProduct> = products.values().cloned().collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        listed
    }

    pub async fn product_by_id(&self, id: &str) -> Result<StoredProduct> {
        self.products
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::ProductNotFound(id.to_string()))
    }

    /// Returns the products that exist, in request order, plus the ids that
    /// did not. Fails only when none of the ids matched.
    pub async fn products_by_ids(
        &self,
        ids: &[String],
    ) -> Result<(Vec<StoredProduct>, Vec<String>)> {
        let products = self.products.read().await;
        let mut found = Vec::with_capacity(ids.len());
        let mut missed = Vec::new();
        for id in ids {
            match products.get(id) {
                Some(product) => found.push(product.clone()),
                None => missed.push(id.clone()),
            }
        }

        if found.is_empty() {
            return Err(StorageError::ProductsNotFound(missed));
        }
        Ok((found, missed))
    }

    pub async fn create_order(&self, order: StoredOrder) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.order_id) {
            return Err(StorageError::DuplicateOrder(order.order_id));
        }
        orders.insert(order.order_id, order);
        Ok(())
    }

    pub async fn order_by_id(&self, order_id: OrderId) -> Result<StoredOrder> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(StorageError::OrderNotFound(order_id))
    }

    /// Cached number of coupon files a code was found in.
    pub async fn coupon_match_count(&self, code: &str) -> Option<usize> {
        self.coupon_matches.read().await.get(code).copied()
    }

    /// Caches a coupon file count. The first count recorded for a code wins.
    pub async fn record_coupon_match_count(&self, code: &str, file_count: usize) {
        let mut matches = self.coupon_matches.write().await;
        if matches.contains_key(code) {
            debug!(code, "coupon count already cached");
            return;
        }
        matches.insert(code.to_string(), file_count);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
