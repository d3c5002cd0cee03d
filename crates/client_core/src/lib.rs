use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Product, protocol::OrderRequest};
use tracing::{debug, instrument};

pub mod config;
pub mod error;
pub mod session;

pub use config::{ClientSettings, DEFAULT_CATALOG_URL, DEFAULT_ORDER_URL};
pub use error::StorefrontError;
pub use session::{
    CartSection, StorefrontSession, StorefrontView, SubmissionOutcome, EMPTY_CART_MESSAGE,
    LOADING_MESSAGE, SUBMIT_LABEL,
};

/// Source of the product list.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, StorefrontError>;
}

/// Accepts order payloads. The accepted body is returned as-is; its shape
/// belongs to the order service.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn submit_order(
        &self,
        request: &OrderRequest,
    ) -> Result<serde_json::Value, StorefrontError>;
}

/// HTTP implementation of both services.
#[derive(Clone)]
pub struct StorefrontClient {
    http: Client,
    settings: ClientSettings,
}

impl StorefrontClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait]
impl CatalogService for StorefrontClient {
    #[instrument(skip(self), fields(endpoint = %self.settings.catalog_url))]
    async fn fetch_catalog(&self) -> Result<Vec<Product>, StorefrontError> {
        let endpoint = self.settings.catalog_url.as_str();
        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|err| StorefrontError::fetch(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::Http {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|err| StorefrontError::fetch(endpoint, err))?;
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}

#[async_trait]
impl OrderService for StorefrontClient {
    #[instrument(skip(self, request), fields(endpoint = %self.settings.order_url, lines = request.items.len()))]
    async fn submit_order(
        &self,
        request: &OrderRequest,
    ) -> Result<serde_json::Value, StorefrontError> {
        let endpoint = self.settings.order_url.as_str();
        // `.json` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| StorefrontError::fetch(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|err| StorefrontError::fetch(endpoint, err))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
