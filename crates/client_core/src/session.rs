//! Page state for the storefront: the loaded catalog, the loading flag and
//! the cart, plus the view model both front ends render from.

use shared::{
    domain::{Cart, CartItem, Product},
    protocol::{to_order_payload, OrderRequest},
};
use tracing::{error, info, warn};

use crate::{CatalogService, OrderService, StorefrontError};

pub const PAGE_TITLE: &str = "Dessert Storefront";
pub const CART_HEADING: &str = "Your Cart";
pub const LOADING_MESSAGE: &str = "Loading products...";
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";
pub const SUBMIT_LABEL: &str = "Make Order";
pub const ADD_TO_CART_LABEL: &str = "Add to Cart";

/// How the last order submission settled.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted(serde_json::Value),
    Failed(StorefrontError),
}

impl From<Result<serde_json::Value, StorefrontError>> for SubmissionOutcome {
    fn from(result: Result<serde_json::Value, StorefrontError>) -> Self {
        match result {
            Ok(body) => Self::Accepted(body),
            Err(err) => Self::Failed(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorefrontSession {
    catalog: Vec<Product>,
    loading: bool,
    cart: Cart,
    catalog_error: Option<StorefrontError>,
    last_submission: Option<SubmissionOutcome>,
    coupon_code: Option<String>,
}

impl Default for StorefrontSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontSession {
    /// A freshly mounted page: loading, empty catalog, empty cart.
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            loading: true,
            cart: Cart::new(),
            catalog_error: None,
            last_submission: None,
            coupon_code: None,
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog_error(&self) -> Option<&StorefrontError> {
        self.catalog_error.as_ref()
    }

    pub fn last_submission(&self) -> Option<&SubmissionOutcome> {
        self.last_submission.as_ref()
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Attaches a coupon to later orders. A blank code clears it.
    pub fn set_coupon_code(&mut self, code: Option<&str>) {
        self.coupon_code = code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);
    }

    /// Settles the initial fetch. On failure the catalog stays empty and the
    /// error is only logged and recorded; the page still leaves loading.
    ///
    /// The loading flag flips once: a second result is ignored.
    pub fn apply_catalog(&mut self, result: Result<Vec<Product>, StorefrontError>) {
        if !self.loading {
            warn!("catalog already settled; ignoring late result");
            return;
        }
        match result {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                self.catalog = products;
            }
            Err(err) => {
                error!(error = %err, "Error fetching products");
                self.catalog_error = Some(err);
            }
        }
        self.loading = false;
    }

    pub async fn load_catalog(&mut self, catalog: &dyn CatalogService) {
        let result = catalog.fetch_catalog().await;
        self.apply_catalog(result);
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart = self.cart.merge_add(product);
    }

    /// Adds the catalog product whose id renders as `raw_id`. Returns the
    /// product added, or `None` when the catalog has no such id.
    pub fn add_to_cart_by_id(&mut self, raw_id: &str) -> Option<Product> {
        let product = self
            .catalog
            .iter()
            .find(|product| product.id.matches(raw_id))
            .cloned()?;
        self.add_to_cart(&product);
        Some(product)
    }

    /// The payload for the current cart, or `None` when there is nothing to
    /// order.
    pub fn order_request(&self) -> Option<OrderRequest> {
        if self.cart.is_empty() {
            None
        } else {
            Some(to_order_payload(&self.cart).with_coupon(self.coupon_code()))
        }
    }

    /// Records how a submission settled. The cart is kept either way and the
    /// loading flag is not touched.
    pub fn apply_submission(&mut self, outcome: SubmissionOutcome) {
        match &outcome {
            SubmissionOutcome::Accepted(body) => {
                let order_id = body.get("id").and_then(serde_json::Value::as_str);
                info!(order_id, response = %body, "order accepted");
            }
            SubmissionOutcome::Failed(err) => {
                error!(error = %err, "Error submitting order");
            }
        }
        self.last_submission = Some(outcome);
    }

    /// Sends the cart. Does nothing when the cart is empty.
    pub async fn submit_order(
        &mut self,
        orders: &dyn OrderService,
    ) -> Option<&SubmissionOutcome> {
        let request = self.order_request()?;
        let outcome = SubmissionOutcome::from(orders.submit_order(&request).await);
        self.apply_submission(outcome);
        self.last_submission.as_ref()
    }

    pub fn view(&self) -> StorefrontView<'_> {
        if self.loading {
            return StorefrontView::Loading;
        }
        let cart = if self.cart.is_empty() {
            CartSection::Empty
        } else {
            CartSection::Items(self.cart.items())
        };
        StorefrontView::Ready {
            cart,
            products: &self.catalog,
        }
    }
}

/// What the page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum StorefrontView<'a> {
    /// Only the loading message; no cart and no products.
    Loading,
    Ready {
        cart: CartSection<'a>,
        products: &'a [Product],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartSection<'a> {
    Empty,
    Items(&'a [CartItem]),
}

impl CartSection<'_> {
    /// The submit control exists only next to a non-empty cart.
    pub fn offers_submit(&self) -> bool {
        matches!(self, CartSection::Items(_))
    }
}
