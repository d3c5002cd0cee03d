use chrono::Utc;
use shared::{
    domain::{OrderId, Product},
    error::ApiError,
    protocol::{OrderConfirmation, OrderRequest, ProductLookupResponse},
};
use storage::{Storage, StorageError, StoredOrder};
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

pub async fn list_products(ctx: &ApiContext) -> Result<Vec<Product>, ApiError> {
    Ok(ctx
        .storage
        .list_products()
        .await
        .iter()
        .map(|product| product.to_product())
        .collect())
}

/// Looks up products by id. Unknown ids are reported, never an error.
pub async fn lookup_products(
    ctx: &ApiContext,
    ids: &[String],
) -> Result<ProductLookupResponse, ApiError> {
    match ctx.storage.products_by_ids(ids).await {
        Ok((found, not_found)) => Ok(ProductLookupResponse {
            products: found.iter().map(|product| product.to_product()).collect(),
            not_found,
        }),
        Err(StorageError::ProductsNotFound(not_found)) => Ok(ProductLookupResponse {
            products: Vec::new(),
            not_found,
        }),
        Err(err) => Err(internal(err)),
    }
}

/// Validates an order against the catalog, snapshots the ordered products and
/// stores it under a fresh id.
pub async fn create_order(
    ctx: &ApiContext,
    request: OrderRequest,
) -> Result<OrderConfirmation, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::validation("order must contain at least one item"));
    }

    let mut products = Vec::with_capacity(request.items.len());
    for line in &request.items {
        if line.quantity == 0 {
            return Err(ApiError::validation(format!(
                "quantity for product {} must be at least 1",
                line.product_id
            )));
        }

        let product_id = line.product_id.to_string();
        let product = ctx
            .storage
            .product_by_id(&product_id)
            .await
            .map_err(|err| match err {
                StorageError::ProductNotFound(id) => {
                    ApiError::validation(format!("product {id} not found"))
                }
                other => internal(other),
            })?;
        products.push(product);
    }

    let order = StoredOrder {
        order_id: OrderId::new_v4(),
        lines: request.items,
        products,
        coupon_code: request.coupon_code,
        created_at: Utc::now(),
    };
    let confirmation = confirmation_for(&order);

    ctx.storage.create_order(order).await.map_err(|err| {
        error!(%err, "failed to persist order");
        ApiError::internal("failed to create order")
    })?;

    info!(
        order_id = %confirmation.id,
        lines = confirmation.items.len(),
        coupon = confirmation.coupon_code.as_deref(),
        "order created"
    );
    Ok(confirmation)
}

pub async fn get_order(ctx: &ApiContext, order_id: OrderId) -> Result<OrderConfirmation, ApiError> {
    match ctx.storage.order_by_id(order_id).await {
        Ok(order) => Ok(confirmation_for(&order)),
        Err(StorageError::OrderNotFound(_)) => Err(ApiError::not_found("order not found")),
        Err(err) => Err(internal(err)),
    }
}

fn confirmation_for(order: &StoredOrder) -> OrderConfirmation {
    OrderConfirmation {
        id: order.order_id,
        items: order.lines.clone(),
        products: order
            .products
            .iter()
            .map(|product| product.to_product())
            .collect(),
        coupon_code: order.coupon_code.clone(),
        created_at: order.created_at,
    }
}

fn internal(err: StorageError) -> ApiError {
    ApiError::internal(err.to_string())
}
