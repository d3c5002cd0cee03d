use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use server_api::{create_order, get_order, list_products, lookup_products, ApiContext};
use shared::{
    domain::{OrderId, Product},
    error::{ApiError, ErrorCode},
    protocol::{order_route, product_route, OrderConfirmation, OrderRequest, ProductLookupResponse},
};
use storage::Storage;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, Settings};

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let storage = Storage::seeded().await;
    let state = AppState {
        api: ApiContext::new(storage),
    };
    let app = build_router(Arc::new(state), &settings)?;

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, allowed_origin = %settings.allowed_origin, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, settings: &Settings) -> anyhow::Result<Router> {
    let product_by_id = format!("{}/:id", product_route());
    let order_by_id = format!("{}/:id", order_route());

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .route(product_route(), get(http_list_products))
        .route(&product_by_id, get(http_get_product))
        .route(order_route(), post(http_create_order))
        .route(&order_by_id, get(http_get_order))
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(cors_layer(&settings.allowed_origin)?)
        .with_state(state))
}

fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("invalid allowed origin '{allowed_origin}'"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn into_http(err: ApiError) -> HttpError {
    (status_for(err.code), Json(err))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, HttpError> {
    list_products(&state.api).await.map(Json).map_err(into_http)
}

async fn http_get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductLookupResponse>, HttpError> {
    lookup_products(&state.api, &[id])
        .await
        .map(Json)
        .map_err(into_http)
}

async fn http_create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderConfirmation>), HttpError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejecting order body");
        // A streamed body only hits the size limit while being buffered.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ApiError::validation("request body too large")),
            );
        }
        into_http(ApiError::validation("invalid request body"))
    })?;

    let confirmation = create_order(&state.api, request).await.map_err(into_http)?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

async fn http_get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderConfirmation>, HttpError> {
    let order_id = Uuid::parse_str(&id)
        .map(OrderId)
        .map_err(|_| into_http(ApiError::not_found("order not found")))?;
    get_order(&state.api, order_id)
        .await
        .map(Json)
        .map_err(into_http)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
