use super::*;
use axum::{body, body::Body, http::Request, response::Response};
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState {
        api: ApiContext::new(Storage::seeded().await),
    };
    build_router(Arc::new(state), &Settings::default()).expect("router")
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn post_order(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/order")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app().await;
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn lists_products_as_plain_json_array() {
    let app = test_app().await;
    let request = Request::get("/api/product")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<serde_json::Value> = json_body(response).await;
    assert_eq!(products.len(), 10);
    assert_eq!(
        products[0],
        serde_json::json!({
            "id": "10",
            "name": "Chicken Waffle",
            "category": "Waffle",
            "price": 1.0
        })
    );
}

#[tokio::test]
async fn product_lookup_reports_unknown_ids() {
    let app = test_app().await;

    let found = app
        .clone()
        .oneshot(Request::get("/api/product/4").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(found.status(), StatusCode::OK);
    let body: ProductLookupResponse = json_body(found).await;
    assert_eq!(body.products[0].name, "Classic Tiramisu");
    assert!(body.not_found.is_empty());

    let missing = app
        .oneshot(Request::get("/api/product/nope").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(missing).await;
    assert_eq!(body["notFound"], serde_json::json!(["nope"]));
}

#[tokio::test]
async fn created_order_round_trips_through_lookup() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(post_order(serde_json::json!({
            "items": [
                { "productId": "1", "quantity": 2 },
                { "productId": 5, "quantity": 1 }
            ]
        })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: OrderConfirmation = json_body(response).await;
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.products[1].name, "Pistachio Baklava");

    let lookup = Request::get(format!("/api/order/{}", created.id))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(lookup).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: OrderConfirmation = json_body(response).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.items, created.items);
}

#[tokio::test]
async fn empty_order_is_bad_request() {
    let app = test_app().await;
    let response = app
        .oneshot(post_order(serde_json::json!({ "items": [] })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn malformed_order_body_is_bad_request() {
    let app = test_app().await;
    let request = Request::post("/api/order")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.message, "invalid request body");
}

#[tokio::test]
async fn unknown_order_id_is_not_found() {
    let app = test_app().await;
    for path in [
        "/api/order/not-a-uuid".to_string(),
        format!("/api/order/{}", OrderId::new_v4()),
    ] {
        let response = app
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn answers_cors_preflight_for_configured_origin() {
    let app = test_app().await;
    let request = Request::options("/api/order")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn oversized_order_body_is_rejected() {
    let state = AppState {
        api: ApiContext::new(Storage::seeded().await),
    };
    let settings = Settings {
        max_body_bytes: 16,
        ..Settings::default()
    };
    let app = build_router(Arc::new(state), &settings).expect("router");

    let body = serde_json::json!({
        "items": [{ "productId": "1", "quantity": 1 }]
    })
    .to_string();
    let request = Request::post("/api/order")
        .header("content-type", "application/json")
        .header("content-length", body.len())
        .body(Body::from(body))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn oversized_streamed_order_body_is_rejected() {
    let state = AppState {
        api: ApiContext::new(Storage::seeded().await),
    };
    let settings = Settings {
        max_body_bytes: 16,
        ..Settings::default()
    };
    let app = build_router(Arc::new(state), &settings).expect("router");

    let chunks = vec![
        Ok::<_, std::io::Error>(axum::body::Bytes::from_static(b"{\"items\":[{\"productId\":")),
        Ok(axum::body::Bytes::from_static(b"\"1\",\"quantity\":1}]}")),
    ];
    let request = Request::post("/api/order")
        .header("content-type", "application/json")
        .body(Body::from_stream(tokio_stream::iter(chunks)))
        .expect("request");
    assert!(request.headers().get("content-length").is_none());

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.message, "request body too large");
}

#[test]
fn rejects_unparseable_allowed_origin() {
    assert!(cors_layer("http://bad\norigin").is_err());
}
