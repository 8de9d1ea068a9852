//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use folio_db::store::UnconfiguredStore;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
    assert_eq!(json["ai_enabled"], false);
}

#[tokio::test]
async fn health_is_degraded_without_a_store() {
    let app = common::build_test_app_over(Arc::new(UnconfiguredStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app.router, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // UUID v4: 36 chars with hyphens.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/projects")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}
