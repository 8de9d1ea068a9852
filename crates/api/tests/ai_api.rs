//! HTTP-level integration tests for AI description drafting.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{admin_token, body_json, post_json, post_json_auth, EchoGenerator};
use folio_genai::writer::MISSING_CREDENTIAL_MESSAGE;
use folio_genai::DescriptionWriter;
use serde_json::json;

#[tokio::test]
async fn without_credential_returns_configuration_message() {
    let app = common::build_test_app();
    let token = admin_token(app.router.clone()).await;

    let body = json!({ "title": "Neon City Drifters", "tags": ["TVC"] });
    let response = post_json_auth(app.router, "/api/v1/ai/describe", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], MISSING_CREDENTIAL_MESSAGE);
}

#[tokio::test]
async fn prompt_carries_title_and_joined_tags() {
    let writer = DescriptionWriter::with_generator(Arc::new(EchoGenerator), "test-model");
    let app = common::build_test_app_with_writer(writer);
    let token = admin_token(app.router.clone()).await;

    let body = json!({ "title": "Neon City Drifters", "tags": ["TVC", "Color Grading"] });
    let response = post_json_auth(app.router, "/api/v1/ai/describe", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let description = json["data"]["description"].as_str().unwrap();
    assert!(description.starts_with("[test-model]"));
    assert!(description.contains("Neon City Drifters"));
    assert!(description.contains("TVC, Color Grading"));
}

#[tokio::test]
async fn describe_requires_admin() {
    let app = common::build_test_app();
    let body = json!({ "title": "Neon City Drifters" });
    let response = post_json(app.router, "/api/v1/ai/describe", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
