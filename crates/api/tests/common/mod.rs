#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::auth::identity::{IdentityConfig, IdentityProvider};
use folio_api::auth::jwt::JwtConfig;
use folio_api::auth::lockout::PinAttempts;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::gate::LoginFailure;
use folio_db::store::MemoryDocumentStore;
use folio_db::DocumentStore;
use folio_genai::{DescriptionWriter, GenAiConfig, GenAiError, TextGenerator};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const THROTTLED_EMAIL: &str = "throttled@example.com";
pub const ADMIN_PIN: &str = "246810";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        admin_pin: ADMIN_PIN.to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            challenge_token_expiry_mins: 5,
            access_token_expiry_mins: 60,
        },
        identity: IdentityConfig::default(),
        genai: GenAiConfig::default(),
    }
}

/// Accepts one email/password pair; one other email is always throttled.
pub struct StubIdentity;

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), LoginFailure> {
        match (email, password) {
            (ADMIN_EMAIL, ADMIN_PASSWORD) => Ok(()),
            (THROTTLED_EMAIL, _) => Err(LoginFailure::TooManyRequests),
            _ => Err(LoginFailure::InvalidCredentials),
        }
    }
}

/// Echoes the prompt back so tests can see what was sent.
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, GenAiError> {
        Ok(Some(format!("[{model}] {prompt}")))
    }
}

/// A router over an in-memory store the test can inspect and break.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
}

/// Full application router (same middleware stack as production) over an
/// empty in-memory store, the stub identity provider and a disabled writer.
pub fn build_test_app() -> TestApp {
    build_test_app_with_writer(DescriptionWriter::disabled())
}

pub fn build_test_app_with_writer(writer: DescriptionWriter) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryDocumentStore::new());

    let state = AppState {
        store: Arc::clone(&store) as Arc<dyn DocumentStore>,
        identity: Arc::new(StubIdentity),
        pin_attempts: Arc::new(PinAttempts::new()),
        writer,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

/// Router over an arbitrary store (e.g. the unconfigured one).
pub fn build_test_app_over(store: Arc<dyn DocumentStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        identity: Arc::new(StubIdentity),
        pin_attempts: Arc::new(PinAttempts::new()),
        writer: DescriptionWriter::disabled(),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Gate helpers
// ---------------------------------------------------------------------------

/// Complete the password step and return the challenge token.
pub async fn challenge_token(app: Router) -> String {
    let body = serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Complete both gate steps and return the access token.
pub async fn admin_token(app: Router) -> String {
    let challenge = challenge_token(app.clone()).await;
    let body = serde_json::json!({ "pin": ADMIN_PIN });
    let response = post_json_auth(app, "/api/v1/auth/pin", body, &challenge).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}
