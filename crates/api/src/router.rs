//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests (`tests/common/mod.rs`) use the exact same middleware
//! stack.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = build_cors_layer(config);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS middleware layer from server configuration.
///
/// Origins that do not parse as header values are skipped with a warning,
/// and so is `*`: credentials are allowed, which rules out a wildcard.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(&config.cors_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn allowed_origins(configured: &[String]) -> Vec<HeaderValue> {
    configured
        .iter()
        .filter_map(|o| {
            if o.trim() == "*" {
                tracing::warn!(
                    origin = %o,
                    "Ignoring wildcard CORS origin, list explicit origins instead"
                );
                return None;
            }
            match o.parse() {
                Ok(origin) => Some(origin),
                Err(e) => {
                    tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
    use axum::http::Request;
    use axum::routing::get;
    use folio_genai::GenAiConfig;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::identity::IdentityConfig;
    use crate::auth::jwt::JwtConfig;

    const SITE: &str = "https://folio.example.com";

    fn config_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            request_timeout_secs: 30,
            database_url: None,
            admin_pin: "000000".to_string(),
            jwt: JwtConfig {
                secret: "router-test-secret".to_string(),
                challenge_token_expiry_mins: 5,
                access_token_expiry_mins: 60,
            },
            identity: IdentityConfig::default(),
            genai: GenAiConfig::default(),
        }
    }

    #[test]
    fn wildcard_and_unparseable_origins_are_dropped() {
        let configured: Vec<String> = ["*", SITE, "bad\norigin", " * "]
            .iter()
            .map(|o| o.to_string())
            .collect();
        assert_eq!(allowed_origins(&configured), vec![HeaderValue::from_static(SITE)]);
    }

    #[tokio::test]
    async fn wildcard_origin_does_not_break_startup() {
        let config = config_with_origins(&["*", SITE]);
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(build_cors_layer(&config));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/ping")
            .header(ORIGIN, SITE)
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(SITE))
        );
    }

    #[test]
    fn only_wildcard_configured_allows_no_origin() {
        let configured = vec!["*".to_string()];
        assert!(allowed_origins(&configured).is_empty());
        build_cors_layer(&config_with_origins(&["*"]));
    }
}
