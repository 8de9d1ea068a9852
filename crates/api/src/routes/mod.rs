pub mod ai;
pub mod auth;
pub mod health;
pub mod profile;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     password step (public)
/// /auth/pin                       PIN step (challenge token)
///
/// /profile                        get (public), update (admin)
///
/// /projects                       list (public), create, bulk save (admin)
/// /projects/{id}                  get (public), update, delete (admin)
///
/// /ai/describe                    draft a description (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/projects", projects::router())
        .nest("/ai", ai::router())
}
