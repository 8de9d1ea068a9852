//! Route definitions for the `/ai` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /describe  -> describe (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/describe", post(ai::describe))
}
