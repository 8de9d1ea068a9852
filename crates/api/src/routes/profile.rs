//! Route definitions for the `/profile` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET /  -> get
/// PUT /  -> update (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profile::get).put(profile::update))
}
