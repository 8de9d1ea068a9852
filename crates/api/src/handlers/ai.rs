//! Handlers for the `/ai` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ai/describe`.
#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    pub description: String,
}

/// POST /api/v1/ai/describe
///
/// Always 200: a missing credential or provider failure yields the
/// corresponding fixed message as the description.
pub async fn describe(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<DescribeRequest>,
) -> Json<DataResponse<DescribeResponse>> {
    let keywords = input.tags.join(", ");
    let description = state
        .writer
        .generate_description(&input.title, &keywords)
        .await;
    Json(DataResponse {
        data: DescribeResponse { description },
    })
}
