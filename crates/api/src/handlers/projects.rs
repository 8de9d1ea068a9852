//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Datelike;
use folio_core::error::CoreError;
use folio_core::ids::timestamp_id;
use folio_core::models::Project;
use folio_core::types::DocId;
use folio_core::validation::{validate_project, validate_projects};
use folio_core::video::{player_for, VideoPlayer};
use folio_db::repositories::{ProjectRepo, SaveReport};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects`. Everything else comes from the template.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProjectRequest {
    /// Defaults to the current year.
    pub year: Option<i32>,
}

/// How one clip of a project is presented.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPlayer {
    pub sub_project_id: DocId,
    pub player: VideoPlayer,
}

/// A project together with its clip players.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub players: Vec<ClipPlayer>,
}

impl From<Project> for ProjectDetail {
    fn from(project: Project) -> Self {
        let players = project
            .sub_projects
            .iter()
            .map(|sub| ClipPlayer {
                sub_project_id: sub.id.clone(),
                player: player_for(&sub.video_url),
            })
            .collect();
        Self { project, players }
    }
}

/// GET /api/v1/projects
///
/// Sorted by year, newest first. Falls back to the seed list when the store
/// is empty or unreachable.
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<Project>>> {
    let listing = ProjectRepo::list(state.store.as_ref()).await;
    tracing::debug!(source = ?listing.source, count = listing.projects.len(), "Listed projects");
    Json(DataResponse {
        data: listing.projects,
    })
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(state.store.as_ref(), &id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: project.into(),
    }))
}

/// POST /api/v1/projects
///
/// Persist a blank project with a fresh timestamp id.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    input: Option<Json<CreateProjectRequest>>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let input = input.map(|Json(i)| i).unwrap_or_default();
    let year = input.year.unwrap_or_else(|| chrono::Utc::now().year());
    let project = Project::template(timestamp_id(), year);

    ProjectRepo::save(state.store.as_ref(), &project).await?;
    tracing::info!(project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects
///
/// Upsert every project in the body. Returns 200 when all writes succeeded,
/// 207 Multi-Status with the per-record report otherwise.
pub async fn save_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(projects): Json<Vec<Project>>,
) -> AppResult<(StatusCode, Json<DataResponse<SaveReport>>)> {
    validate_projects(&projects)?;

    let report = ProjectRepo::save_all(state.store.as_ref(), &projects).await;
    let status = if report.is_complete() {
        StatusCode::OK
    } else {
        tracing::warn!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "Bulk project save partially failed"
        );
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(DataResponse { data: report })))
}

/// PUT /api/v1/projects/{id}
///
/// Full overwrite. A body without an id takes the path id; a different id
/// is rejected.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DocId>,
    Json(mut project): Json<Project>,
) -> AppResult<Json<DataResponse<Project>>> {
    if project.id.is_empty() {
        project.id = id.clone();
    } else if project.id != id {
        return Err(AppError::BadRequest(format!(
            "Body id '{}' does not match path id '{id}'",
            project.id
        )));
    }
    validate_project(&project)?;

    ProjectRepo::save(state.store.as_ref(), &project).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Deleting an id that does not exist succeeds.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DocId>,
) -> AppResult<StatusCode> {
    ProjectRepo::delete(state.store.as_ref(), &id).await?;
    tracing::info!(project_id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
