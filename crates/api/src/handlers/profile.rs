//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::Json;
use folio_core::models::Profile;
use folio_core::video::{autoplay_embed_url, is_embeddable};
use folio_db::repositories::ProfileRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Profile plus the player source for the showreel modal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    /// Autoplaying embed URL, present only for embeddable showreels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showreel_embed_url: Option<String>,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        let showreel_embed_url = profile
            .hero_video_url
            .as_deref()
            .filter(|url| is_embeddable(url))
            .map(autoplay_embed_url);
        Self {
            profile,
            showreel_embed_url,
        }
    }
}

/// GET /api/v1/profile
///
/// Stored fields over seed defaults; never fails.
pub async fn get(State(state): State<AppState>) -> Json<DataResponse<ProfileView>> {
    let profile = ProfileRepo::get(state.store.as_ref()).await;
    Json(DataResponse {
        data: profile.into(),
    })
}

/// PUT /api/v1/profile
///
/// Overwrite the stored profile document.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(profile): Json<Profile>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    ProfileRepo::save(state.store.as_ref(), &profile).await?;
    tracing::info!("Profile saved");
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}
