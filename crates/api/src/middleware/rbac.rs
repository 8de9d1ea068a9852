//! Gate-stage extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects tokens issued for a
//! different stage of the credential gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::gate::GateStep;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an access token (PIN step completed). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.stage != GateStep::Authenticated {
            return Err(AppError::Core(CoreError::Forbidden(
                "PIN verification required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires a challenge token (password step completed, PIN pending).
pub struct RequirePinChallenge(pub AuthUser);

impl FromRequestParts<AppState> for RequirePinChallenge {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.stage != GateStep::Pin {
            return Err(AppError::Core(CoreError::Forbidden(
                "A PIN challenge token is required".into(),
            )));
        }
        Ok(RequirePinChallenge(user))
    }
}
