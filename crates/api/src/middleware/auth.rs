//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::gate::GateStep;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Gate token holder extracted from a JWT Bearer token in the `Authorization` header.
///
/// Only proves the token is genuine and unexpired. Use the extractors in
/// [`super::rbac`] to require a particular gate stage.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Email the password step was completed for (from `claims.sub`).
    pub email: String,
    /// Gate step reached.
    pub stage: GateStep,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            email: claims.sub,
            stage: claims.stage,
        })
    }
}
