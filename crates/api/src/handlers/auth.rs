//! Handlers for the `/auth` resource (password step, PIN step).
//!
//! Each request replays the relevant part of the [`CredentialGate`] state
//! machine; the token returned to the client records the step reached.

use axum::extract::State;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gate::{CredentialGate, GateStep, LoginFailure, PIN_MISMATCH_MESSAGE};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePinChallenge;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/pin`.
#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub pin: String,
}

/// Token returned by either gate step.
#[derive(Debug, Serialize)]
pub struct GateTokenResponse {
    pub token: String,
    /// Gate step the token was issued for.
    pub stage: GateStep,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check email + password with the identity provider. Returns a challenge
/// token for the PIN step.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<GateTokenResponse>>> {
    let gate = CredentialGate::new().begin_login();
    let result = state.identity.sign_in(&input.email, &input.password).await;
    let gate = gate.login_settled(result);

    if let Err(failure) = result {
        tracing::info!(?failure, "Password step rejected");
        return Err(AppError::Login(failure));
    }

    let response = issue_token(&state, &input.email, gate.step())?;
    tracing::info!("Password step accepted, PIN challenge issued");
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/pin
///
/// Exchange a challenge token and the PIN for an access token. Repeated
/// mismatches lock the PIN step for the account (429).
pub async fn verify_pin(
    State(state): State<AppState>,
    RequirePinChallenge(user): RequirePinChallenge,
    Json(input): Json<PinRequest>,
) -> AppResult<Json<DataResponse<GateTokenResponse>>> {
    let gate = CredentialGate::at(GateStep::Pin)
        .enter_pin(input.pin)
        .submit_pin(&state.config.admin_pin);

    match state
        .pin_attempts
        .settle(&user.email, gate.is_authenticated())
        .await
    {
        Ok(()) => {}
        Err(LoginFailure::TooManyRequests) => {
            tracing::warn!("PIN step refused, too many failed attempts");
            return Err(AppError::Login(LoginFailure::TooManyRequests));
        }
        Err(_) => {
            tracing::info!("PIN step rejected");
            let message = gate.error().unwrap_or(PIN_MISMATCH_MESSAGE).to_string();
            return Err(AppError::Core(CoreError::Unauthorized(message)));
        }
    }

    let response = issue_token(&state, &user.email, gate.step())?;
    tracing::info!("PIN step accepted, access token issued");
    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue_token(state: &AppState, email: &str, stage: GateStep) -> AppResult<GateTokenResponse> {
    let token = generate_token(email, stage, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(GateTokenResponse {
        token,
        stage,
        expires_in: state.config.jwt.expiry_mins(stage) * 60,
    })
}
