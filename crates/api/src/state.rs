use std::sync::Arc;

use folio_db::DocumentStore;
use folio_genai::DescriptionWriter;

use crate::auth::identity::IdentityProvider;
use crate::auth::lockout::PinAttempts;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Durable copy of projects and profile.
    pub store: Arc<dyn DocumentStore>,
    /// First step of the credential gate.
    pub identity: Arc<dyn IdentityProvider>,
    /// PIN failures per account for the second step.
    pub pin_attempts: Arc<PinAttempts>,
    /// AI description drafting.
    pub writer: DescriptionWriter,
    pub config: Arc<ServerConfig>,
}
