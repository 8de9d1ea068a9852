//! Password step of the credential gate.
//!
//! [`IdentityProvider`] checks an email/password pair and reports failures as
//! a [`LoginFailure`] category. Which provider runs is decided once at startup
//! by [`build_identity_provider`]:
//!
//! 1. `IDENTITY_API_KEY` set: [`RemoteIdentity`] (hosted REST sign-in).
//! 2. `ADMIN_EMAIL` + `ADMIN_PASSWORD_HASH` set: [`LocalIdentity`].
//! 3. Otherwise: [`DisabledIdentity`], which rejects every attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::gate::LoginFailure;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::auth::lockout::{Lockout, MAX_FAILED_ATTEMPTS};
use crate::auth::password::verify_password;
use crate::config::non_empty_env;

/// Default root of the hosted identity REST API.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// HTTP request timeout for one remote sign-in call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(())` when the pair is accepted.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), LoginFailure>;
}

/// Identity settings read from the environment.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub admin_email: Option<String>,
    /// Argon2id PHC string.
    pub admin_password_hash: Option<String>,
}

impl IdentityConfig {
    /// | Env Var               | Default                                  |
    /// |-----------------------|------------------------------------------|
    /// | `IDENTITY_API_KEY`    | unset                                    |
    /// | `IDENTITY_BASE_URL`   | `https://identitytoolkit.googleapis.com` |
    /// | `ADMIN_EMAIL`         | unset                                    |
    /// | `ADMIN_PASSWORD_HASH` | unset                                    |
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_env("IDENTITY_API_KEY"),
            base_url: non_empty_env("IDENTITY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_string()),
            admin_email: non_empty_env("ADMIN_EMAIL"),
            admin_password_hash: non_empty_env("ADMIN_PASSWORD_HASH"),
        }
    }
}

/// Pick the provider for this process. See the module docs for precedence.
pub fn build_identity_provider(config: &IdentityConfig) -> Arc<dyn IdentityProvider> {
    if let Some(api_key) = &config.api_key {
        match RemoteIdentity::new(config.base_url.clone(), api_key.clone()) {
            Ok(remote) => {
                tracing::info!("Using remote identity provider");
                return Arc::new(remote);
            }
            Err(e) => tracing::error!(error = %e, "Failed to build identity HTTP client"),
        }
    }

    if let (Some(email), Some(hash)) = (&config.admin_email, &config.admin_password_hash) {
        tracing::info!(email = %email, "Using local identity provider");
        return Arc::new(LocalIdentity::new(email.clone(), hash.clone()));
    }

    tracing::warn!("No identity provider configured; admin sign-in is disabled");
    Arc::new(DisabledIdentity)
}

/// Map a provider error code to a gate failure category.
///
/// The provider sometimes appends a human-readable suffix
/// (`TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account ...`), so only
/// the leading code is compared.
pub fn classify_provider_error(message: &str) -> LoginFailure {
    let code = message
        .split(|c: char| c == ':' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    match code {
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "USER_DISABLED"
        | "INVALID_EMAIL" => LoginFailure::InvalidCredentials,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => LoginFailure::TooManyRequests,
        _ => LoginFailure::Other,
    }
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Hosted email/password sign-in over REST.
pub struct RemoteIdentity {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteIdentity {
    pub fn new(base_url: String, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/accounts:signInWithPassword", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), LoginFailure> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Identity provider unreachable");
                LoginFailure::Other
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Unreadable identity error body");
                String::new()
            }
        };
        let failure = classify_provider_error(&message);
        tracing::info!(status = status.as_u16(), code = %message, ?failure, "Sign-in rejected");
        Err(failure)
    }
}

// ---------------------------------------------------------------------------
// Local
// ---------------------------------------------------------------------------

/// A single admin account checked against an Argon2id hash, with lockout.
pub struct LocalIdentity {
    email: String,
    password_hash: String,
    lockout: Mutex<Lockout>,
}

impl LocalIdentity {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            lockout: Mutex::new(Lockout::default()),
        }
    }

    async fn sign_in_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), LoginFailure> {
        self.lockout.lock().await.check(now)?;

        if !email.trim().eq_ignore_ascii_case(&self.email) {
            return Err(LoginFailure::InvalidCredentials);
        }

        // Argon2 is CPU-bound; keep it off the async workers and outside the lock.
        let password = password.to_owned();
        let hash = self.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                LoginFailure::Other
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "ADMIN_PASSWORD_HASH is not a valid PHC string");
                LoginFailure::Other
            })?;

        let mut lockout = self.lockout.lock().await;
        if valid {
            lockout.reset();
            return Ok(());
        }
        if lockout.record_failure(now) {
            tracing::warn!(attempts = MAX_FAILED_ATTEMPTS, "Local admin account locked");
        }
        Err(LoginFailure::InvalidCredentials)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), LoginFailure> {
        self.sign_in_at(email, password, Utc::now()).await
    }
}

// ---------------------------------------------------------------------------
// Disabled
// ---------------------------------------------------------------------------

/// Rejects every attempt; used when nothing is configured.
pub struct DisabledIdentity;

#[async_trait]
impl IdentityProvider for DisabledIdentity {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<(), LoginFailure> {
        Err(LoginFailure::Other)
    }
}
