//! Failed-attempt counting shared by the password and PIN steps.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use folio_core::gate::LoginFailure;
use tokio::sync::Mutex;

/// Consecutive failed attempts before further attempts are refused.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Minutes attempts stay refused after too many failures.
pub const LOCK_DURATION_MINS: i64 = 15;

#[derive(Debug, Default)]
pub struct Lockout {
    failed_attempts: u32,
    locked_until: Option<DateTime<Utc>>,
}

impl Lockout {
    /// Refuse while locked. An expired lock starts a fresh count.
    pub fn check(&mut self, now: DateTime<Utc>) -> Result<(), LoginFailure> {
        if let Some(locked_until) = self.locked_until {
            if locked_until > now {
                return Err(LoginFailure::TooManyRequests);
            }
            self.reset();
        }
        Ok(())
    }

    /// Count one failure. Returns `true` when this failure set the lock.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> bool {
        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_FAILED_ATTEMPTS && self.locked_until.is_none() {
            self.locked_until = Some(now + chrono::Duration::minutes(LOCK_DURATION_MINS));
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// PIN failures per account, kept across challenge tokens so a fresh
/// password step does not restart the count.
#[derive(Debug, Default)]
pub struct PinAttempts {
    accounts: Mutex<HashMap<String, Lockout>>,
}

impl PinAttempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one PIN submission for `email`.
    ///
    /// `Err(TooManyRequests)` while the account is locked (even for the
    /// right PIN), `Err(InvalidCredentials)` for a mismatch, `Ok` otherwise.
    pub async fn settle(&self, email: &str, matched: bool) -> Result<(), LoginFailure> {
        self.settle_at(email, matched, Utc::now()).await
    }

    pub async fn settle_at(
        &self,
        email: &str,
        matched: bool,
        now: DateTime<Utc>,
    ) -> Result<(), LoginFailure> {
        let key = email.trim().to_lowercase();
        let mut accounts = self.accounts.lock().await;
        let lockout = accounts.entry(key).or_default();

        lockout.check(now)?;

        if matched {
            lockout.reset();
            return Ok(());
        }

        if lockout.record_failure(now) {
            tracing::warn!(attempts = MAX_FAILED_ATTEMPTS, "PIN step locked for account");
        }
        Err(LoginFailure::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const EMAIL: &str = "owner@example.com";

    #[test]
    fn lock_is_set_once_and_expires() {
        let mut lockout = Lockout::default();
        let now = Utc::now();

        let locks: Vec<bool> = (0..MAX_FAILED_ATTEMPTS + 1)
            .map(|_| lockout.record_failure(now))
            .collect();
        assert_eq!(locks.iter().filter(|l| **l).count(), 1);
        assert!(locks[MAX_FAILED_ATTEMPTS as usize - 1]);

        assert_matches!(lockout.check(now), Err(LoginFailure::TooManyRequests));
        let later = now + chrono::Duration::minutes(LOCK_DURATION_MINS + 1);
        assert_eq!(lockout.check(later), Ok(()));
        assert!(!lockout.record_failure(later));
    }

    #[tokio::test]
    async fn pin_locks_after_repeated_mismatches() {
        let attempts = PinAttempts::new();
        let now = Utc::now();

        for _ in 0..MAX_FAILED_ATTEMPTS {
            assert_matches!(
                attempts.settle_at(EMAIL, false, now).await,
                Err(LoginFailure::InvalidCredentials)
            );
        }
        assert_matches!(
            attempts.settle_at(EMAIL, true, now).await,
            Err(LoginFailure::TooManyRequests)
        );

        let later = now + chrono::Duration::minutes(LOCK_DURATION_MINS + 1);
        assert_eq!(attempts.settle_at(EMAIL, true, later).await, Ok(()));
    }

    #[tokio::test]
    async fn pin_counts_are_per_account() {
        let attempts = PinAttempts::new();
        let now = Utc::now();

        for _ in 0..MAX_FAILED_ATTEMPTS {
            let _ = attempts.settle_at(EMAIL, false, now).await;
        }
        assert_matches!(
            attempts.settle_at(" Owner@Example.com", true, now).await,
            Err(LoginFailure::TooManyRequests)
        );
        assert_eq!(attempts.settle_at("other@example.com", true, now).await, Ok(()));
    }

    #[tokio::test]
    async fn right_pin_resets_the_count() {
        let attempts = PinAttempts::new();
        let now = Utc::now();

        for _ in 0..MAX_FAILED_ATTEMPTS - 1 {
            let _ = attempts.settle_at(EMAIL, false, now).await;
        }
        assert_eq!(attempts.settle_at(EMAIL, true, now).await, Ok(()));
        assert_matches!(
            attempts.settle_at(EMAIL, false, now).await,
            Err(LoginFailure::InvalidCredentials)
        );
    }
}
