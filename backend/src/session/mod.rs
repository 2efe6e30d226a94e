//! # Admin Session Guard
//!
//! Gates catalog mutations behind the single admin credential pair.
//!
//! Every client owns an `AdminSession` context (kept by `registry`), which
//! moves through three states:
//!
//! - **Unauthenticated**: no valid token. A wrong username/password pair
//!   increments the failure counter and records the time of the failure.
//! - **Locked**: the counter reached `MAX_FAILED_ATTEMPTS` less than
//!   `LOCKOUT_WINDOW` ago. Login attempts are refused without looking at the
//!   credentials. Once the window has elapsed the counter drops back to zero.
//! - **Authenticated**: a random token was issued. The token stays valid while
//!   it is used at least once every `SESSION_TTL` (sliding expiration).
//!
//! Credentials are compared with plain string equality.

pub mod registry;

use log::{info, warn};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const MAX_FAILED_ATTEMPTS: u32 = 3;
pub const LOCKOUT_WINDOW: Duration = Duration::from_secs(900);
pub const SESSION_TTL: Duration = Duration::from_secs(86_400);

/// Per-client login state.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    failed_attempts: u32,
    last_failed_attempt: Option<Instant>,
    token: Option<String>,
    last_activity: Option<Instant>,
}

impl AdminSession {
    #[cfg(test)]
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    #[cfg(test)]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn clear_token(&mut self) {
        self.token = None;
        self.last_activity = None;
    }

    fn token_live(&self, now: Instant) -> bool {
        self.token.is_some()
            && self
                .last_activity
                .is_some_and(|last| now.saturating_duration_since(last) < SESSION_TTL)
    }

    /// True when the session holds nothing worth keeping: no live token and
    /// no failed attempt within the lockout window. Such sessions behave
    /// exactly like a fresh one, so the registry does not store them.
    pub fn is_stale(&self, now: Instant) -> bool {
        let recent_failure = self.failed_attempts > 0
            && self
                .last_failed_attempt
                .is_some_and(|at| now.saturating_duration_since(at) < LOCKOUT_WINDOW);
        !self.token_live(now) && !recent_failure
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Locked { remaining: Duration },
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password ({attempts_left} attempt(s) left)")]
    InvalidCredentials { attempts_left: u32 },

    #[error("too many failed attempts, try again in {} seconds", .remaining.as_secs())]
    AccountLocked { remaining: Duration },

    #[error("session expired or missing, log in again")]
    SessionExpired,
}

/// Checks credentials and tokens against the configured admin account.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    username: String,
    password: String,
}

impl SessionGuard {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Remaining lockout time, if the session is locked. Resets the failure
    /// counter once the lockout window has passed.
    pub fn lockout_remaining(&self, session: &mut AdminSession, now: Instant) -> Option<Duration> {
        if session.failed_attempts < MAX_FAILED_ATTEMPTS {
            return None;
        }
        let elapsed = session
            .last_failed_attempt
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(LOCKOUT_WINDOW);
        if elapsed < LOCKOUT_WINDOW {
            return Some(LOCKOUT_WINDOW - elapsed);
        }

        session.failed_attempts = 0;
        session.last_failed_attempt = None;
        None
    }

    pub fn status(&self, session: &mut AdminSession, now: Instant) -> SessionStatus {
        if let Some(remaining) = self.lockout_remaining(session, now) {
            return SessionStatus::Locked { remaining };
        }
        if session.token_live(now) {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    /// Logs in and returns a fresh session token.
    pub fn check_password(
        &self,
        session: &mut AdminSession,
        username: &str,
        password: &str,
        now: Instant,
    ) -> Result<String, AuthError> {
        if let Some(remaining) = self.lockout_remaining(session, now) {
            warn!(
                "Login refused: locked for another {} seconds",
                remaining.as_secs()
            );
            return Err(AuthError::AccountLocked { remaining });
        }

        if username == self.username && password == self.password {
            let token = Uuid::new_v4().to_string();
            session.token = Some(token.clone());
            session.last_activity = Some(now);
            session.failed_attempts = 0;
            session.last_failed_attempt = None;
            info!("Admin logged in");
            return Ok(token);
        }

        session.failed_attempts += 1;
        session.last_failed_attempt = Some(now);
        let attempts_left = MAX_FAILED_ATTEMPTS.saturating_sub(session.failed_attempts);
        warn!(
            "Failed admin login attempt ({}/{})",
            session.failed_attempts, MAX_FAILED_ATTEMPTS
        );
        Err(AuthError::InvalidCredentials { attempts_left })
    }

    /// Checks `token` against the session and slides its expiration.
    /// Any failure discards the stored token.
    pub fn validate_session_token(
        &self,
        session: &mut AdminSession,
        token: Option<&str>,
        now: Instant,
    ) -> bool {
        let valid = match (token, session.token.as_deref(), session.last_activity) {
            (Some(given), Some(stored), Some(last)) => {
                given == stored && now.saturating_duration_since(last) < SESSION_TTL
            }
            _ => false,
        };

        if valid {
            session.last_activity = Some(now);
        } else {
            session.clear_token();
        }
        valid
    }

    pub fn logout(&self, session: &mut AdminSession) {
        session.clear_token();
    }
}
