use crate::session::registry::SessionRegistry;
use crate::session::AuthError;
use crate::state::AppState;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use log::warn;
use std::time::{Duration, Instant};

/// Name of the cookie carrying the client session id.
pub const SESSION_COOKIE: &str = "studyflix_session";

/// The caller's client session, identified by the session cookie.
///
/// Callers without the cookie get a fresh id, which `finish` hands back to
/// them as a cookie.
pub(crate) struct ClientSession {
    pub(crate) id: String,
    is_new: bool,
}

impl ClientSession {
    pub(crate) fn from_request(req: &HttpRequest) -> Self {
        match req.cookie(SESSION_COOKIE) {
            Some(cookie) if !cookie.value().is_empty() => Self {
                id: cookie.value().to_string(),
                is_new: false,
            },
            _ => Self {
                id: SessionRegistry::new_session_id(),
                is_new: true,
            },
        }
    }

    /// Final response of a handler, with the session cookie when it was just
    /// issued.
    pub(crate) fn finish(&self, result: Result<HttpResponse, HttpResponse>) -> HttpResponse {
        let mut response = result.unwrap_or_else(|resp| resp);
        if self.is_new {
            let cookie = Cookie::build(SESSION_COOKIE, self.id.clone())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .finish();
            if let Err(e) = response.add_cookie(&cookie) {
                warn!("Failed to set session cookie: {}", e);
            }
        }
        response
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Admits the request only with a live token for the caller's session.
pub(crate) async fn require_admin(
    state: &AppState,
    client: &ClientSession,
    req: &HttpRequest,
) -> Result<(), HttpResponse> {
    let token = bearer_token(req);
    let now = Instant::now();
    let valid = state
        .sessions
        .with_session(&client.id, now, |session| {
            state.guard.validate_session_token(session, token, now)
        })
        .await;

    if valid {
        Ok(())
    } else {
        Err(auth_error_response(&AuthError::SessionExpired))
    }
}

/// Whole seconds, rounded up so a locked client never sees zero.
pub(crate) fn retry_after_secs(remaining: Duration) -> u64 {
    remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
}

pub(crate) fn auth_error_response(err: &AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials { .. } | AuthError::SessionExpired => {
            HttpResponse::Unauthorized().body(err.to_string())
        }
        AuthError::AccountLocked { remaining } => {
            let retry_after = retry_after_secs(*remaining);
            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                .json(serde_json::json!({
                    "error": err.to_string(),
                    "retry_after_secs": retry_after,
                }))
        }
    }
}
