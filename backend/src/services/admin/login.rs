use crate::services::admin::auth::{auth_error_response, retry_after_secs, ClientSession};
use crate::session::SessionStatus;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::LoginRequest;
use common::responses::{LoginResponse, SessionState};
use std::time::Instant;

/// `POST /api/admin/login`
///
/// - `200 OK` with a `LoginResponse` token.
/// - `401 Unauthorized` on a wrong username or password.
/// - `429 Too Many Requests` while the client is locked out, with
///   `retry_after_secs`.
pub(crate) async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    let now = Instant::now();
    let result = state
        .sessions
        .with_session(&client.id, now, |session| {
            state
                .guard
                .check_password(session, &payload.username, &payload.password, now)
        })
        .await;

    client.finish(
        result
            .map(|token| HttpResponse::Ok().json(LoginResponse { token }))
            .map_err(|e| auth_error_response(&e)),
    )
}

/// `POST /api/admin/logout`. Always succeeds.
pub(crate) async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    state
        .sessions
        .with_session(&client.id, Instant::now(), |session| state.guard.logout(session))
        .await;
    client.finish(Ok(HttpResponse::NoContent().finish()))
}

/// `GET /api/admin/session`
pub(crate) async fn status(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    let now = Instant::now();
    let status = state
        .sessions
        .with_session(&client.id, now, |session| state.guard.status(session, now))
        .await;

    client.finish(Ok(HttpResponse::Ok().json(session_state(status))))
}

/// Lockout time is rounded up the same way as the `429` answer of `login`.
fn session_state(status: SessionStatus) -> SessionState {
    match status {
        SessionStatus::Unauthenticated => SessionState::Unauthenticated,
        SessionStatus::Locked { remaining } => SessionState::Locked {
            retry_after_secs: retry_after_secs(remaining),
        },
        SessionStatus::Authenticated => SessionState::Authenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn locked_state_rounds_the_wait_up() {
        let state = session_state(SessionStatus::Locked {
            remaining: Duration::from_millis(899_500),
        });
        assert_eq!(state, SessionState::Locked { retry_after_secs: 900 });

        let state = session_state(SessionStatus::Locked {
            remaining: Duration::from_millis(300),
        });
        assert_eq!(state, SessionState::Locked { retry_after_secs: 1 });
    }
}
