//! # Admin service
//!
//! Login and catalog editing. Every route except the login/session ones
//! answers `401 Unauthorized` unless the request carries
//! `Authorization: Bearer <token>` with the token issued to the caller's
//! session cookie.
//!
//! ## Registered routes (under `/api/admin`)
//!
//! - `POST /login`, `POST /logout`, `GET /session`
//! - `POST /categories`, `PUT|DELETE /categories/{id}`
//! - `POST /channels`, `PUT|DELETE /channels/{id}`, `PUT /channels/{id}/featured`
//! - `PUT /banners`
//!
//! Edits are load, apply, save. Concurrent edits are not serialized, so the
//! last save wins.

mod auth;
mod banners;
mod categories;
mod channels;
mod login;

use crate::catalog::CatalogError;
use crate::services::{load_catalog, save_catalog};
use crate::state::AppState;
use actix_web::web::{delete, get, post, put, resource, scope};
use actix_web::{HttpResponse, Scope};
use common::model::catalog::Catalog;

const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::login))
        .route("/logout", post().to(login::logout))
        .route("/session", get().to(login::status))
        .route("/categories", post().to(categories::create))
        .service(
            resource("/categories/{category_id}")
                .route(put().to(categories::update))
                .route(delete().to(categories::remove)),
        )
        .route("/channels", post().to(channels::create))
        .service(
            resource("/channels/{channel_id}")
                .route(put().to(channels::update))
                .route(delete().to(channels::remove)),
        )
        .route("/channels/{channel_id}/featured", put().to(channels::set_featured))
        .route("/banners", put().to(banners::replace))
}

/// Applies `edit` to the stored catalog and saves the result. Nothing is
/// saved when the edit is rejected.
pub(crate) async fn edit_catalog<T>(
    state: &AppState,
    edit: impl FnOnce(&mut Catalog) -> Result<T, CatalogError>,
) -> Result<T, HttpResponse> {
    let mut catalog = load_catalog(state).await?;
    let value = edit(&mut catalog).map_err(|e| catalog_error_response(&e))?;
    save_catalog(state, catalog).await?;
    Ok(value)
}

pub(crate) fn catalog_error_response(err: &CatalogError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        CatalogError::MissingField(_)
        | CatalogError::InvalidCategoryId(_)
        | CatalogError::UnknownCategory(_) => HttpResponse::BadRequest().json(body),
        CatalogError::DuplicateCategory(_)
        | CatalogError::DuplicateChannel(_)
        | CatalogError::CategoryInUse { .. } => HttpResponse::Conflict().json(body),
        CatalogError::CategoryNotFound(_) | CatalogError::ChannelNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::auth::SESSION_COOKIE;
    use super::configure_routes;
    use crate::services::tests::{test_state, ADMIN_PASSWORD, ADMIN_USER};
    use crate::store::tests::{sample_catalog, MemoryStorage};
    use crate::store::CatalogStore;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use common::model::catalog::Catalog;
    use common::requests::LoginRequest;
    use common::responses::{LoginResponse, SessionState};
    use std::sync::Arc;

    pub(crate) fn seeded_storage() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::default());
        CatalogStore::new(storage.clone())
            .save(&sample_catalog())
            .unwrap();
        storage
    }

    pub(crate) fn stored_catalog(storage: &Arc<MemoryStorage>) -> Catalog {
        CatalogStore::new(storage.clone()).load().unwrap()
    }

    fn session_cookie(resp: &ServiceResponse) -> Cookie<'static> {
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie")
            .into_owned()
    }

    pub(crate) fn login_request() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(LoginRequest {
                username: ADMIN_USER.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
    }

    /// Session cookie and bearer token of a successful login.
    pub(crate) async fn logged_in(resp: ServiceResponse) -> (Cookie<'static>, String) {
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp);
        let body: LoginResponse = test::read_body_json(resp).await;
        (cookie, body.token)
    }

    pub(crate) fn bearer(token: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn login_then_edit() {
        let storage = seeded_storage();
        let app = test::init_service(
            App::new()
                .app_data(test_state(storage.clone(), None))
                .service(configure_routes()),
        )
        .await;
        let (cookie, token) = logged_in(test::call_service(&app, login_request().to_request()).await).await;

        let req = test::TestRequest::post()
            .uri("/api/admin/categories")
            .cookie(cookie.clone())
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({ "id": "Direito", "name": "Direito" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "direito");
        assert!(stored_catalog(&storage).categories.contains_key("direito"));

        let req = test::TestRequest::get()
            .uri("/api/admin/session")
            .cookie(cookie)
            .to_request();
        let state: SessionState = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state, SessionState::Authenticated);
    }

    #[actix_web::test]
    async fn edits_need_a_token() {
        let storage = seeded_storage();
        let app = test::init_service(
            App::new()
                .app_data(test_state(storage.clone(), None))
                .service(configure_routes()),
        )
        .await;
        let (cookie, token) = logged_in(test::call_service(&app, login_request().to_request()).await).await;

        let req = test::TestRequest::delete()
            .uri("/api/admin/categories/medicina")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // A token is only good for the session it was issued to.
        let req = test::TestRequest::delete()
            .uri("/api/admin/categories/medicina")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        assert!(stored_catalog(&storage).categories.contains_key("medicina"));
    }

    #[actix_web::test]
    async fn repeated_failures_lock_the_client() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(seeded_storage(), None))
                .service(configure_routes()),
        )
        .await;

        let attempt = |cookie: Option<Cookie<'static>>| {
            let mut req = test::TestRequest::post()
                .uri("/api/admin/login")
                .set_json(LoginRequest {
                    username: ADMIN_USER.to_string(),
                    password: "wrong".to_string(),
                });
            if let Some(cookie) = cookie {
                req = req.cookie(cookie);
            }
            req.to_request()
        };

        let resp = test::call_service(&app, attempt(None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let cookie = session_cookie(&resp);

        for _ in 0..2 {
            let resp = test::call_service(&app, attempt(Some(cookie.clone()))).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }

        let resp = test::call_service(&app, attempt(Some(cookie.clone()))).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(header::RETRY_AFTER));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["retry_after_secs"].as_u64().unwrap() > 0);

        // Another client is not affected.
        let (_, token) = logged_in(test::call_service(&app, login_request().to_request()).await).await;
        assert!(!token.is_empty());
    }

    #[actix_web::test]
    async fn category_in_use_is_a_conflict() {
        let storage = seeded_storage();
        let app = test::init_service(
            App::new()
                .app_data(test_state(storage.clone(), None))
                .service(configure_routes()),
        )
        .await;
        let (cookie, token) = logged_in(test::call_service(&app, login_request().to_request()).await).await;

        let req = test::TestRequest::delete()
            .uri("/api/admin/categories/vestibular")
            .cookie(cookie.clone())
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::delete()
            .uri("/api/admin/categories/medicina")
            .cookie(cookie.clone())
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::put()
            .uri("/api/admin/categories/medicina")
            .cookie(cookie)
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({ "name": "Medicina" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let catalog = stored_catalog(&storage);
        assert!(catalog.categories.contains_key("vestibular"));
        assert!(!catalog.categories.contains_key("medicina"));
    }

    #[actix_web::test]
    async fn logout_ends_the_session() {
        let app = test::init_service(
            App::new()
                .app_data(test_state(seeded_storage(), None))
                .service(configure_routes()),
        )
        .await;
        let (cookie, token) = logged_in(test::call_service(&app, login_request().to_request()).await).await;

        let req = test::TestRequest::post()
            .uri("/api/admin/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::put()
            .uri("/api/admin/channels/UCfisica/featured")
            .cookie(cookie)
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({ "featured": false }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn anonymous_requests_leave_no_session_behind() {
        let state = test_state(seeded_storage(), None);
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .service(configure_routes()),
        )
        .await;

        for _ in 0..50 {
            let req = test::TestRequest::get().uri("/api/admin/session").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let req = test::TestRequest::post().uri("/api/admin/logout").to_request();
            test::call_service(&app, req).await;

            let req = test::TestRequest::delete()
                .uri("/api/admin/categories/medicina")
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(state.sessions.len().await, 0);

        logged_in(test::call_service(&app, login_request().to_request()).await).await;
        assert_eq!(state.sessions.len().await, 1);
    }
}
