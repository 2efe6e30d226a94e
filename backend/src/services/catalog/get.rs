use crate::services::load_catalog;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// `GET /api/catalog`
///
/// - `200 OK` with the whole catalog document.
/// - `503 Service Unavailable` when the store cannot be read.
pub(crate) async fn catalog(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(catalog),
        Err(resp) => resp,
    }
}

/// `GET /api/catalog/banners`: `200 OK` with the cover and promotional
/// banners, `503` when the store cannot be read.
pub(crate) async fn banners(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(catalog.banners),
        Err(resp) => resp,
    }
}
