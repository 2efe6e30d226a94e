//! HTTP API.
//!
//! - `catalog`: public, read-only views under `/api/catalog`.
//! - `admin`: login and catalog editing under `/api/admin`.
//!
//! Catalog I/O is blocking and runs on Actix's blocking thread pool via
//! `web::block`.

pub mod admin;
pub mod catalog;

use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::catalog::Catalog;
use log::error;

/// Loads the catalog, turning store failures into `503 Service Unavailable`.
pub(crate) async fn load_catalog(state: &AppState) -> Result<Catalog, HttpResponse> {
    let store = state.store.clone();
    match web::block(move || store.load()).await {
        Ok(Ok(catalog)) => Ok(catalog),
        Ok(Err(e)) => {
            error!("Error loading catalog: {}", e);
            Err(HttpResponse::ServiceUnavailable().body(format!("Error loading catalog: {}", e)))
        }
        Err(e) => Err(HttpResponse::InternalServerError().body(e.to_string())),
    }
}

pub(crate) async fn save_catalog(state: &AppState, catalog: Catalog) -> Result<(), HttpResponse> {
    let store = state.store.clone();
    match web::block(move || store.save(&catalog)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("Error saving catalog: {}", e);
            Err(HttpResponse::ServiceUnavailable().body(format!("Error saving catalog: {}", e)))
        }
        Err(e) => Err(HttpResponse::InternalServerError().body(e.to_string())),
    }
}
