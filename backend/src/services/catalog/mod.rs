//! # Catalog browsing service
//!
//! Read-only endpoints behind the public pages. Nothing here needs a session.
//!
//! ## Registered routes (under `/api/catalog`)
//!
//! - `GET ""`: the whole catalog document.
//! - `GET /banners`: cover and promotional banners.
//! - `GET /categories`: category sidebar, with channel counts.
//! - `GET /categories/{id}`: one category with its channels grouped by subject.
//! - `GET /channels?category=&subject=`: channel listing, both filters optional.
//! - `GET /subjects`: distinct subjects, sorted.

mod browse;
mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/catalog";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::catalog))
        .route("/banners", get().to(get::banners))
        .route("/categories", get().to(browse::categories))
        .route("/categories/{category_id}", get().to(browse::category_page))
        .route("/channels", get().to(browse::channels))
        .route("/subjects", get().to(browse::subjects))
}
