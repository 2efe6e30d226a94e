use crate::catalog::view;
use crate::services::load_catalog;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ChannelFilter;
use common::responses::CategoryPage;

/// `GET /api/catalog/categories`: `200 OK` with every category in catalog
/// order and its channel count. `503` when the store cannot be read.
pub(crate) async fn categories(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(view::category_summaries(&catalog)),
        Err(resp) => resp,
    }
}

/// `GET /api/catalog/categories/{id}`
///
/// - `200 OK` with the category and its channels grouped by subject.
/// - `404 Not Found` for an unknown category.
/// - `503 Service Unavailable` when the store cannot be read.
pub(crate) async fn category_page(
    category_id: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    let catalog = match load_catalog(&state).await {
        Ok(catalog) => catalog,
        Err(resp) => return resp,
    };

    match catalog.categories.get(&category_id) {
        Some(category) => HttpResponse::Ok().json(CategoryPage {
            subjects: view::group_by_subject(view::channels_in_category(&catalog, &category_id)),
            category: category.clone(),
            id: category_id,
        }),
        None => HttpResponse::NotFound().body("Category not found"),
    }
}

/// `GET /api/catalog/channels?category=&subject=`: `200 OK` with the
/// matching channels and their category names. Both filters are optional.
pub(crate) async fn channels(
    filter: web::Query<ChannelFilter>,
    state: web::Data<AppState>,
) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => {
            let found = view::filter_channels(
                &catalog,
                filter.category.as_deref(),
                filter.subject.as_deref(),
            );
            HttpResponse::Ok().json(view::listings(&catalog, found))
        }
        Err(resp) => resp,
    }
}

/// `GET /api/catalog/subjects`: `200 OK` with the distinct subjects, sorted.
pub(crate) async fn subjects(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(view::subjects(&catalog)),
        Err(resp) => resp,
    }
}
