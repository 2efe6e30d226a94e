use crate::catalog::edit;
use crate::services::admin::auth::{require_admin, ClientSession};
use crate::services::admin::edit_catalog;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::{NewCategoryRequest, UpdateCategoryRequest};
use log::info;

/// `POST /api/admin/categories`: `201 Created` with the normalized id.
pub(crate) async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<NewCategoryRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(create_category(&req, &state, &client, payload.into_inner()).await)
}

async fn create_category(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    payload: NewCategoryRequest,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    let id = edit_catalog(state, |catalog| {
        edit::add_category(catalog, &payload.id, &payload.name, &payload.description)
    })
    .await?;
    info!("Category {} added", id);
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// `PUT /api/admin/categories/{id}`
pub(crate) async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    category_id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(update_category(&req, &state, &client, &category_id, &payload).await)
}

async fn update_category(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    category_id: &str,
    payload: &UpdateCategoryRequest,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    edit_catalog(state, |catalog| {
        edit::update_category(catalog, category_id, &payload.name, &payload.description)
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /api/admin/categories/{id}`: refused with `409 Conflict` while
/// channels still use the category.
pub(crate) async fn remove(
    req: HttpRequest,
    state: web::Data<AppState>,
    category_id: web::Path<String>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(remove_category(&req, &state, &client, &category_id).await)
}

async fn remove_category(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    category_id: &str,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    let removed = edit_catalog(state, |catalog| edit::remove_category(catalog, category_id)).await?;
    info!("Category {} ({}) removed", category_id, removed.name);
    Ok(HttpResponse::NoContent().finish())
}
