use crate::catalog::edit;
use crate::services::admin::auth::{require_admin, ClientSession};
use crate::services::admin::edit_catalog;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::BannersRequest;

/// `PUT /api/admin/banners`: replaces the cover and the promotional list.
/// Banners with an empty URL are dropped.
pub(crate) async fn replace(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<BannersRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(replace_banners(&req, &state, &client, payload.into_inner()).await)
}

async fn replace_banners(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    payload: BannersRequest,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    let banners = edit_catalog(state, move |catalog| {
        edit::set_banners(catalog, payload.cover, payload.promotional);
        Ok(catalog.banners.clone())
    })
    .await?;
    Ok(HttpResponse::Ok().json(banners))
}
