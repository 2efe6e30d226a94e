use crate::catalog::{edit, CatalogError};
use crate::services::admin::auth::{require_admin, ClientSession};
use crate::services::admin::{catalog_error_response, edit_catalog};
use crate::services::load_catalog;
use crate::state::AppState;
use crate::youtube::resolver::{resolve_channel_id, ResolveError};
use crate::youtube::ChannelDirectory;
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::channel::Channel;
use common::requests::{FeaturedRequest, NewChannelRequest, UpdateChannelRequest};
use log::{info, warn};

/// `POST /api/admin/channels`
///
/// Resolves the URL to a canonical channel id, fetches the channel title and
/// thumbnail and appends the channel, not featured. Answers `201 Created`
/// with the stored channel.
pub(crate) async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<NewChannelRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(create_channel(&req, &state, &client, payload.into_inner()).await)
}

async fn create_channel(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    payload: NewChannelRequest,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;

    let subject = payload.subject.trim();
    if subject.is_empty() {
        return Err(catalog_error_response(&CatalogError::MissingField("subject")));
    }

    // Checked before any lookup so a bad request costs no API quota.
    let current = load_catalog(state).await?;
    if !current.categories.contains_key(&payload.category) {
        return Err(catalog_error_response(&CatalogError::UnknownCategory(
            payload.category,
        )));
    }

    let channel_id = resolve_channel_id(&state.youtube, &payload.url)
        .await
        .map_err(|e| resolve_error_response(&e))?;
    if current.has_channel(&channel_id) {
        return Err(catalog_error_response(&CatalogError::DuplicateChannel(
            channel_id,
        )));
    }

    let info = match state.youtube.channel_info(&channel_id).await {
        Ok(Some(info)) => info,
        Ok(None) => {
            warn!("No metadata for channel {}", channel_id);
            return Err(HttpResponse::BadGateway().json(serde_json::json!({
                "error": "channel info unavailable",
            })));
        }
        Err(e) => return Err(resolve_error_response(&ResolveError::Lookup(e))),
    };

    let channel = Channel {
        id: channel_id,
        name: info.title,
        subject: subject.to_string(),
        category: payload.category,
        thumbnail: info.thumbnail,
        featured: false,
    };
    let stored = channel.clone();
    edit_catalog(state, move |catalog| edit::add_channel(catalog, channel)).await?;
    info!("Channel {} ({}) added", stored.id, stored.name);
    Ok(HttpResponse::Created().json(stored))
}

fn resolve_error_response(err: &ResolveError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        ResolveError::NotFound(_) => HttpResponse::NotFound().json(body),
        ResolveError::UnsupportedFormat(_) => HttpResponse::BadRequest().json(body),
        ResolveError::Lookup(e) => {
            warn!("Channel lookup failed: {}", e);
            HttpResponse::BadGateway().json(body)
        }
    }
}

/// `PUT /api/admin/channels/{id}`
pub(crate) async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
    payload: web::Json<UpdateChannelRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(update_channel(&req, &state, &client, &channel_id, &payload).await)
}

async fn update_channel(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    channel_id: &str,
    payload: &UpdateChannelRequest,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    edit_catalog(state, |catalog| {
        edit::update_channel(
            catalog,
            channel_id,
            &payload.name,
            &payload.subject,
            &payload.category,
        )
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `DELETE /api/admin/channels/{id}`
pub(crate) async fn remove(
    req: HttpRequest,
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(remove_channel(&req, &state, &client, &channel_id).await)
}

async fn remove_channel(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    channel_id: &str,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    let removed = edit_catalog(state, |catalog| edit::remove_channel(catalog, channel_id)).await?;
    info!("Channel {} ({}) removed", removed.id, removed.name);
    Ok(HttpResponse::NoContent().finish())
}

/// `PUT /api/admin/channels/{id}/featured`
pub(crate) async fn set_featured(
    req: HttpRequest,
    state: web::Data<AppState>,
    channel_id: web::Path<String>,
    payload: web::Json<FeaturedRequest>,
) -> HttpResponse {
    let client = ClientSession::from_request(&req);
    client.finish(feature_channel(&req, &state, &client, &channel_id, payload.featured).await)
}

async fn feature_channel(
    req: &HttpRequest,
    state: &AppState,
    client: &ClientSession,
    channel_id: &str,
    featured: bool,
) -> Result<HttpResponse, HttpResponse> {
    require_admin(state, client, req).await?;
    edit_catalog(state, |catalog| edit::set_featured(catalog, channel_id, featured)).await?;
    Ok(HttpResponse::NoContent().finish())
}
