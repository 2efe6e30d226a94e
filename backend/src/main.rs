mod catalog;
mod config;
mod services;
mod session;
mod state;
mod store;
mod youtube;

use crate::config::{AppConfig, StorageKind};
use crate::session::registry::SessionRegistry;
use crate::session::SessionGuard;
use crate::state::AppState;
use crate::store::file::FileStorage;
use crate::store::sqlite::SqliteStorage;
use crate::store::CatalogStore;
use crate::youtube::client::YouTubeClient;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use log::{error, info, warn};
use std::sync::Arc;

fn open_store(cfg: &AppConfig) -> anyhow::Result<CatalogStore> {
    let store = match cfg.storage {
        StorageKind::File => CatalogStore::new(FileStorage::new(&cfg.storage_path)),
        StorageKind::Sqlite => CatalogStore::new(
            SqliteStorage::open(&cfg.storage_path).with_context(|| {
                format!("Failed to open database {}", cfg.storage_path.display())
            })?,
        ),
    };
    Ok(store)
}

fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let store = open_store(cfg)?;
    let catalog = store.load().context("Failed to load catalog")?;
    info!(
        "Catalog loaded: {} categories, {} channels",
        catalog.categories.len(),
        catalog.featured_channels.len()
    );

    if cfg.youtube_api_key.is_none() {
        warn!("No YouTube API key configured; only /channel/<id> URLs can be added");
    }
    let youtube = YouTubeClient::new(
        cfg.youtube_api_base_url.clone(),
        cfg.youtube_api_key.clone(),
        cfg.lookup_timeout,
    )
    .context("Failed to create YouTube client")?;

    Ok(AppState {
        store: Arc::new(store),
        guard: SessionGuard::new(cfg.admin_username.clone(), cfg.admin_password.clone()),
        sessions: SessionRegistry::default(),
        youtube,
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cfg_path = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let cfg = match AppConfig::load(&cfg_path) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load {}: {:#}", cfg_path, e);
            std::process::exit(1);
        }
    };

    let state = match build_state(&cfg) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    info!("Server running at http://{}", cfg.listen_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(state.clone())
            .service(services::catalog::configure_routes())
            .service(services::admin::configure_routes())
    })
    .bind(cfg.listen_addr.as_str())?
    .run()
    .await
}
