use std::sync::Arc;

use crate::session::registry::SessionRegistry;
use crate::session::SessionGuard;
use crate::store::CatalogStore;
use crate::youtube::client::YouTubeClient;

/// Shared application state, injected into handlers as `web::Data<AppState>`.
pub struct AppState {
    /// Cloned into `web::block` closures for blocking catalog I/O.
    pub store: Arc<CatalogStore>,
    pub guard: SessionGuard,
    pub sessions: SessionRegistry,
    pub youtube: YouTubeClient,
}
