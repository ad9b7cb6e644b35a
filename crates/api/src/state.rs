use std::sync::Arc;

use marquee_events::EventBus;
use marquee_favorites::FavoritesStore;
use marquee_gateway::CatalogGateway;
use marquee_session::SessionHandle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Handle to the browse session task.
    pub session: SessionHandle,
    /// Bookmarked characters.
    pub favorites: Arc<FavoritesStore>,
    /// Catalog used for direct lookups outside the session.
    pub catalog: Arc<dyn CatalogGateway>,
    /// Signal bus shared by the session and the favorites store.
    pub event_bus: Arc<EventBus>,
}
