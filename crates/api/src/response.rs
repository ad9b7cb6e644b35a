//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use marquee_core::presentation::CharacterCard;
use marquee_core::QueryState;
use marquee_favorites::FavoritesStore;
use marquee_session::{ResultView, ViewStatus};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// The result area as the client renders it.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub status: ViewStatus,
    /// User-facing message, present when `status` is `error`.
    pub message: Option<String>,
    /// Canonical query string for the address bar.
    pub location: String,
    pub query: QueryState,
    pub cards: Vec<CharacterCard>,
    pub window_size: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl ViewResponse {
    /// Decorate a session view with presentation data and favorite flags.
    pub fn build(view: ResultView, favorites: &FavoritesStore) -> Self {
        let search = view.query.search.clone();
        let cards = view
            .items
            .into_iter()
            .map(|character| {
                let is_favorite = favorites.is_favorite(character.id);
                CharacterCard::new(character, &search, is_favorite)
            })
            .collect();

        Self {
            status: view.status,
            message: view.message,
            location: view.location,
            query: view.query,
            cards,
            window_size: view.window_size,
            can_go_back: view.can_go_back,
            can_go_forward: view.can_go_forward,
        }
    }
}
