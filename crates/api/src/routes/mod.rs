pub mod characters;
pub mod favorites;
pub mod health;
pub mod search;
pub mod state;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                  browse by canonical query string (GET)
/// /characters/{id}             single character card (GET)
///
/// /state                       current view (GET), partial update (PATCH)
/// /state/reset                 reset to defaults (POST)
/// /state/back                  history back (POST)
/// /state/forward               history forward (POST)
/// /state/next-page             next page (POST)
/// /state/prev-page             previous page (POST)
/// /state/retry                 retry a failed load (POST)
///
/// /search/input                debounced search text (POST, 202)
/// /search/commit               immediate search commit (POST)
/// /suggestions                 name suggestions (GET ?q=)
///
/// /favorites                   list (GET), add snapshot (POST)
/// /favorites/{id}              add from results (POST), remove (DELETE)
///
/// /options                     filter panel option lists (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/characters", characters::router())
        .nest("/state", state::router())
        .nest("/search", search::router())
        .route("/suggestions", get(handlers::search::suggestions))
        .nest("/favorites", favorites::router())
        .route("/options", get(handlers::options::list_options))
}
