use axum::routing::get;
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /          -> browse (query string is the canonical state)
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::browse))
        .route("/{id}", get(characters::get_by_id))
}
