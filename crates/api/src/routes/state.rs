use axum::routing::{get, post};
use axum::Router;

use crate::handlers::query_state;
use crate::state::AppState;

/// Routes mounted at `/state`.
///
/// ```text
/// GET    /            -> current
/// PATCH  /            -> update
/// POST   /reset       -> reset
/// POST   /back        -> back
/// POST   /forward     -> forward
/// POST   /next-page   -> next_page
/// POST   /prev-page   -> prev_page
/// POST   /retry       -> retry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(query_state::current).patch(query_state::update))
        .route("/reset", post(query_state::reset))
        .route("/back", post(query_state::back))
        .route("/forward", post(query_state::forward))
        .route("/next-page", post(query_state::next_page))
        .route("/prev-page", post(query_state::prev_page))
        .route("/retry", post(query_state::retry))
}
