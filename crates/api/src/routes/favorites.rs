use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> add
/// POST   /{id}      -> add_from_results
/// DELETE /{id}      -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list).post(favorites::add))
        .route(
            "/{id}",
            post(favorites::add_from_results).delete(favorites::remove),
        )
}
