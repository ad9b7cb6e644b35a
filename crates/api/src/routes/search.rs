use axum::routing::post;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/search`.
///
/// ```text
/// POST   /input     -> input (debounced)
/// POST   /commit    -> commit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/input", post(search::input))
        .route("/commit", post(search::commit))
}
