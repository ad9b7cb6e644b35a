//! Handlers for the `/state` resource: the browse query state and the
//! result view derived from it.

use axum::extract::State;
use axum::Json;
use marquee_core::QueryPatch;

use crate::error::{AppError, AppResult};
use crate::handlers::settled_view;
use crate::response::{DataResponse, ViewResponse};
use crate::state::AppState;

type ViewResult = AppResult<Json<DataResponse<ViewResponse>>>;

/// GET /api/v1/state
///
/// Returns the view as it stands without waiting for pending loads.
pub async fn current(State(state): State<AppState>) -> ViewResult {
    Ok(Json(DataResponse {
        data: ViewResponse::build(state.session.view(), &state.favorites),
    }))
}

/// PATCH /api/v1/state
///
/// Merges the supplied fields over the current state. Omitted fields keep
/// their values.
pub async fn update(State(state): State<AppState>, Json(patch): Json<QueryPatch>) -> ViewResult {
    let expected = state.session.update(patch).await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/reset
pub async fn reset(State(state): State<AppState>) -> ViewResult {
    let expected = state.session.reset().await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/back
pub async fn back(State(state): State<AppState>) -> ViewResult {
    let expected = state.session.back().await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/forward
pub async fn forward(State(state): State<AppState>) -> ViewResult {
    let expected = state.session.forward().await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/next-page
pub async fn next_page(State(state): State<AppState>) -> ViewResult {
    let expected = state.session.next_page().await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/prev-page
pub async fn prev_page(State(state): State<AppState>) -> ViewResult {
    let expected = state.session.prev_page().await?;
    settled_view(&state, &expected).await
}

/// POST /api/v1/state/retry
///
/// Only valid while the results are in the error state.
pub async fn retry(State(state): State<AppState>) -> ViewResult {
    if !state.session.retry().await? {
        return Err(AppError::BadRequest(
            "Nothing to retry: the last load did not fail".to_string(),
        ));
    }
    let expected = state.session.current().await?;
    settled_view(&state, &expected).await
}
