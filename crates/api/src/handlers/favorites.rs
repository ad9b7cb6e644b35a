//! Handlers for the `/favorites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::{Character, CharacterId};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/favorites
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<Character>>> {
    Json(DataResponse {
        data: state.favorites.list(),
    })
}

/// POST /api/v1/favorites
///
/// Stores the supplied snapshot. `201` when added, `200` when the id was
/// already a favorite.
pub async fn add(
    State(state): State<AppState>,
    Json(character): Json<Character>,
) -> (StatusCode, Json<DataResponse<Character>>) {
    let status = if state.favorites.add(character.clone()) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(DataResponse { data: character }))
}

/// POST /api/v1/favorites/{id}
///
/// Bookmarks a character from the current results.
pub async fn add_from_results(
    State(state): State<AppState>,
    Path(id): Path<CharacterId>,
) -> AppResult<(StatusCode, Json<DataResponse<Character>>)> {
    let character = state
        .session
        .view()
        .items
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let status = if state.favorites.add(character.clone()) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: character })))
}

/// DELETE /api/v1/favorites/{id}
///
/// Removing an id that is not a favorite is a no-op.
pub async fn remove(State(state): State<AppState>, Path(id): Path<CharacterId>) -> StatusCode {
    state.favorites.remove(id);
    StatusCode::NO_CONTENT
}
