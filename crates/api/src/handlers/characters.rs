//! Handlers for the `/characters` resource.
//!
//! The query string of `GET /characters` is the canonical browse state, so
//! loading that URL behaves like opening the app at that address.

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::presentation::CharacterCard;
use marquee_core::CharacterId;

use crate::error::{AppError, AppResult};
use crate::handlers::settled_view;
use crate::response::{DataResponse, ViewResponse};
use crate::state::AppState;

/// GET /api/v1/characters?search=&franchise=&role=&era=&page=
///
/// Malformed values degrade to their defaults.
pub async fn browse(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<ViewResponse>>> {
    let expected = state.session.navigate(query.unwrap_or_default()).await?;
    settled_view(&state, &expected).await
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<CharacterId>,
) -> AppResult<Json<DataResponse<CharacterCard>>> {
    let character = state
        .catalog
        .fetch_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let is_favorite = state.favorites.is_favorite(id);
    Ok(Json(DataResponse {
        data: CharacterCard::new(character, "", is_favorite),
    }))
}
