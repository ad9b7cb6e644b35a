//! Search text input, commits and suggestions.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use marquee_core::Character;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::settled_view;
use crate::response::{DataResponse, ViewResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

/// POST /api/v1/search/input
///
/// Raw keystroke text. Committed once input has been quiet for the debounce
/// window; whitespace-only text clears the search immediately.
pub async fn input(
    State(state): State<AppState>,
    Json(body): Json<SearchText>,
) -> AppResult<StatusCode> {
    state.session.search_input(body.text).await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/search/commit
///
/// Commits the text right away (e.g. a picked suggestion) and returns to
/// the first page.
pub async fn commit(
    State(state): State<AppState>,
    Json(body): Json<SearchText>,
) -> AppResult<Json<DataResponse<ViewResponse>>> {
    let expected = state.session.commit_search(body.text).await?;
    settled_view(&state, &expected).await
}

/// GET /api/v1/suggestions?q=
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> AppResult<Json<DataResponse<Vec<Character>>>> {
    let found = state.session.suggestions(&params.q).await?;
    Ok(Json(DataResponse { data: found }))
}
