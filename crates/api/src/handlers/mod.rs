pub mod characters;
pub mod favorites;
pub mod options;
pub mod query_state;
pub mod search;

use axum::Json;
use marquee_core::QueryState;
use marquee_session::SessionError;

use crate::error::AppResult;
use crate::response::{DataResponse, ViewResponse};
use crate::state::AppState;

/// Wait for the session to settle on `expected` and render the view.
///
/// When results do not settle in time the view is returned as it stands
/// (typically still `loading`).
pub(crate) async fn settled_view(
    state: &AppState,
    expected: &QueryState,
) -> AppResult<Json<DataResponse<ViewResponse>>> {
    let view = match state
        .session
        .settled(expected, state.config.settle_timeout())
        .await
    {
        Ok(view) => view,
        Err(SessionError::Timeout) => {
            tracing::warn!(location = %expected.to_query_string(), "Results did not settle in time");
            state.session.view()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(DataResponse {
        data: ViewResponse::build(view, &state.favorites),
    }))
}
