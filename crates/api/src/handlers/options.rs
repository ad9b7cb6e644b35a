use axum::Json;
use marquee_core::options::FilterOptions;

use crate::response::DataResponse;

/// GET /api/v1/options
pub async fn list_options() -> Json<DataResponse<FilterOptions>> {
    Json(DataResponse {
        data: FilterOptions::all(),
    })
}
