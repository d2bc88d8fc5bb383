use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/genres
///
/// All genres ordered by name.
pub async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let genres = state.store.list_genres().await?;

    Ok(Json(DataResponse { data: genres }))
}
