use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// Return and clear the pending toasts.
pub async fn drain_notifications(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.toasts.drain(),
    })
}
