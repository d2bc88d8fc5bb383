use axum::routing::get;
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Notification routes mounted at `/notifications`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(notifications::drain_notifications))
}
