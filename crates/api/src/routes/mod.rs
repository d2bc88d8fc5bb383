pub mod genres;
pub mod health;
pub mod movies;
pub mod notifications;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                     listing
/// /movies/create              blank form (GET), submit (POST)
/// /movies/edit                pre-filled form (GET ?id=), submit (POST)
/// /movies/details             movie with genre (GET ?id=)
/// /movies/delete              delete (GET ?id=)
/// /movies/{id}/poster         stored poster bytes
///
/// /genres                     genre list
///
/// /notifications              drain pending toasts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::router())
        .nest("/genres", genres::router())
        .nest("/notifications", notifications::router())
}
