//! Route definitions for the movie catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Movie routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list_movies
/// GET    /create            -> create_form
/// POST   /create            -> create_movie
/// GET    /edit?id=          -> edit_form
/// POST   /edit              -> edit_movie
/// GET    /details?id=       -> movie_details
/// GET    /delete?id=        -> delete_movie
/// GET    /{id}/poster       -> movie_poster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies))
        .route(
            "/create",
            get(movies::create_form).post(movies::create_movie),
        )
        .route("/edit", get(movies::edit_form).post(movies::edit_movie))
        .route("/details", get(movies::movie_details))
        .route("/delete", get(movies::delete_movie))
        .route("/{id}/poster", get(movies::movie_poster))
}
