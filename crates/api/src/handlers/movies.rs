//! Handlers for the movie catalog: listing, the create/edit form flow,
//! details, deletion, and poster bytes.
//!
//! Form posts are `multipart/form-data` and must carry an anti-forgery
//! token issued by the matching form page. An accepted post redirects to
//! the listing; a rejected post re-renders the form with `422`.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use movies_core::catalog::{MovieDetails, MovieSummary};
use movies_core::form::MovieFormView;
use movies_core::poster::poster_content_type;
use movies_core::types::DbId;
use movies_core::workflow::FormOutcome;
use serde::Serialize;

use crate::error::AppResult;
use crate::multipart::read_movie_form;
use crate::query::IdParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Where accepted form posts land.
pub const LISTING_PATH: &str = "/api/v1/movies";

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Form view-model plus the token the next post must carry.
#[derive(Debug, Serialize)]
pub struct FormPage {
    #[serde(flatten)]
    pub view: MovieFormView,
    pub csrf_token: String,
}

#[derive(Debug, Serialize)]
pub struct MovieListEntry {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub poster_url: String,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsPage {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub poster_url: String,
}

fn poster_url(id: DbId) -> String {
    format!("{LISTING_PATH}/{id}/poster")
}

fn form_page(state: &AppState, view: MovieFormView) -> Json<DataResponse<FormPage>> {
    Json(DataResponse {
        data: FormPage {
            view,
            csrf_token: state.csrf.issue(),
        },
    })
}

/// Redirect on acceptance, `422` with the re-rendered form otherwise.
fn outcome_response(state: &AppState, outcome: FormOutcome) -> Response {
    match outcome {
        FormOutcome::Accepted { .. } => Redirect::to(LISTING_PATH).into_response(),
        FormOutcome::Rejected(view) => {
            (StatusCode::UNPROCESSABLE_ENTITY, form_page(state, view)).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Listing and details
// ---------------------------------------------------------------------------

/// GET /api/v1/movies
///
/// All movies, highest rating first.
pub async fn list_movies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let movies: Vec<MovieListEntry> = state
        .workflow()
        .list()
        .await?
        .into_iter()
        .map(|movie| MovieListEntry {
            poster_url: poster_url(movie.id),
            movie,
        })
        .collect();

    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/details?id=
pub async fn movie_details(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let details = state.workflow().details(params.id).await?;

    Ok(Json(DataResponse {
        data: MovieDetailsPage {
            poster_url: poster_url(details.movie.id),
            details,
        },
    }))
}

/// GET /api/v1/movies/{id}/poster
///
/// Raw poster bytes with a content type sniffed from the data.
pub async fn movie_poster(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let bytes = state.workflow().poster(movie_id).await?;

    Ok(([(CONTENT_TYPE, poster_content_type(&bytes))], bytes))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/create
pub async fn create_form(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = state.workflow().new_form().await?;

    Ok(form_page(&state, view))
}

/// POST /api/v1/movies/create
pub async fn create_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let submission = read_movie_form(multipart).await?;
    state.csrf.verify(submission.csrf_token.as_deref())?;

    let outcome = state.workflow().create(submission.form).await?;

    Ok(outcome_response(&state, outcome))
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/edit?id=
pub async fn edit_form(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let view = state.workflow().edit_form(params.id).await?;

    Ok(form_page(&state, view))
}

/// POST /api/v1/movies/edit
///
/// The record id travels in the `id` form field.
pub async fn edit_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let submission = read_movie_form(multipart).await?;
    state.csrf.verify(submission.csrf_token.as_deref())?;

    let outcome = state.workflow().edit(submission.form).await?;

    Ok(outcome_response(&state, outcome))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/delete?id=
pub async fn delete_movie(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    state.workflow().delete(params.id).await?;

    Ok(StatusCode::OK)
}
