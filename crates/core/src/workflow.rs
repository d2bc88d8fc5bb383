//! Movie form workflow: create, edit, delete, details, listing.
//!
//! Each operation is one explicit call returning a typed result. Form
//! submissions end in [`FormOutcome::Accepted`] (committed, notification
//! sent) or [`FormOutcome::Rejected`] (nothing written, view-model ready to
//! re-render). Missing identifiers, unknown records, and storage failures
//! come back as [`CoreError`].

use crate::catalog::{MovieDetails, MovieSummary, NewMovie};
use crate::error::CoreError;
use crate::form::{FieldErrors, MovieForm, MovieFormView, GENRE_FIELD};
use crate::notify::Notifier;
use crate::poster::{PosterPolicy, PosterRejection, POSTER_FIELD};
use crate::store::MovieStore;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found and missing-identifier errors.
pub const MOVIE_ENTITY: &str = "Movie";

pub const CREATED_MESSAGE: &str = "Movie created successfully";
pub const EDITED_MESSAGE: &str = "Movie edited successfully";

const UNKNOWN_GENRE_MESSAGE: &str = "Please select a valid genre";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a create or edit submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// The record was committed; the caller should redirect to the listing.
    Accepted { movie_id: DbId },
    /// Nothing was written; re-render the form with this view-model.
    Rejected(MovieFormView),
}

/// Numeric fields known to be present once general validation has passed.
struct CheckedFields {
    genre_id: DbId,
    year: i32,
    rating: f64,
}

enum FieldCheck {
    Passed(CheckedFields),
    Failed(FieldErrors),
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Borrowed collaborators for one request.
pub struct MovieWorkflow<'a> {
    store: &'a dyn MovieStore,
    notifier: &'a dyn Notifier,
    policy: &'a PosterPolicy,
}

impl<'a> MovieWorkflow<'a> {
    pub fn new(
        store: &'a dyn MovieStore,
        notifier: &'a dyn Notifier,
        policy: &'a PosterPolicy,
    ) -> Self {
        Self {
            store,
            notifier,
            policy,
        }
    }

    /// All movies, highest rating first.
    pub async fn list(&self) -> Result<Vec<MovieSummary>, CoreError> {
        self.store.list_movies().await
    }

    /// Blank create form with the genre list populated.
    pub async fn new_form(&self) -> Result<MovieFormView, CoreError> {
        Ok(MovieFormView::blank(self.store.list_genres().await?))
    }

    /// Edit form pre-filled from the stored record.
    pub async fn edit_form(&self, id: Option<DbId>) -> Result<MovieFormView, CoreError> {
        let id = require_id(id)?;
        let movie = self
            .store
            .find_movie(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            })?;
        let genres = self.store.list_genres().await?;
        Ok(MovieFormView::for_movie(&movie, genres))
    }

    /// Create a movie. A poster is mandatory.
    pub async fn create(&self, mut form: MovieForm) -> Result<FormOutcome, CoreError> {
        let fields = match self.check_fields(&form).await? {
            FieldCheck::Passed(fields) => fields,
            FieldCheck::Failed(errors) => return self.reject(&form, errors, false).await,
        };

        let Some(upload) = form.poster.take() else {
            return self
                .reject_poster(&form, PosterRejection::Missing, false)
                .await;
        };
        let poster = match self.policy.validate(Some(upload)) {
            Ok(bytes) => bytes,
            Err(rejection) => return self.reject_poster(&form, rejection, false).await,
        };

        let movie = self
            .store
            .insert_movie(&NewMovie {
                title: form.title,
                year: fields.year,
                rating: fields.rating,
                synopsis: form.synopsis,
                genre_id: fields.genre_id,
                poster,
            })
            .await?;

        tracing::info!(movie_id = movie.id, title = %movie.title, "Movie created");
        self.notifier.success(CREATED_MESSAGE);
        Ok(FormOutcome::Accepted { movie_id: movie.id })
    }

    /// Edit a movie. Without a new poster the stored bytes are kept.
    ///
    /// Field rules are checked before the record is loaded, so an invalid
    /// submission is re-rendered even when the id no longer exists.
    pub async fn edit(&self, mut form: MovieForm) -> Result<FormOutcome, CoreError> {
        let id = require_id(form.id)?;

        let fields = match self.check_fields(&form).await? {
            FieldCheck::Passed(fields) => fields,
            FieldCheck::Failed(errors) => {
                let has_poster = self
                    .store
                    .find_movie(id)
                    .await?
                    .is_some_and(|movie| !movie.poster.is_empty());
                return self.reject(&form, errors, has_poster).await;
            }
        };

        let mut movie = self
            .store
            .find_movie(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            })?;

        if let Some(upload) = form.poster.take() {
            match self.policy.validate(Some(upload)) {
                Ok(bytes) => movie.poster = bytes,
                Err(rejection) => return self.reject_poster(&form, rejection, true).await,
            }
        }

        movie.title = form.title;
        movie.genre_id = fields.genre_id;
        movie.year = fields.year;
        movie.rating = fields.rating;
        movie.synopsis = form.synopsis;

        if !self.store.update_movie(&movie).await? {
            return Err(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            });
        }

        tracing::info!(movie_id = movie.id, title = %movie.title, "Movie edited");
        self.notifier.success(EDITED_MESSAGE);
        Ok(FormOutcome::Accepted { movie_id: movie.id })
    }

    /// A movie with its genre resolved.
    pub async fn details(&self, id: Option<DbId>) -> Result<MovieDetails, CoreError> {
        let id = require_id(id)?;
        self.store
            .find_movie_details(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            })
    }

    /// Delete a movie.
    pub async fn delete(&self, id: Option<DbId>) -> Result<(), CoreError> {
        let id = require_id(id)?;
        if !self.store.delete_movie(id).await? {
            return Err(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            });
        }
        tracing::info!(movie_id = id, "Movie deleted");
        Ok(())
    }

    /// Stored poster bytes of a movie.
    pub async fn poster(&self, id: DbId) -> Result<Vec<u8>, CoreError> {
        self.store
            .find_movie(id)
            .await?
            .map(|movie| movie.poster)
            .ok_or(CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// General field rules plus the genre reference check.
    async fn check_fields(&self, form: &MovieForm) -> Result<FieldCheck, CoreError> {
        let mut errors = form.field_errors();

        if let Some(genre_id) = form.genre_id.filter(|_| !errors.contains(GENRE_FIELD)) {
            if self.store.find_genre(genre_id).await?.is_none() {
                errors.add(GENRE_FIELD, UNKNOWN_GENRE_MESSAGE);
            }
        }

        Ok(match (form.genre_id, form.year, form.rating) {
            (Some(genre_id), Some(year), Some(rating)) if errors.is_empty() => {
                FieldCheck::Passed(CheckedFields {
                    genre_id,
                    year,
                    rating,
                })
            }
            _ => FieldCheck::Failed(errors),
        })
    }

    /// Build the rejected view-model. The genre list is always fetched fresh.
    async fn reject(
        &self,
        form: &MovieForm,
        errors: FieldErrors,
        has_poster: bool,
    ) -> Result<FormOutcome, CoreError> {
        tracing::debug!(
            fields = ?errors.fields().collect::<Vec<_>>(),
            "Movie form rejected"
        );
        let genres = self.store.list_genres().await?;
        Ok(FormOutcome::Rejected(MovieFormView::rejected(
            form, genres, errors, has_poster,
        )))
    }

    async fn reject_poster(
        &self,
        form: &MovieForm,
        rejection: PosterRejection,
        has_poster: bool,
    ) -> Result<FormOutcome, CoreError> {
        let mut errors = FieldErrors::new();
        errors.add(POSTER_FIELD, rejection.to_string());
        self.reject(form, errors, has_poster).await
    }
}

fn require_id(id: Option<DbId>) -> Result<DbId, CoreError> {
    id.ok_or(CoreError::MissingIdentifier {
        entity: MOVIE_ENTITY,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
