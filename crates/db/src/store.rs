//! [`MovieStore`] backed by PostgreSQL.

use async_trait::async_trait;
use movies_core::catalog::{Genre, Movie, MovieDetails, MovieSummary, NewMovie};
use movies_core::error::CoreError;
use movies_core::store::MovieStore;
use movies_core::types::DbId;

use crate::repositories::{GenreRepo, MovieRepo};
use crate::DbPool;

/// Adapts the repositories to the workflow's storage seam.
///
/// Every call is a single statement on the pool, so each mutation commits
/// on its own.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Log a sqlx failure and fold it into the domain error.
fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, CoreError> {
        let rows = GenreRepo::list(&self.pool).await.map_err(storage_error)?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, CoreError> {
        let row = GenreRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Genre::from))
    }

    async fn list_movies(&self) -> Result<Vec<MovieSummary>, CoreError> {
        let rows = MovieRepo::list(&self.pool).await.map_err(storage_error)?;
        Ok(rows.into_iter().map(MovieSummary::from).collect())
    }

    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, CoreError> {
        let row = MovieRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Movie::from))
    }

    async fn find_movie_details(&self, id: DbId) -> Result<Option<MovieDetails>, CoreError> {
        let row = MovieRepo::find_with_genre(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(MovieDetails::from))
    }

    async fn insert_movie(&self, input: &NewMovie) -> Result<Movie, CoreError> {
        let row = MovieRepo::create(&self.pool, input)
            .await
            .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn update_movie(&self, movie: &Movie) -> Result<bool, CoreError> {
        MovieRepo::update(&self.pool, movie)
            .await
            .map_err(storage_error)
    }

    async fn delete_movie(&self, id: DbId) -> Result<bool, CoreError> {
        MovieRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }
}
