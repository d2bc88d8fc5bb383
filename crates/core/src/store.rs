//! Storage seam for the catalog.
//!
//! The workflow only ever talks to a [`MovieStore`]. Production wires in the
//! PostgreSQL implementation from `movies-db`; tests use
//! [`InMemoryMovieStore`](crate::memory::InMemoryMovieStore).

use async_trait::async_trait;

use crate::catalog::{Genre, Movie, MovieDetails, MovieSummary, NewMovie};
use crate::error::CoreError;
use crate::types::DbId;

/// Query and mutation operations over genres and movies.
///
/// Every mutating call is its own commit.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All genres, ordered by name.
    async fn list_genres(&self) -> Result<Vec<Genre>, CoreError>;

    /// Find a genre by id.
    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, CoreError>;

    /// All movies, highest rating first.
    async fn list_movies(&self) -> Result<Vec<MovieSummary>, CoreError>;

    /// Find a movie by id, poster included.
    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, CoreError>;

    /// Find a movie by id with its genre resolved.
    async fn find_movie_details(&self, id: DbId) -> Result<Option<MovieDetails>, CoreError>;

    /// Insert a movie and return the stored row.
    async fn insert_movie(&self, input: &NewMovie) -> Result<Movie, CoreError>;

    /// Overwrite every mutable column of `movie`. Returns `false` if the row is gone.
    async fn update_movie(&self, movie: &Movie) -> Result<bool, CoreError>;

    /// Delete a movie. Returns `false` if no row matched.
    async fn delete_movie(&self, id: DbId) -> Result<bool, CoreError>;
}
