//! In-process [`MovieStore`] backed by a `RwLock`.
//!
//! Used by the workflow tests and the API integration tests so neither
//! needs a running database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{Genre, Movie, MovieDetails, MovieSummary, NewMovie};
use crate::error::CoreError;
use crate::store::MovieStore;
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    movies: BTreeMap<DbId, Movie>,
    next_movie_id: DbId,
}

#[derive(Default)]
pub struct InMemoryMovieStore {
    tables: RwLock<Tables>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed genres with ids `1..=names.len()` in the order given.
    pub fn with_genres(names: &[&str]) -> Self {
        let genres = names
            .iter()
            .zip(1..)
            .map(|(name, id)| Genre {
                id,
                name: name.to_string(),
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                genres,
                ..Tables::default()
            }),
        }
    }

    pub async fn movie_count(&self) -> usize {
        self.tables.read().await.movies.len()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, CoreError> {
        let mut genres = self.tables.read().await.genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn list_movies(&self) -> Result<Vec<MovieSummary>, CoreError> {
        let tables = self.tables.read().await;
        let mut movies: Vec<MovieSummary> = tables.movies.values().map(MovieSummary::from).collect();
        movies.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(movies)
    }

    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, CoreError> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn find_movie_details(&self, id: DbId) -> Result<Option<MovieDetails>, CoreError> {
        let tables = self.tables.read().await;
        let Some(movie) = tables.movies.get(&id) else {
            return Ok(None);
        };
        let genre = tables
            .genres
            .iter()
            .find(|g| g.id == movie.genre_id)
            .cloned()
            .ok_or_else(|| {
                CoreError::Storage(format!(
                    "movie {id} references missing genre {}",
                    movie.genre_id
                ))
            })?;
        Ok(Some(MovieDetails {
            movie: movie.clone(),
            genre,
        }))
    }

    async fn insert_movie(&self, input: &NewMovie) -> Result<Movie, CoreError> {
        let mut tables = self.tables.write().await;
        if !tables.genres.iter().any(|g| g.id == input.genre_id) {
            return Err(CoreError::Storage(format!(
                "genre {} does not exist",
                input.genre_id
            )));
        }

        tables.next_movie_id += 1;
        let now = chrono::Utc::now();
        let movie = Movie {
            id: tables.next_movie_id,
            title: input.title.clone(),
            year: input.year,
            rating: input.rating,
            synopsis: input.synopsis.clone(),
            genre_id: input.genre_id,
            poster: input.poster.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, movie: &Movie) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        if !tables.genres.iter().any(|g| g.id == movie.genre_id) {
            return Err(CoreError::Storage(format!(
                "genre {} does not exist",
                movie.genre_id
            )));
        }

        let Some(stored) = tables.movies.get_mut(&movie.id) else {
            return Ok(false);
        };
        *stored = Movie {
            created_at: stored.created_at,
            updated_at: chrono::Utc::now(),
            ..movie.clone()
        };
        Ok(true)
    }

    async fn delete_movie(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.tables.write().await.movies.remove(&id).is_some())
    }
}
