//! Movie row models.

use movies_core::catalog::{Genre, Movie, MovieDetails, MovieSummary};
use movies_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A full row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub synopsis: String,
    pub genre_id: DbId,
    pub poster: Vec<u8>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection of `movies` (no poster column).
#[derive(Debug, Clone, FromRow)]
pub struct MovieSummaryRow {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre_id: DbId,
}

/// A `movies` row joined with its genre name.
#[derive(Debug, Clone, FromRow)]
pub struct MovieWithGenreRow {
    #[sqlx(flatten)]
    pub movie: MovieRow,
    pub genre_name: String,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: row.year,
            rating: row.rating,
            synopsis: row.synopsis,
            genre_id: row.genre_id,
            poster: row.poster,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<MovieSummaryRow> for MovieSummary {
    fn from(row: MovieSummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: row.year,
            rating: row.rating,
            genre_id: row.genre_id,
        }
    }
}

impl From<MovieWithGenreRow> for MovieDetails {
    fn from(row: MovieWithGenreRow) -> Self {
        let genre = Genre {
            id: row.movie.genre_id,
            name: row.genre_name,
        };
        Self {
            movie: row.movie.into(),
            genre,
        }
    }
}
