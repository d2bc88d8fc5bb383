//! Catalog entities: genres and movies.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A named category a movie belongs to. Seeded reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
}

/// A stored movie record, poster bytes included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub synopsis: String,
    pub genre_id: DbId,
    #[serde(skip)]
    pub poster: Vec<u8>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a movie. The poster has already passed intake.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub synopsis: String,
    pub genre_id: DbId,
    pub poster: Vec<u8>,
}

/// A movie with its genre resolved, for the details page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genre: Genre,
}

/// A listing row. Carries no poster bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre_id: DbId,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            genre_id: movie.genre_id,
        }
    }
}
