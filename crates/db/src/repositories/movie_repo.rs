//! Repository for the `movies` table.

use movies_core::catalog::{Movie, NewMovie};
use movies_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{MovieRow, MovieSummaryRow, MovieWithGenreRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, year, rating, synopsis, genre_id, poster, created_at, updated_at";

/// Listing columns; posters are served separately.
const SUMMARY_COLUMNS: &str = "id, title, year, rating, genre_id";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewMovie) -> Result<MovieRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, year, rating, synopsis, genre_id, poster) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(&input.title)
            .bind(input.year)
            .bind(input.rating)
            .bind(&input.synopsis)
            .bind(input.genre_id)
            .bind(&input.poster)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by ID joined with its genre name.
    pub async fn find_with_genre(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieWithGenreRow>, sqlx::Error> {
        sqlx::query_as::<_, MovieWithGenreRow>(
            "SELECT m.id, m.title, m.year, m.rating, m.synopsis, m.genre_id, m.poster, \
                    m.created_at, m.updated_at, g.name AS genre_name \
             FROM movies m \
             JOIN genres g ON g.id = m.genre_id \
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List all movies, highest rating first.
    ///
    /// Ties are broken by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<MovieSummaryRow>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM movies ORDER BY rating DESC, title");
        sqlx::query_as::<_, MovieSummaryRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every mutable column of a movie.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, movie: &Movie) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET \
                title = $2, \
                year = $3, \
                rating = $4, \
                synopsis = $5, \
                genre_id = $6, \
                poster = $7, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.rating)
        .bind(&movie.synopsis)
        .bind(movie.genre_id)
        .bind(&movie.poster)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a movie. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
