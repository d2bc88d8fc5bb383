//! Repository for the `genres` table.
//!
//! Genres are seeded by migration; this repository only reads them.

use movies_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::GenreRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides read access to genres.
pub struct GenreRepo;

impl GenreRepo {
    /// List all genres ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<GenreRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY name");
        sqlx::query_as::<_, GenreRow>(&query).fetch_all(pool).await
    }

    /// Find a genre by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GenreRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, GenreRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
