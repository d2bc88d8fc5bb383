//! Genre row model.

use movies_core::catalog::Genre;
use movies_core::types::DbId;
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow)]
pub struct GenreRow {
    pub id: DbId,
    pub name: String,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}
