use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Missing identifier for {entity}")]
    MissingIdentifier { entity: &'static str },

    #[error("Storage error: {0}")]
    Storage(String),
}
