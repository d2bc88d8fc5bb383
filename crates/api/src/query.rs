//! Shared query parameter types for API handlers.

use movies_core::types::DbId;
use serde::{Deserialize, Deserializer};

/// Optional record identifier (`?id=`).
///
/// Left optional so a missing id reaches the workflow and is reported as a
/// bad request rather than an extractor rejection. `?id=` with an empty
/// value counts as missing.
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<DbId>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
