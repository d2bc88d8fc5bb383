//! Row structs.
//!
//! Each submodule holds `FromRow` structs matching the table columns and
//! their conversions into the `movies-core` catalog types.

pub mod genre;
pub mod movie;
