//! Domain layer for the movie catalog.
//!
//! Holds the entity types, the poster intake rules, the movie form and its
//! validation, the storage and notification seams, and the workflow that
//! ties them together. Nothing here talks to a database or HTTP directly.

pub mod catalog;
pub mod error;
pub mod form;
pub mod memory;
pub mod notify;
pub mod poster;
pub mod store;
pub mod types;
pub mod workflow;
