//! Request authenticity checks.
//!
//! - [`csrf::CsrfGuard`] -- Issues and verifies anti-forgery tokens for form posts.

pub mod csrf;
