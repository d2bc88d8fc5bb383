use std::sync::Arc;

use movies_core::notify::ToastQueue;
use movies_core::poster::PosterPolicy;
use movies_core::store::MovieStore;
use movies_core::workflow::MovieWorkflow;

use crate::auth::csrf::CsrfGuard;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog storage (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn MovieStore>,
    /// Database pool for health checks; `None` when running on an in-memory store.
    pub pool: Option<movies_db::DbPool>,
    /// Pending success toasts.
    pub toasts: Arc<ToastQueue>,
    /// Anti-forgery token issuer/verifier.
    pub csrf: Arc<CsrfGuard>,
    /// Poster intake rules.
    pub poster_policy: Arc<PosterPolicy>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Workflow bound to this state's collaborators.
    pub fn workflow(&self) -> MovieWorkflow<'_> {
        MovieWorkflow::new(
            self.store.as_ref(),
            self.toasts.as_ref(),
            self.poster_policy.as_ref(),
        )
    }
}
