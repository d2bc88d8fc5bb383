use movies_core::notify::DEFAULT_TOAST_CAPACITY;

use crate::auth::csrf::random_alphanumeric;

/// Default request body ceiling (8 MiB). Kept well above the poster limit so
/// oversized posters reach the poster rules instead of failing as 413.
const DEFAULT_BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

/// Length of the secret generated when `CSRF_SECRET` is unset.
const GENERATED_SECRET_LENGTH: usize = 48;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (default: 8 MiB).
    pub body_limit_bytes: usize,
    /// Secret used to sign anti-forgery tokens.
    pub csrf_secret: String,
    /// Undrained success toasts kept before the oldest is dropped.
    pub toast_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `BODY_LIMIT_BYTES`     | `8388608`                  |
    /// | `CSRF_SECRET`          | random, per process        |
    /// | `TOAST_CAPACITY`       | `32`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let body_limit_bytes: usize = std::env::var("BODY_LIMIT_BYTES")
            .unwrap_or_else(|_| DEFAULT_BODY_LIMIT_BYTES.to_string())
            .parse()
            .expect("BODY_LIMIT_BYTES must be a valid usize");

        let csrf_secret = match std::env::var("CSRF_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "CSRF_SECRET not set; generated a per-process secret, \
                     form tokens will not survive a restart"
                );
                random_alphanumeric(GENERATED_SECRET_LENGTH)
            }
        };

        let toast_capacity: usize = std::env::var("TOAST_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_TOAST_CAPACITY.to_string())
            .parse()
            .expect("TOAST_CAPACITY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            body_limit_bytes,
            csrf_secret,
            toast_capacity,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
