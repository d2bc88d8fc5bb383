#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movies_core::catalog::{Movie, NewMovie};
use movies_core::memory::InMemoryMovieStore;
use movies_core::notify::ToastQueue;
use movies_core::poster::PosterPolicy;
use movies_core::store::MovieStore;
use tower::ServiceExt;

use movies_api::auth::csrf::CsrfGuard;
use movies_api::config::ServerConfig;
use movies_api::router::build_app_router;
use movies_api::state::AppState;

pub const GENRES: &[&str] = &["Drama", "Action", "Sci-Fi", "Comedy"];
pub const DRAMA: i64 = 1;
pub const SCI_FI: i64 = 3;

const BOUNDARY: &str = "movies-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 8 * 1024 * 1024,
        csrf_secret: "test-csrf-secret".to_string(),
        toast_capacity: 4,
    }
}

/// The full router over an in-memory store, plus handles to inspect it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryMovieStore>,
    pub toasts: Arc<ToastQueue>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Insert a movie directly, bypassing the form flow.
    pub async fn seed_movie(&self, title: &str, rating: f64, poster: Vec<u8>) -> Movie {
        self.store
            .insert_movie(&NewMovie {
                title: title.to_string(),
                year: 1999,
                rating,
                synopsis: format!("{title} synopsis"),
                genre_id: DRAMA,
                poster,
            })
            .await
            .unwrap()
    }

    pub async fn stored(&self, id: i64) -> Option<Movie> {
        self.store.find_movie(id).await.unwrap()
    }

    /// Fetch a form page and return the anti-forgery token it carries.
    pub async fn csrf_token(&self, uri: &str) -> String {
        let json = body_json(get(self.router(), uri).await).await;
        json["data"]["csrf_token"].as_str().unwrap().to_string()
    }
}

/// Build the full application router, with the same middleware stack as
/// production, over an in-memory store seeded with [`GENRES`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryMovieStore::with_genres(GENRES));
    let toasts = Arc::new(ToastQueue::with_capacity(config.toast_capacity));

    let state = AppState {
        store: store.clone(),
        pool: None,
        toasts: toasts.clone(),
        csrf: Arc::new(CsrfGuard::new(&config.csrf_secret)),
        poster_policy: Arc::new(PosterPolicy::default()),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        toasts,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    app.oneshot(form.into_request(uri)).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Hand-assembled `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Title, genre, year, rating and synopsis all valid.
    pub fn valid_fields(self, title: &str) -> Self {
        self.text("title", title)
            .text("genre_id", &SCI_FI.to_string())
            .text("year", "2010")
            .text("rating", "8.8")
            .text("synopsis", "A thief who steals corporate secrets through dream-sharing.")
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// PNG signature followed by zero padding, `len` bytes in total.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.resize(len, 0);
    data
}

/// JPEG SOI marker followed by zero padding, `len` bytes in total.
pub fn jpg_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.resize(len, 0);
    data
}
