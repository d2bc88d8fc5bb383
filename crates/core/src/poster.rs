//! Poster intake rules.
//!
//! A [`PosterPolicy`] decides whether an uploaded image may be stored as a
//! movie poster. The policy is an immutable value built once at startup and
//! shared by every request.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Form field that poster errors are attached to.
pub const POSTER_FIELD: &str = "poster";

/// Extensions accepted by [`PosterPolicy::default`].
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".png"];

/// Maximum poster size accepted by [`PosterPolicy::default`] (1 MiB).
pub const DEFAULT_MAX_POSTER_BYTES: usize = 1_048_576;

const BYTES_PER_KB: usize = 1024;
const BYTES_PER_MB: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A file taken from a multipart form, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Byte length of the upload.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A zero-byte upload is what browsers send for an untouched file input.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lowercased extension including the leading dot, e.g. `".png"`.
    ///
    /// Returns `None` for names without a dot or ending in one. Only the
    /// final path component is considered.
    pub fn extension(&self) -> Option<String> {
        let name = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name);
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_lowercase()))
    }
}

/// Why a poster was refused. The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PosterRejection {
    #[error("Please select movie poster!")]
    Missing,

    #[error("Only {allowed} images are allowed!")]
    BadExtension { allowed: String },

    #[error("Poster cannot be more than {limit}!")]
    TooLarge { limit: String },
}

/// Accepted extensions and size ceiling for poster uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterPolicy {
    allowed_extensions: Vec<String>,
    max_bytes: usize,
}

impl Default for PosterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS.iter().copied(), DEFAULT_MAX_POSTER_BYTES)
    }
}

impl PosterPolicy {
    /// Build a policy. Extensions are normalised to lowercase with a leading dot.
    pub fn new<I, S>(allowed_extensions: I, max_bytes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();

        Self {
            allowed_extensions,
            max_bytes,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate an upload and hand back its bytes on success.
    ///
    /// Checks run in order: presence, extension, size. `None` and zero-byte
    /// uploads are both treated as missing.
    pub fn validate(&self, upload: Option<UploadedFile>) -> Result<Vec<u8>, PosterRejection> {
        let upload = match upload {
            Some(upload) if !upload.is_empty() => upload,
            _ => return Err(PosterRejection::Missing),
        };

        let accepted = upload
            .extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext));
        if !accepted {
            return Err(PosterRejection::BadExtension {
                allowed: join_with_and(&self.allowed_extensions),
            });
        }

        if upload.len() > self.max_bytes {
            return Err(PosterRejection::TooLarge {
                limit: format_size(self.max_bytes),
            });
        }

        Ok(upload.data)
    }
}

// ---------------------------------------------------------------------------
// Content type
// ---------------------------------------------------------------------------

/// Sniff the MIME type of stored poster bytes from their header.
pub fn poster_content_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `[".jpg", ".png", ".gif"]` -> `".jpg, .png and .gif"`.
fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Render a byte count the way the poster message shows it.
fn format_size(bytes: usize) -> String {
    if bytes >= BYTES_PER_MB && bytes % BYTES_PER_MB == 0 {
        format!("{} MB", bytes / BYTES_PER_MB)
    } else if bytes >= BYTES_PER_KB && bytes % BYTES_PER_KB == 0 {
        format!("{} KB", bytes / BYTES_PER_KB)
    } else {
        format!("{bytes} bytes")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
