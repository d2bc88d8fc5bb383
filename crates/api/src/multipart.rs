//! Reading the movie form out of a `multipart/form-data` body.

use std::collections::HashMap;

use axum::extract::Multipart;
use movies_core::form::MovieForm;
use movies_core::poster::UploadedFile;

use crate::auth::csrf::CSRF_FIELD;
use crate::error::{AppError, AppResult};

/// A decoded form post.
#[derive(Debug)]
pub struct FormSubmission {
    /// Anti-forgery token, if the post carried one.
    pub csrf_token: Option<String>,
    pub form: MovieForm,
}

/// Drain the multipart stream into a [`FormSubmission`].
///
/// Text parts become form fields (the last occurrence of a name wins). The
/// first part that carries a file name is taken as the poster; further file
/// parts are ignored.
pub async fn read_movie_form(mut multipart: Multipart) -> AppResult<FormSubmission> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut poster: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if poster.is_none() {
                tracing::debug!(field = %name, %file_name, size = data.len(), "Received file part");
                poster = Some(UploadedFile::new(file_name, data.to_vec()));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        fields.insert(name, value);
    }

    let csrf_token = fields.remove(CSRF_FIELD);

    Ok(FormSubmission {
        csrf_token,
        form: MovieForm::from_fields(&fields, poster),
    })
}
