//! Movie form submission, field validation, and the re-display view-model.
//!
//! A [`MovieForm`] is built from raw text fields plus an optional poster.
//! Unparseable numbers are recorded against their field at build time;
//! the remaining rules are declared with `validator` and merged in by
//! [`MovieForm::field_errors`].

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use validator::Validate;

use crate::catalog::{Genre, Movie};
use crate::poster::UploadedFile;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const ID_FIELD: &str = "id";
pub const TITLE_FIELD: &str = "title";
pub const GENRE_FIELD: &str = "genre_id";
pub const YEAR_FIELD: &str = "year";
pub const RATING_FIELD: &str = "rating";
pub const SYNOPSIS_FIELD: &str = "synopsis";

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Field name -> messages, serialised as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message to `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages attached to `field`, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// One create or edit submission. Lives for a single request.
#[derive(Debug, Clone, Default, Validate)]
pub struct MovieForm {
    /// Present when editing.
    pub id: Option<DbId>,

    #[validate(length(
        min = 1,
        max = 250,
        message = "Title is required and cannot exceed 250 characters"
    ))]
    pub title: String,

    #[validate(
        required(message = "Please select a genre"),
        range(min = 1, message = "Please select a genre")
    )]
    pub genre_id: Option<DbId>,

    #[validate(
        required(message = "Year is required"),
        range(min = 1888, max = 2100, message = "Year must be between 1888 and 2100")
    )]
    pub year: Option<i32>,

    #[validate(required(message = "Rating is required"))]
    pub rating: Option<f64>,

    #[validate(length(
        min = 1,
        max = 2500,
        message = "Synopsis is required and cannot exceed 2500 characters"
    ))]
    pub synopsis: String,

    pub poster: Option<UploadedFile>,

    /// Problems found while parsing the raw text fields.
    pub parse_errors: FieldErrors,
}

impl MovieForm {
    /// Build a form from multipart text fields.
    ///
    /// Blank numeric fields become `None` (reported as required later);
    /// non-blank values that fail to parse are recorded in `parse_errors`.
    pub fn from_fields(fields: &HashMap<String, String>, poster: Option<UploadedFile>) -> Self {
        let mut parse_errors = FieldErrors::new();
        let text = |name: &str| field_text(fields, name);

        let id = parse_field(text(ID_FIELD), ID_FIELD, "Invalid movie id", &mut parse_errors);
        let genre_id = parse_field(
            text(GENRE_FIELD),
            GENRE_FIELD,
            "Please select a genre",
            &mut parse_errors,
        );
        let year = parse_field(
            text(YEAR_FIELD),
            YEAR_FIELD,
            "Year must be a whole number",
            &mut parse_errors,
        );
        let rating = parse_field(
            text(RATING_FIELD),
            RATING_FIELD,
            "Rating must be a number",
            &mut parse_errors,
        );

        Self {
            id,
            title: text(TITLE_FIELD).to_string(),
            genre_id,
            year,
            rating,
            synopsis: text(SYNOPSIS_FIELD).to_string(),
            poster: poster.filter(|file| !file.is_empty()),
            parse_errors,
        }
    }

    /// All field-level problems: parse errors, declared rules, and rating finiteness.
    ///
    /// A field that failed to parse only reports its parse message.
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = self.parse_errors.clone();

        if let Err(validation) = self.validate() {
            for (field, field_errors) in validation.field_errors() {
                let field = field.to_string();
                if self.parse_errors.contains(&field) {
                    continue;
                }
                for error in field_errors.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"));
                    errors.add(field.clone(), message);
                }
            }
        }

        if self.rating.is_some_and(|rating| !rating.is_finite()) {
            errors.add(RATING_FIELD, "Rating must be a number");
        }

        errors
    }
}

fn field_text<'a>(fields: &'a HashMap<String, String>, name: &str) -> &'a str {
    fields.get(name).map(|v| v.trim()).unwrap_or_default()
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// View-model
// ---------------------------------------------------------------------------

/// Everything the movie form page needs to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieFormView {
    pub id: Option<DbId>,
    pub title: String,
    pub genre_id: Option<DbId>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub synopsis: String,
    /// Whether a poster is already stored (edit forms only).
    pub has_poster: bool,
    /// Full genre set, ordered by name.
    pub genres: Vec<Genre>,
    pub errors: FieldErrors,
}

impl MovieFormView {
    /// Blank form for the create page.
    pub fn blank(genres: Vec<Genre>) -> Self {
        Self {
            genres,
            ..Self::default()
        }
    }

    /// Form pre-filled from a stored movie for the edit page.
    pub fn for_movie(movie: &Movie, genres: Vec<Genre>) -> Self {
        Self {
            id: Some(movie.id),
            title: movie.title.clone(),
            genre_id: Some(movie.genre_id),
            year: Some(movie.year),
            rating: Some(movie.rating),
            synopsis: movie.synopsis.clone(),
            has_poster: !movie.poster.is_empty(),
            genres,
            errors: FieldErrors::new(),
        }
    }

    /// Echo a rejected submission back with its errors.
    pub fn rejected(form: &MovieForm, genres: Vec<Genre>, errors: FieldErrors, has_poster: bool) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            genre_id: form.genre_id,
            year: form.year,
            rating: form.rating,
            synopsis: form.synopsis.clone(),
            has_poster,
            genres,
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_fields() -> HashMap<String, String> {
        fields(&[
            ("title", "Inception"),
            ("genre_id", "3"),
            ("year", "2010"),
            ("rating", "8.8"),
            ("synopsis", "A thief who steals corporate secrets through dreams."),
        ])
    }

    #[test]
    fn valid_submission_has_no_errors() {
        let form = MovieForm::from_fields(&valid_fields(), None);
        assert_eq!(form.id, None);
        assert_eq!(form.genre_id, Some(3));
        assert_eq!(form.year, Some(2010));
        assert_eq!(form.rating, Some(8.8));
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn values_are_trimmed() {
        let mut raw = valid_fields();
        raw.insert("title".into(), "  Heat  ".into());
        raw.insert("id".into(), " 7 ".into());
        let form = MovieForm::from_fields(&raw, None);
        assert_eq!(form.title, "Heat");
        assert_eq!(form.id, Some(7));
    }

    #[test]
    fn blank_fields_are_required() {
        let form = MovieForm::from_fields(&HashMap::new(), None);
        let errors = form.field_errors();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            ["genre_id", "rating", "synopsis", "title", "year"]
        );
        assert_eq!(errors.get("rating"), ["Rating is required"]);
    }

    #[test]
    fn unparseable_numbers_report_once_per_field() {
        let mut raw = valid_fields();
        raw.insert("year".into(), "twenty ten".into());
        raw.insert("rating".into(), "great".into());
        let errors = MovieForm::from_fields(&raw, None).field_errors();
        assert_eq!(errors.get("year"), ["Year must be a whole number"]);
        assert_eq!(errors.get("rating"), ["Rating must be a number"]);
    }

    #[test]
    fn year_out_of_range() {
        let mut raw = valid_fields();
        raw.insert("year".into(), "1700".into());
        let errors = MovieForm::from_fields(&raw, None).field_errors();
        assert_eq!(errors.get("year"), ["Year must be between 1888 and 2100"]);
    }

    #[test]
    fn non_finite_rating_is_rejected() {
        let mut raw = valid_fields();
        raw.insert("rating".into(), "NaN".into());
        let errors = MovieForm::from_fields(&raw, None).field_errors();
        assert_eq!(errors.get("rating"), ["Rating must be a number"]);
    }

    #[test]
    fn rating_has_no_range_bound() {
        let mut raw = valid_fields();
        raw.insert("rating".into(), "42.5".into());
        assert!(MovieForm::from_fields(&raw, None).field_errors().is_empty());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut raw = valid_fields();
        raw.insert("title".into(), "x".repeat(251));
        let errors = MovieForm::from_fields(&raw, None).field_errors();
        assert!(errors.contains("title"));
    }

    #[test]
    fn empty_poster_is_dropped() {
        let form = MovieForm::from_fields(&valid_fields(), Some(UploadedFile::new("", vec![])));
        assert!(form.poster.is_none());
        let form = MovieForm::from_fields(
            &valid_fields(),
            Some(UploadedFile::new("a.png", vec![1, 2, 3])),
        );
        assert_eq!(form.poster.map(|p| p.len()), Some(3));
    }

    #[test]
    fn errors_serialise_as_object() {
        let mut errors = FieldErrors::new();
        errors.add("poster", "Please select movie poster!");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "poster": ["Please select movie poster!"] }));
    }
}
