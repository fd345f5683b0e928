//! Book (catalog entry) model and request payloads.
//!
//! Wire names follow the `livros` table and the existing frontend
//! (`titulo`, `autor`, `anoPublicacao`, ...); Rust names are English.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Store-assigned identifier; `None` until the book has been saved
    pub id: Option<i64>,
    #[serde(rename = "titulo")]
    #[sqlx(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    #[sqlx(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "anoPublicacao")]
    #[sqlx(rename = "ano_publicacao")]
    pub publication_year: i32,
    #[serde(rename = "editora")]
    #[sqlx(rename = "editora")]
    pub publisher: Option<String>,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "disponivel")]
    #[sqlx(rename = "disponivel")]
    pub available: bool,
}

impl Book {
    /// A book without an id has not been persisted yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Replace every mutable field with the payload's values, keeping the id.
    pub fn apply(&mut self, payload: BookPayload) {
        let BookPayload {
            title,
            author,
            isbn,
            publication_year,
            publisher,
            description,
            available,
        } = payload;

        self.title = title.unwrap_or_default();
        self.author = author.unwrap_or_default();
        self.isbn = isbn.unwrap_or_default();
        self.publication_year = publication_year.unwrap_or_default();
        self.publisher = publisher;
        self.description = description;
        self.available = available;
    }
}

impl From<BookPayload> for Book {
    fn from(payload: BookPayload) -> Self {
        let mut book = Book {
            id: None,
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            publication_year: 0,
            publisher: None,
            description: None,
            available: true,
        };
        book.apply(payload);
        book
    }
}

fn default_available() -> bool {
    true
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Create / update request body. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[serde(rename = "titulo")]
    #[validate(required(message = "title is required"), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(rename = "autor")]
    #[validate(required(message = "author is required"), custom(function = "not_blank"))]
    pub author: Option<String>,
    #[validate(required(message = "ISBN is required"), custom(function = "not_blank"))]
    pub isbn: Option<String>,
    #[serde(rename = "anoPublicacao")]
    #[validate(required(message = "publication year is required"))]
    pub publication_year: Option<i32>,
    #[serde(rename = "editora")]
    pub publisher: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "disponivel", default = "default_available")]
    pub available: bool,
}

impl BookPayload {
    /// Convenience constructor with the four required fields
    pub fn new(title: &str, author: &str, isbn: &str, publication_year: i32) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: Some(isbn.to_string()),
            publication_year: Some(publication_year),
            publisher: None,
            description: None,
            available: true,
        }
    }

    pub fn isbn(&self) -> &str {
        self.isbn.as_deref().unwrap_or_default()
    }
}

/// Flatten validator errors into a single human readable message,
/// ordered by field name so the output is stable.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) if e.code != "blank" => msg.to_string(),
                Some(msg) => format!("{} {}", field, msg),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Query for the combined search endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched against title, author and publisher
    pub termo: String,
}

/// Query for single-field searches
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FieldQuery {
    /// Case-insensitive fragment
    pub q: String,
}

/// Catalog counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogStats {
    pub total: i64,
    pub disponiveis: i64,
}
