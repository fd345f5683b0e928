//! Repository layer for book persistence
//!
//! The service only sees the [`BookRepository`] trait; the concrete store is
//! chosen at startup from `database.backend`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{error::AppResult, models::Book};

pub use memory::MemoryBookRepository;
pub use postgres::PgBookRepository;

/// Persistence boundary for books. Implementations hold no business rules;
/// the only check they perform is the ISBN uniqueness backstop, reported as
/// [`crate::AppError::DuplicateIsbn`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, ordered by id
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Exact ISBN match
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Case-insensitive substring match on the title
    async fn find_by_title_containing(&self, text: &str) -> AppResult<Vec<Book>>;

    /// Case-insensitive substring match on the author
    async fn find_by_author_containing(&self, text: &str) -> AppResult<Vec<Book>>;

    async fn find_by_availability(&self, available: bool) -> AppResult<Vec<Book>>;

    /// Case-insensitive substring match on title, author or publisher
    async fn search(&self, term: &str) -> AppResult<Vec<Book>>;

    /// Insert when `book.id` is `None`, otherwise update the row with that id.
    async fn save(&self, book: Book) -> AppResult<Book>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

/// Lowercased containment test shared by the in-memory store
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escape `%`, `_` and `\` so a user term is matched literally inside `LIKE`
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
