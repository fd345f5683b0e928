//! Data models for Biblioteca

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookPayload, CatalogStats};
