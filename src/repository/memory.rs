//! In-process book repository
//!
//! Keeps rows in a `BTreeMap` keyed by id so listings come back in id order,
//! mirroring the `ORDER BY id` of the PostgreSQL queries.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{contains_ignore_case, BookRepository};
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Book>,
    /// Last id handed out; ids are never reused, even after deletes
    last_id: i64,
}

impl Table {
    fn isbn_taken(&self, isbn: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|b| b.isbn == isbn && b.id != except)
    }

    fn filter(&self, pred: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.rows.values().filter(|&b| pred(b)).cloned().collect()
    }
}

#[derive(Default)]
pub struct MemoryBookRepository {
    table: RwLock<Table>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|b| b.isbn == isbn).cloned())
    }

    async fn find_by_title_containing(&self, text: &str) -> AppResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.filter(|b| contains_ignore_case(&b.title, text)))
    }

    async fn find_by_author_containing(&self, text: &str) -> AppResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.filter(|b| contains_ignore_case(&b.author, text)))
    }

    async fn find_by_availability(&self, available: bool) -> AppResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.filter(|b| b.available == available))
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.filter(|b| {
            contains_ignore_case(&b.title, term)
                || contains_ignore_case(&b.author, term)
                || b.publisher
                    .as_deref()
                    .is_some_and(|p| contains_ignore_case(p, term))
        }))
    }

    async fn save(&self, mut book: Book) -> AppResult<Book> {
        let mut table = self.table.write().await;

        if table.isbn_taken(&book.isbn, book.id) {
            return Err(AppError::DuplicateIsbn);
        }

        let id = match book.id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(_) => return Err(AppError::NotFound),
            None => {
                table.last_id += 1;
                table.last_id
            }
        };

        book.id = Some(id);
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}
