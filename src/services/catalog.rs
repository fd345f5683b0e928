//! Catalog management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload, CatalogStats},
    repository::BookRepository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn BookRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        self.repository.find_by_isbn(isbn).await
    }

    pub async fn search_by_title(&self, text: &str) -> AppResult<Vec<Book>> {
        self.repository.find_by_title_containing(text).await
    }

    pub async fn search_by_author(&self, text: &str) -> AppResult<Vec<Book>> {
        self.repository.find_by_author_containing(text).await
    }

    /// Books whose title, author or publisher contains `term`
    pub async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        self.repository.search(term).await
    }

    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        self.repository.find_by_availability(true).await
    }

    /// Create a new book. The ISBN must not belong to any existing book.
    pub async fn create(&self, payload: BookPayload) -> AppResult<Book> {
        if self.repository.find_by_isbn(payload.isbn()).await?.is_some() {
            tracing::warn!("Catalog create: ISBN {} already registered", payload.isbn());
            return Err(AppError::DuplicateIsbn);
        }

        let created = self.repository.save(Book::from(payload)).await?;
        tracing::info!(
            "Catalog create: book id={:?} isbn={}",
            created.id,
            created.isbn
        );
        Ok(created)
    }

    /// Replace every mutable field of the book at `id`.
    pub async fn update(&self, id: i64, payload: BookPayload) -> AppResult<Book> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if book.isbn != payload.isbn() {
            if let Some(other) = self.repository.find_by_isbn(payload.isbn()).await? {
                if other.id != Some(id) {
                    tracing::warn!(
                        "Catalog update: ISBN {} already held by book id={:?}",
                        payload.isbn(),
                        other.id
                    );
                    return Err(AppError::DuplicateIsbn);
                }
            }
        }

        book.apply(payload);
        let updated = self.repository.save(book).await?;
        tracing::info!("Catalog update: book id={}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(AppError::NotFound);
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }

    pub async fn count_total(&self) -> AppResult<i64> {
        self.repository.count().await
    }

    pub async fn count_available(&self) -> AppResult<i64> {
        Ok(self.list_available().await?.len() as i64)
    }

    pub async fn statistics(&self) -> AppResult<CatalogStats> {
        Ok(CatalogStats {
            total: self.count_total().await?,
            disponiveis: self.count_available().await?,
        })
    }
}
