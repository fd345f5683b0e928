//! PostgreSQL book repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{like_pattern, BookRepository};
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

const BOOK_COLUMNS: &str =
    "id, titulo, autor, isbn, ano_publicacao, editora, descricao, disponivel";

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn insert(&self, book: &Book) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO livros (titulo, autor, isbn, ano_publicacao, editora, descricao, disponivel)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_year)
            .bind(&book.publisher)
            .bind(&book.description)
            .bind(book.available)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, book: &Book) -> AppResult<Book> {
        let query = format!(
            r#"
            UPDATE livros
            SET titulo = $1, autor = $2, isbn = $3, ano_publicacao = $4,
                editora = $5, descricao = $6, disponivel = $7
            WHERE id = $8
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_year)
            .bind(&book.publisher)
            .bind(&book.description)
            .bind(book.available)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM livros ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM livros WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM livros WHERE isbn = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_title_containing(&self, text: &str) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM livros WHERE titulo ILIKE $1 ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(like_pattern(text))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_author_containing(&self, text: &str) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM livros WHERE autor ILIKE $1 ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(like_pattern(text))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_availability(&self, available: bool) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM livros WHERE disponivel = $1 ORDER BY id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(available)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Book>> {
        let query = format!(
            r#"
            SELECT {} FROM livros
            WHERE titulo ILIKE $1 OR autor ILIKE $1 OR editora ILIKE $1
            ORDER BY id
            "#,
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save(&self, book: Book) -> AppResult<Book> {
        match book.id {
            None => self.insert(&book).await,
            Some(id) => self.update(id, &book).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM livros WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM livros WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM livros")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
