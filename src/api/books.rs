//! Book (catalog) endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{FieldQuery, SearchQuery},
        Book, BookPayload, CatalogStats,
    },
    AppState,
};

use super::{ApiPath, ApiQuery, ValidatedJson};

/// Confirmation body for deletions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub mensagem: String,
}

fn found_or_404(book: Option<Book>) -> Response {
    match book {
        Some(book) => Json(book).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// List every book
#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_all().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Response> {
    let book = state.services.catalog.get_by_id(id).await?;
    Ok(found_or_404(book))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/livros/isbn/{isbn}",
    tag = "livros",
    params(("isbn" = String, Path, description = "Exact ISBN")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    ApiPath(isbn): ApiPath<String>,
) -> AppResult<Response> {
    let book = state.services.catalog.get_by_isbn(&isbn).await?;
    Ok(found_or_404(book))
}

/// Search title, author and publisher
#[utoipa::path(
    get,
    path = "/livros/buscar",
    tag = "livros",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "Missing search term", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search(&query.termo).await?;
    Ok(Json(books))
}

/// Search by title
#[utoipa::path(
    get,
    path = "/livros/titulo",
    tag = "livros",
    params(FieldQuery),
    responses(
        (status = 200, description = "Books whose title matches", body = Vec<Book>)
    )
)]
pub async fn search_by_title(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FieldQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_by_title(&query.q).await?;
    Ok(Json(books))
}

/// Search by author
#[utoipa::path(
    get,
    path = "/livros/autor",
    tag = "livros",
    params(FieldQuery),
    responses(
        (status = 200, description = "Books whose author matches", body = Vec<Book>)
    )
)]
pub async fn search_by_author(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FieldQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_by_author(&query.q).await?;
    Ok(Json(books))
}

/// List books currently available for loan
#[utoipa::path(
    get,
    path = "/livros/disponiveis",
    tag = "livros",
    responses(
        (status = 200, description = "Available books", body = Vec<Book>)
    )
)]
pub async fn list_available(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_available().await?;
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or duplicate ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input, unknown book or duplicate ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<BookPayload>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete(id).await?;
    Ok(Json(MessageResponse {
        mensagem: "book deleted successfully".to_string(),
    }))
}

/// Catalog counters
#[utoipa::path(
    get,
    path = "/livros/estatisticas",
    tag = "livros",
    responses(
        (status = 200, description = "Total and available book counts", body = CatalogStats)
    )
)]
pub async fn get_statistics(State(state): State<AppState>) -> AppResult<Json<CatalogStats>> {
    let stats = state.services.catalog.statistics().await?;
    Ok(Json(stats))
}
