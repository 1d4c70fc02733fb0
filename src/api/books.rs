//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    AppState,
};

use super::{IdPath, JsonBody};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Live books ordered by ID", body = Vec<Book>),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.books.list().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state.books.find_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book created", body = Book),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBook>,
) -> AppResult<Json<Book>> {
    let book = state.books.create(&data).await?;
    tracing::info!(id = book.id, "Book created");
    Ok(Json(book))
}

/// Update a book; fields left out of the body keep their value
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    body: Result<JsonBody<UpdateBook>, AppError>,
) -> AppResult<Json<Book>> {
    // A missing book wins over a malformed body
    state.books.find_by_id(id).await?;
    let JsonBody(data) = body?;

    let book = state.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book (soft delete)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> AppResult<StatusCode> {
    state.books.find_by_id(id).await?;
    state.books.delete(id).await?;
    tracing::info!(id, "Book deleted");
    Ok(StatusCode::NO_CONTENT)
}
