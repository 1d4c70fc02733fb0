//! Repository layer for database operations

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

pub use books::BooksRepository;
pub use memory::InMemoryBooksRepository;

/// Book persistence operations.
///
/// Soft-deleted records are invisible to every method: they yield
/// `AppError::NotFound` from the keyed operations and are left out of `list`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Persist a new book, assigning its id and timestamps
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;

    /// Get a live book by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Book>;

    /// Overwrite the supplied fields and refresh `updated_at`
    async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book>;

    /// Soft delete: sets `deleted_at`
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// All live books ordered by ID
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}
