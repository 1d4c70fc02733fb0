//! In-process books repository, mirroring the PostgreSQL semantics

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Default)]
struct Store {
    // Rows are kept in id order; deleted rows stay so their ids stay reserved.
    rows: Vec<Book>,
    last_id: i64,
}

impl Store {
    fn live_mut(&mut self, id: i64) -> AppResult<&mut Book> {
        self.rows
            .iter_mut()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryBooksRepository {
    store: RwLock<Store>,
}

impl InMemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBooksRepository {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let now = Utc::now();
        let book = Book {
            id: store.last_id,
            name: data.name.clone(),
            author: data.author.clone(),
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        store.rows.push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Book> {
        self.store
            .read()
            .await
            .rows
            .iter()
            .find(|b| b.id == id && b.deleted_at.is_none())
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        let mut store = self.store.write().await;
        let book = store.live_mut(id)?;
        book.apply(data);
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut store = self.store.write().await;
        store.live_mut(id)?.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self
            .store
            .read()
            .await
            .rows
            .iter()
            .filter(|b| b.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
