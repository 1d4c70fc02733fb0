//! Bookshelf server
//!
//! A REST JSON API over a single soft-deletable `books` table.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use api::create_router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::BookRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}
