//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set once the record is soft-deleted; live records never carry it
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CreateBook {
    pub name: String,
    pub author: String,
    pub description: String,
}

/// Update book request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl Book {
    /// Overwrite the fields supplied in `changes`
    pub fn apply(&mut self, changes: &UpdateBook) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(author) = &changes.author {
            self.author = author.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
    }
}
