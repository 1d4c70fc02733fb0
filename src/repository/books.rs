//! PostgreSQL books repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use super::BookRepository;
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, name, author, description, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open the connection pool and bring the schema up to date
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_with(config.connect_options()?)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

#[async_trait]
impl BookRepository for BooksRepository {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO books (name, author, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&data.name)
            .bind(&data.author)
            .bind(&data.description)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Book> {
        let query = format!(
            "SELECT {} FROM books WHERE id = $1 AND deleted_at IS NULL",
            BOOK_COLUMNS
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();
        let query = format!(
            r#"
            UPDATE books SET
                name = COALESCE($1, name),
                author = COALESCE($2, author),
                description = COALESCE($3, description),
                updated_at = $4
            WHERE id = $5 AND deleted_at IS NULL
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(&data.name)
            .bind(&data.author)
            .bind(&data.description)
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE books SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE deleted_at IS NULL ORDER BY id",
            BOOK_COLUMNS
        );

        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> CreateBook {
        CreateBook {
            name: "Dune".to_string(),
            author: "Herbert".to_string(),
            description: "Sci-fi".to_string(),
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_create_then_find(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);

        let created = repo.create(&dune()).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(found, created);
        assert_eq!(found.created_at, found.updated_at);
        assert!(found.deleted_at.is_none());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_soft_delete_hides_record(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool.clone());
        let book = repo.create(&dune()).await.unwrap();

        repo.delete(book.id).await.unwrap();

        assert!(matches!(repo.find_by_id(book.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(book.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            repo.update(book.id, &UpdateBook::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(repo.list().await.unwrap().is_empty());

        // The row is still there, only marked
        let marked: Option<chrono::DateTime<Utc>> =
            sqlx::query_scalar("SELECT deleted_at FROM books WHERE id = $1")
                .bind(book.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(marked.is_some());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_ids_not_reused_after_delete(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        let first = repo.create(&dune()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(&dune()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_partial_update(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        let book = repo.create(&dune()).await.unwrap();

        let updated = repo
            .update(
                book.id,
                &UpdateBook {
                    author: Some("Frank Herbert".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Dune");
        assert_eq!(updated.author, "Frank Herbert");
        assert_eq!(updated.description, "Sci-fi");
        assert!(updated.updated_at >= book.updated_at);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_in_id_order(pool: Pool<Postgres>) {
        let repo = BooksRepository::new(pool);
        for name in ["Dune", "Emma", "Ulysses"] {
            repo.create(&CreateBook {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, ["Dune", "Emma", "Ulysses"]);
    }
}
