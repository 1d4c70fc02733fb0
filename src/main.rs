//! Bookshelf Server - Book catalogue REST API

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{config::AppConfig, create_router, repository::BooksRepository, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "bookshelf_server={level},tower_http={level},sqlx=warn",
            level = config.logging.level
        )
        .into()
    });

    let json = config.logging.format == "json";
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    let books = BooksRepository::connect(&config.database)
        .await
        .context("Failed to initialize database")?;

    let app = create_router(AppState::new(Arc::new(books)));

    let listener = config.server.listen().await.with_context(|| {
        format!("Failed to bind {}:{}", config.server.host, config.server.port)
    })?;

    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
