use anyhow::{Context, Result};
use sqlx::SqlitePool;

pub async fn run_all(pool: &SqlitePool) -> Result<()> {
    create_documents_table(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

async fn create_documents_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            file_url TEXT NOT NULL,
            file_name TEXT NOT NULL,
            file_type TEXT NOT NULL,
            category TEXT,
            size_bytes INTEGER NOT NULL,
            uploaded_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create documents table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_uploaded_at ON documents(uploaded_at)")
        .execute(pool)
        .await
        .context("Failed to create documents index")?;

    Ok(())
}
