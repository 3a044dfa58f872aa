use sea_orm::{Database, DatabaseConnection};
use std::path::Path;

use super::schema;

/// Opens the reporting database and applies the bootstrap schema
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    schema::apply(&conn).await?;

    Ok(conn)
}

/// Private in-memory database with the bootstrap schema applied
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let conn = Database::connect("sqlite::memory:").await?;
    schema::apply(&conn).await?;
    Ok(conn)
}
