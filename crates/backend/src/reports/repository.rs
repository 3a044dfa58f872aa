use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, JsonValue, Statement};

/// Runs a fixed provider query and returns each row as a flat JSON object
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, sql: &str) -> anyhow::Result<Vec<JsonValue>>;
}

pub struct DatabaseRowSource {
    db: DatabaseConnection,
}

impl DatabaseRowSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RowSource for DatabaseRowSource {
    async fn fetch_rows(&self, sql: &str) -> anyhow::Result<Vec<JsonValue>> {
        let stmt = Statement::from_string(DatabaseBackend::Sqlite, sql.to_string());
        let rows = JsonValue::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_rows_come_back_as_flat_objects() {
        let db = connect_in_memory().await.unwrap();
        db.execute_unprepared(
            "INSERT INTO tblProductsMaster (SKU, Title, CostPrice) VALUES ('A1', 'Widget', 2.5)",
        )
        .await
        .unwrap();

        let source = DatabaseRowSource::new(db);
        let rows = source
            .fetch_rows("SELECT SKU, Title, CostPrice, FitRef FROM tblProductsMaster")
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["SKU"], "A1");
        assert_eq!(rows[0]["Title"], "Widget");
        assert_eq!(rows[0]["CostPrice"], 2.5);
        assert!(rows[0]["FitRef"].is_null());
    }
}
