use axum::Json;
use contracts::reports::{catalog, CatalogEntry, ProviderShape};
use sea_orm::JsonValue;

use crate::api::error::ApiError;
use crate::reports::registry::Provider;
use crate::shared::state::AppState;

/// GET <provider.path>
///
/// Runs the provider's query and returns `Row[]`, or the first row (`{}`
/// when empty) for single-object providers.
pub async fn provide(
    state: AppState,
    provider: &'static Provider,
) -> Result<Json<JsonValue>, ApiError> {
    let rows = state.rows.fetch_rows(&provider.sql).await.map_err(|e| {
        tracing::error!("{}: query failed: {:#}", provider.path, e);
        ApiError::Database(e)
    })?;

    tracing::info!("{}: returning {} rows", provider.path, rows.len());
    Ok(Json(shape_body(provider.shape, rows)))
}

fn shape_body(shape: ProviderShape, rows: Vec<JsonValue>) -> JsonValue {
    match shape {
        ProviderShape::List => JsonValue::Array(rows),
        ProviderShape::Single => rows
            .into_iter()
            .next()
            .unwrap_or_else(|| JsonValue::Object(Default::default())),
    }
}

/// GET /api/reports
pub async fn list_reports() -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let definitions = catalog::all().map_err(|e| {
        tracing::error!("Report catalog: {}", e);
        ApiError::Catalog(e)
    })?;
    Ok(Json(definitions.into_iter().map(|d| d.entry).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::registry;
    use crate::reports::repository::RowSource;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;
    use std::sync::Arc;

    struct StubSource(Result<Vec<JsonValue>, String>);

    #[async_trait]
    impl RowSource for StubSource {
        async fn fetch_rows(&self, _sql: &str) -> anyhow::Result<Vec<JsonValue>> {
            self.0.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    fn state(result: Result<Vec<JsonValue>, String>) -> AppState {
        AppState {
            rows: Arc::new(StubSource(result)),
            auth: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> (StatusCode, JsonValue) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_provider_returns_rows_in_query_order() {
        let rows = vec![
            json!({"Brand": "Zeta", "SKU_Count": 12}),
            json!({"Brand": "Acme", "SKU_Count": 5}),
        ];
        let provider = registry::find("/api/brand-stock").unwrap();

        let response = provide(state(Ok(rows.clone())), provider).await.into_response();
        let (status, body) = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, JsonValue::Array(rows));
    }

    #[tokio::test]
    async fn test_single_provider_returns_first_row_or_empty_object() {
        let provider = registry::find("/api/dead-stock/summary").unwrap();

        let summary = json!({"TotalSKUs": 3, "TotalValue": 10.5, "TotalUnits": 7, "NeverSold": 1});
        let response = provide(state(Ok(vec![summary.clone()])), provider)
            .await
            .into_response();
        assert_eq!(body_json(response).await, (StatusCode::OK, summary));

        let response = provide(state(Ok(vec![])), provider).await.into_response();
        assert_eq!(body_json(response).await, (StatusCode::OK, json!({})));
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_500() {
        let provider = registry::find("/api/overstocked/list").unwrap();
        let response = provide(state(Err("connection reset".into())), provider)
            .await
            .into_response();

        assert_eq!(
            body_json(response).await,
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Database query failed"})
            )
        );
    }

    #[tokio::test]
    async fn test_list_reports_returns_catalog() {
        let Json(entries) = list_reports().await.unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].slug, "brand-stock");
    }
}
