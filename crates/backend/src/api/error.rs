use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api::ErrorBody;
use contracts::shared::report_view::ReportViewError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database query failed: {0}")]
    Database(#[from] anyhow::Error),

    #[error("report catalog is invalid: {0}")]
    Catalog(#[from] ReportViewError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The cause is logged by the handler; clients only get a generic message
        let message = match &self {
            ApiError::Database(_) => "Database query failed",
            ApiError::Catalog(_) => "Report catalog unavailable",
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(message)),
        )
            .into_response()
    }
}
