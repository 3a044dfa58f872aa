use axum::{
    extract::State,
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::handlers;
use crate::reports::registry::PROVIDERS;
use crate::shared::config::Config;
use crate::shared::state::AppState;
use crate::system;

/// All application routes
///
/// `/health` is public; report providers, the catalog and the frontend sit
/// behind basic auth.
pub fn configure_routes(state: AppState, config: &Config) -> Router {
    let mut protected: Router<AppState> =
        Router::new().route("/api/reports", get(handlers::reports::list_reports));

    for provider in PROVIDERS.iter() {
        protected = protected.route(
            &provider.path,
            get(move |State(state): State<AppState>| {
                handlers::reports::provide(state, provider)
            }),
        );
    }

    let static_dir = Path::new(&config.server.static_dir);
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let protected = protected
        .fallback_service(frontend)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_basic_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(protected)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::repository::RowSource;
    use crate::system::auth::basic::BasicAuth;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value as JsonValue};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubSource;

    #[async_trait]
    impl RowSource for StubSource {
        async fn fetch_rows(&self, _sql: &str) -> anyhow::Result<Vec<JsonValue>> {
            Ok(vec![json!({"Brand": "Acme", "SKU_Count": 5})])
        }
    }

    fn app() -> Router {
        let config: Config =
            toml::from_str("[database]\npath = \"target/db/test.db\"\n[server]\nstatic_dir = \"missing-dist\"\n")
                .unwrap();
        let state = AppState {
            rows: Arc::new(StubSource),
            auth: Some(Arc::new(BasicAuth::new("GSS Reports", "ops", "secret"))),
        };
        configure_routes(state, &config)
    }

    fn get(uri: &str, credentials: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(credentials) = credentials {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode(credentials)),
            );
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reports_and_pages_require_credentials() {
        for uri in ["/api/reports", "/api/brand-stock", "/reports/dead-stock"] {
            let response = app().oneshot(get(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(
                response.headers()[header::WWW_AUTHENTICATE],
                "Basic realm=\"GSS Reports\"",
                "{uri}"
            );

            let response = app().oneshot(get(uri, Some("ops:wrong"))).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_valid_credentials_reach_handlers() {
        let response = app()
            .oneshot(get("/api/reports", Some("ops:secret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(get("/api/brand-stock", Some("ops:secret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
