use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::shared::state::AppState;

/// Middleware that requires HTTP Basic authentication
///
/// Passes everything through when auth is disabled.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth) = state.auth.as_ref() else {
        return next.run(req).await;
    };

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if auth.authorize(header_value) {
        next.run(req).await
    } else {
        tracing::warn!("Rejected unauthenticated request to {}", req.uri().path());
        auth.challenge()
    }
}
