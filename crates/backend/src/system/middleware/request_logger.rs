use axum::body::{to_bytes, Body};
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use contracts::shared::report_view::format::format_integer;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Prints one console line per request: UTC time, duration, response size,
/// status, method and path. Every response is tagged with an `x-request-id`.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();

    let response = next.run(req).await;
    let (mut parts, body) = response.into_parts();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER.clone(), value);
    }

    // Buffer the body to get its real size
    let (size, body) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => (format_integer(bytes.len() as f64), Body::from(bytes)),
        Err(e) => {
            tracing::error!(
                "{} {} {}: failed to read response body: {}",
                request_id,
                method,
                path,
                e
            );
            ("error".to_string(), Body::default())
        }
    };

    // cyan for 200, yellow otherwise
    let color_code = if parts.status.as_u16() == 200 { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Utc::now().format("%H:%M:%S"),
        start.elapsed().as_millis(),
        size,
        parts.status.as_u16(),
        method,
        path
    );
    tracing::debug!(request_id = %request_id, status = parts.status.as_u16(), "{} {}", method, path);

    Response::from_parts(parts, body)
}
