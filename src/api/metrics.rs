//! Prometheus scrape endpoint and HTTP instrumentation

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};

use crate::error::AppError;
use crate::metrics::{HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL, REGISTRY};

/// GET /metrics
pub async fn metrics() -> Result<impl IntoResponse, AppError> {
    let encoder = TextEncoder::new();
    let body = encoder
        .encode_to_string(&REGISTRY.gather())
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(([(CONTENT_TYPE, encoder.format_type().to_string())], body))
}

/// Count and time every routed request
///
/// Labelled by the route template (`/v1/statuses/:id`), not the raw path,
/// so ids do not blow up label cardinality.
pub async fn track_http_metrics(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &endpoint, &status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &endpoint])
        .observe(started.elapsed().as_secs_f64());

    response
}
