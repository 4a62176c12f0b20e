//! Per-request instrumentation.
//!
//! Outermost layer of the router, so it sees every request: routed, 404,
//! CORS preflight, and requests whose handler failed or panicked.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub const X_PROCESS_TIME: HeaderName = HeaderName::from_static("x-process-time");
pub const X_REQUEST_COUNT: HeaderName = HeaderName::from_static("x-request-count");

/// Count the request, time the inner service, and stamp both on the response.
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let count = state.metrics().requests.incr();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    // settles the in-flight gauge even if this future is dropped mid-request
    let in_flight = state.metrics().request_started(method.as_str());
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    in_flight.finish(response.status().as_u16());

    let headers = response.headers_mut();
    if let Ok(v) = HeaderValue::from_str(&format!("{elapsed:.6}")) {
        headers.insert(X_PROCESS_TIME, v);
    }
    headers.insert(X_REQUEST_COUNT, HeaderValue::from(count));

    tracing::info!(
        count,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Request {count}: {method} {path} - {elapsed:.3}s"
    );
    response
}
