//! HTTP mapping for handler failures.
//!
//! Handlers never recover locally: they return `ApiError` (or panic) and this
//! module is the one place that turns the failure into a response.

use std::any::Any;

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use vitals_core::error::{ClientCode, VitalsError};
use vitals_core::report::ErrorEnvelope;

#[derive(Debug)]
pub struct ApiError(pub VitalsError);

impl From<VitalsError> for ApiError {
    fn from(e: VitalsError) -> Self {
        Self(e)
    }
}

impl ApiError {
    /// A path segment that failed to parse into the handler's type.
    pub fn path(field: &str, rejection: PathRejection) -> Self {
        Self(VitalsError::Validation { field: field.to_string(), msg: rejection.body_text() })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.client_code() {
            ClientCode::Validation => {
                let (field, msg) = match &self.0 {
                    VitalsError::Validation { field, msg } => (field.as_str(), msg.as_str()),
                    _ => ("", ""),
                };
                tracing::debug!(field, msg, "request validation failed");
                let body = json!({
                    "detail": [{
                        "loc": ["path", field],
                        "msg": msg,
                        "type": "type_error.integer",
                    }]
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ClientCode::BadRequest => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": self.0.to_string() }))).into_response()
            }
            ClientCode::NotFound => not_found_response(),
            ClientCode::Internal => {
                tracing::error!(error = ?self.0, code = ClientCode::Internal.as_str(), "unhandled handler error");
                internal_response(self.0.to_string())
            }
        }
    }
}

fn internal_response(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::internal(message))).into_response()
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}

/// Router fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError(VitalsError::NotFound)
}

/// `CatchPanicLayer` handler: a panicking handler still yields the 500 envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(panic = %message, "handler panicked");
    internal_response(message)
}
