//! Shared error type across vitals crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Request parameters failed type validation.
    Validation,
    /// No such route or resource.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and config diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Validation => "VALIDATION",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, VitalsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation failed for {field}: {msg}")]
    Validation { field: String, msg: String },
    #[error("not found")]
    NotFound,
    #[error("system probe failed: {0}")]
    Probe(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl VitalsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            VitalsError::BadRequest(_) => ClientCode::BadRequest,
            VitalsError::Validation { .. } => ClientCode::Validation,
            VitalsError::NotFound => ClientCode::NotFound,
            VitalsError::Probe(_) | VitalsError::Internal(_) => ClientCode::Internal,
        }
    }
}
