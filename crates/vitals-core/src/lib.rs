//! vitals core: transport-agnostic report payloads, error types, and the
//! small amount of arithmetic the diagnostic endpoints share.
//!
//! This crate carries no HTTP or runtime dependencies so the report shapes can
//! be reused by clients and tests without pulling in the server stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `VitalsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod redact;
pub mod report;

/// Shared result type.
pub use error::{Result, VitalsError};
