//! vitals server library entry.
//!
//! Wires config, shared state, request accounting, the system probe and the
//! diagnostic handlers into an axum `Router`. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod probe;
pub mod router;
