//! In-process request accounting.
//!
//! Counters are plain atomics shared through `AppState`; the `/metrics`
//! handlers read them and the request middleware writes them.

pub mod metrics;
