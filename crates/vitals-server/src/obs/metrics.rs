//! Request counter and response tallies.
//!
//! `RequestCounter` is the single correctness-critical piece of shared state:
//! one atomic increment per inbound request, never decremented. The labelled
//! tallies are backed by `DashMap` and flattened into sorted label vectors so
//! the Prometheus rendering is deterministic per key.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Monotonic count of inbound requests.
#[derive(Debug, Default)]
pub struct RequestCounter {
    total: AtomicU64,
}

impl RequestCounter {
    /// Count one request and return the post-increment value.
    pub fn incr(&self) -> u64 {
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 if never observed).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

/// Status label for requests whose future was dropped before a response.
pub const CANCELLED: &str = "cancelled";

/// One in-flight request; see [`ServerMetrics::request_started`].
pub struct InFlight<'a> {
    metrics: &'a ServerMetrics,
    method: String,
    status: Option<u16>,
}

impl InFlight<'_> {
    pub fn finish(mut self, status: u16) {
        self.status = Some(status);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.fetch_sub(1, Ordering::Relaxed);
        let status = self.status.map(|s| s.to_string());
        let status = status.as_deref().unwrap_or(CANCELLED);
        self.metrics.responses.inc(&[("method", self.method.as_str()), ("status", status)]);
    }
}

#[derive(Default)]
pub struct ServerMetrics {
    pub requests: RequestCounter,
    pub responses: CounterVec,
    in_flight: AtomicI64,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request in flight. The returned guard settles the gauge and the
    /// response tally when finished or dropped, whichever comes first.
    pub fn request_started(&self, method: &str) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        InFlight { metrics: self, method: method.to_string(), status: None }
    }

    pub fn in_flight(&self) -> i64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self, uptime_seconds: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# TYPE vitals_requests_total counter\nvitals_requests_total {}", self.requests.get());
        self.responses.render("vitals_responses_total", &mut out);
        let _ = writeln!(out, "# TYPE vitals_requests_in_flight gauge\nvitals_requests_in_flight {}", self.in_flight());
        let _ = writeln!(out, "# TYPE vitals_uptime_seconds gauge\nvitals_uptime_seconds {}", uptime_seconds);
        out
    }
}
