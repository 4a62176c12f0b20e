//! Report payloads returned by the diagnostic endpoints.
//!
//! Every payload carries a `timestamp` produced by [`timestamp`] at the moment
//! the report is built; nothing here is cached.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current wall-clock time in RFC 3339 (ISO-8601) with microseconds.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Uptime in seconds, rounded to two decimals.
pub fn uptime_seconds(uptime: Duration) -> f64 {
    round2(uptime.as_secs_f64())
}

/// Average request rate since start. Zero when `uptime_secs` is not positive.
pub fn requests_per_second(total: u64, uptime_secs: f64) -> f64 {
    if uptime_secs > 0.0 {
        round2(total as f64 / uptime_secs)
    } else {
        0.0
    }
}

/// Uptime in the actuator dialect, e.g. `"12.34s"`.
pub fn actuator_uptime(uptime: Duration) -> String {
    format!("{:.2}s", uptime.as_secs_f64())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

/// Shared shape of `/health` and `/ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub status: String,
    pub uptime_seconds: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuatorHealth {
    pub status: String,
    pub details: ActuatorDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActuatorDetails {
    pub uptime: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealth {
    pub status: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub memory: ProcessMemory,
    pub timestamp: String,
}

/// Resident and virtual size of this process, in MB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessMemory {
    pub rss_mb: f64,
    pub virtual_mb: f64,
}

impl ProcessMemory {
    pub fn from_bytes(rss: u64, virt: u64) -> Self {
        const MB: f64 = 1024.0 * 1024.0;
        Self {
            rss_mb: round2(rss as f64 / MB),
            virtual_mb: round2(virt as f64 / MB),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEcho {
    pub item_id: i64,
    pub query: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub uptime_seconds: f64,
    pub total_requests: u64,
    pub requests_per_second: f64,
    pub timestamp: String,
}

impl MetricsReport {
    pub fn new(uptime: Duration, total_requests: u64) -> Self {
        let uptime_seconds = uptime_seconds(uptime);
        Self {
            uptime_seconds,
            total_requests,
            requests_per_second: requests_per_second(total_requests, uptime.as_secs_f64()),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvReport {
    pub environment_variables: BTreeMap<String, String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoReport {
    pub server_info: ServerInfo,
    pub application_info: ApplicationInfo,
    pub timestamp: String,
}

/// Host and runtime identification plus an instantaneous load sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub runtime_version: String,
    pub platform: String,
    pub processor: String,
    pub memory_usage_percent: f64,
    pub cpu_count: usize,
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub name: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub total_requests: u64,
}

/// Body of every 500 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            message: message.into(),
            timestamp: timestamp(),
        }
    }
}
