use std::net::IpAddr;

use serde::Deserialize;
use vitals_core::error::{Result, VitalsError};

const WILDCARD: &str = "*";
const LOG_LEVELS: [&str; 7] = ["TRACE", "DEBUG", "INFO", "WARN", "WARNING", "ERROR", "CRITICAL"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_app_version")]
    pub app_version: String,

    #[serde(default = "wildcard")]
    pub cors_origins: Vec<String>,

    #[serde(default = "wildcard")]
    pub cors_allow_methods: Vec<String>,

    #[serde(default = "wildcard")]
    pub cors_allow_headers: Vec<String>,

    #[serde(default = "enabled")]
    pub cors_allow_credentials: bool,

    /// When false, `/env` is not routed at all.
    #[serde(default = "enabled")]
    pub enable_env_endpoint: bool,

    /// When false, `/env` returns values verbatim.
    #[serde(default = "enabled")]
    pub redact_sensitive_env_vars: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            log_level: default_log_level(),
            app_name: default_app_name(),
            app_version: default_app_version(),
            cors_origins: wildcard(),
            cors_allow_methods: wildcard(),
            cors_allow_headers: wildcard(),
            cors_allow_credentials: true,
            enable_env_endpoint: true,
            redact_sensitive_env_vars: true,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_host(&self.host) {
            return Err(VitalsError::BadRequest(format!(
                "host must be an IP address or hostname, got {:?}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(VitalsError::BadRequest("port must be between 1 and 65535".into()));
        }
        if self.app_name.trim().is_empty() {
            return Err(VitalsError::BadRequest("app_name must not be empty".into()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_uppercase().as_str()) {
            return Err(VitalsError::BadRequest(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join("/"),
                self.log_level
            )));
        }
        for (name, list) in [
            ("cors_origins", &self.cors_origins),
            ("cors_allow_methods", &self.cors_allow_methods),
            ("cors_allow_headers", &self.cors_allow_headers),
        ] {
            if list.is_empty() {
                return Err(VitalsError::BadRequest(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> String {
        if self.debug {
            return "debug".into();
        }
        match self.log_level.to_uppercase().as_str() {
            "WARNING" => "warn".into(),
            "CRITICAL" => "error".into(),
            other => other.to_lowercase(),
        }
    }
}

/// An IP literal, or an RFC 1123 hostname (dot-separated labels of ASCII
/// alphanumerics and inner hyphens, 1-63 bytes each, 253 bytes total).
pub fn is_valid_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    let name = host.strip_suffix('.').unwrap_or(host);
    !name.is_empty()
        && name.len() <= 253
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// Whether a configured list means "anything".
pub fn is_wildcard(list: &[String]) -> bool {
    list.iter().any(|s| s.trim() == WILDCARD)
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "INFO".into()
}
fn default_app_name() -> String {
    "Vitals Diagnostic Server".into()
}
fn default_app_version() -> String {
    "1.0.0".into()
}
fn wildcard() -> Vec<String> {
    vec![WILDCARD.to_string()]
}
fn enabled() -> bool {
    true
}
