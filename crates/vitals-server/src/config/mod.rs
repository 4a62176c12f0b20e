//! Server config loader.
//!
//! Layers, lowest to highest precedence: built-in defaults, an optional YAML
//! file (strict parsing), then process environment variables matched
//! case-insensitively against field names.

pub mod env;
pub mod schema;

use std::fs;
use std::path::Path;

use vitals_core::error::{Result, VitalsError};

pub use schema::ServerConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "VITALS_CONFIG";
/// File picked up from the working directory when present.
pub const DEFAULT_CONFIG_PATH: &str = "vitals.yaml";

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg = parse_yaml(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the full layered configuration for the running process.
pub fn load() -> Result<ServerConfig> {
    let mut cfg = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => parse_file(&path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => parse_file(DEFAULT_CONFIG_PATH)?,
        Err(_) => ServerConfig::default(),
    };
    cfg.apply_env(env::process_vars())?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| VitalsError::Internal(format!("read config {path} failed: {e}")))?;
    parse_yaml(&s)
}

fn parse_yaml(s: &str) -> Result<ServerConfig> {
    // an empty document means "all defaults"
    if s.trim().is_empty() {
        return Ok(ServerConfig::default());
    }
    serde_yaml::from_str(s).map_err(|e| VitalsError::BadRequest(format!("invalid yaml: {e}")))
}
