//! Environment overrides for [`ServerConfig`].
//!
//! Keys are the config field names, matched without regard to case
//! (`PORT`, `port` and `Port` all set `port`). Variables that do not name a
//! field are ignored.

use vitals_core::error::{Result, VitalsError};

/// Process environment as UTF-8 pairs. Variables whose name or value is not
/// valid UTF-8 are skipped rather than aborting the caller.
pub fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

use super::schema::ServerConfig;

impl ServerConfig {
    /// Apply every recognised `(key, value)` pair on top of the current values.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let field = key.to_lowercase();
            match field.as_str() {
                "host" => self.host = value,
                "port" => self.port = parse_port(&key, &value)?,
                "debug" => self.debug = parse_bool(&key, &value)?,
                "log_level" => self.log_level = value,
                "app_name" => self.app_name = value,
                "app_version" => self.app_version = value,
                "cors_origins" => self.cors_origins = parse_list(&key, &value)?,
                "cors_allow_methods" => self.cors_allow_methods = parse_list(&key, &value)?,
                "cors_allow_headers" => self.cors_allow_headers = parse_list(&key, &value)?,
                "cors_allow_credentials" => self.cors_allow_credentials = parse_bool(&key, &value)?,
                "enable_env_endpoint" => self.enable_env_endpoint = parse_bool(&key, &value)?,
                "redact_sensitive_env_vars" => {
                    self.redact_sensitive_env_vars = parse_bool(&key, &value)?
                }
                _ => continue,
            }
            tracing::debug!(field = %field, "config override from environment");
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> VitalsError {
    VitalsError::BadRequest(format!("{key}={value:?} is not a valid {expected}"))
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value.trim().parse().map_err(|_| invalid(key, value, "port"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "boolean")),
    }
}

/// A JSON array of strings, or a comma-separated list.
fn parse_list(key: &str, value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|_| invalid(key, value, "JSON string list"));
    }
    Ok(trimmed
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_accept_common_spellings() {
        for v in ["1", "true", "Yes", " ON "] {
            assert!(parse_bool("DEBUG", v).unwrap(), "{v}");
        }
        for v in ["0", "FALSE", "no", "off"] {
            assert!(!parse_bool("DEBUG", v).unwrap(), "{v}");
        }
        assert!(parse_bool("DEBUG", "maybe").is_err());
    }

    #[test]
    fn lists_accept_json_or_commas() {
        assert_eq!(
            parse_list("CORS_ORIGINS", r#"["https://a.lan", "https://b.lan"]"#).unwrap(),
            vec!["https://a.lan", "https://b.lan"]
        );
        assert_eq!(
            parse_list("CORS_ORIGINS", "https://a.lan, https://b.lan,").unwrap(),
            vec!["https://a.lan", "https://b.lan"]
        );
        assert!(parse_list("CORS_ORIGINS", "[not json").is_err());
    }

    #[test]
    fn port_must_fit_u16() {
        assert_eq!(parse_port("PORT", "9000").unwrap(), 9000);
        assert!(parse_port("PORT", "70000").is_err());
        assert!(parse_port("PORT", "eighty").is_err());
    }
}
