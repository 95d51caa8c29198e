//! Request validation configuration
//! Limits applied before a request body reaches the validation executor

use std::env;
use std::fmt;
use thiserror::Error;

/// 1 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const BODY_BYTES_RANGE: (usize, usize) = (1024, 16 * 1024 * 1024);

pub const DEFAULT_MAX_JSON_DEPTH: usize = 16;
const JSON_DEPTH_RANGE: (usize, usize) = (1, 64);

pub const DEFAULT_LOG_FILTER: &str = "api=info,campus_validation=info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub max_json_depth: usize,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_json_depth: DEFAULT_MAX_JSON_DEPTH,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_body_bytes={}, max_json_depth={}, log_format={:?}",
            self.max_body_bytes, self.max_json_depth, self.log_format
        )
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_body_bytes = read_bounded(
            &lookup,
            "VALIDATION_MAX_BODY_BYTES",
            DEFAULT_MAX_BODY_BYTES,
            BODY_BYTES_RANGE,
        )?;
        let max_json_depth = read_bounded(
            &lookup,
            "VALIDATION_MAX_JSON_DEPTH",
            DEFAULT_MAX_JSON_DEPTH,
            JSON_DEPTH_RANGE,
        )?;

        let log_filter = lookup("LOG_FILTER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let log_format = match lookup("LOG_FORMAT")
            .map(|s| s.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'text' or 'json'".to_string(),
                })
            }
        };

        Ok(Self {
            max_body_bytes,
            max_json_depth,
            log_filter,
            log_format,
        })
    }
}

fn read_bounded<F>(
    lookup: &F,
    name: &'static str,
    default: usize,
    (min, max): (usize, usize),
) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        })?;

    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.max_json_depth, DEFAULT_MAX_JSON_DEPTH);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("VALIDATION_MAX_BODY_BYTES", "65536"),
            ("VALIDATION_MAX_JSON_DEPTH", " 8 "),
            ("LOG_FILTER", "api=debug"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.max_body_bytes, 65536);
        assert_eq!(config.max_json_depth, 8);
        assert_eq!(config.log_filter, "api=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_display_lists_limits() {
        let config = ApiConfig::from_lookup(lookup(&[("LOG_FORMAT", "json")])).unwrap();
        assert_eq!(
            config.to_string(),
            "max_body_bytes=1048576, max_json_depth=16, log_format=Json"
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[("VALIDATION_MAX_BODY_BYTES", "10")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                name: "VALIDATION_MAX_BODY_BYTES",
                value: 10,
                min: 1024,
                max: 16 * 1024 * 1024,
            }
        );

        let err = ApiConfig::from_lookup(lookup(&[("VALIDATION_MAX_JSON_DEPTH", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_unparseable_values_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[("VALIDATION_MAX_JSON_DEPTH", "deep")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "VALIDATION_MAX_JSON_DEPTH", .. }));

        let err = ApiConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("LOG_FORMAT"));
    }
}
