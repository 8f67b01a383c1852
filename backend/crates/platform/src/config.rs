//! Environment-driven configuration helpers
//!
//! Parsing is kept separate from the environment lookup so that the rules
//! can be tested without touching process state.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(String),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read an environment variable, treating blank values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_var(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

pub fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

pub fn env_duration_secs(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    parse_duration_secs(key, env_var(key).as_deref(), default)
}

pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    parse_bool(key, env_var(key).as_deref(), default)
}

/// `APP_ENV=production`
pub fn is_production() -> bool {
    env_var("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"))
}

/// Whole seconds, strictly positive
pub fn parse_duration_secs(
    key: &str,
    raw: Option<&str>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(invalid(key, raw, "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(key, raw, &e.to_string())),
    }
}

pub fn parse_bool(key: &str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected true or false")),
    }
}

/// Comma-separated list, blanks dropped
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_default_when_unset() {
        let d = parse_duration_secs("STORE_TIMEOUT_SECS", None, Duration::from_secs(5)).unwrap();
        assert_eq!(d, Duration::from_secs(5));
    }

    #[test]
    fn test_duration_parsed() {
        let d = parse_duration_secs("STORE_TIMEOUT_SECS", Some("12"), Duration::from_secs(5))
            .unwrap();
        assert_eq!(d, Duration::from_secs(12));
    }

    #[test]
    fn test_duration_rejects_zero_and_garbage() {
        let default = Duration::from_secs(5);
        assert!(parse_duration_secs("X", Some("0"), default).is_err());
        let err = parse_duration_secs("X", Some("soon"), default).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "X"));
    }

    #[test]
    fn test_bool() {
        assert!(parse_bool("SECURE", Some("TRUE"), false).unwrap());
        assert!(!parse_bool("SECURE", Some("off"), true).unwrap());
        assert!(parse_bool("SECURE", None, true).unwrap());
        assert!(parse_bool("SECURE", Some("maybe"), true).is_err());
    }

    #[test]
    fn test_list() {
        assert_eq!(
            parse_list("http://a.test, ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
