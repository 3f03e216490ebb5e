//! Structured error types for slot and section operations.

use crate::kind::ValueKind;
use serde::Serialize;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Construction errors
    UnsupportedKind,
    DuplicateKey,

    // Update errors
    ParseFailure,
    UnknownKey,
    MalformedLine,
}

/// Errors raised while building or updating configuration slots.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The declared kind has no registered parser. Raised at construction.
    #[error("no parser for {kind} (slot '{key}')")]
    UnsupportedKind { key: String, kind: ValueKind },

    /// Raw text could not be converted to the slot's kind.
    #[error("cannot parse '{raw}' as {kind} for '{key}'")]
    ParseFailure {
        key: String,
        kind: ValueKind,
        raw: String,
    },

    #[error("unknown configuration key: {key}")]
    UnknownKey { key: String },

    #[error("configuration key already registered: {key}")]
    DuplicateKey { key: String },

    /// A dump line that is neither blank, a comment, nor `key = value`.
    #[error("malformed configuration line {line_number}: {text}")]
    MalformedLine { line_number: usize, text: String },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::UnsupportedKind { .. } => ErrorCode::UnsupportedKind,
            ConfigError::ParseFailure { .. } => ErrorCode::ParseFailure,
            ConfigError::UnknownKey { .. } => ErrorCode::UnknownKey,
            ConfigError::DuplicateKey { .. } => ErrorCode::DuplicateKey,
            ConfigError::MalformedLine { .. } => ErrorCode::MalformedLine,
        }
    }

    // Convenience constructors

    pub fn parse_failure(key: &str, kind: ValueKind, raw: &str) -> Self {
        ConfigError::ParseFailure {
            key: key.to_string(),
            kind,
            raw: raw.to_string(),
        }
    }

    pub fn unknown_key(key: &str) -> Self {
        ConfigError::UnknownKey {
            key: key.to_string(),
        }
    }
}

/// Result type for slot operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ConfigError::parse_failure("control:altitude_max", ValueKind::Integer, "high");
        assert_eq!(err.code(), ErrorCode::ParseFailure);

        let err = ConfigError::UnsupportedKind {
            key: "navdata:point".into(),
            kind: ValueKind::Record("ScreenPoint"),
        };
        assert_eq!(err.code(), ErrorCode::UnsupportedKind);
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::parse_failure("general:navdata_demo", ValueKind::Boolean, "maybe");
        assert_eq!(
            err.to_string(),
            "cannot parse 'maybe' as boolean for 'general:navdata_demo'"
        );
        assert_eq!(
            ConfigError::unknown_key("x:y").to_string(),
            "unknown configuration key: x:y"
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::UnsupportedKind).unwrap();
        assert_eq!(json, "\"UNSUPPORTED_KIND\"");
    }
}
