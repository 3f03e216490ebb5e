//! Configuration types.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Behavior for keys that have no registered slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyBehavior {
    /// Silently skip the key.
    Allow,
    /// Skip the key and log a warning (default).
    #[default]
    Warn,
    /// Fail the update with an error.
    Reject,
}

impl UnknownKeyBehavior {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "allow" => Some(UnknownKeyBehavior::Allow),
            "warn" => Some(UnknownKeyBehavior::Warn),
            "reject" => Some(UnknownKeyBehavior::Reject),
            _ => None,
        }
    }
}

/// Settings applied by a section when it ingests updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SectionConfig {
    /// Behavior for unknown keys (allow, warn, reject).
    #[serde(default)]
    pub unknown_key: UnknownKeyBehavior,

    /// Abort a dump on the first parse failure or malformed line
    /// instead of collecting it into the report (default: false).
    #[serde(default)]
    pub strict: bool,
}

impl SectionConfig {
    /// Parse settings from YAML. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid section configuration YAML")
    }

    /// Apply an override for `strict` given as text.
    pub fn apply_strict_override(&mut self, raw: &str) -> Result<()> {
        self.strict = match raw.trim().to_lowercase().as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            other => return Err(anyhow!("Invalid strict override '{}'", other)),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SectionConfig::default();
        assert_eq!(config.unknown_key, UnknownKeyBehavior::Warn);
        assert!(!config.strict);
    }

    #[test]
    fn test_from_yaml() {
        let config = SectionConfig::from_yaml_str("unknown_key: reject\nstrict: true\n").unwrap();
        assert_eq!(config.unknown_key, UnknownKeyBehavior::Reject);
        assert!(config.strict);

        let config = SectionConfig::from_yaml_str("strict: true").unwrap();
        assert_eq!(config.unknown_key, UnknownKeyBehavior::Warn);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SectionConfig::from_yaml_str("  \n").unwrap(), SectionConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(SectionConfig::from_yaml_str("unknown_key: sometimes").is_err());
    }

    #[test]
    fn test_strict_override() {
        let mut config = SectionConfig::default();
        config.apply_strict_override("TRUE").unwrap();
        assert!(config.strict);
        config.apply_strict_override("0").unwrap();
        assert!(!config.strict);
        assert!(config.apply_strict_override("yes please").is_err());
    }

    #[test]
    fn test_unknown_key_from_str() {
        assert_eq!(UnknownKeyBehavior::from_str("Reject"), Some(UnknownKeyBehavior::Reject));
        assert_eq!(UnknownKeyBehavior::from_str("ignore"), None);
    }
}
