//! Keyed collections of slots fed from configuration dumps.
//!
//! The drone reports its configuration as text, one `section:name = value`
//! pair per line. A [`ConfigSection`] routes each pair to the slot registered
//! under that key and records what changed.

use crate::config::{SectionConfig, UnknownKeyBehavior};
use crate::error::{ConfigError, ConfigResult};
use crate::kind::{SlotValue, Value};
use crate::slot::{ConfigurationItem, Slot};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of routing one value to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Changed,
    Unchanged,
    /// No slot for the key; skipped per [`UnknownKeyBehavior`].
    Unknown,
}

/// A value that could not be parsed for its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateFailure {
    pub key: String,
    pub raw: String,
    pub message: String,
}

/// Summary of applying a configuration dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// Keys whose value changed, in dump order.
    pub changed: Vec<String>,
    pub unchanged: usize,
    pub unknown: Vec<String>,
    pub failures: Vec<UpdateFailure>,
    /// 1-based line numbers that were not `key = value`.
    pub malformed: Vec<usize>,
}

impl UpdateReport {
    /// True when every line was understood and parsed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.malformed.is_empty()
    }
}

/// Split a dump line into `(key, raw)`.
///
/// Returns `Ok(None)` for blank lines and `#` comments. Both sides are trimmed;
/// only the first `=` separates key from value.
pub fn parse_line(line_number: usize, line: &str) -> ConfigResult<Option<(&str, &str)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    match trimmed.split_once('=') {
        Some((key, raw)) if !key.trim().is_empty() => Ok(Some((key.trim(), raw.trim()))),
        _ => Err(ConfigError::MalformedLine {
            line_number,
            text: line.to_string(),
        }),
    }
}

/// Ordered set of slots of mixed kinds, looked up by key.
#[derive(Debug, Default)]
pub struct ConfigSection {
    name: String,
    items: Vec<Box<dyn ConfigurationItem>>,
    index: HashMap<String, usize>,
    config: SectionConfig,
}

impl ConfigSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: SectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Register a slot. Keys must be unique within the section.
    pub fn register(&mut self, item: Box<dyn ConfigurationItem>) -> ConfigResult<()> {
        let key = item.key().to_string();
        if self.index.contains_key(&key) {
            return Err(ConfigError::DuplicateKey { key });
        }
        self.index.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Build a `Slot<T>` for `key` and register it.
    pub fn slot<T: SlotValue>(&mut self, key: &str) -> ConfigResult<&mut Self> {
        let slot = Slot::<T>::new(key)?;
        self.register(Box::new(slot))?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&dyn ConfigurationItem> {
        self.index.get(key).map(|&i| self.items[i].as_ref())
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.get(key).map(|item| item.value())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ConfigurationItem> + '_ {
        self.items.iter().map(|item| item.as_ref())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Route a raw value to the slot registered under `key`.
    pub fn apply(&mut self, key: &str, raw: &str) -> ConfigResult<ApplyOutcome> {
        let Some(&i) = self.index.get(key) else {
            return match self.config.unknown_key {
                UnknownKeyBehavior::Allow => Ok(ApplyOutcome::Unknown),
                UnknownKeyBehavior::Warn => {
                    warn!(section = %self.name, key, "Ignoring unknown configuration key");
                    Ok(ApplyOutcome::Unknown)
                }
                UnknownKeyBehavior::Reject => Err(ConfigError::unknown_key(key)),
            };
        };

        if self.items[i].try_update(raw)? {
            Ok(ApplyOutcome::Changed)
        } else {
            Ok(ApplyOutcome::Unchanged)
        }
    }

    /// Apply every `key = value` line of a dump.
    ///
    /// Parse failures and malformed lines are logged and collected into the
    /// report unless the section is strict, in which case the first one is
    /// returned as an error. Slots updated before that error keep their new
    /// values.
    pub fn apply_dump(&mut self, text: &str) -> ConfigResult<UpdateReport> {
        let mut report = UpdateReport::default();

        for (i, line) in text.lines().enumerate() {
            let line_number = i + 1;
            let (key, raw) = match parse_line(line_number, line) {
                Ok(Some(pair)) => pair,
                Ok(None) => continue,
                Err(err) if !self.config.strict => {
                    warn!(section = %self.name, line_number, "{}", err);
                    report.malformed.push(line_number);
                    continue;
                }
                Err(err) => return Err(err),
            };

            match self.apply(key, raw) {
                Ok(ApplyOutcome::Changed) => report.changed.push(key.to_string()),
                Ok(ApplyOutcome::Unchanged) => report.unchanged += 1,
                Ok(ApplyOutcome::Unknown) => report.unknown.push(key.to_string()),
                Err(err @ ConfigError::ParseFailure { .. }) if !self.config.strict => {
                    warn!(section = %self.name, key, "{}", err);
                    report.failures.push(UpdateFailure {
                        key: key.to_string(),
                        raw: raw.to_string(),
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            section = %self.name,
            changed = report.changed.len(),
            unchanged = report.unchanged,
            "Applied configuration dump"
        );
        Ok(report)
    }

    /// Return every slot to its default, e.g. before a full resync.
    pub fn reset_all(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
    }
}
