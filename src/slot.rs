//! Typed configuration slots.
//!
//! A [`Slot`] holds one named value. Raw text is fed through
//! [`Slot::try_update`], parsed with the parser resolved for the slot's kind,
//! and stored only when it differs from the current value.
//!
//! Slots are plain single-writer cells: `try_update` takes `&mut self`. Wrap a
//! slot in a `Mutex` when several threads feed it.

use crate::error::{ConfigError, ConfigResult};
use crate::kind::{ParseFn, SlotValue, Value, ValueKind, resolve};
use std::fmt;
use tracing::debug;

/// Capability surface shared by every slot, independent of its value type.
///
/// Used by [`ConfigSection`](crate::registry::ConfigSection) to hold slots of
/// different kinds side by side.
pub trait ConfigurationItem: fmt::Debug {
    fn key(&self) -> &str;

    fn kind(&self) -> ValueKind;

    /// Current value, kind-erased.
    fn value(&self) -> Value;

    /// Parse `raw` and store it if it differs. Returns whether the value changed.
    fn try_update(&mut self, raw: &str) -> ConfigResult<bool>;

    /// Return to the kind's default, as if never updated.
    fn reset(&mut self);
}

/// A single named configuration value of kind `T`.
#[derive(Clone)]
pub struct Slot<T: SlotValue> {
    key: String,
    kind: ValueKind,
    parser: ParseFn,
    value: T,
    assigned: bool,
}

impl<T: SlotValue> Slot<T> {
    /// Create a slot holding `T::default()`.
    ///
    /// Fails with [`ConfigError::UnsupportedKind`] if `T`'s kind has no parser.
    pub fn new(key: impl Into<String>) -> ConfigResult<Self> {
        let key = key.into();
        let kind = T::kind();
        let parser = resolve(kind).map_err(|_| ConfigError::UnsupportedKind {
            key: key.clone(),
            kind,
        })?;

        Ok(Self {
            key,
            kind,
            parser,
            value: T::default(),
            assigned: false,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether an update has ever parsed successfully.
    ///
    /// Equality ignores this flag: a fresh slot still equals one that was
    /// explicitly updated to the default.
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Compare the stored value against a bare value.
    pub fn equals_value(&self, other: &T) -> bool {
        self.value.same_as(other)
    }

    /// Parse `raw` and store the result if it differs from the current value.
    ///
    /// Returns `Ok(true)` when the value changed and `Ok(false)` when the
    /// parsed value equals the stored one. On a parse failure the stored value
    /// is left untouched.
    pub fn try_update(&mut self, raw: &str) -> ConfigResult<bool> {
        let parsed = (self.parser)(raw)
            .and_then(T::from_value)
            .ok_or_else(|| ConfigError::parse_failure(&self.key, self.kind, raw))?;

        self.assigned = true;
        if parsed.same_as(&self.value) {
            return Ok(false);
        }

        debug!(key = %self.key, old = ?self.value, new = ?parsed, "configuration value changed");
        self.value = parsed;
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.value = T::default();
        self.assigned = false;
    }
}

impl<T: SlotValue> PartialEq for Slot<T> {
    /// Slots are equal when their values are; key and parser are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.value.same_as(&other.value)
    }
}

impl<T: SlotValue> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("assigned", &self.assigned)
            .finish()
    }
}

impl<T: SlotValue> ConfigurationItem for Slot<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn value(&self) -> Value {
        self.value.to_value()
    }

    fn try_update(&mut self, raw: &str) -> ConfigResult<bool> {
        Slot::try_update(self, raw)
    }

    fn reset(&mut self) {
        Slot::reset(self)
    }
}
