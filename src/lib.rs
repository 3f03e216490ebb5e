//! Typed configuration slots for drone configuration streams.
//!
//! A [`Slot`] holds one named value of a statically declared kind. Raw text
//! from the drone is parsed with a parser resolved once at construction, and
//! [`Slot::try_update`] reports whether the stored value changed.
//! [`ConfigSection`] groups slots of mixed kinds and applies whole
//! `key = value` dumps.

pub mod cli;
pub mod config;
pub mod drone;
pub mod error;
pub mod format;
pub mod interop;
pub mod kind;
pub mod registry;
pub mod slot;

pub use error::{ConfigError, ConfigResult, ErrorCode};
pub use interop::ScreenPoint;
pub use kind::{SlotValue, Value, ValueKind};
pub use registry::{ApplyOutcome, ConfigSection, UpdateReport};
pub use slot::{ConfigurationItem, Slot};
