//! Section configuration.
//!
//! Controls how a [`ConfigSection`](crate::registry::ConfigSection) treats
//! keys it does not know and values it cannot parse. Loaded from YAML:
//!
//! ```yaml
//! unknown_key: warn   # allow | warn | reject
//! strict: false       # abort a dump on the first parse failure
//! ```
//!
//! ## Environment Variables
//! - `DRONE_CONFIG_STRICT` - Overrides `strict` (`1`/`true` or `0`/`false`)

mod loader;
mod types;

pub use loader::{STRICT_ENV_VAR, load_settings};
pub use types::*;
