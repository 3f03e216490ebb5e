//! Settings loader: file plus environment override.

use super::types::SectionConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Environment variable overriding `strict`.
pub const STRICT_ENV_VAR: &str = "DRONE_CONFIG_STRICT";

/// Load section settings.
///
/// Reads `path` when given (defaults otherwise), then applies
/// `DRONE_CONFIG_STRICT` if set.
pub fn load_settings(path: Option<&Path>) -> Result<SectionConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            debug!(path = %path.display(), "Loaded section settings");
            SectionConfig::from_yaml_str(&content)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?
        }
        None => SectionConfig::default(),
    };

    if let Ok(raw) = std::env::var(STRICT_ENV_VAR) {
        config
            .apply_strict_override(&raw)
            .with_context(|| format!("Invalid {}", STRICT_ENV_VAR))?;
    }

    Ok(config)
}
