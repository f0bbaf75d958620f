//! Configuration loading from file system
//!
//! Reads the JSON config file. `load_config` never fails: problems are logged
//! and defaults are used.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::RegistryConfig;
use crate::error::{Result, ShortcutError};

/// Default config path with `~` expanded.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Parse a config from JSON text.
pub fn parse_config(json: &str) -> Result<RegistryConfig> {
    Ok(serde_json::from_str(json)?)
}

/// Load a config, surfacing read and parse errors.
///
/// A missing file is not an error and yields the defaults.
pub fn try_load_config(path: &Path) -> Result<RegistryConfig> {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(RegistryConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ShortcutError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&content)?;
    info!(
        path = %path.display(),
        shortcuts = config.shortcuts.len(),
        "Successfully loaded config"
    );
    Ok(config)
}

/// Load a config, falling back to `RegistryConfig::default()` on any error.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> RegistryConfig {
    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            RegistryConfig::default()
        }
    }
}
