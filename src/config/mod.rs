//! Configuration module - registry policy and declared shortcuts
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.shortcut-palette/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (RegistryConfig, ShortcutConfig)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_CONFIG_PATH, DEFAULT_IGNORED_FILTER_KEYS, DEFAULT_MODIFIER_KEYS,
    DEFAULT_TEXT_INPUT_TYPES,
};

pub use types::{RegistryConfig, ShortcutConfig};

pub use loader::{default_config_path, load_config, parse_config, try_load_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
