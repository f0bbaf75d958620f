//! Configuration type definitions
//!
//! This module contains all the struct and enum definitions for configuration.

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::shortcuts::{KeySpec, ShortcutAction, ShortcutSpec};

// ============================================
// SHORTCUT DEFINITIONS
// ============================================

/// A shortcut declared in the config file.
///
/// `keys` takes any of the accepted shapes:
/// - `"?"` or `"meta+k | ctrl+k"` (text form)
/// - `["meta", "k"]`
/// - `[["control", "s"], ["meta", "s"]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConfig {
    pub keys: KeySpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial enabled state (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl ShortcutConfig {
    /// Attach an action, producing a spec ready for `ShortcutRegistry::add`.
    pub fn into_spec(self, action: ShortcutAction) -> ShortcutSpec {
        let mut spec = ShortcutSpec::from_action(self.keys, action);
        spec.description = self.description;
        spec.enabled = self.enabled;
        spec
    }
}

// ============================================
// REGISTRY CONFIG
// ============================================

/// Registry policy plus declarative shortcuts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Suppress bare-key shortcuts while a text field has focus (default: true)
    #[serde(default = "default_typing_guard")]
    pub typing_guard: bool,
    /// Input types treated as text entry by the typing guard
    #[serde(default = "default_text_input_types")]
    pub text_input_types: Vec<String>,
    /// Keys that bypass the typing guard
    #[serde(default = "default_modifier_keys")]
    pub modifier_keys: Vec<String>,
    /// Pressed keys ignored by the legend filter
    #[serde(default = "default_ignored_filter_keys")]
    pub ignored_filter_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shortcuts: Vec<ShortcutConfig>,
}

fn default_typing_guard() -> bool {
    DEFAULT_TYPING_GUARD
}
fn default_text_input_types() -> Vec<String> {
    to_strings(DEFAULT_TEXT_INPUT_TYPES)
}
fn default_modifier_keys() -> Vec<String> {
    to_strings(DEFAULT_MODIFIER_KEYS)
}
fn default_ignored_filter_keys() -> Vec<String> {
    to_strings(DEFAULT_IGNORED_FILTER_KEYS)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            typing_guard: DEFAULT_TYPING_GUARD,
            text_input_types: default_text_input_types(),
            modifier_keys: default_modifier_keys(),
            ignored_filter_keys: default_ignored_filter_keys(),
            shortcuts: Vec::new(),
        }
    }
}
