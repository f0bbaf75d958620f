//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Config file location, tilde-expanded at load time
pub const DEFAULT_CONFIG_PATH: &str = "~/.shortcut-palette/config.json";

/// Typing guard is on unless a config turns it off
pub const DEFAULT_TYPING_GUARD: bool = true;

/// `<input type=...>` values that count as text entry for the typing guard.
pub const DEFAULT_TEXT_INPUT_TYPES: &[&str] = &[
    "text",
    "password",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "datetime-local",
    "month",
    "time",
    "week",
];

/// Keys that let a combo fire even while the user is typing.
pub const DEFAULT_MODIFIER_KEYS: &[&str] = &["control", "ctrl", "alt", "meta", "command", "cmd"];

/// Pressed keys ignored when filtering the shortcut legend.
/// These are the keys that open or close the legend itself.
pub const DEFAULT_IGNORED_FILTER_KEYS: &[&str] = &["?", "/", "space", "escape"];
