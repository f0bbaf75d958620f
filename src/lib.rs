//! Shortcut Palette - keyboard shortcut registry for interactive applications
//!
//! This library registers, detects and dispatches keyboard shortcuts given as
//! single keys, key combinations or alternative combinations, flags combo
//! collisions, and keeps bare-key shortcuts quiet while the user types.

pub mod config;
pub mod error;
pub mod logging;
pub mod shortcuts;

pub use error::{ResultExt, ShortcutError};
pub use shortcuts::{KeySpec, Shortcut, ShortcutRegistry, ShortcutSpec};
