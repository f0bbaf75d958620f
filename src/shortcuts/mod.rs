//! Keyboard shortcut registry.
//!
//! This module provides:
//! - Normalization of the three key shapes into canonical combos
//! - Slug identity that ignores key order within a combo
//! - Advisory collision detection
//! - Enable/disable state and the typing-guarded dispatch policy
//! - A relevance filter and glyph formatting for shortcut legends
//!
//! # Example
//!
//! ```ignore
//! use shortcut_palette::shortcuts::{Combo, FocusTarget, ShortcutRegistry, ShortcutSpec};
//!
//! let mut registry = ShortcutRegistry::new();
//! registry.add(ShortcutSpec::new(["meta", "k"], || open_palette()).with_description("Palette"))?;
//!
//! // Host key source reports that meta and k are down
//! let combo = Combo::new(["k", "meta"]).unwrap();
//! registry.dispatch(&combo, &FocusTarget::input("text")); // fires: meta bypasses the typing guard
//! ```

mod claims;
mod diagnostics;
mod focus;
mod listeners;
mod pressed;
mod registry;
mod symbols;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;


pub use types::{
    canonicalize_key, slugify, Combo, ComboSet, KeySpec, Slug, COMBO_SEPARATOR, KEY_SEPARATOR,
};

pub use symbols::{
    display_string, format_for_display, key_to_symbol, DisplaySegment, SegmentKind,
    ALTERNATIVE_SEPARATOR,
};

pub use claims::{ComboClaims, ComboConflict};

pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, RegistryOp, TracingSink};

pub use focus::{FocusTarget, TypingGuard};

pub use pressed::PressedKeys;

pub use listeners::{ComboSubscriber, ListenerDelta, ListenerSet};

pub use registry::{
    AddReport, DispatchOutcome, Shortcut, ShortcutAction, ShortcutRegistry, ShortcutSpec,
};
