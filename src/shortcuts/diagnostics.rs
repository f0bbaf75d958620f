//! Advisory diagnostics raised by the registry.
//!
//! Diagnostics never block an operation. They go to a [`DiagnosticSink`]
//! injected at construction; the default sink writes `tracing` warnings.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use super::types::{Combo, Slug};

/// Registry operation that raised a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryOp {
    Add,
    Remove,
    Toggle,
}

impl fmt::Display for RegistryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Toggle => "toggle",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// `add` got keys that normalize to nothing; nothing was registered.
    EmptyKeySpec { description: Option<String> },
    /// An incoming combo is already claimed. Registration went ahead.
    ComboCollision {
        combo: Combo,
        held_by: Slug,
        description: Option<String>,
    },
    /// `remove` or `toggle` addressed a slug with no shortcut.
    UnknownSlug { op: RegistryOp, slug: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKeySpec {
                description: Some(description),
            } => write!(f, "shortcut '{}' has no keys, not registered", description),
            Self::EmptyKeySpec { description: None } => {
                f.write_str("shortcut has no keys, not registered")
            }
            Self::ComboCollision {
                combo,
                held_by,
                description,
            } => {
                write!(f, "combo '{}' is already used by '{}'", combo, held_by)?;
                if let Some(description) = description {
                    write!(f, " (incoming: {})", description)?;
                }
                Ok(())
            }
            Self::UnknownSlug { op, slug } => {
                write!(f, "{}: no shortcut registered for '{}'", op, slug)
            }
        }
    }
}

/// Receiver for registry diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: one structured `tracing` warning per diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::EmptyKeySpec { description } => warn!(
                event_type = "shortcut_diagnostic",
                kind = "empty_key_spec",
                description = description.as_deref().unwrap_or(""),
                "{}",
                diagnostic
            ),
            Diagnostic::ComboCollision {
                combo,
                held_by,
                description,
            } => warn!(
                event_type = "shortcut_diagnostic",
                kind = "combo_collision",
                combo = %combo,
                held_by = %held_by,
                description = description.as_deref().unwrap_or(""),
                "{}",
                diagnostic
            ),
            Diagnostic::UnknownSlug { op, slug } => warn!(
                event_type = "shortcut_diagnostic",
                kind = "unknown_slug",
                op = %op,
                slug = %slug,
                "{}",
                diagnostic
            ),
        }
    }
}

/// Sink that keeps every diagnostic in memory. Clones share one buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    /// Collision diagnostics only.
    pub fn collisions(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .iter()
            .filter(|d| matches!(d, Diagnostic::ComboCollision { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.records.lock().push(diagnostic.clone());
    }
}
