use thiserror::Error;
use tracing::{error, warn};

use crate::shortcuts::RegistryOp;

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,    // informational, nothing changed
    Warning, // recoverable
    Error,   // operation failed
}

/// Errors returned by shortcut and config operations.
///
/// Registry errors are advisory: the same condition is also reported to the
/// registry's diagnostic sink.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("key specification is empty")]
    EmptyKeySpec,

    #[error("{op}: no shortcut registered for '{slug}'")]
    UnknownSlug { op: RegistryOp, slug: String },

    #[error("invalid key specification: {0}")]
    InvalidKeySpec(String),

    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ShortcutError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyKeySpec => ErrorSeverity::Warning,
            Self::UnknownSlug { .. } => ErrorSeverity::Info,
            Self::InvalidKeySpec(_) => ErrorSeverity::Error,
            Self::ConfigRead { .. } => ErrorSeverity::Warning,
            Self::ConfigParse(_) => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyKeySpec => "Shortcut has no keys".to_string(),
            Self::UnknownSlug { slug, .. } => format!("No shortcut for {}", slug),
            Self::InvalidKeySpec(msg) => format!("Invalid shortcut: {}", msg),
            Self::ConfigRead { path, .. } => format!("Could not read config from {}", path),
            Self::ConfigParse(e) => format!("Configuration issue: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the caller does not act on a registry result.
///
/// # Examples
///
/// ```ignore
/// use shortcut_palette::error::ResultExt;
///
/// // Log and continue if the shortcut was never registered
/// registry.remove("k").warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
