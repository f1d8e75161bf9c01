//! Error types for Docstitch.
//!
//! Library crates use [`DocstitchError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Configuration-shape errors (bad pattern, bad level config, unknown
//! strategy) are raised before any document processing begins, so a run
//! never leaves partial output behind.

use std::path::PathBuf;

/// Top-level error type for all Docstitch operations.
#[derive(Debug, thiserror::Error)]
pub enum DocstitchError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The docs root directory does not exist.
    #[error("docs root not found: {}", .path.display())]
    MissingRoot { path: PathBuf },

    /// The navigation index (`_sidebar.md`) does not exist under the root.
    #[error("sidebar file not found: {}", .path.display())]
    MissingSidebar { path: PathBuf },

    /// A page referenced by the sidebar does not exist.
    #[error("referenced page not found: {}", .path.display())]
    MissingPage { path: PathBuf },

    /// A serial-strip pattern failed to compile as a regular expression.
    #[error("invalid strip pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A serial level configuration record failed validation.
    #[error("invalid level config: {message}")]
    LevelConfig { message: String },

    /// A numeral conversion was requested outside the system's valid domain.
    #[error("value {value} is out of range for numeral system '{system}'")]
    NumeralOutOfRange { system: String, value: i64 },

    /// An unrecognized title strategy name was requested.
    #[error("unknown title strategy '{name}': expected 'normal', 'cite', or 'title'")]
    UnknownStrategy { name: String },

    /// Filesystem I/O error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocstitchError>;

impl DocstitchError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a level-config error from any displayable message.
    pub fn level_config(msg: impl Into<String>) -> Self {
        Self::LevelConfig {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
