//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Fleet Console
//!
//! Ambient failures only: config files, fixtures, catalogs, terminal and
//! logging setup. Domain outcomes such as "server not found" or a failed form
//! field are plain values (`Option`, `ValidationError`) and never land here.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for fleet console operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file I/O error with path.
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML config serialization error.
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// No platform config directory could be resolved.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// Fixture (de)serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A bundled translation catalog failed to parse.
    #[error("Translation catalog '{language}' is invalid: {reason}")]
    Catalog { language: String, reason: String },

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Input validation errors (CLI flags, config values).
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    /// Tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    #[must_use]
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        Self::Other(format!("{}: {}", ctx.into(), self))
    }

    /// Create a config I/O error for `path`.
    pub fn config_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Create an input validation error.
    pub fn invalid_input<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a catalog parse error.
    pub fn catalog<L: Into<String>, R: Into<String>>(language: L, reason: R) -> Self {
        Self::Catalog {
            language: language.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_wraps_message() {
        let err = AppError::Terminal("raw mode".into()).with_context("startup");
        assert_eq!(err.to_string(), "Unexpected error: startup: Terminal error: raw mode");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = AppError::invalid_input("--lang", "unknown language 'xx'");
        assert_eq!(
            err.to_string(),
            "Invalid input: --lang - unknown language 'xx'"
        );
    }
}
