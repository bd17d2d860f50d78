//! Unified Error Type System
//!
//! Centralized error types for the library. Lookup misses while scanning a
//! project are not errors; they surface as `None` and never reach this type.
//! What remains are IO failures, configuration problems, and metadata that
//! no fallback could supply.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Missing Metadata
// =============================================================================

/// A metadata value the project scan could not determine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingValue {
    Version,
    Author,
}

impl MissingValue {
    /// Prompt shown when asking an operator for the value
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Version => crate::constants::prompts::VERSION,
            Self::Author => crate::constants::prompts::AUTHOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Author => "author",
        }
    }
}

impl std::fmt::Display for MissingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Main Error Type
// =============================================================================

#[derive(Error, Debug)]
pub enum SphinxMeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("No {0} found and none was supplied")]
    MissingMetadata(MissingValue),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Documentation already installed at {}: use --force to overwrite", .0.display())]
    AlreadyInstalled(PathBuf),

    #[error("Invalid configuration file path: {}", .0.display())]
    InvalidConfPath(PathBuf),

    #[error("{context}: {message}")]
    Context { context: String, message: String },
}

impl From<dialoguer::Error> for SphinxMeError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl SphinxMeError {
    /// Check if the error is caused by metadata that was never supplied
    pub fn is_missing_metadata(&self) -> bool {
        matches!(self, Self::MissingMetadata(_))
    }
}

pub type Result<T> = std::result::Result<T, SphinxMeError>;

// =============================================================================
// Error Context Extension
// =============================================================================

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| SphinxMeError::Context {
            context: f().into(),
            message: e.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
