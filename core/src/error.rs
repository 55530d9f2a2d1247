//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::Path;

/// The Global Error Enum.
///
/// Every failure is fatal to the current run: nothing is retried and
/// files already written are left in place.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The schema source is missing, unreadable or malformed.
    #[from(ignore)]
    #[display("Schema Parse Error in {path}: {message}")]
    SchemaParse {
        /// The schema file (or `<inline>` for in-memory sources).
        path: String,
        /// What went wrong.
        message: String,
    },

    /// Directory creation or file write failure.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A required option is missing or invalid.
    /// Raised before any schema is loaded.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Configuration(String),
}

impl AppError {
    /// Builds a `SchemaParse` error for the given source path.
    pub fn schema_parse(path: &Path, message: impl Into<String>) -> Self {
        AppError::SchemaParse {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
