//! Error types for the back office service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while serving requests.

use thiserror::Error;

/// The main error type for the back office service.
///
/// All operations in the service return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use care_office::error::OfficeError;
///
/// let error = OfficeError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum OfficeError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request carried invalid or inconsistent data.
    #[error("Validation error: {message}")]
    Validation {
        /// A description of what made the data invalid.
        message: String,
    },

    /// A row that must be unique per day (or per parent) already exists.
    #[error("Duplicate {entity}: {message}")]
    Duplicate {
        /// The kind of record that collided (e.g. "attendance record").
        entity: String,
        /// A description of the collision.
        message: String,
    },

    /// A lookup by id found nothing.
    #[error("{entity} not found")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
    },

    /// The user tried to open a pause while one is still unresolved.
    #[error("You already have an active pause. Please resume first.")]
    ActivePauseExists,

    /// The user tried to resume but has no unresolved pause.
    #[error("No pause record found to resume.")]
    NoActivePause,

    /// An underlying SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A type alias for Results that return OfficeError.
pub type OfficeResult<T> = Result<T, OfficeError>;
