//! Unified application error type.
//! All modules (db, core, cli) return AppError so the CLI, the batch
//! importer and the HTTP endpoint share one error surface.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors (rejected before any write)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid odometer position '{0}' (expected start, mid or end)")]
    InvalidPosition(String),

    #[error("Invalid {field}: {value} (must be a non-negative number)")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Uniqueness conflict: {0}")]
    Conflict(String),

    #[error("Invalid pay period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Importer / server
    // ---------------------------
    #[error("Import aborted: {0}")]
    Import(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for inputs rejected before any write. Everything else is a
    /// storage-side failure and may be retried by the SMS ingester.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidPosition(_)
                | AppError::InvalidNumber { .. }
                | AppError::MissingField(_)
                | AppError::MalformedEntry(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
