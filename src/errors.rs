//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::activity::Stream;
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
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid date/time format: {0}")]
    InvalidDateTime(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown record stream: {0}")]
    InvalidStream(String),

    // ---------------------------
    // Record store
    // ---------------------------
    #[error("Could not load {stream}: {source}")]
    UpstreamRead {
        stream: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("No {stream} record with id {id}")]
    RecordNotFound { stream: Stream, id: i64 },

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Wrap a read failure so the whole aggregation fails as one unit.
    pub fn upstream(stream: impl Into<String>, source: AppError) -> Self {
        AppError::UpstreamRead {
            stream: stream.into(),
            source: Box::new(source),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
