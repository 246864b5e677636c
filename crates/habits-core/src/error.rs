//! Core error types for habits-core.
//!
//! This module defines the error hierarchy using thiserror. Every fallible
//! operation in the library returns one of these; nothing here exits the
//! process.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for habits-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Streak evaluation errors
    #[error("Streak error: {0}")]
    Streak(#[from] StreakError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No habit with the given name
    #[error("Habit '{0}' not found")]
    NotFound(String),

    /// A habit with the given name is already tracked
    #[error("Habit '{0}' already exists")]
    AlreadyExists(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row could not be decoded
    #[error("Corrupted row for habit '{name}': {message}")]
    CorruptedRow { name: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Configuration file is not valid TOML for the expected shape
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors raised while evaluating a streak.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreakError {
    /// The record was last performed on a later calendar day than "now".
    /// Either the clock went backwards or the record is corrupted.
    #[error("last performed at {last_performed} is after the evaluation time {now}")]
    FutureTimestamp {
        last_performed: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit name is empty after trimming
    #[error("habit name must not be empty")]
    EmptyName,

    /// Streak policy thresholds are inconsistent
    #[error("Invalid streak policy: {0}")]
    InvalidPolicy(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
