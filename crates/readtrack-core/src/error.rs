//! Core error types for readtrack-core.
//!
//! Nothing in the progress core is fatal. [`ProgressError`] values are
//! returned alongside a usable state so the caller can report them and keep
//! going; the other enums cover configuration, schedule and database setup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a session from starting.
///
/// Database trouble is not here: an unusable database degrades to
/// session-only storage instead of failing.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schedule loading errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
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

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to resolve the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Schedule provider errors.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Failed to read the schedule file
    #[error("Failed to read schedule file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schedule file is not valid TOML or has the wrong shape
    #[error("Failed to parse schedule file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Schedule content violates an invariant
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Two reading units share an id
    #[error("Duplicate reading unit id '{id}' at position {index}")]
    DuplicateId { id: String, index: usize },

    /// Empty id
    #[error("Reading unit at position {index} has an empty id")]
    EmptyId { index: usize },
}

/// Recoverable progress persistence conditions.
///
/// Every variant is reported next to a state the caller can keep using.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// Persisted value exists but is not an id -> bool JSON object.
    #[error("Persisted progress under '{key}' is corrupt ({reason}); starting from empty progress")]
    CorruptPersistedState { key: String, reason: String },

    /// Storage rejected the write; in-memory progress is still current.
    #[error("Failed to persist progress under '{key}': {reason}")]
    PersistenceWriteFailed { key: String, reason: String },

    /// Storage could not be read at all.
    #[error("Progress storage unavailable: {reason}")]
    StorageUnavailable { reason: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_sqlite_error_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }

    #[test]
    fn other_sqlite_errors_map_to_query_failed() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(
            DatabaseError::from(err),
            DatabaseError::QueryFailed(_)
        ));
    }

    #[test]
    fn schedule_validation_surfaces_through_core_error() {
        let err: CoreError = ScheduleError::from(ValidationError::EmptyId { index: 3 }).into();
        assert!(matches!(err, CoreError::Schedule(ScheduleError::Invalid(_))));
        assert!(err.to_string().contains("position 3"));
    }

    #[test]
    fn corrupt_state_message_names_key() {
        let err = ProgressError::CorruptPersistedState {
            key: "bibleProgress".into(),
            reason: "expected a JSON object".into(),
        };
        assert!(err.to_string().contains("bibleProgress"));
    }
}
