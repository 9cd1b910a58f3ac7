mod config;
pub mod database;
mod memory;

pub use config::{Config, DisplayConfig, ScheduleConfig, StorageConfig};
pub use database::Database;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Key-value durable storage for persisted progress.
///
/// Implementations must make `write` atomic from a reader's point of view:
/// a subsequent `read` sees either the old value or the new one.
pub trait KvStorage {
    type Error: std::fmt::Display;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<T: KvStorage + ?Sized> KvStorage for &T {
    type Error = T::Error;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).write(key, value)
    }
}

/// Returns the readtrack data directory, creating it if needed.
///
/// `READTRACK_DATA_DIR` overrides the location entirely. Otherwise this is
/// `~/.config/readtrack/`, or `~/.config/readtrack-dev/` when
/// `READTRACK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("READTRACK_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("READTRACK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("readtrack-dev")
            } else {
                base_dir.join("readtrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
