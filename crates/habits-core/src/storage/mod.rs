mod config;
pub mod database;
pub mod json;
pub mod memory;
pub mod migrations;

pub use config::{Config, ServerConfig, StorageBackend, StorageConfig};
pub use database::SqliteStore;
pub use json::JsonStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::habit::Habit;

/// Persistence capability required by the tracker.
///
/// One implementation per backend. Stores only move habits in and out; they
/// never make streak decisions.
pub trait HabitStore: Send {
    /// Look up a habit by exact name.
    fn find(&self, name: &str) -> Result<Option<Habit>>;

    /// Insert the habit, or replace the stored habit with the same name.
    fn upsert(&mut self, habit: &Habit) -> Result<()>;

    /// Every stored habit, in insertion order.
    fn list_all(&self) -> Result<Vec<Habit>>;

    /// Remove a habit. Returns `false` if no habit had that name.
    fn delete(&mut self, name: &str) -> Result<bool>;
}

/// Returns the habits data directory.
///
/// `HABITS_DATA_DIR` wins when set. Otherwise `~/.config/habits[-dev]/`,
/// where HABITS_ENV=dev selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("HABITS_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habits-dev")
            } else {
                base_dir.join("habits")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Open the store selected by `config`.
///
/// # Errors
/// Returns an error if the backing file or database cannot be opened.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn HabitStore>> {
    let store: Box<dyn HabitStore> = match config.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open(&config.resolved_path()?)?),
        StorageBackend::Json => Box::new(JsonStore::open(config.resolved_path()?)?),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    tracing::debug!(backend = ?config.backend, "opened habit store");
    Ok(store)
}
