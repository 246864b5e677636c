pub mod check;
pub mod config;
pub mod delete;
pub mod list;
pub mod show;

use chrono::{DateTime, Utc};
use habits_core::storage::StorageBackend;
use habits_core::{Config, Tracker};

/// Settings shared by every habit command.
pub struct Context {
    pub backend: Option<StorageBackend>,
    pub now: DateTime<Utc>,
}

impl Context {
    /// Open the tracker described by the config file and command-line overrides.
    pub fn tracker(&self) -> Result<Tracker, Box<dyn std::error::Error>> {
        let mut config = Config::load()?;
        if let Some(backend) = self.backend {
            config.storage.override_backend(backend);
        }
        tracing::debug!(backend = ?config.storage.backend, now = %self.now, "opening tracker");
        Ok(habits_core::tracker_from_config(&config)?)
    }
}
