//! JSON file habit storage.
//!
//! The whole file is a JSON array of habits. It is read once on open and
//! rewritten after every mutation.

use std::path::{Path, PathBuf};

use super::HabitStore;
use crate::error::Result;
use crate::habit::Habit;

/// File name used when no explicit path is configured.
pub const DEFAULT_FILE_NAME: &str = "habits.json";

/// Habit store kept in a single JSON file.
pub struct JsonStore {
    path: PathBuf,
    habits: Vec<Habit>,
}

impl JsonStore {
    /// Load the store from `path`. A missing or empty file is an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let habits = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, habits })
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `habits` via a sibling temp file so a crash never leaves it half-written.
    fn save(&self, habits: &[Habit]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(habits)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HabitStore for JsonStore {
    fn find(&self, name: &str) -> Result<Option<Habit>> {
        Ok(self.habits.iter().find(|h| h.name == name).cloned())
    }

    // The in-memory list only changes once the file write succeeded.
    fn upsert(&mut self, habit: &Habit) -> Result<()> {
        let mut habits = self.habits.clone();
        match habits.iter_mut().find(|h| h.name == habit.name) {
            Some(existing) => *existing = habit.clone(),
            None => habits.push(habit.clone()),
        }
        self.save(&habits)?;
        self.habits = habits;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Habit>> {
        Ok(self.habits.clone())
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let kept: Vec<Habit> = self
            .habits
            .iter()
            .filter(|h| h.name != name)
            .cloned()
            .collect();
        if kept.len() == self.habits.len() {
            return Ok(false);
        }
        self.save(&kept)?;
        self.habits = kept;
        Ok(true)
    }
}
