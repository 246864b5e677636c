//! SQLite-backed habit storage.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{migrations, HabitStore};
use crate::error::{DatabaseError, Result};
use crate::habit::Habit;

/// Row as stored, before the timestamp is decoded.
struct RawHabit {
    name: String,
    last_performed: String,
    streak: u32,
    done: bool,
}

impl RawHabit {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            last_performed: row.get(1)?,
            streak: row.get(2)?,
            done: row.get(3)?,
        })
    }

    fn decode(self) -> Result<Habit, DatabaseError> {
        let last_performed = DateTime::parse_from_rfc3339(&self.last_performed)
            .map_err(|e| DatabaseError::CorruptedRow {
                name: self.name.clone(),
                message: format!("bad last_performed '{}': {e}", self.last_performed),
            })?
            .with_timezone(&Utc);
        Ok(Habit {
            name: self.name,
            last_performed,
            streak: self.streak,
            done: self.done,
        })
    }
}

/// SQLite database holding one row per habit.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database at `path` and bring its schema up to date.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if migrating the fresh database fails.
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl HabitStore for SqliteStore {
    fn find(&self, name: &str) -> Result<Option<Habit>> {
        let raw = self
            .conn
            .query_row(
                "SELECT name, last_performed, streak, done FROM habits WHERE name = ?1",
                params![name],
                RawHabit::from_row,
            )
            .optional()?;
        Ok(raw.map(RawHabit::decode).transpose()?)
    }

    fn upsert(&mut self, habit: &Habit) -> Result<()> {
        self.conn.execute(
            "INSERT INTO habits (name, last_performed, streak, done)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(name) DO UPDATE SET
                last_performed = excluded.last_performed,
                streak = excluded.streak,
                done = excluded.done",
            params![
                habit.name,
                habit.last_performed.to_rfc3339(),
                habit.streak,
                habit.done,
            ],
        )?;
        tracing::debug!(habit = %habit.name, streak = habit.streak, "sqlite upsert");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Habit>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, last_performed, streak, done FROM habits ORDER BY id")?;
        let rows = stmt.query_map([], RawHabit::from_row)?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.decode()?);
        }
        Ok(habits)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM habits WHERE name = ?1", params![name])?;
        Ok(removed > 0)
    }
}
