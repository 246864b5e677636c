//! # Habits Core Library
//!
//! This library provides the core logic for tracking recurring personal habits:
//! when each habit was last performed and how many consecutive days it has been
//! kept. The CLI and the web front-end are thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Streak**: a calendar-day delta calculator and a pure decision engine that
//!   continues, breaks or completes a streak. "Now" is always passed in, there is
//!   no ambient clock.
//! - **Storage**: SQLite, JSON file and in-memory backends behind one trait, plus
//!   TOML-based configuration
//! - **Tracker**: the check-in workflow tying a store to the engine
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: Streak state machine
//! - [`days_since`]: Calendar-day arithmetic
//! - [`HabitStore`]: Persistence capability implemented per backend
//! - [`Tracker`]: Check-in service used by the front-ends
//! - [`Config`]: Application configuration management

pub mod error;
pub mod habit;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use error::{ConfigError, CoreError, DatabaseError, StreakError, ValidationError};
pub use habit::Habit;
pub use storage::{open_store, Config, HabitStore, JsonStore, MemoryStore, SqliteStore};
pub use streak::{days_since, Decision, Outcome, StreakEngine, StreakPolicy};
pub use tracker::{CheckIn, CheckInKind, HabitStatus, Tracker};

/// Open the configured store and wrap it in a [`Tracker`] using the configured policy.
///
/// # Errors
/// Returns an error if the store cannot be opened.
pub fn tracker_from_config(config: &Config) -> error::Result<Tracker> {
    let store = open_store(&config.storage)?;
    Ok(Tracker::new(store, StreakEngine::with_policy(config.streak)))
}
