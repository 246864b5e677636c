//! The habit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Streak assigned to a habit on its first check-in and after a break.
pub const INITIAL_STREAK: u32 = 1;

/// A named recurring activity.
///
/// Plain value type: the streak engine reads one and returns an updated copy,
/// stores persist exactly these four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique, non-empty name within a store.
    pub name: String,
    /// When the habit was last checked in.
    pub last_performed: DateTime<Utc>,
    /// Consecutive days the habit has been kept.
    pub streak: u32,
    /// Set once the completion threshold is reached; terminal.
    #[serde(default)]
    pub done: bool,
}

impl Habit {
    /// A freshly tracked habit, performed `now` for the first time.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] if the name is blank.
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name(name)?,
            last_performed: now,
            streak: INITIAL_STREAK,
            done: false,
        })
    }
}

/// Trim a user-supplied habit name, rejecting blank input.
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_habit_starts_a_streak() {
        let now = Utc.with_ymd_and_hms(2021, 10, 15, 17, 8, 0).unwrap();
        let habit = Habit::new("  piano ", now).unwrap();
        assert_eq!(habit.name, "piano");
        assert_eq!(habit.streak, INITIAL_STREAK);
        assert_eq!(habit.last_performed, now);
        assert!(!habit.done);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(normalize_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(normalize_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn done_defaults_to_false_when_missing() {
        let json = r#"{"name":"Go","last_performed":"2021-10-14T15:09:00Z","streak":4}"#;
        let habit: Habit = serde_json::from_str(json).unwrap();
        assert!(!habit.done);
        assert_eq!(habit.streak, 4);
    }
}
