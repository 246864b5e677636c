//! Streak thresholds.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default completion threshold: the 30th consecutive day completes a habit.
pub const DEFAULT_COMPLETION_THRESHOLD: u32 = 29;
/// Default streak above which check-ins get the "stick to it" message.
pub const DEFAULT_LONG_STREAK_THRESHOLD: u32 = 15;
/// Default gap, in calendar days, that breaks a streak.
pub const DEFAULT_BREAK_THRESHOLD: u32 = 2;

/// Thresholds driving the streak decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// A continued check-in on a streak of at least this many days marks
    /// the habit done.
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: u32,
    /// Streaks strictly above this get the long-streak message.
    #[serde(default = "default_long_streak_threshold")]
    pub long_streak_threshold: u32,
    /// Gaps of at least this many calendar days reset the streak. Shorter
    /// gaps (of one day or more) continue it.
    #[serde(default = "default_break_threshold")]
    pub break_threshold: u32,
}

fn default_completion_threshold() -> u32 {
    DEFAULT_COMPLETION_THRESHOLD
}
fn default_long_streak_threshold() -> u32 {
    DEFAULT_LONG_STREAK_THRESHOLD
}
fn default_break_threshold() -> u32 {
    DEFAULT_BREAK_THRESHOLD
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            long_streak_threshold: DEFAULT_LONG_STREAK_THRESHOLD,
            break_threshold: DEFAULT_BREAK_THRESHOLD,
        }
    }
}

impl StreakPolicy {
    /// Check that the thresholds describe a usable policy.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidPolicy`] when a one-day gap would
    /// break the streak or the completion threshold is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.break_threshold < 2 {
            return Err(ValidationError::InvalidPolicy(format!(
                "break_threshold must be at least 2, got {}",
                self.break_threshold
            )));
        }
        if self.completion_threshold == 0 {
            return Err(ValidationError::InvalidPolicy(
                "completion_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether a gap of `days` continues the current streak.
    pub fn continues(&self, days: u32) -> bool {
        days >= 1 && days < self.break_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let policy = StreakPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.completion_threshold, 29);
        assert_eq!(policy.long_streak_threshold, 15);
        assert_eq!(policy.break_threshold, 2);
    }

    #[test]
    fn one_day_break_threshold_is_rejected() {
        let policy = StreakPolicy {
            break_threshold: 1,
            ..StreakPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ValidationError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn zero_completion_threshold_is_rejected() {
        let policy = StreakPolicy {
            completion_threshold: 0,
            ..StreakPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn continuation_window_follows_break_threshold() {
        let strict = StreakPolicy::default();
        assert!(!strict.continues(0));
        assert!(strict.continues(1));
        assert!(!strict.continues(2));

        let lenient = StreakPolicy {
            break_threshold: 3,
            ..StreakPolicy::default()
        };
        assert!(lenient.continues(2));
        assert!(!lenient.continues(3));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let policy: StreakPolicy = toml::from_str("break_threshold = 3").unwrap();
        assert_eq!(policy.break_threshold, 3);
        assert_eq!(policy.completion_threshold, DEFAULT_COMPLETION_THRESHOLD);
    }
}
