//! Streak decision engine.
//!
//! Given a habit and the number of calendar days since it was last performed,
//! decide whether the streak continues, breaks or completes. The engine is a
//! pure function of its inputs: it borrows the habit and returns an updated
//! copy together with the decision and the message for the user.
//!
//! ```text
//! Active(s) --d=0-------------------------> Active(s)
//! Active(s) --continues, s < completion---> Active(s+1)
//! Active(s) --continues, s >= completion--> Completed(s+1)
//! Active(s) --d >= break------------------> Active(1)
//! Completed --any-------------------------> Completed
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::policy::StreakPolicy;
use crate::habit::{Habit, INITIAL_STREAK};

/// What the engine decided for one check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Habit was already completed; nothing changes.
    AlreadyDone { streak: u32 },
    /// Checked in again on the same calendar day; nothing changes.
    SameDay { streak: u32 },
    /// Streak continued and reached the completion threshold.
    Completed { streak: u32 },
    /// Streak continued past the long-streak threshold.
    LongStreak { streak: u32 },
    /// Streak continued.
    Continued { streak: u32 },
    /// Gap was too long; the streak starts over.
    Broken { days: u32 },
}

impl Decision {
    /// Whether this decision changes the stored habit.
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Decision::AlreadyDone { .. } | Decision::SameDay { .. }
        )
    }

    /// Human-readable status line for the habit called `name`.
    pub fn message(&self, name: &str) -> String {
        match *self {
            Decision::AlreadyDone { streak } => format!(
                "You've already completed the habit '{name}' with a {streak}-day streak."
            ),
            Decision::SameDay { streak } | Decision::Continued { streak } => format!(
                "Nice work: you've done the habit '{name}' for {streak} days in a row now."
            ),
            Decision::Completed { streak } => format!(
                "Congratulations: you've done the habit '{name}' for {streak} days in a row. Habit completed!"
            ),
            Decision::LongStreak { streak } => format!(
                "You're currently on a {streak}-day streak for '{name}'. Stick to it!"
            ),
            Decision::Broken { days } => format!(
                "You last did the habit '{name}' {days} days ago, so you're starting a new streak today. Good luck!"
            ),
        }
    }
}

/// Result of evaluating one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The habit after the decision was applied.
    pub habit: Habit,
    pub decision: Decision,
    pub message: String,
}

/// Applies a [`StreakPolicy`] to habits.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakEngine {
    policy: StreakPolicy,
}

impl StreakEngine {
    /// Create an engine with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom policy.
    pub fn with_policy(policy: StreakPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &StreakPolicy {
        &self.policy
    }

    /// Decide the next state of `habit`, last performed `days` calendar days
    /// before `now`.
    ///
    /// Callers obtain `days` from [`super::days_since`] and must handle its
    /// error before calling this; there is no decision for a negative gap.
    pub fn decide(&self, habit: &Habit, days: u32, now: DateTime<Utc>) -> Outcome {
        let decision = self.classify(habit, days);
        let mut updated = habit.clone();

        match decision {
            Decision::AlreadyDone { .. } | Decision::SameDay { .. } => {}
            Decision::Completed { streak } => {
                updated.streak = streak;
                updated.last_performed = now;
                updated.done = true;
            }
            Decision::LongStreak { streak } | Decision::Continued { streak } => {
                updated.streak = streak;
                updated.last_performed = now;
            }
            Decision::Broken { .. } => {
                updated.streak = INITIAL_STREAK;
                updated.last_performed = now;
            }
        }

        tracing::debug!(
            habit = %habit.name,
            days,
            streak_before = habit.streak,
            streak_after = updated.streak,
            ?decision,
            "streak decision"
        );

        Outcome {
            message: decision.message(&habit.name),
            habit: updated,
            decision,
        }
    }

    fn classify(&self, habit: &Habit, days: u32) -> Decision {
        let streak = habit.streak;
        if habit.done {
            return Decision::AlreadyDone { streak };
        }
        if days == 0 {
            return Decision::SameDay { streak };
        }
        if self.policy.continues(days) {
            let next = streak.saturating_add(1);
            return if streak >= self.policy.completion_threshold {
                Decision::Completed { streak: next }
            } else if streak > self.policy.long_streak_threshold {
                Decision::LongStreak { streak: next }
            } else {
                Decision::Continued { streak: next }
            };
        }
        Decision::Broken { days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 10, 15, 17, 8, 0).unwrap()
    }

    fn habit(streak: u32, days_ago: i64) -> Habit {
        Habit {
            name: "docker".into(),
            last_performed: now() - Duration::days(days_ago),
            streak,
            done: false,
        }
    }

    #[test]
    fn same_day_leaves_habit_untouched() {
        let h = habit(4, 0);
        let out = StreakEngine::new().decide(&h, 0, now());
        assert_eq!(out.habit, h);
        assert_eq!(out.decision, Decision::SameDay { streak: 4 });
        assert_eq!(
            out.message,
            "Nice work: you've done the habit 'docker' for 4 days in a row now."
        );
    }

    #[test]
    fn same_day_is_idempotent() {
        let engine = StreakEngine::new();
        let h = habit(7, 0);
        let first = engine.decide(&h, 0, now());
        let second = engine.decide(&first.habit, 0, now());
        assert_eq!(first, second);
    }

    #[test]
    fn yesterday_increments_streak() {
        let out = StreakEngine::new().decide(&habit(4, 1), 1, now());
        assert_eq!(out.habit.streak, 5);
        assert_eq!(out.habit.last_performed, now());
        assert!(!out.habit.done);
        assert_eq!(out.decision, Decision::Continued { streak: 5 });
    }

    #[test]
    fn long_streak_gets_encouragement() {
        let out = StreakEngine::new().decide(&habit(16, 1), 1, now());
        assert_eq!(out.habit.streak, 17);
        assert_eq!(
            out.message,
            "You're currently on a 17-day streak for 'docker'. Stick to it!"
        );
    }

    #[test]
    fn streak_at_long_threshold_is_still_default_message() {
        let out = StreakEngine::new().decide(&habit(15, 1), 1, now());
        assert_eq!(out.decision, Decision::Continued { streak: 16 });
    }

    #[test]
    fn one_below_completion_does_not_complete() {
        let out = StreakEngine::new().decide(&habit(28, 1), 1, now());
        assert_eq!(out.habit.streak, 29);
        assert!(!out.habit.done);
        assert_eq!(out.decision, Decision::LongStreak { streak: 29 });
    }

    #[test]
    fn reaching_completion_marks_done() {
        let out = StreakEngine::new().decide(&habit(29, 1), 1, now());
        assert_eq!(out.habit.streak, 30);
        assert!(out.habit.done);
        assert_eq!(out.decision, Decision::Completed { streak: 30 });
        assert!(out.message.starts_with("Congratulations"));
    }

    #[test]
    fn completed_habit_short_circuits() {
        let engine = StreakEngine::new();
        let done = engine.decide(&habit(29, 1), 1, now()).habit;
        for days in [0, 1, 2, 40] {
            let out = engine.decide(&done, days, now() + Duration::days(i64::from(days)));
            assert_eq!(out.habit, done);
            assert_eq!(out.decision, Decision::AlreadyDone { streak: 30 });
        }
    }

    #[test]
    fn gap_of_three_days_breaks_long_streak() {
        let h = habit(16, 3);
        let out = StreakEngine::new().decide(&h, 3, now());
        assert_eq!(out.habit.streak, 1);
        assert_eq!(out.habit.last_performed, now());
        assert_eq!(out.decision, Decision::Broken { days: 3 });
        assert_eq!(
            out.message,
            "You last did the habit 'docker' 3 days ago, so you're starting a new streak today. Good luck!"
        );
    }

    #[test]
    fn lenient_policy_lets_two_day_gap_continue() {
        let engine = StreakEngine::with_policy(StreakPolicy {
            break_threshold: 3,
            ..StreakPolicy::default()
        });
        assert_eq!(
            engine.decide(&habit(4, 2), 2, now()).decision,
            Decision::Continued { streak: 5 }
        );
        assert_eq!(
            engine.decide(&habit(4, 3), 3, now()).decision,
            Decision::Broken { days: 3 }
        );
    }

    #[test]
    fn custom_completion_threshold() {
        let engine = StreakEngine::with_policy(StreakPolicy {
            completion_threshold: 6,
            ..StreakPolicy::default()
        });
        let out = engine.decide(&habit(6, 1), 1, now());
        assert!(out.habit.done);
        assert_eq!(out.habit.streak, 7);
    }

    #[test]
    fn input_habit_is_not_modified() {
        let h = habit(3, 5);
        let before = h.clone();
        let _ = StreakEngine::new().decide(&h, 5, now());
        assert_eq!(h, before);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let engine = StreakEngine::with_policy(StreakPolicy {
            completion_threshold: u32::MAX,
            ..StreakPolicy::default()
        });
        let out = engine.decide(&habit(u32::MAX - 1, 1), 1, now());
        assert_eq!(out.habit.streak, u32::MAX);
    }

    #[test]
    fn decision_serializes_with_kind_tag() {
        let json = serde_json::to_value(Decision::Broken { days: 4 }).unwrap();
        assert_eq!(json["kind"], "broken");
        assert_eq!(json["days"], 4);
    }

    proptest! {
        #[test]
        fn done_habits_never_change(streak in 0u32..10_000, days in 0u32..10_000) {
            let mut h = habit(streak, 0);
            h.done = true;
            let out = StreakEngine::new().decide(&h, days, now());
            prop_assert_eq!(out.habit, h);
        }

        #[test]
        fn breaks_always_reset_to_one(streak in 0u32..10_000, days in 2u32..10_000) {
            let out = StreakEngine::new().decide(&habit(streak, 0), days, now());
            prop_assert_eq!(out.habit.streak, 1);
            prop_assert_eq!(out.habit.last_performed, now());
        }
    }
}
