//! Streak evaluation: calendar-day deltas and the decision engine.

mod days;
mod engine;
mod policy;

pub use days::days_since;
pub use engine::{Decision, Outcome, StreakEngine};
pub use policy::{
    StreakPolicy, DEFAULT_BREAK_THRESHOLD, DEFAULT_COMPLETION_THRESHOLD,
    DEFAULT_LONG_STREAK_THRESHOLD,
};
