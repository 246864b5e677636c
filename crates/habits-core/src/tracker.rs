//! Check-in workflow shared by the front-ends.
//!
//! Loads a habit from the store, measures the gap with [`days_since`], asks the
//! [`StreakEngine`] for a decision and writes the result back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::habit::{normalize_name, Habit};
use crate::storage::HabitStore;
use crate::streak::{days_since, Decision, StreakEngine};

/// How a check-in was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckInKind {
    /// First mention of the name; the habit was created.
    Created,
    /// Existing habit evaluated by the engine.
    Evaluated { decision: Decision },
}

/// Result of [`Tracker::check_in`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub habit: Habit,
    pub kind: CheckInKind,
    pub message: String,
}

/// Read-only view of where a habit stands at some instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStatus {
    pub habit: Habit,
    /// Calendar days since the last check-in, `None` if the record is in the future.
    pub days_since: Option<u32>,
    /// A check-in today is still possible but skipping it breaks the streak.
    pub at_risk: bool,
    /// The streak is already broken; the next check-in restarts it.
    pub broken: bool,
}

/// Message shown when a habit is tracked for the first time.
pub fn created_message(name: &str) -> String {
    format!("Good luck with your new '{name}' habit. Don't forget to do it again tomorrow.")
}

/// Habit tracking service over any [`HabitStore`].
pub struct Tracker {
    store: Box<dyn HabitStore>,
    engine: StreakEngine,
}

impl Tracker {
    pub fn new(store: Box<dyn HabitStore>, engine: StreakEngine) -> Self {
        Self { store, engine }
    }

    /// Record that the habit `name` was performed at `now`.
    ///
    /// Unknown names start a new habit. Known habits go through the streak
    /// engine; the store is only written when the decision changed the habit.
    ///
    /// # Errors
    /// Returns a validation error for blank names, [`CoreError::Streak`] if the
    /// stored habit was performed after `now`, or any store error.
    pub fn check_in(&mut self, name: &str, now: DateTime<Utc>) -> Result<CheckIn> {
        let name = normalize_name(name)?;

        let Some(habit) = self.store.find(&name)? else {
            let habit = Habit::new(&name, now)?;
            self.store.upsert(&habit)?;
            tracing::info!(habit = %habit.name, "started tracking habit");
            return Ok(CheckIn {
                message: created_message(&habit.name),
                habit,
                kind: CheckInKind::Created,
            });
        };

        let days = days_since(now, habit.last_performed).map_err(|e| {
            tracing::warn!(habit = %habit.name, error = %e, "refusing to evaluate corrupted record");
            e
        })?;

        let outcome = self.engine.decide(&habit, days, now);
        if outcome.decision.mutates() {
            self.store.upsert(&outcome.habit)?;
        }

        Ok(CheckIn {
            habit: outcome.habit,
            kind: CheckInKind::Evaluated {
                decision: outcome.decision,
            },
            message: outcome.message,
        })
    }

    /// Start tracking `name` without evaluating anything.
    ///
    /// # Errors
    /// Returns [`CoreError::AlreadyExists`] if the name is taken.
    pub fn create(&mut self, name: &str, now: DateTime<Utc>) -> Result<Habit> {
        let habit = Habit::new(name, now)?;
        if self.store.find(&habit.name)?.is_some() {
            return Err(CoreError::AlreadyExists(habit.name));
        }
        self.store.upsert(&habit)?;
        tracing::info!(habit = %habit.name, "started tracking habit");
        Ok(habit)
    }

    /// # Errors
    /// Returns [`CoreError::NotFound`] if no habit has that name.
    pub fn get(&self, name: &str) -> Result<Habit> {
        let name = normalize_name(name)?;
        self.store
            .find(&name)?
            .ok_or(CoreError::NotFound(name))
    }

    pub fn list_all(&self) -> Result<Vec<Habit>> {
        self.store.list_all()
    }

    /// Habits that have not been completed yet.
    pub fn list_active(&self) -> Result<Vec<Habit>> {
        let mut habits = self.store.list_all()?;
        habits.retain(|h| !h.done);
        Ok(habits)
    }

    /// # Errors
    /// Returns [`CoreError::NotFound`] if no habit has that name.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let name = normalize_name(name)?;
        if !self.store.delete(&name)? {
            return Err(CoreError::NotFound(name));
        }
        tracing::info!(habit = %name, "deleted habit");
        Ok(())
    }

    /// Where `habit` stands at `now`, without touching the store.
    pub fn status(&self, habit: &Habit, now: DateTime<Utc>) -> HabitStatus {
        let days = days_since(now, habit.last_performed).ok();
        let policy = self.engine.policy();
        let (at_risk, broken) = match days {
            Some(d) if !habit.done => (
                d + 1 >= policy.break_threshold && d < policy.break_threshold,
                d >= policy.break_threshold,
            ),
            _ => (false, false),
        };
        HabitStatus {
            habit: habit.clone(),
            days_since: days,
            at_risk,
            broken,
        }
    }
}
