//! In-memory habit storage. Nothing survives the process.

use super::HabitStore;
use crate::error::Result;
use crate::habit::Habit;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    habits: Vec<Habit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `habits`. Later duplicates replace earlier ones.
    pub fn with_habits(habits: impl IntoIterator<Item = Habit>) -> Self {
        let mut store = Self::new();
        for habit in habits {
            store.put(habit);
        }
        store
    }

    fn put(&mut self, habit: Habit) {
        match self.habits.iter_mut().find(|h| h.name == habit.name) {
            Some(existing) => *existing = habit,
            None => self.habits.push(habit),
        }
    }
}

impl HabitStore for MemoryStore {
    fn find(&self, name: &str) -> Result<Option<Habit>> {
        Ok(self.habits.iter().find(|h| h.name == name).cloned())
    }

    fn upsert(&mut self, habit: &Habit) -> Result<()> {
        self.put(habit.clone());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Habit>> {
        Ok(self.habits.clone())
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let before = self.habits.len();
        self.habits.retain(|h| h.name != name);
        Ok(self.habits.len() != before)
    }
}
