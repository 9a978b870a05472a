use chrono::NaiveDate;
use serde::Serialize;

/// Derived streak state of one habit.
///
/// Always produced by the streak calculator; `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub habit_id: i64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_completed: Option<NaiveDate>,
}

impl Streak {
    /// The record created alongside a new habit.
    pub fn empty(habit_id: i64) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
        }
    }

    pub fn last_completed_str(&self) -> String {
        self.last_completed
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "--".to_string())
    }
}
