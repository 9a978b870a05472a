use super::{habit::Habit, streak::Streak};
use chrono::NaiveDate;
use serde::Serialize;

/// A habit together with its stored streak, as shown by `habit list` / `habit show`.
#[derive(Debug, Clone, Serialize)]
pub struct HabitSummary {
    pub habit: Habit,
    pub streak: Streak,
    pub completions: Vec<NaiveDate>,
}

/// Per-user dashboard numbers.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_habits: u32,
    pub completed_today: u32,
    pub total_streak: u32,
    pub longest_streak: u32,
    pub success_rate: f64,
}

impl UserStats {
    /// Percentage of active habits completed today, rounded to one decimal.
    pub fn rate(completed_today: u32, total_habits: u32) -> f64 {
        if total_habits == 0 {
            return 0.0;
        }
        let raw = completed_today as f64 / total_habits as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }
}
