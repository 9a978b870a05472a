use chrono::{Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub habit_id: i64,
    pub date: NaiveDate,    // ⇔ completions.completed_date (TEXT "YYYY-MM-DD")
    pub note: String,       // ⇔ completions.note (TEXT, default '')
    pub created_at: String, // ⇔ completions.created_at (TEXT, ISO8601)
}

impl Completion {
    pub fn new(habit_id: i64, date: NaiveDate, note: Option<&str>) -> Self {
        Self {
            habit_id,
            date,
            note: note.unwrap_or_default().to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
