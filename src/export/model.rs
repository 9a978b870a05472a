use serde::Serialize;

/// Flat export row: one completion with its habit, owner and streak numbers.
#[derive(Serialize, Clone, Debug)]
pub struct CompletionExport {
    pub habit_id: i64,
    pub habit: String,
    pub user: String,
    pub date: String,
    pub note: String,
    pub current_streak: u32,
    pub longest_streak: u32,
}
