use super::frequency::Frequency;
use chrono::Local;
use serde::Serialize;

pub const DEFAULT_COLOR: &str = "#3B82F6";
pub const DEFAULT_ICON: &str = "check-circle";

#[derive(Debug, Clone, Serialize)]
pub struct Habit {
    pub id: i64,
    pub user_id: i64,         // ⇔ habits.user_id (FK users.id)
    pub title: String,        // ⇔ habits.title
    pub description: String,  // ⇔ habits.description (TEXT, default '')
    pub frequency: Frequency, // ⇔ habits.frequency ('daily' | 'weekly' | 'monthly')
    pub target_days: i64,     // ⇔ habits.target_days (INT, default 1)
    pub color: String,
    pub icon: String,
    pub is_active: bool,    // ⇔ habits.is_active (0 | 1)
    pub created_at: String, // ⇔ habits.created_at (TEXT, ISO8601)
}

impl Habit {
    /// Build a habit that is not yet stored (`id = 0`).
    pub fn new(user_id: i64, title: &str, frequency: Frequency, target_days: i64) -> Self {
        Self {
            id: 0,
            user_id,
            title: title.to_string(),
            description: String::new(),
            frequency,
            target_days,
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
            is_active: true,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active { "active" } else { "archived" }
    }
}

/// Partial update for `habit edit`. `None` leaves the field untouched.
#[derive(Debug, Default, Clone)]
pub struct HabitPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub target_days: Option<i64>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.target_days.is_none()
            && self.color.is_none()
            && self.icon.is_none()
    }

    pub fn apply_to(self, habit: &mut Habit) {
        if let Some(t) = self.title {
            habit.title = t;
        }
        if let Some(d) = self.description {
            habit.description = d;
        }
        if let Some(f) = self.frequency {
            habit.frequency = f;
        }
        if let Some(n) = self.target_days {
            habit.target_days = n;
        }
        if let Some(c) = self.color {
            habit.color = c;
        }
        if let Some(i) = self.icon {
            habit.icon = i;
        }
    }
}
