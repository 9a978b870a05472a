use crate::core::store;
use crate::core::streak::StreakPolicy;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::summary::UserStats;
use chrono::NaiveDate;

pub struct StatsLogic;

impl StatsLogic {
    /// Dashboard numbers of `user_id` as of `today`.
    ///
    /// `total_habits`, `completed_today` and `total_streak` count active
    /// habits only; `longest_streak` looks at archived habits too.
    pub fn for_user(
        pool: &mut DbPool,
        user_id: i64,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<UserStats> {
        let habits = queries::list_habits(&pool.conn, Some(user_id), true)?;

        let mut stats = UserStats::default();

        for habit in &habits {
            let streak = store::evaluate(&pool.conn, habit.id, today, policy)?;

            stats.longest_streak = stats.longest_streak.max(streak.longest_streak);

            if !habit.is_active {
                continue;
            }

            stats.total_habits += 1;
            stats.total_streak += streak.current_streak;
            if queries::completion_exists(&pool.conn, habit.id, &today)? {
                stats.completed_today += 1;
            }
        }

        stats.success_rate = UserStats::rate(stats.completed_today, stats.total_habits);
        Ok(stats)
    }
}
