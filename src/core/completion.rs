//! Completion changes (`done` / `undo`).
//!
//! Each change and the streak recompute it triggers share one transaction:
//! if the recompute fails, the transaction is dropped and the completion
//! change never reaches the database.

use crate::core::store;
use crate::core::streak::StreakPolicy;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::completion::Completion;
use crate::models::streak::Streak;
use chrono::NaiveDate;

pub struct CompletionLogic;

fn fmt_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

impl CompletionLogic {
    /// Mark `habit_id` as done on `date` and return the recomputed streak.
    pub fn complete(
        pool: &mut DbPool,
        habit_id: i64,
        date: NaiveDate,
        note: Option<&str>,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<Streak> {
        if date > today {
            return Err(AppError::FutureDate(fmt_date(&date)));
        }

        let tx = pool.conn.transaction()?;

        if queries::get_habit(&tx, habit_id)?.is_none() {
            return Err(AppError::HabitNotFound(habit_id));
        }
        if queries::completion_exists(&tx, habit_id, &date)? {
            return Err(AppError::AlreadyCompleted {
                habit_id,
                date: fmt_date(&date),
            });
        }

        queries::insert_completion(&tx, &Completion::new(habit_id, date, note))?;
        let streak = store::recompute(&*tx, habit_id, today, policy)?;

        tx.commit()?;

        audit(
            &pool.conn,
            "done",
            &habit_id.to_string(),
            &format!(
                "Completed on {} (streak {}, longest {})",
                fmt_date(&date),
                streak.current_streak,
                streak.longest_streak
            ),
        );

        Ok(streak)
    }

    /// Remove the completion of `habit_id` on `date` and return the recomputed streak.
    pub fn uncomplete(
        pool: &mut DbPool,
        habit_id: i64,
        date: NaiveDate,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<Streak> {
        let tx = pool.conn.transaction()?;

        if queries::get_habit(&tx, habit_id)?.is_none() {
            return Err(AppError::HabitNotFound(habit_id));
        }
        if queries::delete_completion(&tx, habit_id, &date)? == 0 {
            return Err(AppError::CompletionNotFound {
                habit_id,
                date: fmt_date(&date),
            });
        }

        let streak = store::recompute(&*tx, habit_id, today, policy)?;

        tx.commit()?;

        audit(
            &pool.conn,
            "undo",
            &habit_id.to_string(),
            &format!(
                "Removed completion of {} (streak {}, longest {})",
                fmt_date(&date),
                streak.current_streak,
                streak.longest_streak
            ),
        );

        Ok(streak)
    }
}
