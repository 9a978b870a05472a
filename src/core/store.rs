//! Storage seam of the streak calculator.

use crate::core::streak::{StreakCalculator, StreakPolicy};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::streak::Streak;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::BTreeSet;

/// What the streak recompute needs from persistence.
///
/// Implemented for `rusqlite::Connection`; an open `Transaction` is used
/// through `&*tx` so the recompute joins the caller's transaction.
pub trait StreakStore {
    fn list_completion_dates(&self, habit_id: i64) -> AppResult<BTreeSet<NaiveDate>>;
    fn get_streak(&self, habit_id: i64) -> AppResult<Option<Streak>>;
    fn save_streak(&self, streak: &Streak) -> AppResult<()>;
}

impl StreakStore for Connection {
    fn list_completion_dates(&self, habit_id: i64) -> AppResult<BTreeSet<NaiveDate>> {
        queries::list_completion_dates(self, habit_id)
    }

    fn get_streak(&self, habit_id: i64) -> AppResult<Option<Streak>> {
        queries::get_streak(self, habit_id)
    }

    fn save_streak(&self, streak: &Streak) -> AppResult<()> {
        queries::save_streak(self, streak)
    }
}

/// Streak of `habit_id` as of `today`, computed from the stored completions
/// and prior streak. Nothing is written.
pub fn evaluate<S>(
    store: &S,
    habit_id: i64,
    today: NaiveDate,
    policy: StreakPolicy,
) -> AppResult<Streak>
where
    S: StreakStore + ?Sized,
{
    let dates = store.list_completion_dates(habit_id)?;
    let prior = store.get_streak(habit_id)?;

    Ok(StreakCalculator::compute(
        habit_id,
        dates,
        prior.as_ref(),
        today,
        policy,
    ))
}

/// Read the completion set and prior streak of `habit_id`, recompute, save.
///
/// A failing save is reported as [`AppError::Persistence`] so callers can
/// roll back the completion change that triggered the recompute.
pub fn recompute<S>(
    store: &S,
    habit_id: i64,
    today: NaiveDate,
    policy: StreakPolicy,
) -> AppResult<Streak>
where
    S: StreakStore + ?Sized,
{
    let streak = evaluate(store, habit_id, today, policy)?;

    store.save_streak(&streak).map_err(|e| match e {
        AppError::Persistence { .. } => e,
        other => AppError::Persistence {
            habit_id,
            reason: other.to_string(),
        },
    })?;

    Ok(streak)
}
