use crate::core::store;
use crate::core::streak::StreakPolicy;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::habit::{Habit, HabitPatch};
use crate::models::streak::Streak;
use crate::models::summary::HabitSummary;
use chrono::NaiveDate;

/// Business logic for the `habit` command family.
pub struct HabitLogic;

fn validate_target(target: i64) -> AppResult<()> {
    if target < 1 {
        return Err(AppError::InvalidTarget(target));
    }
    Ok(())
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Other("Habit title cannot be empty".into()));
    }
    Ok(())
}

impl HabitLogic {
    /// Store a new habit together with its empty streak row.
    pub fn create(pool: &mut DbPool, habit: Habit) -> AppResult<Habit> {
        validate_title(&habit.title)?;
        validate_target(habit.target_days)?;

        if queries::get_user(&pool.conn, habit.user_id)?.is_none() {
            return Err(AppError::UserNotFound(habit.user_id.to_string()));
        }

        let tx = pool.conn.transaction()?;

        let id = queries::insert_habit(&tx, &habit)?;
        queries::save_streak(&tx, &Streak::empty(id))?;

        tx.commit()?;

        let stored = Habit { id, ..habit };
        audit(
            &pool.conn,
            "habit_add",
            &id.to_string(),
            &format!("Created habit '{}' ({})", stored.title, stored.frequency),
        );

        Ok(stored)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Habit> {
        queries::get_habit(&pool.conn, id)?.ok_or(AppError::HabitNotFound(id))
    }

    /// Habit, its streak as of `today` and its completion dates.
    pub fn show(
        pool: &mut DbPool,
        id: i64,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<HabitSummary> {
        let habit = Self::get(pool, id)?;
        Self::summarize(pool, habit, today, policy)
    }

    pub fn list(
        pool: &mut DbPool,
        user_id: Option<i64>,
        include_archived: bool,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<Vec<HabitSummary>> {
        let habits = queries::list_habits(&pool.conn, user_id, include_archived)?;
        habits
            .into_iter()
            .map(|h| Self::summarize(pool, h, today, policy))
            .collect()
    }

    // Stored rows may predate `today`; evaluate without persisting.
    fn summarize(
        pool: &mut DbPool,
        habit: Habit,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<HabitSummary> {
        let streak = store::evaluate(&pool.conn, habit.id, today, policy)?;
        let completions = queries::list_completion_dates(&pool.conn, habit.id)?
            .into_iter()
            .collect();

        Ok(HabitSummary {
            habit,
            streak,
            completions,
        })
    }

    /// Apply a partial update. Streak data is not touched.
    pub fn update(pool: &mut DbPool, id: i64, patch: HabitPatch) -> AppResult<Habit> {
        if patch.is_empty() {
            return Err(AppError::Other("Nothing to update".into()));
        }
        if let Some(t) = &patch.title {
            validate_title(t)?;
        }
        if let Some(n) = patch.target_days {
            validate_target(n)?;
        }

        let mut habit = Self::get(pool, id)?;
        patch.apply_to(&mut habit);
        queries::update_habit(&pool.conn, &habit)?;

        audit(
            &pool.conn,
            "habit_edit",
            &id.to_string(),
            &format!("Updated habit '{}'", habit.title),
        );

        Ok(habit)
    }

    /// Delete a habit with its completions and streak.
    /// Returns the number of completions removed.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<usize> {
        let habit = Self::get(pool, id)?;

        let tx = pool.conn.transaction()?;
        let removed = queries::delete_completions_for_habit(&tx, id)?;
        queries::delete_streak(&tx, id)?;
        queries::delete_habit(&tx, id)?;
        tx.commit()?;

        audit(
            &pool.conn,
            "habit_del",
            &id.to_string(),
            &format!(
                "Deleted habit '{}' and {} completion(s)",
                habit.title, removed
            ),
        );

        Ok(removed)
    }

    /// Set `is_active` to `active`, or flip it when `None`. Returns the new state.
    pub fn toggle(pool: &mut DbPool, id: i64, active: Option<bool>) -> AppResult<bool> {
        let mut habit = Self::get(pool, id)?;
        habit.is_active = active.unwrap_or(!habit.is_active);
        queries::update_habit(&pool.conn, &habit)?;

        audit(
            &pool.conn,
            "habit_toggle",
            &id.to_string(),
            &format!("Habit '{}' is now {}", habit.title, habit.status_label()),
        );

        Ok(habit.is_active)
    }

    /// Recompute the streak of every habit against `today`.
    ///
    /// Runs in a single transaction: either every streak row is refreshed
    /// or none is.
    pub fn refresh_all(
        pool: &mut DbPool,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<Vec<Streak>> {
        let tx = pool.conn.transaction()?;

        let ids = queries::list_habit_ids(&tx)?;
        let mut refreshed = Vec::with_capacity(ids.len());
        for id in ids {
            refreshed.push(store::recompute(&*tx, id, today, policy)?);
        }

        tx.commit()?;

        audit(
            &pool.conn,
            "refresh",
            "streaks",
            &format!("Recomputed {} streak(s) as of {}", refreshed.len(), today),
        );

        Ok(refreshed)
    }
}
