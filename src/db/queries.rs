use crate::errors::{AppError, AppResult};
use crate::models::completion::Completion;
use crate::models::frequency::Frequency;
use crate::models::habit::Habit;
use crate::models::streak::Streak;
use crate::models::user::User;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeSet;

const HABIT_COLUMNS: &str = "id, user_id, title, description, frequency, target_days, color, icon, is_active, created_at";

fn conversion_err(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_db_date(col: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_err(col, AppError::InvalidDate(raw.to_string())))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

fn map_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a user and return its id.
pub fn insert_user(conn: &Connection, username: &str, email: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, email, created_at) VALUES (?1, ?2, ?3)",
        params![username, email, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, username, email, created_at FROM users WHERE username = ?1",
    )?;
    Ok(stmt.query_row([username], map_user).optional()?)
}

pub fn get_user(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, username, email, created_at FROM users WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn user_exists(conn: &Connection, username: &str, email: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM users WHERE username = ?1 OR email = ?2 LIMIT 1")?;
    Ok(stmt.exists(params![username, email])?)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, username, email, created_at FROM users ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_user)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

// ---------------------------------------------------------------------------
// Habits
// ---------------------------------------------------------------------------

pub fn map_habit(row: &Row) -> Result<Habit> {
    let freq_str: String = row.get("frequency")?;
    let frequency = Frequency::from_db_str(&freq_str)
        .ok_or_else(|| conversion_err(4, AppError::InvalidFrequency(freq_str.clone())))?;

    Ok(Habit {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        frequency,
        target_days: row.get("target_days")?,
        color: row.get("color")?,
        icon: row.get("icon")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Insert a habit and return its id.
pub fn insert_habit(conn: &Connection, h: &Habit) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO habits (user_id, title, description, frequency, target_days, color, icon, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            h.user_id,
            h.title,
            h.description,
            h.frequency.to_db_str(),
            h.target_days,
            h.color,
            h.icon,
            if h.is_active { 1 } else { 0 },
            h.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_habit(conn: &Connection, id: i64) -> AppResult<Option<Habit>> {
    let sql = format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_habit).optional()?)
}

/// Habits of one user (or of everybody), active only unless `include_archived`.
pub fn list_habits(
    conn: &Connection,
    user_id: Option<i64>,
    include_archived: bool,
) -> AppResult<Vec<Habit>> {
    let mut sql = format!("SELECT {HABIT_COLUMNS} FROM habits");
    let mut conditions: Vec<&str> = Vec::new();

    if user_id.is_some() {
        conditions.push("user_id = ?1");
    }
    if !include_archived {
        conditions.push("is_active = 1");
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = match user_id {
        Some(uid) => stmt.query_map([uid], map_habit)?,
        None => stmt.query_map([], map_habit)?,
    };
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn list_habit_ids(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM habits ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

/// Update all editable fields of a habit (not id, owner or created_at).
pub fn update_habit(conn: &Connection, h: &Habit) -> AppResult<()> {
    conn.execute(
        "UPDATE habits
         SET title = ?1, description = ?2, frequency = ?3,
             target_days = ?4, color = ?5, icon = ?6, is_active = ?7
         WHERE id = ?8",
        params![
            h.title,
            h.description,
            h.frequency.to_db_str(),
            h.target_days,
            h.color,
            h.icon,
            if h.is_active { 1 } else { 0 },
            h.id,
        ],
    )?;
    Ok(())
}

pub fn delete_habit(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM habits WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// Completions
// ---------------------------------------------------------------------------

pub fn insert_completion(conn: &Connection, c: &Completion) -> AppResult<()> {
    conn.execute(
        "INSERT INTO completions (habit_id, completed_date, note, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![c.habit_id, c.date_str(), c.note, c.created_at],
    )?;
    Ok(())
}

pub fn completion_exists(conn: &Connection, habit_id: i64, date: &NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM completions WHERE habit_id = ?1 AND completed_date = ?2 LIMIT 1",
    )?;
    Ok(stmt.exists(params![habit_id, date.format("%Y-%m-%d").to_string()])?)
}

/// Delete the completion of `habit_id` on `date`. Returns number of rows deleted.
pub fn delete_completion(conn: &Connection, habit_id: i64, date: &NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM completions WHERE habit_id = ?1 AND completed_date = ?2",
        params![habit_id, date.format("%Y-%m-%d").to_string()],
    )?)
}

pub fn delete_completions_for_habit(conn: &Connection, habit_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM completions WHERE habit_id = ?1",
        [habit_id],
    )?)
}

/// All completion dates of a habit. Stored dates that do not parse are a
/// row decoding error, not silently skipped.
pub fn list_completion_dates(conn: &Connection, habit_id: i64) -> AppResult<BTreeSet<NaiveDate>> {
    let mut stmt = conn.prepare_cached(
        "SELECT completed_date FROM completions WHERE habit_id = ?1 ORDER BY completed_date ASC",
    )?;
    let rows = stmt.query_map([habit_id], |row| {
        let raw: String = row.get(0)?;
        parse_db_date(0, &raw)
    })?;

    let mut out = BTreeSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

fn map_streak(row: &Row) -> Result<Streak> {
    let last: Option<String> = row.get("last_completed")?;
    let last_completed = match last {
        Some(s) => Some(parse_db_date(3, &s)?),
        None => None,
    };

    Ok(Streak {
        habit_id: row.get("habit_id")?,
        current_streak: row.get("current_streak")?,
        longest_streak: row.get("longest_streak")?,
        last_completed,
    })
}

pub fn get_streak(conn: &Connection, habit_id: i64) -> AppResult<Option<Streak>> {
    let mut stmt = conn.prepare_cached(
        "SELECT habit_id, current_streak, longest_streak, last_completed
         FROM streaks WHERE habit_id = ?1",
    )?;
    Ok(stmt.query_row([habit_id], map_streak).optional()?)
}

/// Insert or replace the streak row of a habit.
pub fn save_streak(conn: &Connection, s: &Streak) -> AppResult<()> {
    conn.execute(
        "INSERT INTO streaks (habit_id, current_streak, longest_streak, last_completed, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(habit_id) DO UPDATE SET
             current_streak = excluded.current_streak,
             longest_streak = excluded.longest_streak,
             last_completed = excluded.last_completed,
             updated_at     = excluded.updated_at",
        params![
            s.habit_id,
            s.current_streak,
            s.longest_streak,
            s.last_completed.map(|d| d.format("%Y-%m-%d").to_string()),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn delete_streak(conn: &Connection, habit_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM streaks WHERE habit_id = ?1", [habit_id])?)
}
