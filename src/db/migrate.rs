use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

const CORE_TABLES: &str = "20250301_0001_create_core_tables";
const STREAK_BACKFILL: &str = "20250310_0002_backfill_missing_streaks";
const COMPLETION_INDEXES: &str = "20250422_0003_completion_date_index";

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Users, habits, completions and streaks.
fn create_core_tables(conn: &Connection) -> Result<()> {
    if is_applied(conn, CORE_TABLES)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habits (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL REFERENCES users(id),
            title        TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            frequency    TEXT NOT NULL DEFAULT 'daily' CHECK(frequency IN ('daily','weekly','monthly')),
            target_days  INTEGER NOT NULL DEFAULT 1 CHECK(target_days >= 1),
            color        TEXT NOT NULL DEFAULT '#3B82F6',
            icon         TEXT NOT NULL DEFAULT 'check-circle',
            is_active    INTEGER NOT NULL DEFAULT 1,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS completions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id        INTEGER NOT NULL REFERENCES habits(id),
            completed_date  TEXT NOT NULL,
            note            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL,
            UNIQUE(habit_id, completed_date)
        );

        CREATE TABLE IF NOT EXISTS streaks (
            habit_id        INTEGER PRIMARY KEY REFERENCES habits(id),
            current_streak  INTEGER NOT NULL DEFAULT 0,
            longest_streak  INTEGER NOT NULL DEFAULT 0,
            last_completed  TEXT,
            updated_at      TEXT NOT NULL,
            CHECK(current_streak >= 0 AND longest_streak >= current_streak)
        );

        CREATE INDEX IF NOT EXISTS idx_habits_user ON habits(user_id, is_active);
        "#,
    )?;

    mark_applied(conn, CORE_TABLES, "Created users, habits, completions, streaks")?;
    success(format!("Migration applied: {} → core tables created", CORE_TABLES));
    Ok(())
}

/// Every habit owns exactly one streak row. Databases edited by hand (or
/// restored from a partial backup) may have habits without one.
fn backfill_missing_streaks(conn: &Connection) -> Result<()> {
    if is_applied(conn, STREAK_BACKFILL)? {
        return Ok(());
    }

    let inserted = conn.execute(
        "INSERT INTO streaks (habit_id, current_streak, longest_streak, last_completed, updated_at)
         SELECT h.id, 0, 0, NULL, datetime('now')
         FROM habits h
         LEFT JOIN streaks s ON s.habit_id = h.id
         WHERE s.habit_id IS NULL",
        [],
    )?;

    if inserted > 0 {
        warning(format!(
            "{} habit(s) had no streak record; run `habitlog db --refresh` to recompute them.",
            inserted
        ));
    }

    mark_applied(conn, STREAK_BACKFILL, "Backfilled missing streak rows")?;
    Ok(())
}

fn add_completion_date_index(conn: &Connection) -> Result<()> {
    if is_applied(conn, COMPLETION_INDEXES)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_completions_date ON completions(completed_date);",
    )?;

    mark_applied(conn, COMPLETION_INDEXES, "Added completions(completed_date) index")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `init` and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if is_applied(conn, CORE_TABLES)? && !table_exists(conn, "habits")? {
        warning("Migration log says core tables exist, but `habits` is missing. Recreating.");
        conn.execute(
            "DELETE FROM log WHERE operation = 'migration_applied' AND target = ?1",
            [CORE_TABLES],
        )?;
    }

    create_core_tables(conn)?;
    backfill_missing_streaks(conn)?;
    add_completion_date_index(conn)?;

    Ok(())
}
