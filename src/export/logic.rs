use crate::core::store;
use crate::core::streak::StreakPolicy;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::CompletionExport;
use crate::export::range::parse_range;
use crate::models::streak::Streak;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::{Row, params};
use std::collections::HashMap;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export completions, optionally restricted to one user and a date range.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or one of the forms accepted by
    ///   [`parse_range`]
    ///
    /// Streak columns are evaluated as of `today`.
    /// Returns the number of rows written.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        user_id: Option<i64>,
        force: bool,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let mut rows = load_rows(pool, bounds, user_id)?;
        fill_streaks(pool, &mut rows, today, policy)?;

        if rows.is_empty() {
            warning("No completions found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} completion(s) as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }
}

fn map_row(row: &Row) -> rusqlite::Result<CompletionExport> {
    Ok(CompletionExport {
        habit_id: row.get("habit_id")?,
        habit: row.get("title")?,
        user: row.get("username")?,
        date: row.get("completed_date")?,
        note: row.get("note")?,
        current_streak: 0,
        longest_streak: 0,
    })
}

fn load_rows(
    pool: &mut DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
    user_id: Option<i64>,
) -> AppResult<Vec<CompletionExport>> {
    let (start, end) = match bounds {
        Some((s, e)) => (
            s.format("%Y-%m-%d").to_string(),
            e.format("%Y-%m-%d").to_string(),
        ),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = pool.conn.prepare(
        "SELECT c.habit_id, h.title, u.username, c.completed_date, c.note
         FROM completions c
         JOIN habits h ON h.id = c.habit_id
         JOIN users u ON u.id = h.user_id
         WHERE c.completed_date BETWEEN ?1 AND ?2
           AND (?3 IS NULL OR h.user_id = ?3)
         ORDER BY c.completed_date ASC, c.habit_id ASC",
    )?;

    let rows = stmt.query_map(params![start, end, user_id], map_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Stored streak rows may predate `today`; evaluate once per habit without persisting.
fn fill_streaks(
    pool: &mut DbPool,
    rows: &mut [CompletionExport],
    today: NaiveDate,
    policy: StreakPolicy,
) -> AppResult<()> {
    let mut cache: HashMap<i64, Streak> = HashMap::new();

    for row in rows.iter_mut() {
        if !cache.contains_key(&row.habit_id) {
            let streak = store::evaluate(&pool.conn, row.habit_id, today, policy)?;
            cache.insert(row.habit_id, streak);
        }
        if let Some(streak) = cache.get(&row.habit_id) {
            row.current_streak = streak.current_streak;
            row.longest_streak = streak.longest_streak;
        }
    }

    Ok(())
}
