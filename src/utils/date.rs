use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`. Non-existent days (e.g. 2023-02-29) are rejected.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// "Today" for this invocation: the `--today` override if given, else the local clock.
pub fn resolve_today(override_date: Option<&str>) -> AppResult<NaiveDate> {
    match override_date {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}

/// Completion date argument: explicit date or today.
pub fn resolve_date(arg: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match arg {
        Some(s) if s.eq_ignore_ascii_case("today") => Ok(today),
        Some(s) if s.eq_ignore_ascii_case("yesterday") => today
            .pred_opt()
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today),
    }
}
