use crate::errors::{AppError, AppResult};
use chrono::{Months, NaiveDate};

fn range_err(msg: impl Into<String>) -> AppError {
    AppError::Export(msg.into())
}

/// Inclusive bounds of one range endpoint: a whole year, a whole month or a day.
fn period_bounds(part: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match part.len() {
        4 => {
            let y: i32 = part
                .parse()
                .map_err(|_| range_err(format!("invalid year: {part}")))?;
            let start = NaiveDate::from_ymd_opt(y, 1, 1)
                .ok_or_else(|| range_err(format!("invalid year: {part}")))?;
            let end = NaiveDate::from_ymd_opt(y, 12, 31)
                .ok_or_else(|| range_err(format!("invalid year: {part}")))?;
            Ok((start, end))
        }
        7 => {
            let start = NaiveDate::parse_from_str(&format!("{part}-01"), "%Y-%m-%d")
                .map_err(|_| range_err(format!("invalid month: {part}")))?;
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt())
                .ok_or_else(|| range_err(format!("invalid month: {part}")))?;
            Ok((start, end))
        }
        10 => {
            let d = NaiveDate::parse_from_str(part, "%Y-%m-%d")
                .map_err(|_| range_err(format!("invalid date: {part}")))?;
            Ok((d, d))
        }
        _ => Err(range_err(format!("unsupported range format: {part}"))),
    }
}

/// Parse `--range`.
///
/// Supported forms:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `start:end` with both sides in the same form
///
/// The result is an inclusive `(first_day, last_day)` pair.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r);
    };

    let (start_raw, end_raw) = (start_raw.trim(), end_raw.trim());
    if start_raw.len() != end_raw.len() {
        return Err(range_err("start and end must have the same format"));
    }

    let (start, _) = period_bounds(start_raw)?;
    let (_, end) = period_bounds(end_raw)?;

    if start > end {
        return Err(range_err(format!(
            "range start {start} is after range end {end}"
        )));
    }

    Ok((start, end))
}
