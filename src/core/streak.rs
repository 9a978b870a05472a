//! Streak calculation.
//!
//! Streak state is derived from the *set* of completion dates of a habit and
//! nothing else (plus "today" and the previously stored longest streak).
//! Every insertion or removal, backdated or not, goes through the same full
//! computation, so the result never depends on the order of mutations.

use crate::errors::AppError;
use crate::models::streak::Streak;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// What happens to `longest_streak` when a recompute yields a shorter best run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StreakPolicy {
    /// Longest streak never decreases across recomputations.
    #[default]
    Watermark,
    /// Longest streak is always the best run found in the current set.
    Recompute,
}

impl FromStr for StreakPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watermark" => Ok(StreakPolicy::Watermark),
            "recompute" => Ok(StreakPolicy::Recompute),
            other => Err(AppError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for StreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakPolicy::Watermark => f.write_str("watermark"),
            StreakPolicy::Recompute => f.write_str("recompute"),
        }
    }
}

pub struct StreakCalculator;

impl StreakCalculator {
    /// Compute the streak of `habit_id` from its completion dates.
    ///
    /// - `current_streak`: length of the run of consecutive days ending at the
    ///   most recent completion, or 0 when that completion is neither `today`
    ///   nor the day before.
    /// - `longest_streak`: best run over the whole set; under
    ///   [`StreakPolicy::Watermark`] never lower than `prior.longest_streak`.
    /// - `last_completed`: most recent completion date.
    ///
    /// Duplicated dates count once.
    pub fn compute<I>(
        habit_id: i64,
        dates: I,
        prior: Option<&Streak>,
        today: NaiveDate,
        policy: StreakPolicy,
    ) -> Streak
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let last_completed = dates.last().copied();

        let current = match last_completed {
            Some(last) if is_recent(last, today) => run_ending_at(&dates, last),
            _ => 0,
        };

        let best_run = longest_run(&dates);
        let longest = match policy {
            StreakPolicy::Watermark => best_run.max(prior.map_or(0, |p| p.longest_streak)),
            StreakPolicy::Recompute => best_run,
        };

        debug_assert!(longest >= current, "longest streak below current streak");

        Streak {
            habit_id,
            current_streak: current,
            longest_streak: longest,
            last_completed,
        }
    }
}

/// `last` keeps a streak alive when it is today or yesterday.
fn is_recent(last: NaiveDate, today: NaiveDate) -> bool {
    last == today || today.pred_opt() == Some(last)
}

/// Length of the consecutive-day run ending at `end` (which must be the max of `dates`).
fn run_ending_at(dates: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut count = 0u32;
    let mut expected = Some(end);

    for d in dates.iter().rev() {
        if Some(*d) != expected {
            break;
        }
        count += 1;
        expected = d.pred_opt();
    }

    count
}

/// Longest run of consecutive days anywhere in `dates`.
fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &d in dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(d) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(d);
    }

    best
}
