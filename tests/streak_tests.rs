use habitlog::core::streak::{StreakCalculator, StreakPolicy};
use habitlog::models::streak::Streak;

mod common;
use common::d;

fn compute(dates: &[&str], prior: Option<&Streak>, today: &str, policy: StreakPolicy) -> Streak {
    StreakCalculator::compute(1, dates.iter().map(|s| d(s)), prior, d(today), policy)
}

fn watermark(dates: &[&str], today: &str) -> Streak {
    compute(dates, None, today, StreakPolicy::Watermark)
}

#[test]
fn consecutive_run_ending_today() {
    let s = watermark(&["2024-06-01", "2024-06-02", "2024-06-03"], "2024-06-03");

    assert_eq!(s.current_streak, 3);
    assert_eq!(s.longest_streak, 3);
    assert_eq!(s.last_completed, Some(d("2024-06-03")));
}

#[test]
fn run_ending_yesterday_is_still_current() {
    let s = watermark(&["2024-06-01", "2024-06-02"], "2024-06-03");

    assert_eq!(s.current_streak, 2);
    assert_eq!(s.longest_streak, 2);
}

#[test]
fn removing_today_keeps_run_ending_yesterday() {
    let before = watermark(&["2024-06-01", "2024-06-02", "2024-06-03"], "2024-06-03");
    let after = compute(
        &["2024-06-01", "2024-06-02"],
        Some(&before),
        "2024-06-03",
        StreakPolicy::Watermark,
    );

    assert_eq!(after.current_streak, 2);
    assert_eq!(after.longest_streak, 3);
    assert_eq!(after.last_completed, Some(d("2024-06-02")));
}

#[test]
fn stale_completion_gives_zero_current() {
    let s = watermark(&["2024-01-01"], "2024-01-10");

    assert_eq!(s.current_streak, 0);
    assert_eq!(s.longest_streak, 1);
    assert_eq!(s.last_completed, Some(d("2024-01-01")));
}

#[test]
fn single_day_gap_is_not_bridged() {
    let s = watermark(&["2024-01-01", "2024-01-03"], "2024-01-03");

    assert_eq!(s.current_streak, 1);
    assert_eq!(s.longest_streak, 1);
}

#[test]
fn empty_set_is_all_zero() {
    let s = watermark(&[], "2024-06-03");

    assert_eq!(s, Streak::empty(1));
}

#[test]
fn duplicates_count_once() {
    let s = watermark(&["2024-06-02", "2024-06-02", "2024-06-03"], "2024-06-03");

    assert_eq!(s.current_streak, 2);
    assert_eq!(s.longest_streak, 2);
}

#[test]
fn recompute_is_idempotent() {
    let dates = ["2024-05-28", "2024-05-29", "2024-06-02", "2024-06-03"];
    let first = watermark(&dates, "2024-06-03");
    let second = compute(&dates, Some(&first), "2024-06-03", StreakPolicy::Watermark);

    assert_eq!(first, second);
}

#[test]
fn insertion_order_does_not_matter() {
    let ordered = watermark(
        &["2024-06-01", "2024-06-02", "2024-06-03", "2024-05-20"],
        "2024-06-03",
    );
    let shuffled = watermark(
        &["2024-06-03", "2024-05-20", "2024-06-01", "2024-06-02"],
        "2024-06-03",
    );

    assert_eq!(ordered, shuffled);
}

#[test]
fn backdated_completion_joins_runs() {
    let before = watermark(&["2024-06-01", "2024-06-03"], "2024-06-03");
    assert_eq!(before.current_streak, 1);

    let after = compute(
        &["2024-06-01", "2024-06-02", "2024-06-03"],
        Some(&before),
        "2024-06-03",
        StreakPolicy::Watermark,
    );
    assert_eq!(after.current_streak, 3);
    assert_eq!(after.longest_streak, 3);
}

#[test]
fn watermark_never_decreases() {
    let mut prior: Option<Streak> = None;
    let history: [&[&str]; 4] = [
        &["2024-06-01", "2024-06-02", "2024-06-03"],
        &["2024-06-01", "2024-06-03"],
        &["2024-06-03"],
        &[],
    ];

    let mut last_longest = 0;
    for dates in history {
        let s = compute(dates, prior.as_ref(), "2024-06-03", StreakPolicy::Watermark);
        assert!(s.longest_streak >= last_longest);
        assert!(s.longest_streak >= s.current_streak);
        last_longest = s.longest_streak;
        prior = Some(s);
    }

    assert_eq!(last_longest, 3);
}

#[test]
fn recompute_policy_follows_current_set() {
    let before = watermark(&["2024-06-01", "2024-06-02", "2024-06-03"], "2024-06-03");
    let after = compute(
        &["2024-06-01", "2024-06-03"],
        Some(&before),
        "2024-06-03",
        StreakPolicy::Recompute,
    );

    assert_eq!(after.current_streak, 1);
    assert_eq!(after.longest_streak, 1);
}

#[test]
fn longest_run_found_in_the_past() {
    let s = watermark(
        &[
            "2024-03-01",
            "2024-03-02",
            "2024-03-03",
            "2024-03-04",
            "2024-06-02",
            "2024-06-03",
        ],
        "2024-06-03",
    );

    assert_eq!(s.current_streak, 2);
    assert_eq!(s.longest_streak, 4);
}

#[test]
fn runs_cross_month_and_leap_day() {
    let s = watermark(&["2024-02-28", "2024-02-29", "2024-03-01"], "2024-03-01");

    assert_eq!(s.current_streak, 3);
    assert_eq!(s.longest_streak, 3);
}

#[test]
fn policy_parses_from_config_words() {
    assert_eq!("watermark".parse::<StreakPolicy>().unwrap(), StreakPolicy::Watermark);
    assert_eq!(" Recompute ".parse::<StreakPolicy>().unwrap(), StreakPolicy::Recompute);
    assert!("sometimes".parse::<StreakPolicy>().is_err());
}
