use chrono::NaiveDate;
use habitlog::core::completion::CompletionLogic;
use habitlog::core::habit::HabitLogic;
use habitlog::core::stats::StatsLogic;
use habitlog::core::store::{self, StreakStore};
use habitlog::core::streak::StreakPolicy;
use habitlog::core::user::UserLogic;
use habitlog::db::pool::DbPool;
use habitlog::db::queries;
use habitlog::errors::{AppError, AppResult};
use habitlog::models::frequency::Frequency;
use habitlog::models::habit::{Habit, HabitPatch};
use habitlog::models::streak::Streak;
use std::collections::BTreeSet;

mod common;
use common::{d, memory_pool};

const POLICY: StreakPolicy = StreakPolicy::Watermark;

fn pool_with_habit() -> (DbPool, i64) {
    let mut pool = memory_pool();
    let user = UserLogic::register(&mut pool, "alice", "alice@example.com").unwrap();
    let habit = HabitLogic::create(
        &mut pool,
        Habit::new(user.id, "Meditate", Frequency::Daily, 1),
    )
    .unwrap();
    (pool, habit.id)
}

fn complete(pool: &mut DbPool, habit_id: i64, date: &str, today: &str) -> AppResult<Streak> {
    CompletionLogic::complete(pool, habit_id, d(date), None, d(today), POLICY)
}

fn stored(pool: &DbPool, habit_id: i64) -> Streak {
    queries::get_streak(&pool.conn, habit_id).unwrap().unwrap()
}

#[test]
fn new_habit_starts_with_empty_streak() {
    let (pool, id) = pool_with_habit();
    assert_eq!(stored(&pool, id), Streak::empty(id));
}

#[test]
fn complete_persists_recomputed_streak() {
    let (mut pool, id) = pool_with_habit();

    complete(&mut pool, id, "2024-06-01", "2024-06-03").unwrap();
    complete(&mut pool, id, "2024-06-02", "2024-06-03").unwrap();
    let s = complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();

    assert_eq!(s.current_streak, 3);
    assert_eq!(s.longest_streak, 3);
    assert_eq!(stored(&pool, id), s);
}

#[test]
fn uncomplete_shrinks_current_but_keeps_watermark() {
    let (mut pool, id) = pool_with_habit();
    for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        complete(&mut pool, id, day, "2024-06-03").unwrap();
    }

    let s = CompletionLogic::uncomplete(&mut pool, id, d("2024-06-02"), d("2024-06-03"), POLICY)
        .unwrap();

    assert_eq!(s.current_streak, 1);
    assert_eq!(s.longest_streak, 3);
    assert_eq!(stored(&pool, id), s);
}

#[test]
fn duplicate_and_future_completions_are_rejected() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();

    let dup = complete(&mut pool, id, "2024-06-03", "2024-06-03");
    assert!(matches!(dup, Err(AppError::AlreadyCompleted { .. })));

    let future = complete(&mut pool, id, "2024-06-04", "2024-06-03");
    assert!(matches!(future, Err(AppError::FutureDate(_))));

    let missing = complete(&mut pool, 999, "2024-06-03", "2024-06-03");
    assert!(matches!(missing, Err(AppError::HabitNotFound(999))));

    let none = CompletionLogic::uncomplete(&mut pool, id, d("2024-05-01"), d("2024-06-03"), POLICY);
    assert!(matches!(none, Err(AppError::CompletionNotFound { .. })));
}

#[test]
fn failed_streak_save_rolls_back_completion() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-02", "2024-06-03").unwrap();
    let before = stored(&pool, id);

    pool.conn
        .execute_batch(
            "CREATE TRIGGER streaks_readonly BEFORE UPDATE ON streaks
             BEGIN SELECT RAISE(ABORT, 'streaks are read-only'); END;",
        )
        .unwrap();

    let res = complete(&mut pool, id, "2024-06-03", "2024-06-03");
    assert!(matches!(res, Err(AppError::Persistence { habit_id, .. }) if habit_id == id));

    assert!(!queries::completion_exists(&pool.conn, id, &d("2024-06-03")).unwrap());
    assert_eq!(stored(&pool, id), before);
}

struct FailingStore {
    dates: BTreeSet<NaiveDate>,
}

impl StreakStore for FailingStore {
    fn list_completion_dates(&self, _habit_id: i64) -> AppResult<BTreeSet<NaiveDate>> {
        Ok(self.dates.clone())
    }

    fn get_streak(&self, _habit_id: i64) -> AppResult<Option<Streak>> {
        Ok(None)
    }

    fn save_streak(&self, _streak: &Streak) -> AppResult<()> {
        Err(AppError::Other("disk full".into()))
    }
}

#[test]
fn recompute_surfaces_save_failure() {
    let store = FailingStore {
        dates: [d("2024-06-02"), d("2024-06-03")].into_iter().collect(),
    };

    let res = store::recompute(&store, 7, d("2024-06-03"), POLICY);

    match res {
        Err(AppError::Persistence { habit_id, reason }) => {
            assert_eq!(habit_id, 7);
            assert!(reason.contains("disk full"));
        }
        other => panic!("expected persistence failure, got {other:?}"),
    }
}

#[test]
fn delete_removes_completions_and_streak() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-02", "2024-06-03").unwrap();
    complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();

    let removed = HabitLogic::delete(&mut pool, id).unwrap();

    assert_eq!(removed, 2);
    assert!(queries::get_habit(&pool.conn, id).unwrap().is_none());
    assert!(queries::get_streak(&pool.conn, id).unwrap().is_none());
    assert!(queries::list_completion_dates(&pool.conn, id).unwrap().is_empty());
}

#[test]
fn refresh_all_expires_stale_streaks() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-02", "2024-06-03").unwrap();
    complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();

    let refreshed = HabitLogic::refresh_all(&mut pool, d("2024-06-10"), POLICY).unwrap();

    assert_eq!(refreshed.len(), 1);
    let s = stored(&pool, id);
    assert_eq!(s.current_streak, 0);
    assert_eq!(s.longest_streak, 2);
}

#[test]
fn update_and_toggle_leave_streak_alone() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();
    let before = stored(&pool, id);

    let patch = HabitPatch {
        title: Some("Meditate 10 min".into()),
        target_days: Some(5),
        ..HabitPatch::default()
    };
    let h = HabitLogic::update(&mut pool, id, patch).unwrap();
    assert_eq!(h.title, "Meditate 10 min");
    assert_eq!(h.target_days, 5);

    assert!(!HabitLogic::toggle(&mut pool, id, None).unwrap());
    assert!(HabitLogic::toggle(&mut pool, id, Some(true)).unwrap());

    assert_eq!(stored(&pool, id), before);

    let bad = HabitLogic::update(
        &mut pool,
        id,
        HabitPatch {
            target_days: Some(0),
            ..HabitPatch::default()
        },
    );
    assert!(matches!(bad, Err(AppError::InvalidTarget(0))));
}

#[test]
fn create_requires_existing_owner() {
    let mut pool = memory_pool();
    let res = HabitLogic::create(&mut pool, Habit::new(42, "Run", Frequency::Weekly, 3));
    assert!(matches!(res, Err(AppError::UserNotFound(_))));
}

#[test]
fn duplicate_user_is_rejected() {
    let mut pool = memory_pool();
    UserLogic::register(&mut pool, "bob", "bob@example.com").unwrap();

    let res = UserLogic::register(&mut pool, "bob", "other@example.com");
    assert!(matches!(res, Err(AppError::DuplicateUser(_))));
}

#[test]
fn stats_count_active_habits_only() {
    let (mut pool, first) = pool_with_habit();
    let user = queries::find_user_by_username(&pool.conn, "alice")
        .unwrap()
        .unwrap();

    let second = HabitLogic::create(&mut pool, Habit::new(user.id, "Stretch", Frequency::Daily, 1))
        .unwrap()
        .id;
    let third = HabitLogic::create(&mut pool, Habit::new(user.id, "Journal", Frequency::Daily, 1))
        .unwrap()
        .id;

    for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        complete(&mut pool, first, day, "2024-06-03").unwrap();
    }
    complete(&mut pool, second, "2024-06-02", "2024-06-03").unwrap();

    for day in ["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04"] {
        complete(&mut pool, third, day, "2024-06-03").unwrap();
    }
    HabitLogic::toggle(&mut pool, third, Some(false)).unwrap();

    let stats = StatsLogic::for_user(&mut pool, user.id, d("2024-06-03"), POLICY).unwrap();

    assert_eq!(stats.total_habits, 2);
    assert_eq!(stats.completed_today, 1);
    assert_eq!(stats.total_streak, 4);
    assert_eq!(stats.longest_streak, 4);
    assert_eq!(stats.success_rate, 50.0);
}

#[test]
fn stats_of_user_without_habits() {
    let mut pool = memory_pool();
    let user = UserLogic::register(&mut pool, "carol", "carol@example.com").unwrap();

    let stats = StatsLogic::for_user(&mut pool, user.id, d("2024-06-03"), POLICY).unwrap();
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.total_habits, 0);
}

#[test]
fn list_and_stats_agree_on_a_later_day() {
    let (mut pool, id) = pool_with_habit();
    complete(&mut pool, id, "2024-06-02", "2024-06-03").unwrap();
    complete(&mut pool, id, "2024-06-03", "2024-06-03").unwrap();
    let user = queries::find_user_by_username(&pool.conn, "alice")
        .unwrap()
        .unwrap();

    let later = d("2024-06-10");
    let listed = HabitLogic::list(&mut pool, Some(user.id), false, later, POLICY).unwrap();
    let shown = HabitLogic::show(&mut pool, id, later, POLICY).unwrap();
    let stats = StatsLogic::for_user(&mut pool, user.id, later, POLICY).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].streak.current_streak, 0);
    assert_eq!(listed[0].streak.longest_streak, 2);
    assert_eq!(shown.streak, listed[0].streak);
    assert_eq!(stats.total_streak, listed[0].streak.current_streak);

    // Reading never rewrites the stored row.
    assert_eq!(stored(&pool, id).current_streak, 2);
}

#[test]
fn stats_follow_configured_policy() {
    let (mut pool, id) = pool_with_habit();
    for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        complete(&mut pool, id, day, "2024-06-03").unwrap();
    }
    CompletionLogic::uncomplete(&mut pool, id, d("2024-06-02"), d("2024-06-03"), POLICY).unwrap();
    let user = queries::find_user_by_username(&pool.conn, "alice")
        .unwrap()
        .unwrap();

    let watermark =
        StatsLogic::for_user(&mut pool, user.id, d("2024-06-03"), StreakPolicy::Watermark)
            .unwrap();
    let recompute =
        StatsLogic::for_user(&mut pool, user.id, d("2024-06-03"), StreakPolicy::Recompute)
            .unwrap();

    assert_eq!(watermark.longest_streak, 3);
    assert_eq!(recompute.longest_streak, 1);

    let shown = HabitLogic::show(&mut pool, id, d("2024-06-03"), StreakPolicy::Recompute).unwrap();
    assert_eq!(shown.streak.longest_streak, 1);
}
