use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{done, hbl, init_db_with_habit, setup_test_db};

#[test]
fn test_habit_add_with_options_and_list() {
    let db_path = setup_test_db("habit_add_options");
    init_db_with_habit(&db_path);

    hbl()
        .args([
            "--db",
            &db_path,
            "habit",
            "add",
            "Gym",
            "--user",
            "alice",
            "--frequency",
            "w",
            "--target",
            "3",
            "--description",
            "Strength training",
        ])
        .assert()
        .success()
        .stdout(contains("Habit 'Gym' created with id 2"));

    hbl()
        .args(["--db", &db_path, "habit", "list", "--user", "alice"])
        .assert()
        .success()
        .stdout(contains("Read 20 pages"))
        .stdout(contains("Gym").and(contains("weekly")));
}

#[test]
fn test_habit_add_rejects_bad_input() {
    let db_path = setup_test_db("habit_add_bad");
    init_db_with_habit(&db_path);

    hbl()
        .args(["--db", &db_path, "habit", "add", "Swim", "--user", "alice", "--frequency", "hourly"])
        .assert()
        .failure()
        .stderr(contains("Invalid frequency"));

    hbl()
        .args(["--db", &db_path, "habit", "add", "Swim", "--user", "alice", "--target", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid target"));

    hbl()
        .args(["--db", &db_path, "habit", "add", "Swim", "--user", "ghost"])
        .assert()
        .failure()
        .stderr(contains("User not found"));
}

#[test]
fn test_habit_show_lists_completions() {
    let db_path = setup_test_db("habit_show");
    init_db_with_habit(&db_path);

    done(&db_path, "1", "2024-06-01");
    done(&db_path, "1", "2024-06-03");

    hbl()
        .args(["--db", &db_path, "habit", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Read 20 pages"))
        .stdout(contains("Completions (2)"))
        .stdout(contains("2024-06-01"))
        .stdout(contains("Last completed: 2024-06-03"));
}

#[test]
fn test_habit_edit() {
    let db_path = setup_test_db("habit_edit");
    init_db_with_habit(&db_path);

    hbl()
        .args(["--db", &db_path, "habit", "edit", "1", "--title", "Read 30 pages", "--color", "#10B981"])
        .assert()
        .success()
        .stdout(contains("updated: 'Read 30 pages'"));

    hbl()
        .args(["--db", &db_path, "habit", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Read 30 pages"))
        .stdout(contains("#10B981"));

    hbl()
        .args(["--db", &db_path, "habit", "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("Nothing to update"));
}

#[test]
fn test_habit_toggle_hides_from_default_list() {
    let db_path = setup_test_db("habit_toggle");
    init_db_with_habit(&db_path);

    hbl()
        .args(["--db", &db_path, "habit", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("now archived"));

    hbl()
        .args(["--db", &db_path, "habit", "list"])
        .assert()
        .success()
        .stdout(contains("No habits found"));

    hbl()
        .args(["--db", &db_path, "habit", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("archived"));

    hbl()
        .args(["--db", &db_path, "habit", "toggle", "1", "--active", "true"])
        .assert()
        .success()
        .stdout(contains("now active"));
}

#[test]
fn test_habit_del_with_yes() {
    let db_path = setup_test_db("habit_del");
    init_db_with_habit(&db_path);

    done(&db_path, "1", "2024-06-02");
    done(&db_path, "1", "2024-06-03");

    hbl()
        .args(["--db", &db_path, "habit", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("2 completion(s) removed"));

    hbl()
        .args(["--db", &db_path, "habit", "show", "1"])
        .assert()
        .failure()
        .stderr(contains("Habit not found: 1"));
}

#[test]
fn test_habit_del_without_confirmation_is_cancelled() {
    let db_path = setup_test_db("habit_del_cancel");
    init_db_with_habit(&db_path);

    hbl()
        .args(["--db", &db_path, "habit", "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    hbl()
        .args(["--db", &db_path, "habit", "show", "1"])
        .assert()
        .success();
}

#[test]
fn test_habit_list_expires_streak_on_later_day() {
    let db_path = setup_test_db("habit_list_later_day");
    init_db_with_habit(&db_path);

    done(&db_path, "1", "2024-06-02");
    done(&db_path, "1", "2024-06-03");

    hbl()
        .args(["--db", &db_path, "--today", "2024-06-04", "habit", "show", "1"])
        .assert()
        .success()
        .stdout(contains("2 day(s)"));

    hbl()
        .args(["--db", &db_path, "--today", "2024-06-10", "habit", "show", "1"])
        .assert()
        .success()
        .stdout(contains("0 day(s)"))
        .stdout(contains("longest 2"));

    hbl()
        .args(["--db", &db_path, "--today", "2024-06-10", "stats", "--user", "alice"])
        .assert()
        .success()
        .stdout(contains("Current streaks:"));
}
