#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use habitlog::db::initialize::init_db;
use habitlog::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Fixed "today" used by CLI tests through the hidden `--today` flag.
pub const TODAY: &str = "2024-06-03";

/// Config directory isolated from the developer's real one.
fn test_home() -> PathBuf {
    let mut path = env::temp_dir();
    path.push("habitlog_test_home");
    fs::create_dir_all(&path).ok();
    path
}

pub fn hbl() -> Command {
    let mut cmd = cargo_bin_cmd!("habitlog");
    cmd.env("HABITLOG_HOME", test_home());
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_habitlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Migrated in-memory database for library-level tests.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Init the DB and register user `alice` with one daily habit (id 1).
pub fn init_db_with_habit(db_path: &str) {
    hbl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    hbl()
        .args(["--db", db_path, "user", "add", "alice", "--email", "alice@example.com"])
        .assert()
        .success();

    hbl()
        .args(["--db", db_path, "habit", "add", "Read 20 pages", "--user", "alice"])
        .assert()
        .success();
}

/// Run `done` for `habit_id` on `date` with the fixed [`TODAY`].
pub fn done(db_path: &str, habit_id: &str, date: &str) {
    hbl()
        .args(["--db", db_path, "--today", TODAY, "done", habit_id, date])
        .assert()
        .success();
}
