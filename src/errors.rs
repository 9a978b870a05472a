//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Failed to persist streak for habit {habit_id}: {reason}")]
    Persistence { habit_id: i64, reason: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid frequency: {0} (expected daily, weekly or monthly)")]
    InvalidFrequency(String),

    #[error("Invalid streak policy: {0} (expected watermark or recompute)")]
    InvalidPolicy(String),

    #[error("Invalid target: {0} (must be at least 1)")]
    InvalidTarget(i64),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Habit not found: {0}")]
    HabitNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Habit {habit_id} already completed on {date}")]
    AlreadyCompleted { habit_id: i64, date: String },

    #[error("No completion for habit {habit_id} on {date}")]
    CompletionNotFound { habit_id: i64, date: String },

    #[error("Cannot complete a habit in the future: {0}")]
    FutureDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
