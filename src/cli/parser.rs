use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for habitlog
/// Habit tracker with per-habit streaks, stored in SQLite
#[derive(Parser)]
#[command(
    name = "habitlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A habit tracking CLI: log daily completions and keep streaks honest using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Evaluate streaks as if today were this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", value_name = "DATE", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Check the configuration file for missing fields and add them"
        )]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "refresh", help = "Recompute the streak of every habit for today")]
        refresh: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage habits
    Habit {
        #[command(subcommand)]
        action: HabitCommands,
    },

    /// Mark a habit as done (today unless a date is given)
    Done {
        habit_id: i64,

        /// Completion date (YYYY-MM-DD, "today" or "yesterday")
        date: Option<String>,

        #[arg(long, short = 'n', help = "Free-form note stored with the completion")]
        note: Option<String>,
    },

    /// Remove a completion (today unless a date is given)
    Undo {
        habit_id: i64,

        /// Completion date (YYYY-MM-DD, "today" or "yesterday")
        date: Option<String>,
    },

    /// Show today's numbers for one user
    Stats {
        #[arg(long, short = 'u', help = "Username (default: config default_user)")]
        user: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export completions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'u', help = "Only export habits of this user")]
        user: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        username: String,

        #[arg(long)]
        email: String,
    },

    /// List registered users
    List,
}

#[derive(Subcommand)]
pub enum HabitCommands {
    /// Create a habit
    Add {
        title: String,

        #[arg(long, short = 'u', help = "Owner username (default: config default_user)")]
        user: Option<String>,

        #[arg(long, short = 'f', help = "daily | weekly | monthly (or d/w/m)")]
        frequency: Option<String>,

        #[arg(long, short = 't', default_value_t = 1, help = "Target days per period")]
        target: i64,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long, help = "Display color (e.g. #3B82F6)")]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// List habits with their streaks
    List {
        #[arg(long, short = 'u', help = "Only habits of this user")]
        user: Option<String>,

        #[arg(long, short = 'a', help = "Include archived habits")]
        all: bool,
    },

    /// Show one habit with its completions
    Show { id: i64 },

    /// Edit fields of a habit
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, help = "daily | weekly | monthly (or d/w/m)")]
        frequency: Option<String>,

        #[arg(long)]
        target: Option<i64>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a habit with all its completions
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Archive or restore a habit
    Toggle {
        id: i64,

        #[arg(long, value_name = "BOOL", help = "Set the active flag instead of flipping it")]
        active: Option<bool>,
    },
}
