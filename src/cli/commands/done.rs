use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::completion::CompletionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{streak, success};
use crate::utils::date::resolve_date;
use chrono::NaiveDate;

/// Handle `done` and `undo`.
pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    match cmd {
        Commands::Done {
            habit_id,
            date,
            note,
        } => {
            let d = resolve_date(date.as_deref(), today)?;
            let mut pool = open_pool(cfg)?;

            let s = CompletionLogic::complete(
                &mut pool,
                *habit_id,
                d,
                note.as_deref(),
                today,
                cfg.streak_policy,
            )?;

            success(format!("Habit {} done for {}", habit_id, d));
            streak(s.current_streak, s.longest_streak);
        }
        Commands::Undo { habit_id, date } => {
            let d = resolve_date(date.as_deref(), today)?;
            let mut pool = open_pool(cfg)?;

            let s = CompletionLogic::uncomplete(&mut pool, *habit_id, d, today, cfg.streak_policy)?;

            success(format!("Completion of habit {} on {} removed", habit_id, d));
            streak(s.current_streak, s.longest_streak);
        }
        _ => {}
    }

    Ok(())
}
