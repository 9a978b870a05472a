use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::core::user::UserLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET, color_for_streak, paint};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Stats { user } = cmd {
        let mut pool = open_pool(cfg)?;
        let owner = UserLogic::resolve(&mut pool, cfg, user.as_deref())?;
        let stats = StatsLogic::for_user(&mut pool, owner.id, today, cfg.streak_policy)?;

        header(format!("Stats for {} on {}", owner.username, today));
        println!("{CYAN}• Active habits:{RESET}   {}", stats.total_habits);
        println!(
            "{CYAN}• Completed today:{RESET} {}/{}",
            stats.completed_today, stats.total_habits
        );
        println!(
            "{CYAN}• Current streaks:{RESET} {}",
            paint(
                color_for_streak(stats.total_streak),
                &stats.total_streak.to_string()
            )
        );
        println!(
            "{CYAN}• Longest streak:{RESET}  {}",
            paint(
                color_for_streak(stats.longest_streak),
                &stats.longest_streak.to_string()
            )
        );
        println!("{CYAN}• Success rate:{RESET}    {:.1}%", stats.success_rate);
    }

    Ok(())
}
