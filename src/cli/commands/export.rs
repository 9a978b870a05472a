use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        user,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        let user_id = match user {
            Some(name) => Some(UserLogic::resolve(&mut pool, cfg, Some(name))?.id),
            None => None,
        };

        ExportLogic::export(
            &mut pool,
            *format,
            file,
            range.as_deref(),
            user_id,
            *force,
            today,
            cfg.streak_policy,
        )?;
    }

    Ok(())
}
