use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, UserCommands};
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        UserCommands::Add { username, email } => {
            let user = UserLogic::register(&mut pool, username, email)?;
            success(format!(
                "User '{}' registered with id {}",
                user.username, user.id
            ));
        }
        UserCommands::List => {
            let users = UserLogic::list(&mut pool)?;
            if users.is_empty() {
                info("No users registered.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "USERNAME", "EMAIL", "CREATED"]);
            for u in users {
                let created = u.created_at.get(..10).unwrap_or(&u.created_at).to_string();
                table.add_row(vec![u.id.to_string(), u.username, u.email, created]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
