use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::habit::HabitLogic;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
        refresh,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let (integrity, fk_violations) = pool.with_conn(|conn| {
                let integrity: String =
                    conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
                let mut stmt = conn.prepare("PRAGMA foreign_key_check;")?;
                let violations = stmt.query_map([], |_| Ok(()))?.count();
                Ok((integrity, violations))
            })?;

            if integrity == "ok" && fk_violations == 0 {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else if integrity != "ok" {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            } else {
                println!(
                    "{}✘ Integrity check failed:{} {} foreign key violation(s)\n",
                    RED, RESET, fk_violations
                );
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        if *refresh {
            println!("{}▶ Recomputing streaks as of {}…{}", CYAN, today, RESET);
            let refreshed = HabitLogic::refresh_all(&mut pool, today, cfg.streak_policy)?;
            println!(
                "{}✔ {} streak(s) refreshed.{}\n",
                GREEN,
                refreshed.len(),
                RESET
            );
        }
    }

    Ok(())
}
