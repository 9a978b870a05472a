use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, HabitCommands};
use crate::config::Config;
use crate::core::habit::HabitLogic;
use crate::core::user::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::frequency::Frequency;
use crate::models::habit::{Habit, HabitPatch};
use crate::models::summary::HabitSummary;
use crate::ui::messages::{ask_confirmation, header, info, streak, success};
use crate::utils::colors::{color_for_active, color_for_streak, paint};
use crate::utils::table::Table;
use chrono::NaiveDate;

fn parse_frequency(raw: &str) -> AppResult<Frequency> {
    Frequency::from_code(raw).ok_or_else(|| AppError::InvalidFrequency(raw.to_string()))
}

fn print_habits(summaries: Vec<HabitSummary>) {
    let mut table = Table::new(&[
        "ID", "TITLE", "FREQ", "TARGET", "DONE", "STREAK", "LONGEST", "LAST", "STATUS",
    ]);

    for s in summaries {
        let row = vec![
            s.habit.id.to_string(),
            s.habit.title.clone(),
            s.habit.frequency.to_string(),
            s.habit.target_days.to_string(),
            s.completions.len().to_string(),
            s.streak.current_streak.to_string(),
            s.streak.longest_streak.to_string(),
            s.streak.last_completed_str(),
            s.habit.status_label().to_string(),
        ];

        if s.habit.is_active {
            table.add_colored_row(color_for_streak(s.streak.current_streak), row);
        } else {
            table.add_colored_row(color_for_active(false), row);
        }
    }

    print!("{}", table.render());
}

fn print_habit(s: &HabitSummary) {
    let h = &s.habit;
    header(format!("#{} {}", h.id, h.title));
    if !h.description.is_empty() {
        println!("{}", h.description);
    }
    println!(
        "Frequency: {} (target {})  Status: {}",
        h.frequency,
        h.target_days,
        paint(color_for_active(h.is_active), h.status_label())
    );
    println!("Color: {}  Icon: {}", h.color, h.icon);
    streak(s.streak.current_streak, s.streak.longest_streak);
    println!("Last completed: {}", s.streak.last_completed_str());

    if s.completions.is_empty() {
        info("No completions yet.");
    } else {
        println!("Completions ({}):", s.completions.len());
        for d in &s.completions {
            println!("  {}", d.format("%Y-%m-%d"));
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let Commands::Habit { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_pool(cfg)?;

    match action {
        HabitCommands::Add {
            title,
            user,
            frequency,
            target,
            description,
            color,
            icon,
        } => {
            let owner = UserLogic::resolve(&mut pool, cfg, user.as_deref())?;
            let freq = match frequency {
                Some(f) => parse_frequency(f)?,
                None => cfg.default_frequency,
            };

            let mut habit = Habit::new(owner.id, title, freq, *target);
            if let Some(d) = description {
                habit.description = d.clone();
            }
            if let Some(c) = color {
                habit.color = c.clone();
            }
            if let Some(i) = icon {
                habit.icon = i.clone();
            }

            let stored = HabitLogic::create(&mut pool, habit)?;
            success(format!(
                "Habit '{}' created with id {} for {}",
                stored.title, stored.id, owner.username
            ));
        }

        HabitCommands::List { user, all } => {
            let user_id = match user.as_deref().or(cfg.default_user.as_deref()) {
                Some(name) => Some(UserLogic::resolve(&mut pool, cfg, Some(name))?.id),
                None => None,
            };

            let summaries =
                HabitLogic::list(&mut pool, user_id, *all, today, cfg.streak_policy)?;
            if summaries.is_empty() {
                info("No habits found.");
            } else {
                print_habits(summaries);
            }
        }

        HabitCommands::Show { id } => {
            let summary = HabitLogic::show(&mut pool, *id, today, cfg.streak_policy)?;
            print_habit(&summary);
        }

        HabitCommands::Edit {
            id,
            title,
            description,
            frequency,
            target,
            color,
            icon,
        } => {
            let patch = HabitPatch {
                title: title.clone(),
                description: description.clone(),
                frequency: frequency.as_deref().map(parse_frequency).transpose()?,
                target_days: *target,
                color: color.clone(),
                icon: icon.clone(),
            };

            let habit = HabitLogic::update(&mut pool, *id, patch)?;
            success(format!("Habit {} updated: '{}'", habit.id, habit.title));
        }

        HabitCommands::Del { id, yes } => {
            let habit = HabitLogic::get(&mut pool, *id)?;

            if !*yes
                && !ask_confirmation(format!(
                    "Delete habit #{} '{}' and all its completions? This action is irreversible.",
                    habit.id, habit.title
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = HabitLogic::delete(&mut pool, *id)?;
            success(format!(
                "Habit {} deleted ({} completion(s) removed)",
                id, removed
            ));
        }

        HabitCommands::Toggle { id, active } => {
            let now_active = HabitLogic::toggle(&mut pool, *id, *active)?;
            success(format!(
                "Habit {} is now {}",
                id,
                if now_active { "active" } else { "archived" }
            ));
        }
    }

    Ok(())
}
