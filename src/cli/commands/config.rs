use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (run `habitlog init`)",
                    path.display()
                ));
            } else {
                let missing = migrate::missing_fields(&path)?;
                if missing.is_empty() {
                    success("Configuration file is up to date.");
                } else {
                    warning(format!("Missing fields: {}", missing.join(", ")));
                    let added = migrate::fill_missing_fields(&path)?;
                    success(format!("Added missing fields: {}", added.join(", ")));
                }
            }
        }

        if *edit_config {
            let fallback = default_editor();
            let editor_to_use = editor.clone().unwrap_or_else(|| fallback.clone());

            if run_editor(&editor_to_use, &path) {
                success(format!(
                    "Configuration file edited successfully using '{editor_to_use}'"
                ));
            } else {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{fallback}'"
                ));
                if run_editor(&fallback, &path) {
                    success(format!(
                        "Configuration file edited successfully using fallback '{fallback}'"
                    ));
                } else {
                    error(format!(
                        "Failed to edit configuration file using fallback '{fallback}'"
                    ));
                }
            }
        }

        if !*print_config && !*check && !*edit_config {
            info("Nothing to do: use --print, --check or --edit.");
        }
    }

    Ok(())
}
