use crate::core::streak::StreakPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::frequency::Frequency;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod migrate;

/// Environment variable that relocates the config directory (tests, portable installs).
pub const HOME_ENV: &str = "HABITLOG_HOME";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Username used when `--user` is omitted.
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default)]
    pub default_frequency: Frequency,
    #[serde(default)]
    pub streak_policy: StreakPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_user: None,
            default_frequency: Frequency::Daily,
            streak_policy: StreakPolicy::Watermark,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("habitlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".habitlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("habitlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("habitlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the database path of `init`: user provided name (relative to
    /// the config dir) or the default file.
    fn resolve_db_path(dir: &Path, custom_name: Option<&str>) -> PathBuf {
        match custom_name {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("habitlog.sqlite"),
        }
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the config file is left alone. Returns the database path.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = Self::resolve_db_path(&dir, custom_name);

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
