use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite database file.
    pub database: String,
    /// Path of the queued SMS logfile consumed by `import`.
    pub logfile: String,
    /// First day of the first pay period (YYYY-MM-DD).
    #[serde(default = "default_pay_period_start")]
    pub pay_period_start: String,
    /// Length of a pay period in days.
    #[serde(default = "default_pay_period_days")]
    pub pay_period_days: i64,
    /// Weekly hours above which time counts as overtime.
    #[serde(default = "default_overtime_threshold")]
    pub overtime_threshold: f64,
}

fn default_pay_period_start() -> String {
    "2025-05-19".to_string()
}
fn default_pay_period_days() -> i64 {
    14
}
fn default_overtime_threshold() -> f64 {
    40.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            logfile: Self::logfile_file().to_string_lossy().to_string(),
            pay_period_start: default_pay_period_start(),
            pay_period_days: default_pay_period_days(),
            overtime_threshold: default_overtime_threshold(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("biztrack")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".biztrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("biztrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("biztrack.sqlite")
    }

    /// Return the full path of the queued SMS logfile
    pub fn logfile_file() -> PathBuf {
        Self::config_dir().join("logfile.txt")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A corrupt file falls back to defaults with a warning rather than
    /// aborting the whole CLI.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_yaml::from_str(&content) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        warning(format!("Ignoring unreadable config file: {}", e));
                        Config::default()
                    }
                },
                Err(e) => {
                    warning(format!("Ignoring unreadable config file: {}", e));
                    Config::default()
                }
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database file paths.
    /// Creates the config directory and, unless running in test mode,
    /// writes the YAML config file.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        }

        Ok(config)
    }

    /// Serialized form for `config --print`.
    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigLoad)
    }
}
