use crate::core::aggregator::{AggregateOptions, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::utils::date::DEFAULT_WORK_DAY_START_HOUR;
use crate::utils::path::resolve_under;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_work_day_start_hour")]
    pub work_day_start_hour: u32,
    #[serde(default = "default_order")]
    pub default_order: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_work_day_start_hour() -> u32 {
    DEFAULT_WORK_DAY_START_HOUR
}
fn default_order() -> String {
    "desc".to_string()
}
fn default_currency() -> String {
    "€".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            work_day_start_hour: default_work_day_start_hour(),
            default_order: default_order(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rvenue")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rvenue")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rvenue.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rvenue.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.database = resolve_under(&cfg.database, &Self::config_dir())
            .to_string_lossy()
            .to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.work_day_start_hour > 23 {
            return Err(AppError::Config(format!(
                "work_day_start_hour must be between 0 and 23 (got {})",
                self.work_day_start_hour
            )));
        }
        if !matches!(self.default_order.as_str(), "asc" | "desc") {
            return Err(AppError::Config(format!(
                "default_order must be 'asc' or 'desc' (got '{}')",
                self.default_order
            )));
        }
        Ok(())
    }

    /// Aggregation settings; an explicit `order` wins over `default_order`.
    pub fn aggregate_options(&self, order: Option<SortOrder>) -> AggregateOptions {
        AggregateOptions {
            order: order
                .or_else(|| SortOrder::from_label(&self.default_order))
                .unwrap_or_default(),
            work_day_start_hour: self.work_day_start_hour,
        }
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => resolve_under(&name, &dir),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Test runs never touch the user's config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
