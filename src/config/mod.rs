use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::attendance::DEFAULT_STORAGE_PREFIX;
use crate::core::fetcher::DEFAULT_ENDPOINT;
use crate::errors::{AppError, AppResult};
use crate::models::SortOption;
use crate::utils::path::resolve_in;

pub mod migrate;

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "OPSBOARD_HOME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_ops_cache")]
    pub ops_cache: String,
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
    #[serde(default)]
    pub default_sort: SortOption,
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_database() -> String {
    Config::config_dir()
        .join("opsboard.sqlite")
        .to_string_lossy()
        .to_string()
}
fn default_ops_cache() -> String {
    Config::config_dir()
        .join("ops.json")
        .to_string_lossy()
        .to_string()
}
fn default_storage_prefix() -> String {
    DEFAULT_STORAGE_PREFIX.to_string()
}
fn default_refresh_seconds() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            database: default_database(),
            ops_cache: default_ops_cache(),
            storage_prefix: default_storage_prefix(),
            default_sort: SortOption::default(),
            refresh_seconds: default_refresh_seconds(),
        }
    }
}

impl Config {
    /// Return the configuration directory: `$OPSBOARD_HOME` when set,
    /// otherwise the platform default.
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(HOME_ENV)
            && !custom.trim().is_empty()
        {
            return PathBuf::from(custom);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("opsboard")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".opsboard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("opsboard.conf")
    }

    pub fn database_path(&self) -> PathBuf {
        resolve_in(&Self::config_dir(), &self.database)
    }

    pub fn ops_cache_path(&self) -> PathBuf {
        resolve_in(&Self::config_dir(), &self.ops_cache)
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Create the configuration directory and file (keeping an existing
    /// file) and return the resulting configuration.
    pub fn init_all(custom_db: Option<&str>) -> AppResult<Self> {
        fs::create_dir_all(Self::config_dir())?;

        let mut config = Self::load()?;
        if let Some(db) = custom_db {
            config.database = db.to_string();
        }
        config.save()?;
        Ok(config)
    }
}
