use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the option functions. Options are kept in memory when
    /// unset.
    pub store_url: Option<String>,
    pub request_timeout_ms: u64,
    pub frame_interval_ms: u64,
    /// Fixed seed for spins and colors.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: None,
            request_timeout_ms: 5000,
            frame_interval_ms: 16,
            seed: None,
            log_level: "info".into(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to determine the config directory")]
    ConfigDirNotFound,
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(env!("CARGO_PKG_NAME"))
        .join("config.toml"))
}

/// Reads `config.toml` from the config directory (if present), then
/// `TERMWHEEL_*` environment variables.
pub fn load() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(config_path()?).required(false))
        .add_source(config::Environment::with_prefix("TERMWHEEL").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}
