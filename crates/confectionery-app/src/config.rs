//! Application configuration loading from file and environment variables.

use confectionery_db::{DbRuntimeSettings, JournalMode};
use serde::Deserialize;
use thiserror::Error;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite data file.
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// `"delete"` (default) or `"wal"`.
    #[serde(default)]
    pub journal_mode: JournalMode,
}

impl DatabaseConfig {
    /// Connection settings for the pool.
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
            connection_timeout_ms: self.connection_timeout_ms,
            journal_mode: self.journal_mode,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "confectionery_store=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_db_path() -> String {
    "confectionery.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    DbRuntimeSettings::default().pool_max_size
}

fn default_connection_timeout_ms() -> u64 {
    DbRuntimeSettings::default().connection_timeout_ms
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
            connection_timeout_ms: default_connection_timeout_ms(),
            journal_mode: JournalMode::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where the loaded settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The TOML file was read.
    File,
    /// No file was given or it does not exist.
    Defaults,
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `CONFECTIONERY_DB_PATH` overrides `database.path`
/// - `CONFECTIONERY_LOG_LEVEL` overrides `logging.level`
/// - `CONFECTIONERY_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<(Config, ConfigSource), ConfigError> {
    let (config, source) = read_config(path)?;
    Ok((
        apply_env_overrides(config, |key| std::env::var(key).ok()),
        source,
    ))
}

/// Reads the TOML file at `path`. A missing file yields defaults.
///
/// Runs before tracing is installed, so it does not log. Callers report
/// the returned [`ConfigSource`].
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn read_config(path: Option<&str>) -> Result<(Config, ConfigSource), ConfigError> {
    match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => Ok((toml::from_str(&contents)?, ConfigSource::File)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Config::default(), ConfigSource::Defaults))
            }
            Err(e) => Err(ConfigError::FileRead(e)),
        },
        None => Ok((Config::default(), ConfigSource::Defaults)),
    }
}

/// Applies environment overrides, reading variables through `lookup`.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(db_path) = lookup("CONFECTIONERY_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(level) = lookup("CONFECTIONERY_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("CONFECTIONERY_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    config
}
