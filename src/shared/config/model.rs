use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::engine::dispatcher::default_workers;
use crate::engine::processor::UnknownVersionPolicy;
use crate::engine::version::VersionAdapter;

pub const CONFIG_ENV: &str = "STRUCTURE_CLEANER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "structure_cleaner.toml";
pub const ENV_PREFIX: &str = "STRUCTURE_CLEANER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub cleaner: CleanerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub stdout_level: String,
    pub file_level: String,
    /// Rolling log files are only written when this is set.
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanerConfig {
    pub workers: Option<usize>,
    #[serde(default)]
    pub unknown_version_policy: UnknownVersionPolicy,
    pub max_data_version: Option<i32>,
}

impl CleanerConfig {
    pub fn workers(&self) -> usize {
        self.workers.filter(|n| *n > 0).unwrap_or_else(default_workers)
    }

    pub fn adapter(&self) -> VersionAdapter {
        match self.max_data_version {
            Some(max) => VersionAdapter::new().with_max_supported(i64::from(max)),
            None => VersionAdapter::new(),
        }
    }
}

/// Explicit path, then `STRUCTURE_CLEANER_CONFIG`, then the default file name.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
    }
}

/// Defaults, then the optional TOML file, then `STRUCTURE_CLEANER__*`
/// environment variables (`__` separates nested keys).
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, config::ConfigError> {
    let path = config_path(explicit);
    // A file named on the command line must exist; the fallbacks may not.
    let required = explicit.is_some();

    let settings: Settings = config::Config::builder()
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("cleaner.unknown_version_policy", "fail")?
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
