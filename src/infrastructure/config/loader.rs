use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_rounds: {0}. Must be between 1 and 50")]
    InvalidMaxRounds(u32),

    #[error("Invalid max_selected: {0}. Must be at least 1")]
    InvalidMaxSelected(usize),

    #[error("Invalid num_results: {0}. Must be between 1 and 10")]
    InvalidNumResults(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Handoff slot path cannot be empty")]
    EmptySlotPath,

    #[error("Invalid {role} temperature: {value}. Must be between 0.0 and 2.0")]
    InvalidTemperature { role: &'static str, value: f32 },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .serpsmith/config.yaml (project config)
    /// 3. .serpsmith/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SERPSMITH_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".serpsmith/config.yaml"))
            .merge(Yaml::file(".serpsmith/local.yaml"))
            .merge(Env::prefixed("SERPSMITH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SERPSMITH_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.optimization.max_rounds == 0 || config.optimization.max_rounds > 50 {
            return Err(ConfigError::InvalidMaxRounds(config.optimization.max_rounds));
        }

        if config.optimization.max_selected == 0 {
            return Err(ConfigError::InvalidMaxSelected(
                config.optimization.max_selected,
            ));
        }

        if config.search.num_results == 0 || config.search.num_results > 10 {
            return Err(ConfigError::InvalidNumResults(config.search.num_results));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.handoff.slot_path.is_empty() {
            return Err(ConfigError::EmptySlotPath);
        }

        for (role, value) in [
            ("selector", config.oracle.selector_temperature),
            ("optimizer", config.oracle.optimizer_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::InvalidTemperature { role, value });
            }
        }

        if config.optimization.target_marker.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "target_marker cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
