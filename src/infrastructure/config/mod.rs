//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation
//! - Type-safe config structs

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::EngineConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid mode thresholds: exploratory ({0}) must be below specific ({1})")]
    InvalidModeThresholds(f64, f64),

    #[error("Invalid decay factor: {0}. Must be in (0, 1)")]
    InvalidDecayFactor(f64),

    #[error("Invalid max_per_category: must be at least 1")]
    InvalidCategoryCap,

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .atelier/config.yaml (project config)
    /// 3. .atelier/local.yaml (project local overrides, optional)
    /// 4. Environment variables (ATELIER_* prefix, highest priority)
    pub fn load() -> Result<EngineConfig> {
        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::file(".atelier/config.yaml"))
            .merge(Yaml::file(".atelier/local.yaml"))
            .merge(Env::prefixed("ATELIER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<EngineConfig> {
        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.specificity.exploratory_threshold >= config.specificity.specific_threshold {
            return Err(ConfigError::InvalidModeThresholds(
                config.specificity.exploratory_threshold,
                config.specificity.specific_threshold,
            ));
        }

        if !(config.bandit.decay_factor > 0.0 && config.bandit.decay_factor < 1.0) {
            return Err(ConfigError::InvalidDecayFactor(config.bandit.decay_factor));
        }
        if config.bandit.max_per_category == 0 {
            return Err(ConfigError::InvalidCategoryCap);
        }

        if config.feedback.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.feedback.max_retries));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        ConfigLoader::validate(&config).expect("default config should be valid");
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.specificity.exploratory_threshold = 0.8;
        config.specificity.specific_threshold = 0.2;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidModeThresholds(_, _))
        ));
    }

    #[test]
    fn test_bad_decay_factor_rejected() {
        let mut config = EngineConfig::default();
        config.bandit.decay_factor = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDecayFactor(_))
        ));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = EngineConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
