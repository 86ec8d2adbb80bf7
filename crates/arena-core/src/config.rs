//! Configuration loading and typed config structures for the arena bot.
//!
//! The canonical configuration lives in `arena-config.yaml` at the project
//! root. Every section and field is optional; anything left out takes the
//! default of the standard strategy.

use std::path::Path;

use arena_agents::{ProductionConfig, RoleConfig};
use arena_types::Role;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ARENA_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level bot configuration.
///
/// Mirrors the structure of `arena-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Role quotas and fallback.
    #[serde(default)]
    pub roles: RoleConfig,

    /// Production scheduler tunables.
    #[serde(default)]
    pub production: ProductionConfig,

    /// Combat telemetry reporting.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BotConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// [`LOG_LEVEL_ENV`] overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check the values the decision core cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the gatherer quota is zero
    /// (combat production would never unlock) or the summary interval is
    /// zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roles.quotas.quota(Role::Gatherer) == 0 {
            return Err(ConfigError::Invalid {
                reason: "roles.quotas.gatherer must be at least 1".to_owned(),
            });
        }
        if self.telemetry.summary_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                reason: "telemetry.summary_interval_ticks must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Combat telemetry reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log combat totals every N ticks (default: 100).
    #[serde(default = "default_summary_interval_ticks")]
    pub summary_interval_ticks: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            summary_interval_ticks: default_summary_interval_ticks(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Apply [`LOG_LEVEL_ENV`] if it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LOG_LEVEL_ENV)
            && !val.trim().is_empty()
        {
            self.level = val;
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

const fn default_summary_interval_ticks() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}
