#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{MarsApiError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use toml_config::TomlConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    Err(MarsApiError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: level.to_string(),
        reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
    })
}

/// Effective settings after merging the config file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub log_level: Option<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_seconds: None,
            log_level: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl From<TomlConfig> for OverviewConfig {
    fn from(file: TomlConfig) -> Self {
        Self {
            base_url: file.source.base_url,
            timeout_seconds: file.source.timeout_seconds,
            log_level: file.logging.level,
            json_logs: file.logging.json,
            verbose: false,
        }
    }
}

impl OverviewConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> String {
        match &self.log_level {
            Some(level) => format!("mars_realestate={}", level.to_ascii_lowercase()),
            None if self.verbose => "mars_realestate=debug,info".to_string(),
            None => "mars_realestate=info".to_string(),
        }
    }
}

impl ConfigProvider for OverviewConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for OverviewConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(level) = &self.log_level {
            validate_log_level("log_level", level)?;
        }
        Ok(())
    }
}
