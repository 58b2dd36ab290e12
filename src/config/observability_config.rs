//! Observability configuration parsing from environment variables.
//!
//! This module handles log formatting and the run summary line.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Log output format for the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid LOG_FORMAT: {}. Must be 'pretty' or 'json'", s),
        }
    }
}

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
    pub log_format: LogFormat,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let enabled = match env::var("OBSERVABILITY_ENABLED") {
            Ok(s) => s
                .parse::<bool>()
                .context("Failed to parse OBSERVABILITY_ENABLED")?,
            Err(_) => defaults.enabled,
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(s) => LogFormat::from_str(&s)?,
            Err(_) => defaults.log_format,
        };

        Ok(Self {
            enabled,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_observability_config_defaults() {
        let config = ObservabilityEnvConfig::default();
        assert!(config.enabled);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
