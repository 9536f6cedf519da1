//! Environment-driven logger configuration
//!
//! Production deployments log at `Warn` and everything else at `Debug`,
//! unless a level is set explicitly. The configuration can be read from
//! process environment variables or deserialized from JSON.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::Logger,
};
use crate::handlers::ConsoleHandler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variable holding an explicit level, e.g. `PLATFORM_LOG_LEVEL=warn`
pub const LEVEL_VAR: &str = "PLATFORM_LOG_LEVEL";

/// Variable naming the deployment environment, e.g. `APP_ENV=production`
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Deployment environment the logger runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Threshold used when no level is configured
    pub fn default_level(self) -> LogLevel {
        match self {
            Environment::Production => LogLevel::Warn,
            Environment::Development | Environment::Test => LogLevel::Debug,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl FromStr for Environment {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(LoggerError::config(
                "LoggerConfig",
                format!("unknown environment '{}'", other),
            )),
        }
    }
}

/// Logger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Explicit threshold; overrides the environment default
    pub level: Option<LogLevel>,
    pub environment: Environment,
    /// Register the console handler on build
    pub console: bool,
    /// Color the console level tags
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: None,
            environment: Environment::default(),
            console: true,
            colors: false,
        }
    }
}

impl LoggerConfig {
    /// Read [`LEVEL_VAR`] and [`ENVIRONMENT_VAR`] from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`
    ///
    /// Unset and blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(environment) = read(ENVIRONMENT_VAR) {
            config.environment = environment.parse()?;
        }
        if let Some(level) = read(LEVEL_VAR) {
            config.level = Some(level.parse()?);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn effective_level(&self) -> LogLevel {
        self.level.unwrap_or_else(|| self.environment.default_level())
    }

    /// Build a logger at the effective level
    pub fn build(&self) -> Logger {
        let logger = Logger::with_level(self.effective_level());
        if self.console {
            logger.add_handler(ConsoleHandler::with_colors(self.colors));
        }
        logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_environment_defaults() {
        assert_eq!(Environment::Production.default_level(), LogLevel::Warn);
        assert_eq!(Environment::Development.default_level(), LogLevel::Debug);
        assert_eq!(Environment::Test.default_level(), LogLevel::Debug);
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.effective_level(), LogLevel::Debug);
        assert!(config.console);
        assert!(!config.colors);
    }

    #[test]
    fn test_from_lookup_production() {
        let config = LoggerConfig::from_lookup(lookup(&[(ENVIRONMENT_VAR, "production")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.effective_level(), LogLevel::Warn);
    }

    #[test]
    fn test_explicit_level_wins() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENVIRONMENT_VAR, "prod"),
            (LEVEL_VAR, "error"),
        ]))
        .unwrap();
        assert_eq!(config.effective_level(), LogLevel::Error);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config =
            LoggerConfig::from_lookup(lookup(&[(ENVIRONMENT_VAR, " "), (LEVEL_VAR, "")])).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = LoggerConfig::from_lookup(lookup(&[(ENVIRONMENT_VAR, "qa")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerConfig::from_lookup(lookup(&[(LEVEL_VAR, "loud")])).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"environment":"production","colors":true}"#).unwrap();
        assert_eq!(config.level, None);
        assert_eq!(config.effective_level(), LogLevel::Warn);
        assert!(config.console);
        assert!(config.colors);
    }

    #[test]
    fn test_build() {
        let logger = LoggerConfig::default()
            .with_environment(Environment::Production)
            .build();
        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(logger.handler_count(), 1);

        let quiet = LoggerConfig {
            console: false,
            ..LoggerConfig::default()
        }
        .with_level(LogLevel::Fatal)
        .build();
        assert_eq!(quiet.level(), LogLevel::Fatal);
        assert_eq!(quiet.handler_count(), 0);
    }
}
