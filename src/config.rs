//! Guest configuration.
//!
//! Modules receive a [`GuestConfig`] alongside their decoded input. Values
//! come from the process environment; there is no configuration file.

use crate::logging::{LogLevel, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mule-AI-WASM-Module";

/// Overrides the `User-Agent` header.
pub const ENV_USER_AGENT: &str = "GUEST_HTTP_USER_AGENT";

/// A log level or filter directive.
pub const ENV_LOG: &str = "GUEST_HTTP_LOG";

/// `1` or `true` disables logging.
pub const ENV_LOG_DISABLED: &str = "GUEST_HTTP_LOG_DISABLED";

/// Configuration shared by every guest module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestConfig {
    /// Value of the `User-Agent` header on outbound requests.
    pub user_agent: String,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GuestConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Disables logging.
    #[must_use]
    pub fn without_logging(mut self) -> Self {
        self.logging.enabled = false;
        self
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            let user_agent = user_agent.trim();
            if user_agent.is_empty() {
                return Err(ConfigError::invalid_value(
                    ENV_USER_AGENT,
                    "user agent cannot be empty",
                ));
            }
            config.user_agent = user_agent.to_string();
        }

        if let Some(value) = lookup(ENV_LOG) {
            config.logging = parse_log_setting(&value, config.logging)?;
        }

        if let Some(value) = lookup(ENV_LOG_DISABLED) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.logging.enabled = false,
                "" | "0" | "false" | "no" => {}
                other => {
                    return Err(ConfigError::invalid_value(
                        ENV_LOG_DISABLED,
                        format!("expected a boolean, got '{other}'"),
                    ))
                }
            }
        }

        Ok(config)
    }
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

fn parse_log_setting(value: &str, logging: LoggingConfig) -> Result<LoggingConfig, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(logging);
    }
    if let Ok(level) = value.parse::<LogLevel>() {
        return Ok(logging.with_level(level));
    }

    let logging = logging.with_directive(value);
    logging
        .filter()
        .map_err(|e| ConfigError::invalid_value(ENV_LOG, e.to_string()))?;
    Ok(logging)
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
}

/// Specific configuration error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A variable held a value that could not be used.
    InvalidValue {
        /// The variable name
        var: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::InvalidValue {
                var: var.into(),
                reason: reason.into(),
            },
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConfigErrorKind::InvalidValue { var, reason } => {
                write!(f, "invalid value for {var}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
