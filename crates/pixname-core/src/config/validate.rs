//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".into(),
            ));
        }
        if self.retry.attempts == 0 {
            return Err(ConfigError::ValidationError(
                "retry.attempts must be > 0".into(),
            ));
        }
        if self.retry.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "retry.timeout_ms must be > 0".into(),
            ));
        }
        if self.naming.max_length == 0 {
            return Err(ConfigError::ValidationError(
                "naming.max_length must be > 0".into(),
            ));
        }
        if self.naming.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "naming.supported_formats must not be empty".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }
}
