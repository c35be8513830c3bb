//! Configuration management for pixname.
//!
//! There is no config file. Values start from defaults and are overridden
//! by environment variables (a `.env` file is loaded by the binary first).
//!
//! | Variable             | Field            |
//! |----------------------|------------------|
//! | `PIXNAME_MODEL`      | `llm.model`      |
//! | `PIXNAME_ENDPOINT`   | `llm.endpoint`   |
//! | `PIXNAME_LOG_LEVEL`  | `logging.level`  |
//! | `PIXNAME_LOG_FORMAT` | `logging.format` |
//!
//! The credential itself is referenced as `${GEMINI_API_KEY}` and resolved
//! lazily by [`Config::api_key`].

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::llm::resolve_env_var;

/// Root configuration structure for pixname.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Vision API settings
    pub llm: LlmConfig,

    /// Retry and timeout settings
    pub retry: RetryConfig,

    /// Filename and discovery settings
    pub naming: NamingConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(model) = non_empty("PIXNAME_MODEL") {
            config.llm.model = model.trim().to_string();
        }
        if let Some(endpoint) = non_empty("PIXNAME_ENDPOINT") {
            config.llm.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        if let Some(level) = non_empty("PIXNAME_LOG_LEVEL") {
            config.logging.level = level.trim().to_lowercase();
        }
        if let Some(format) = non_empty("PIXNAME_LOG_FORMAT") {
            config.logging.format = format.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the API key, returning `None` if it is not configured.
    pub fn api_key(&self) -> Option<String> {
        resolve_env_var(&self.llm.api_key).filter(|key| !key.trim().is_empty())
    }

    /// Fail fast when no credential is available.
    pub fn require_api_key(&self) -> Result<String, ConfigError> {
        self.api_key().ok_or(ConfigError::MissingApiKey)
    }
}
