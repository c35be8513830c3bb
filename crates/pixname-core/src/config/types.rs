//! Sub-configuration structs with their defaults.

/// Vision API settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model identifier placed in the request URL
    pub model: String,

    /// Base URL of the generative language API
    pub endpoint: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: "${GEMINI_API_KEY}".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Retry settings for the vision API call.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per image, including the first
    pub attempts: u32,

    /// Base backoff delay in milliseconds (doubles per attempt)
    pub delay_ms: u64,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_ms: 1000,
            timeout_ms: 45_000,
        }
    }
}

/// Filename and discovery settings.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// Maximum length of the sanitized suggestion
    pub max_length: usize,

    /// Extensions considered images (compared case-insensitively)
    pub supported_formats: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_length: crate::sanitize::DEFAULT_MAX_LENGTH,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
                "bmp".to_string(),
            ],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}
