//! Vision provider trait and request/response types.

use crate::error::PipelineError;
use async_trait::async_trait;
use base64::Engine;

/// Instruction sent with every image.
pub const FILENAME_PROMPT: &str = "Analyze this image and provide a unique and concise filename (1-3 words). \
     Use lowercase and underscores. Output ONLY the filename, nothing else.";

/// Base64-encoded image ready to send to a vision API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a file extension.
    pub fn from_bytes(bytes: &[u8], extension: &str) -> Self {
        let media_type = match extension.to_lowercase().as_str() {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            other => {
                tracing::debug!("Unknown image extension '{other}', declaring image/png");
                "image/png"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }
}

/// A request for a filename suggestion.
#[derive(Debug, Clone)]
pub struct NameRequest {
    /// The image to name
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
}

impl NameRequest {
    /// Build the standard 1-3 word filename request for an image.
    pub fn filename_suggestion(image: ImageInput) -> Self {
        Self {
            image,
            prompt: FILENAME_PROMPT.to_string(),
        }
    }
}

/// The response from a successful provider call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Suggested name, trimmed
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all vision providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionProvider>` for dynamic dispatch and test mocks).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging (e.g., "gemini").
    fn name(&self) -> &str;

    /// Whether a credential is present. No network traffic.
    fn is_configured(&self) -> bool;

    /// Perform one attempt at generating a suggestion.
    async fn generate(&self, request: &NameRequest) -> Result<LlmResponse, PipelineError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
