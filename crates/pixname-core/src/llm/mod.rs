//! Vision API integration for filename suggestions.
//!
//! Provides a provider abstraction, the Gemini backend, and a retrying
//! suggester that turns one image into one short name or one error message.

pub(crate) mod gemini;
pub(crate) mod provider;
pub(crate) mod retry;
pub(crate) mod suggester;

pub use gemini::GeminiProvider;
pub use provider::{
    resolve_env_var, ImageInput, LlmResponse, NameRequest, VisionProvider, FILENAME_PROMPT,
};
pub use retry::{backoff_duration, RetryOptions};
pub use suggester::{SuggestResult, Suggester, Suggestion};
