//! Gemini provider using the `generateContent` API.
//!
//! Sends the prompt and a base64 inline-data part in a single user turn and
//! reads the suggestion from `candidates[0].content.parts[0].text`.

use super::provider::{LlmResponse, NameRequest, VisionProvider};
use crate::config::Config;
use crate::error::{ConfigError, PipelineError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini provider. The API key travels as the `key` query parameter.
pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>, model: &str, endpoint: &str) -> Self {
        Self {
            api_key: api_key.map(String::from),
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from the resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key().as_deref(),
            &config.llm.model,
            &config.llm.endpoint,
        )
    }

    fn url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        )
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateRequest {
    fn from_request(request: &NameRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: request.prompt.clone(),
                    },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: request.image.media_type.clone(),
                            data: request.image.data.clone(),
                        },
                    },
                ],
            }],
        }
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the first candidate's first text part, trimmed.
fn parse_suggestion(body: &str) -> Result<(String, Option<String>), PipelineError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| PipelineError::Llm {
            message: format!("Failed to parse Gemini response: {e}"),
            status_code: None,
        })?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| PipelineError::Llm {
            message: "Gemini response has no candidates[0].content.parts[0].text".to_string(),
            status_code: None,
        })?;

    Ok((text.trim().to_string(), response.model_version))
}

/// Error message for a non-200 response: `error.message` if present.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("Status {}", status.as_u16()))
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &NameRequest) -> Result<LlmResponse, PipelineError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(PipelineError::Llm {
                message: ConfigError::MissingApiKey.to_string(),
                status_code: None,
            });
        };

        let start = Instant::now();
        let body = GenerateRequest::from_request(request);

        // without_url() keeps the key-bearing URL out of error messages
        let resp = self
            .client
            .post(self.url(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Llm {
                message: format!("Gemini request failed: {}", e.without_url()),
                status_code: None,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| PipelineError::Llm {
            message: format!("Failed to read Gemini response: {}", e.without_url()),
            status_code: Some(status.as_u16()),
        })?;

        if status != StatusCode::OK {
            tracing::debug!("Gemini HTTP {status}: {text}");
            return Err(PipelineError::Llm {
                message: error_message(status, &text),
                status_code: Some(status.as_u16()),
            });
        }

        let (suggestion, model_version) = parse_suggestion(&text)?;

        Ok(LlmResponse {
            text: suggestion,
            model: model_version.unwrap_or_else(|| self.model.clone()),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
