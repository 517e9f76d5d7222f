//! GeminiCompletionClient - Direct REST API implementation for Gemini.
//!
//! Posts a single text prompt to `generateContent` and returns the first
//! candidate's text.

use async_trait::async_trait;
use chief_core::config::{AssistantConfig, GeminiConfig};
use chief_core::error::{ChiefError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionProvider;

/// Message used for every HTTP 429 answer.
pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait a moment before trying again.";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Completion provider that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiCompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiCompletionClient {
    /// Creates a client posting to `endpoint` (a full `generateContent` URL).
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds a client from the loaded configuration.
    ///
    /// A `model_name` in `secret.json` takes precedence over the configured
    /// model unless an explicit endpoint is set.
    pub fn from_config(assistant: &AssistantConfig, gemini: &GeminiConfig) -> Self {
        let mut assistant = assistant.clone();
        if let Some(model) = &gemini.model_name {
            assistant.model = model.clone();
        }
        Self::new(gemini.api_key.clone(), assistant.endpoint_url())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<Option<String>> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            ChiefError::upstream(
                None,
                format!("Failed to parse Gemini response: {}", err.without_url()),
            )
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl CompletionProvider for GeminiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        tracing::info!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            "Dispatching completion request"
        );
        let request = GenerateContentRequest::for_prompt(prompt);
        let result = self.send_request(&request).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Completion request failed");
        }
        result
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Serialize, Debug)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Text of the first part of the first candidate, if any.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

fn map_http_error(status: StatusCode, body: &str) -> ChiefError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ChiefError::RateLimited(RATE_LIMIT_MESSAGE.to_string());
    }

    let reason = status.canonical_reason().unwrap_or_default();
    let mut message = format!("API error: {} {reason}", status.as_u16())
        .trim_end()
        .to_string();

    let detail = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let msg = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => format!("{status_text}: {msg}"),
                _ => msg,
            })
        });
    if let Some(detail) = detail {
        message.push_str(" - ");
        message.push_str(&detail);
    }

    ChiefError::upstream(Some(status.as_u16()), message)
}

/// The request URL carries the API key, so it is stripped before formatting.
fn map_transport_error(err: reqwest::Error) -> ChiefError {
    ChiefError::upstream(
        err.status().map(|status| status.as_u16()),
        format!("Gemini API request failed: {}", err.without_url()),
    )
}
