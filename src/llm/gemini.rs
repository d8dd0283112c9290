// ABOUTME: Google Gemini provider performing schema-constrained JSON generation
// ABOUTME: Posts generateContent requests with a response schema and maps API failures to GenerationError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. Model, base URL and timeout come from
//! [`LlmConfig`](crate::config::LlmConfig).
//!
//! The key travels in the `x-goog-api-key` header, never in the URL, so
//! transport errors that print the URL cannot leak it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutrimind::config::NutrimindConfig;
//! use nutrimind::errors::AppError;
//! use nutrimind::llm::{GeminiProvider, GenerationRequest, LlmProvider};
//! use nutrimind::llm::schema::ResponseSchema;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = NutrimindConfig::from_env();
//!     let provider = GeminiProvider::from_config(&config.llm)?;
//!     let schema = ResponseSchema::object().required("answer", ResponseSchema::string());
//!     let response = provider
//!         .generate(&GenerationRequest::new("Name one leafy green", schema))
//!         .await?;
//!     println!("{}", response.text.unwrap_or_default());
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::schema::ResponseSchema;
use super::{GenerationRequest, GenerationResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::{limits, llm};
use crate::errors::{AppError, AppResult, GenerationError};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig<'a>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![ContentPart {
                text: Some(text.to_owned()),
            }],
        }
    }
}

/// Part of content; non-text parts deserialize with `text: None`
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a ResponseSchema,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// Set when the prompt itself was blocked and no candidates were produced
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Envelope used by error bodies on non-success statuses
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: Option<GeminiError>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
    timeout_secs: Option<u64>,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key and default settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: llm::DEFAULT_BASE_URL.to_owned(),
            default_model: llm::DEFAULT_MODEL.to_owned(),
            timeout_secs: None,
        }
    }

    /// Create a provider from loaded configuration, applying its timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        let api_key = config.require_api_key()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")).with_source(e))?;

        Ok(Self {
            api_key: api_key.to_owned(),
            client,
            base_url: config.base_url.clone(),
            default_model: config.model.clone(),
            timeout_secs: Some(config.timeout.as_secs()),
        })
    }

    /// Point the provider at a different endpoint (trailing slash ignored)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Build a Gemini API request from a `GenerationRequest`
    fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiContent::text(Some("user"), &request.prompt)],
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|instruction| GeminiContent::text(None, instruction)),
            generation_config: GenerationConfig {
                response_mime_type: llm::JSON_MIME_TYPE,
                response_schema: &request.schema,
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                candidate_count: 1,
            },
        }
    }

    /// Concatenate the text parts of the first candidate
    ///
    /// Returns `None` when there is no candidate or it carries no text. A
    /// textless candidate that did not finish with `STOP` is rejected by
    /// `generate` before the text reaches a caller.
    fn extract_text(response: &GeminiResponse) -> Option<String> {
        let content = response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())?;

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map a transport error to `Unavailable`
    fn map_transport_error(&self, error: &reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            let after = self
                .timeout_secs
                .map_or_else(String::new, |secs| format!(" after {secs}s"));
            GenerationError::unavailable(format!("request timed out{after}"))
        } else if error.is_connect() {
            GenerationError::unavailable(format!("could not connect to generation service: {error}"))
        } else {
            GenerationError::unavailable(format!("HTTP request failed: {error}"))
        }
    }

    /// Map API error status to an `Unavailable` error carrying the status
    ///
    /// For rate limit (429) errors the reason is a user-facing quota message
    /// with the retry delay Gemini reports, when present.
    fn map_api_error(status: u16, response_text: &str) -> GenerationError {
        let message = serde_json::from_str::<GeminiErrorBody>(response_text)
            .ok()
            .and_then(|body| body.error)
            .map_or_else(|| preview(response_text), |e| e.message);

        match status {
            429 => GenerationError::unavailable_with_status(status, Self::extract_quota_message(&message)),
            _ => GenerationError::unavailable_with_status(
                status,
                format!("Gemini API error ({status}): {message}"),
            ),
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "Please retry in 6.406453963s."
        const RETRY_MARKER: &str = "Please retry in ";

        let seconds = message
            .find(RETRY_MARKER)
            .map(|pos| &message[pos + RETRY_MARKER.len()..])
            .and_then(|rest| rest.split_once('s'))
            .and_then(|(value, _)| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        seconds.map_or_else(
            || "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
            |seconds| {
                let seconds_int = seconds.ceil() as u64;
                format!("AI service quota exceeded. Please try again in {seconds_int} seconds.")
            },
        )
    }
}

/// First characters of a body, for error messages
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= limits::RESPONSE_PREVIEW_CHARS {
        trimmed.to_owned()
    } else {
        let head: String = trimmed.chars().take(limits::RESPONSE_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!(prompt_chars = request.prompt.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(llm::API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                self.map_transport_error(&e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            GenerationError::unavailable(format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, response = %preview(&response_text), "Failed to parse response");
                GenerationError::malformed(format!("Failed to parse Gemini response envelope: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(GenerationError::unavailable(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        let has_candidates = gemini_response
            .candidates
            .as_ref()
            .is_some_and(|candidates| !candidates.is_empty());
        if !has_candidates {
            if let Some(reason) = gemini_response
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
            {
                warn!(block_reason = reason, "Gemini blocked the prompt");
                return Err(GenerationError::unavailable(format!(
                    "prompt blocked by Gemini: {reason}"
                )));
            }
        }

        let text = Self::extract_text(&gemini_response);
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        if text.is_none() {
            if let Some(reason) = finish_reason
                .as_deref()
                .filter(|reason| *reason != llm::FINISH_REASON_STOP)
            {
                warn!(finish_reason = reason, "Gemini candidate finished without text");
                return Err(GenerationError::unavailable(format!(
                    "Gemini returned no content (finish reason: {reason})"
                )));
            }
        }

        debug!(
            has_text = text.is_some(),
            finish_reason = finish_reason.as_deref().unwrap_or("none"),
            "Received Gemini response"
        );

        Ok(GenerationResponse {
            text,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, GenerationError> {
        // Listing models verifies both reachability and the API key
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(llm::API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
