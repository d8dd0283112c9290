// ABOUTME: LLM provider abstraction for schema-constrained JSON generation
// ABOUTME: Defines the provider contract, capability flags and request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Service Provider Interface
//!
//! Every call NutriMind makes to a model is a single-shot structured
//! generation: one prompt, one declared [`ResponseSchema`], one JSON document
//! back. Providers implement [`LlmProvider`]; the
//! [`StructuredGenerationClient`](crate::generation::StructuredGenerationClient)
//! owns prompt construction and response validation on top of it.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features
//! - **`LlmProvider`**: Async trait performing one generation call
//! - **`GenerationRequest`**: Prompt, schema and sampling settings
//! - **`GenerationResponse`**: Raw candidate text plus usage metadata
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use nutrimind::llm::{GeminiProvider, GenerationRequest, LlmProvider};
//! use nutrimind::llm::schema::ResponseSchema;
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let schema = ResponseSchema::object().required("answer", ResponseSchema::string());
//!     let request = GenerationRequest::new("Reply with a JSON answer", schema);
//!     let response = provider.generate(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;
pub mod schema;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use schema::ResponseSchema;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    ///
    /// The generation client refuses to talk to a provider that cannot
    /// constrain its output to a schema.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider supports streaming responses
        const STREAMING = 0b0000_0001;
        /// Provider honors a declared response schema and JSON MIME type
        const STRUCTURED_OUTPUT = 0b0000_0010;
        /// Provider supports a separate system instruction
        const SYSTEM_MESSAGES = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Capabilities of a provider that only returns free text
    #[must_use]
    pub const fn text_only() -> Self {
        Self::STREAMING.union(Self::SYSTEM_MESSAGES)
    }

    /// Capabilities of a provider with schema-constrained, non-streaming output (like Gemini)
    #[must_use]
    pub const fn structured() -> Self {
        Self::STRUCTURED_OUTPUT.union(Self::SYSTEM_MESSAGES)
    }

    /// Check if structured output is supported
    #[must_use]
    pub const fn supports_structured_output(&self) -> bool {
        self.contains(Self::STRUCTURED_OUTPUT)
    }

    /// Check if streaming is supported
    #[must_use]
    pub const fn supports_streaming(&self) -> bool {
        self.contains(Self::STREAMING)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A single structured generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// User prompt text
    pub prompt: String,
    /// Optional system instruction
    pub system_instruction: Option<String>,
    /// Schema the response must follow
    pub schema: ResponseSchema,
    /// Model identifier; provider default when absent
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a request with a prompt and response schema
    #[must_use]
    pub fn new(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            schema,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Raw result of a generation call, before parsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Candidate text; `None` when the service returned no text at all
    pub text: Option<String>,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (STOP, MAX_TOKENS, etc.)
    pub finish_reason: Option<String>,
}

impl GenerationResponse {
    /// Response carrying only text, for providers without metadata
    #[must_use]
    pub fn text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            model: model.into(),
            usage: None,
            finish_reason: None,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for structured generation
///
/// Implementations perform exactly one outbound call per [`generate`](Self::generate)
/// and report every transport or service failure as
/// [`GenerationError::Unavailable`]. Content checking is left to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform one schema-constrained generation
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Check if the provider is reachable and the credentials are accepted
    async fn health_check(&self) -> Result<bool, GenerationError>;
}
