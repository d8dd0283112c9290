// ABOUTME: System-wide constants for NutriMind: service identity, environment variable names, LLM defaults
// ABOUTME: Grouped into small modules so call sites read as constants::llm::DEFAULT_MODEL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults and the names of the environment variables that
//! override them.

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported in startup logs
    pub const NUTRIMIND: &str = "nutrimind";
    /// Crate log target used when building the default filter
    pub const LOG_TARGET: &str = "nutrimind";
}

/// Environment variable names
pub mod env_vars {
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Model identifier override
    pub const LLM_MODEL: &str = "NUTRIMIND_LLM_MODEL";
    /// API base URL override
    pub const LLM_BASE_URL: &str = "NUTRIMIND_LLM_BASE_URL";
    /// Request timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "NUTRIMIND_LLM_TIMEOUT_SECS";
    /// Sampling temperature
    pub const LLM_TEMPERATURE: &str = "NUTRIMIND_LLM_TEMPERATURE";
    /// Log level for the crate
    pub const LOG_LEVEL: &str = "NUTRIMIND_LOG_LEVEL";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Defaults for the structured generation service
pub mod llm {
    /// Default Gemini model
    pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

    /// Base URL for the Gemini API
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// MIME type requested for structured output
    pub const JSON_MIME_TYPE: &str = "application/json";

    /// Header carrying the API key
    pub const API_KEY_HEADER: &str = "x-goog-api-key";

    /// Finish reason of a candidate that completed normally
    pub const FINISH_REASON_STOP: &str = "STOP";
}

/// Limits applied to inputs and log output
pub mod limits {
    /// Longest meal description forwarded to the model
    pub const MAX_MEAL_DESCRIPTION_CHARS: usize = 2_000;

    /// Characters of raw model output included in error messages and logs
    pub const RESPONSE_PREVIEW_CHARS: usize = 200;
}
