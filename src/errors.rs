// ABOUTME: Unified error handling with standard error codes and the generation failure taxonomy
// ABOUTME: Defines AppError for the crate surface and GenerationError for structured LLM calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Two layers of errors live here:
//!
//! - [`GenerationError`] is returned by the LLM providers and the structured
//!   generation client. It separates "the service could not be reached" from
//!   "the service answered with something we cannot use".
//! - [`AppError`] is the crate-wide error carried to callers such as the CLI,
//!   tagged with an [`ErrorCode`] so failures can be reported consistently.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input supplied by the caller was rejected
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Resource Management (4000-4999)
    /// The requested item does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// The generation service answered with unusable content
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// The generation service could not be reached or refused the call
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// The generation service rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// The generation service quota was exhausted
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Generic configuration error
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local file could not be read or written
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service returned an unusable response",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Process exit code used by the CLI for this error class
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput | Self::ResourceNotFound => 2,
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => 3,
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed
            | Self::ExternalRateLimited => 4,
            Self::InternalError | Self::StorageError | Self::SerializationError => 1,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(format!("{error:#}"))
    }
}

// ============================================================================
// Generation Errors
// ============================================================================

/// Failure of a structured generation call
///
/// Both network-level and content-level failures mean "no result was
/// produced"; callers keep their prior state and may retry immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The external call itself failed (transport, timeout, auth, quota, non-2xx)
    #[error("generation service unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause
        reason: String,
        /// HTTP status returned by the service, when one was received
        status: Option<u16>,
    },

    /// The call succeeded but the text does not satisfy the declared schema
    #[error("malformed model response: {reason}")]
    MalformedResponse {
        /// What failed to parse or validate
        reason: String,
    },

    /// The caller supplied input that cannot be sent to the model
    #[error("invalid generation input: {0}")]
    InvalidInput(String),
}

impl GenerationError {
    /// Transport-level failure with no HTTP status
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            status: None,
        }
    }

    /// Non-success HTTP status from the service
    #[must_use]
    pub fn unavailable_with_status(status: u16, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            status: Some(status),
        }
    }

    /// Response text could not be parsed or validated
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether this failure came from the transport/service rather than the content
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Whether this failure came from unusable response content
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        let code = match &error {
            GenerationError::Unavailable {
                status: Some(429), ..
            } => ErrorCode::ExternalRateLimited,
            GenerationError::Unavailable {
                status: Some(401 | 403),
                ..
            } => ErrorCode::ExternalAuthFailed,
            GenerationError::Unavailable { .. } => ErrorCode::ExternalServiceUnavailable,
            GenerationError::MalformedResponse { .. } => ErrorCode::ExternalServiceError,
            GenerationError::InvalidInput(_) => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
