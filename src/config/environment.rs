// ABOUTME: Environment configuration loading for the generation service and logging
// ABOUTME: Reads NUTRIMIND_* and GEMINI_API_KEY variables with typed defaults and warnings on bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use super::types::{Environment, LogLevel};
use crate::constants::{env_vars, llm};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Settings for the structured generation service
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    /// API key; only required by commands that call the service
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// API base URL (no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: llm::DEFAULT_MODEL.to_owned(),
            base_url: llm::DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(llm::DEFAULT_TIMEOUT_SECS),
            temperature: None,
        }
    }
}

impl LlmConfig {
    /// Return the API key or a `ConfigMissing` error naming the variable
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was configured.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{} environment variable not set", env_vars::GEMINI_API_KEY),
            )
        })
    }

    /// Build from an arbitrary variable lookup
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_key = lookup(env_vars::GEMINI_API_KEY).filter(|key| !key.trim().is_empty());
        let model = lookup(env_vars::LLM_MODEL)
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(defaults.model);
        let base_url = lookup(env_vars::LLM_BASE_URL)
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = lookup(env_vars::LLM_TIMEOUT_SECS).map_or(defaults.timeout, |raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        variable = env_vars::LLM_TIMEOUT_SECS,
                        value = %raw,
                        "Invalid timeout, using default of {}s",
                        llm::DEFAULT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            }
        });

        let temperature = lookup(env_vars::LLM_TEMPERATURE).and_then(|raw| {
            match raw.trim().parse::<f32>() {
                Ok(value) if (0.0..=2.0).contains(&value) => Some(value),
                _ => {
                    warn!(
                        variable = env_vars::LLM_TEMPERATURE,
                        value = %raw,
                        "Temperature must be between 0.0 and 2.0, ignoring"
                    );
                    None
                }
            }
        });

        Self {
            api_key,
            model,
            base_url,
            timeout,
            temperature,
        }
    }
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NutrimindConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level for the crate's own targets
    pub log_level: LogLevel,
    /// Structured generation service settings
    pub llm: LlmConfig,
}

impl NutrimindConfig {
    /// Load configuration from process environment variables
    ///
    /// Never fails: unset variables take defaults and invalid values are
    /// logged and replaced by defaults. A missing API key surfaces later via
    /// [`LlmConfig::require_api_key`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a custom lookup (used by tests and embedders)
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment: Environment = parse_or_default(&lookup, env_vars::ENVIRONMENT);
        let log_level: LogLevel = parse_or_default(&lookup, env_vars::LOG_LEVEL);

        Self {
            environment,
            log_level,
            llm: LlmConfig::from_lookup(&lookup),
        }
    }
}

/// Parse a variable, warning and taking the default when it does not parse
fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, variable: &str) -> T
where
    T: FromStr<Err = String> + Default + Display,
{
    lookup(variable).map_or_else(T::default, |raw| {
        raw.parse().unwrap_or_else(|reason: String| {
            let fallback = T::default();
            warn!(variable, %reason, "Invalid value, using default of {fallback}");
            fallback
        })
    })
}
