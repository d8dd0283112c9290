// ABOUTME: Logging configuration and structured logging setup for the library and CLI
// ABOUTME: Configures the tracing subscriber filter, output format and startup summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup built on `tracing-subscriber`

use std::env;
use std::io;

use anyhow::Result;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{Environment, LogLevel, NutrimindConfig};
use crate::constants::{env_vars, service_names};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl LogFormat {
    /// Parse from string with fallback to pretty
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for crate targets
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Deployment environment
    pub environment: Environment,
    /// Write to stderr instead of stdout (keeps CLI stdout machine-readable)
    pub use_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service_names::NUTRIMIND.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: Environment::Development,
            use_stderr: true,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from the loaded service config and environment
    #[must_use]
    pub fn from_config(config: &NutrimindConfig) -> Self {
        let is_production = config.environment.is_production();
        let format = env::var(env_vars::LOG_FORMAT).map_or(
            if is_production {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            },
            |raw| LogFormat::from_str_or_default(&raw),
        );

        Self {
            level: config.log_level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment: config.environment,
            ..Self::default()
        }
    }

    /// Build the filter: `RUST_LOG` wins when set, otherwise the configured level
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(self.level.filter_directives()),
            EnvFilter::new,
        );

        // Always apply noise reduction regardless of RUST_LOG setting
        base.add_directive(
            "hyper=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        )
        .add_directive(
            "reqwest=warn"
                .parse()
                .unwrap_or_else(|_| tracing::Level::WARN.into()),
        )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber was already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let use_stderr = self.use_stderr;
        let writer = move || -> Box<dyn io::Write> {
            if use_stderr {
                Box::new(io::stderr())
            } else {
                Box::new(io::stdout())
            }
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(writer)
                    .with_span_events(span_events)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(writer)
                    .with_span_events(span_events);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(writer)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment.to_string(),
            },
            "logging": {
                "level": self.level.to_string(),
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans,
            }
        });

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            "NutriMind starting up"
        );
        tracing::debug!("Configuration loaded: {config_summary}");
    }
}

/// Initialize logging from the loaded service configuration
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_config(config: &NutrimindConfig) -> Result<()> {
    LoggingConfig::from_config(config).init()
}
