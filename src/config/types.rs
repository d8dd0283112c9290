// ABOUTME: Typed values parsed from NUTRIMIND_LOG_LEVEL and ENVIRONMENT
// ABOUTME: LogLevel also renders the tracing filter directive applied to this crate's targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::service_names;

/// Verbosity of `nutrimind` log targets; dependencies stay at `warn`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failed generation calls and store errors only
    Error,
    /// Also fallbacks such as ignored config values and superseded recipes
    Warn,
    /// Startup summary and one event per kitchen command
    #[default]
    Info,
    /// Request sizes, finish reasons and snapshot versions
    Debug,
    /// Everything, including span enter/exit noise
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// `EnvFilter` directives: dependencies at `warn`, this crate at `self`
    #[must_use]
    pub fn filter_directives(self) -> String {
        format!("warn,{}={}", service_names::LOG_TARGET, self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!(
                "unknown log level `{other}` (expected error, warn, info, debug or trace)"
            )),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Where the CLI is running; production switches logs to JSON with locations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local use (default)
    #[default]
    Development,
    /// Deployed use with machine-read logs
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        })
    }
}
