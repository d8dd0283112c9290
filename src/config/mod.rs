// ABOUTME: Configuration management module for environment-driven NutriMind settings
// ABOUTME: Exposes the top-level config plus the LLM, logging and environment types it is built from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for NutriMind
//!
//! All configuration comes from environment variables; there is no config
//! file. See [`environment::NutrimindConfig::from_env`] for the variables read.

/// Environment variable loading for the service configuration
pub mod environment;
/// Shared configuration enums (log level, deployment environment)
pub mod types;

pub use environment::{LlmConfig, NutrimindConfig};
pub use types::{Environment, LogLevel};
