// ABOUTME: Main library entry point for the NutriMind kitchen and nutrition assistant
// ABOUTME: Exposes the domain model, structured generation client and kitchen store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriMind
//!
//! Kitchen inventory and nutrition tracking backed by structured LLM
//! generation. The model is asked for JSON matching a declared schema, the
//! reply is validated locally against that same schema, and only then is it
//! turned into a [`Recipe`](models::Recipe) or a meal estimate.
//!
//! ## Architecture
//!
//! - **Models**: plain records for ingredients, appliances, preferences, meals, recipes and insights
//! - **LLM**: provider trait, Gemini provider, prompt builders and response schemas
//! - **Generation**: the client that sends prompts and validates replies
//! - **Kitchen**: single-writer state store with immutable snapshots
//! - **Config / Logging**: environment configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nutrimind::config::NutrimindConfig;
//! use nutrimind::errors::AppResult;
//! use nutrimind::generation::StructuredGenerationClient;
//! use nutrimind::kitchen::{KitchenService, KitchenStore};
//! use nutrimind::llm::GeminiProvider;
//! use nutrimind::samples::KitchenSeed;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = NutrimindConfig::from_env();
//!     let provider = Arc::new(GeminiProvider::from_config(&config.llm)?);
//!     let client = StructuredGenerationClient::from_config(provider, &config.llm);
//!     let store = Arc::new(KitchenStore::new(KitchenSeed::demo().into_state()));
//!     let service = KitchenService::new(store, client);
//!
//!     let outcome = service.suggest_recipe().await?;
//!     println!("{}", outcome.recipe().title);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// System-wide constants
pub mod constants;

/// Error codes, `AppError` and the generation failure taxonomy
pub mod errors;

/// Structured generation client
pub mod generation;

/// Kitchen state, store and service
pub mod kitchen;

/// LLM provider abstraction, prompts and schemas
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain records
pub mod models;

/// Demo kitchen data and seed file loading
pub mod samples;
