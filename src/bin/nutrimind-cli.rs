// ABOUTME: NutriMind CLI - recipe suggestions and meal tracking from the command line
// ABOUTME: Loads a kitchen seed file or the demo kitchen and runs one command against Gemini
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Print the recipe prompt for the demo kitchen (no network)
//! nutrimind-cli prompt
//!
//! # Suggest a recipe for a kitchen described in a file
//! nutrimind-cli --kitchen kitchen.json recipe
//!
//! # Estimate and log a meal
//! nutrimind-cli track "two eggs and a slice of toast"
//!
//! # Show the static insights
//! nutrimind-cli insights
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use nutrimind::{
    config::{LogLevel, NutrimindConfig},
    errors::{AppError, AppResult},
    generation::StructuredGenerationClient,
    kitchen::{KitchenService, KitchenState, KitchenStore},
    llm::{prompts::build_recipe_prompt, GeminiProvider},
    logging::LoggingConfig,
    samples::{demo_insights, KitchenSeed},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "nutrimind-cli",
    about = "NutriMind kitchen and nutrition assistant",
    long_about = "Suggest recipes from your kitchen inventory and estimate meal nutrition using Gemini structured output."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Kitchen seed file (JSON); the demo kitchen is used when omitted
    #[arg(long, global = true)]
    kitchen: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the recipe prompt for the kitchen without calling the model
    Prompt,

    /// Generate a recipe and print it as JSON
    Recipe,

    /// Estimate a meal from free text, log it and print today's totals
    Track {
        /// What was eaten, e.g. "two eggs and toast"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the static insights as JSON
    Insights,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = NutrimindConfig::from_env();

    let mut logging = LoggingConfig::from_config(&config);
    if cli.verbose {
        logging.level = LogLevel::Debug;
    }
    logging.init()?;
    debug!(?config, "Configuration loaded");

    let state = load_kitchen(cli.kitchen.as_deref()).await?;

    match cli.command {
        Command::Prompt => {
            let prompt = build_recipe_prompt(&state.inventory, &state.appliances, &state.preferences);
            println!("{prompt}");
        }
        Command::Recipe => {
            let service = build_service(&config, state)?;
            let outcome = service.suggest_recipe().await?;
            print_json(outcome.recipe())?;
        }
        Command::Track { text } => {
            let service = build_service(&config, state)?;
            let log = service.track_meal(&text.join(" ")).await?;
            let snapshot = service.store().snapshot().await;
            let today = snapshot.totals_for(Utc::now().date_naive());
            print_json(&json!({ "meal": log, "today": today }))?;
        }
        Command::Insights => print_json(&demo_insights())?,
    }

    Ok(())
}

async fn load_kitchen(path: Option<&Path>) -> AppResult<KitchenState> {
    let seed = match path {
        Some(path) => KitchenSeed::load(path).await?,
        None => KitchenSeed::demo(),
    };
    Ok(seed.into_state())
}

fn build_service(config: &NutrimindConfig, state: KitchenState) -> AppResult<KitchenService> {
    let provider = Arc::new(GeminiProvider::from_config(&config.llm)?);
    let client = StructuredGenerationClient::from_config(provider, &config.llm);
    let store = Arc::new(KitchenStore::new(state));
    Ok(KitchenService::new(store, client))
}

fn print_json(value: &impl Serialize) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(AppError::from)?;
    println!("{text}");
    Ok(())
}
