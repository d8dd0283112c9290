// ABOUTME: Shared test utilities for NutriMind integration tests
// ABOUTME: Provides quiet logging, kitchen fixtures and a scripted fake LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `nutrimind`
//!
//! Integration tests pull this in with `mod common;`.

use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use nutrimind::errors::GenerationError;
use nutrimind::llm::{GenerationRequest, GenerationResponse, LlmCapabilities, LlmProvider};
use nutrimind::models::{
    Appliance, HealthGoal, Ingredient, NewAppliance, NewIngredient, UserPreferences,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Kitchen Fixtures
// ============================================================================

/// Three ingredients in a fixed order
pub fn sample_inventory() -> Vec<Ingredient> {
    vec![
        NewIngredient::new("Eggs", "6", "pcs"),
        NewIngredient::new("Spinach", "200", "g"),
        NewIngredient::new("Chicken Breast", "400", "g"),
    ]
    .into_iter()
    .map(Ingredient::from_draft)
    .collect()
}

/// Two available appliances and an unavailable grill
pub fn sample_appliances() -> Vec<Appliance> {
    let grill = NewAppliance {
        available: false,
        ..NewAppliance::new("Grill")
    };
    vec![NewAppliance::new("Stove"), NewAppliance::new("Oven"), grill]
        .into_iter()
        .map(Appliance::from_draft)
        .collect()
}

/// Preferences with every set populated
pub fn sample_preferences(goal: HealthGoal) -> UserPreferences {
    UserPreferences {
        dietary_restrictions: UserPreferences::set_of(["Keto-friendly"]),
        allergies: UserPreferences::set_of(["Peanuts"]),
        cuisines: UserPreferences::set_of(["Asian", "Mediterranean"]),
        flavors: UserPreferences::set_of(["Umami", "Spicy"]),
        health_goal: goal,
        daily_calorie_target: 2200,
        ..UserPreferences::default()
    }
}

/// A schema-conforming recipe document
pub fn recipe_value(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Silky eggs folded through wilted spinach",
        "ingredients": ["3 eggs", "100 g spinach", "1 tbsp olive oil"],
        "instructions": ["Wilt the spinach", "Add beaten eggs", "Stir gently until set"],
        "nutrition": {"calories": 320.5, "protein": 21, "carbs": 4, "fat": 24, "fiber": 2.5},
        "timeEstimate": "15 minutes",
        "difficulty": "Easy"
    })
}

/// Recipe document rendered as model output text
pub fn recipe_text(title: &str) -> String {
    recipe_value(title).to_string()
}

// ============================================================================
// Scripted Provider
// ============================================================================

/// What the scripted provider answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// Candidate text
    Text(String),
    /// A response with no candidate text
    NoText,
    /// A provider failure
    Fail(GenerationError),
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    reply: Reply,
    delay: Duration,
}

/// Fake provider answering from rules matched against the prompt
///
/// Rules are checked in insertion order; the first whose needle appears in
/// the prompt wins. Unmatched prompts get the fallback reply.
#[derive(Debug)]
pub struct ScriptedProvider {
    rules: Vec<Rule>,
    fallback: Reply,
    capabilities: LlmCapabilities,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    /// Provider that fails every call until rules are added
    pub fn new() -> Self {
        Self::always(Reply::Fail(GenerationError::unavailable(
            "no scripted reply",
        )))
    }

    /// Provider that answers every call the same way
    pub fn always(reply: Reply) -> Self {
        Self {
            rules: Vec::new(),
            fallback: reply,
            capabilities: LlmCapabilities::structured(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer prompts containing `needle`
    pub fn on(self, needle: &str, reply: Reply) -> Self {
        self.on_delayed(needle, reply, Duration::ZERO)
    }

    /// Answer prompts containing `needle` after a delay
    pub fn on_delayed(mut self, needle: &str, reply: Reply, delay: Duration) -> Self {
        self.rules.push(Rule {
            needle: needle.to_owned(),
            reply,
            delay,
        });
        self
    }

    /// Override the advertised capabilities
    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.calls.lock().unwrap().push(request.clone());

        let (reply, delay) = self
            .rules
            .iter()
            .find(|rule| request.prompt.contains(&rule.needle))
            .map_or((self.fallback.clone(), Duration::ZERO), |rule| {
                (rule.reply.clone(), rule.delay)
            });

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.default_model().to_owned());
        match reply {
            Reply::Text(text) => Ok(GenerationResponse::text(model, text)),
            Reply::NoText => Ok(GenerationResponse {
                text: None,
                model,
                usage: None,
                finish_reason: Some("STOP".to_owned()),
            }),
            Reply::Fail(error) => Err(error),
        }
    }

    async fn health_check(&self) -> Result<bool, GenerationError> {
        Ok(true)
    }
}
