// ABOUTME: Structured generation client producing validated recipes and meal estimates
// ABOUTME: Builds prompts, sends them with a response schema, then parses and validates the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Structured Generation Client
//!
//! [`StructuredGenerationClient`] is the only path from model text to domain
//! types. Each call:
//!
//! 1. builds the prompt from its inputs,
//! 2. sends it with the operation's [`ResponseSchema`](crate::llm::schema::ResponseSchema),
//! 3. parses the returned text as JSON,
//! 4. validates the JSON against the same schema,
//! 5. converts it into a typed value.
//!
//! Failures in step 2 are [`GenerationError::Unavailable`]; failures in
//! steps 3-5 are [`GenerationError::MalformedResponse`]. The client holds no
//! per-call state, so concurrent calls through a shared `Arc` are
//! independent and may finish in any order.

pub mod response;
pub mod schemas;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;
use crate::constants::limits;
use crate::errors::GenerationError;
use crate::llm::prompts::{build_meal_parse_prompt, build_recipe_prompt};
use crate::llm::schema::ResponseSchema;
use crate::llm::{GenerationRequest, LlmProvider};
use crate::models::{Appliance, Ingredient, MealType, Recipe, UserPreferences};

/// Partial nutrition estimate; any value may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
}

/// Validated result of meal parsing, before caller defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMeal {
    /// Short name for the meal
    pub title: Option<String>,
    /// Most likely meal of the day
    pub meal_type: Option<MealType>,
    /// Nutrition estimate
    pub nutrition: Option<NutritionEstimate>,
}

/// Client for schema-constrained generation
#[derive(Clone)]
pub struct StructuredGenerationClient {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl StructuredGenerationClient {
    /// Create a client over a provider, using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
            temperature: None,
        }
    }

    /// Create a client applying the configured model and temperature
    #[must_use]
    pub fn from_config(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: Some(config.model.clone()),
            temperature: config.temperature,
        }
    }

    /// Override the model for every call
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature for every call
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Underlying provider
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Generate a recipe for the given kitchen state
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the provider call fails and
    /// `MalformedResponse` if the reply is not a valid recipe.
    #[instrument(
        skip_all,
        fields(
            provider = self.provider.name(),
            ingredients = inventory.len(),
            appliances = appliances.len(),
        )
    )]
    pub async fn generate_recipe(
        &self,
        inventory: &[Ingredient],
        appliances: &[Appliance],
        preferences: &UserPreferences,
    ) -> Result<Recipe, GenerationError> {
        let prompt = build_recipe_prompt(inventory, appliances, preferences);
        let value = self
            .request_json("recipe", prompt, schemas::recipe_schema())
            .await?;
        let recipe = response::recipe_from_value(value).inspect_err(|e| {
            warn!(error = %e, "Recipe response rejected");
        })?;

        debug!(title = %recipe.title, difficulty = %recipe.difficulty, "Recipe generated");
        Ok(recipe)
    }

    /// Estimate nutrition and meal type from a free-text description
    ///
    /// No defaults are applied: absent fields stay `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank or oversized description (before
    /// any network call), `Unavailable` if the provider call fails and
    /// `MalformedResponse` if the reply cannot be used.
    #[instrument(skip_all, fields(provider = self.provider.name(), chars = text.len()))]
    pub async fn parse_meal_log(&self, text: &str) -> Result<ParsedMeal, GenerationError> {
        let description = text.trim();
        if description.is_empty() {
            return Err(GenerationError::InvalidInput(
                "meal description is empty".to_owned(),
            ));
        }
        if description.chars().count() > limits::MAX_MEAL_DESCRIPTION_CHARS {
            return Err(GenerationError::InvalidInput(format!(
                "meal description exceeds {} characters",
                limits::MAX_MEAL_DESCRIPTION_CHARS
            )));
        }

        let prompt = build_meal_parse_prompt(description);
        let value = self
            .request_json("meal", prompt, schemas::meal_parse_schema())
            .await?;
        let parsed = response::parsed_meal_from_value(value).inspect_err(|e| {
            warn!(error = %e, "Meal estimate rejected");
        })?;

        debug!(
            meal_type = ?parsed.meal_type,
            has_nutrition = parsed.nutrition.is_some(),
            "Meal parsed"
        );
        Ok(parsed)
    }

    /// Send one request and return its schema-validated JSON body
    async fn request_json(
        &self,
        operation: &'static str,
        prompt: String,
        schema: ResponseSchema,
    ) -> Result<Value, GenerationError> {
        if !self.provider.capabilities().supports_structured_output() {
            return Err(GenerationError::unavailable(format!(
                "provider {} does not support structured output",
                self.provider.name()
            )));
        }

        let mut request = GenerationRequest::new(prompt, schema);
        request.model.clone_from(&self.model);
        request.temperature = self.temperature;

        let response = self.provider.generate(&request).await?;
        let value = response::parse_json_text(response.text.as_deref())?;

        request.schema.validate(&value).map_err(|violation| {
            warn!(operation, %violation, "Response failed schema validation");
            GenerationError::malformed(format!(
                "{operation} response does not match schema at {violation}"
            ))
        })?;

        Ok(value)
    }
}
