// ABOUTME: Kitchen service running recipe suggestions and meal tracking against the store
// ABOUTME: Applies latest-request-wins to recipes and the caller-side defaults to parsed meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::store::KitchenStore;
use crate::errors::{AppError, AppResult};
use crate::generation::{ParsedMeal, StructuredGenerationClient};
use crate::models::{MacroNutrients, MealLog, MealType, Recipe};

/// Meal type used when the model does not name one
pub const DEFAULT_MEAL_TYPE: MealType = MealType::Snack;

/// Result of a recipe suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "recipe", rename_all = "lowercase")]
pub enum RecipeOutcome {
    /// Committed as the current recipe
    Current(Recipe),
    /// A newer request was issued while this one ran; not committed
    Superseded(Recipe),
}

impl RecipeOutcome {
    /// Whether the recipe became the current one
    #[must_use]
    pub const fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }

    /// Generated recipe
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        match self {
            Self::Current(recipe) | Self::Superseded(recipe) => recipe,
        }
    }

    /// Take the generated recipe
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        match self {
            Self::Current(recipe) | Self::Superseded(recipe) => recipe,
        }
    }
}

/// Turn a parsed meal into a log entry
///
/// Missing fields fall back to: the original text as description,
/// [`DEFAULT_MEAL_TYPE`] and zero for each nutrition value.
#[must_use]
pub fn meal_log_from_parsed(parsed: ParsedMeal, original_text: &str) -> MealLog {
    let estimate = parsed.nutrition.unwrap_or_default();
    let nutrition = MacroNutrients {
        calories: estimate.calories.unwrap_or(0.0),
        protein: estimate.protein.unwrap_or(0.0),
        carbs: estimate.carbs.unwrap_or(0.0),
        fat: estimate.fat.unwrap_or(0.0),
    };

    MealLog::new(
        parsed
            .title
            .unwrap_or_else(|| original_text.trim().to_owned()),
        parsed.meal_type.unwrap_or(DEFAULT_MEAL_TYPE),
        nutrition,
    )
}

/// Runs generation calls and records their results in the store
#[derive(Clone)]
pub struct KitchenService {
    store: Arc<KitchenStore>,
    client: StructuredGenerationClient,
}

impl KitchenService {
    /// Create a service over a shared store
    #[must_use]
    pub const fn new(store: Arc<KitchenStore>, client: StructuredGenerationClient) -> Self {
        Self { store, client }
    }

    /// Shared store
    #[must_use]
    pub const fn store(&self) -> &Arc<KitchenStore> {
        &self.store
    }

    /// Generate a recipe from the current kitchen and commit it if still wanted
    ///
    /// The recipe is committed only when no later suggestion was requested
    /// while this one was running; otherwise it is returned as
    /// [`RecipeOutcome::Superseded`] and the state is left alone.
    ///
    /// # Errors
    ///
    /// Returns the generation failure mapped to an [`AppError`]; the current
    /// recipe is unchanged.
    #[instrument(skip(self))]
    pub async fn suggest_recipe(&self) -> AppResult<RecipeOutcome> {
        let token = self.store.issue_request_token();
        let snapshot = self.store.snapshot().await;

        let recipe = self
            .client
            .generate_recipe(
                &snapshot.inventory,
                &snapshot.appliances,
                &snapshot.preferences,
            )
            .await
            .inspect_err(|e| warn!(%token, error = %e, "Recipe suggestion failed"))?;

        if self.store.commit_recipe(token, recipe.clone()).await {
            info!(%token, title = %recipe.title, "Recipe suggestion committed");
            Ok(RecipeOutcome::Current(recipe))
        } else {
            info!(%token, title = %recipe.title, "Recipe suggestion superseded");
            Ok(RecipeOutcome::Superseded(recipe))
        }
    }

    /// Parse a meal description and append it to the meal log
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank text and the generation failure
    /// otherwise; nothing is logged on failure.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn track_meal(&self, text: &str) -> AppResult<MealLog> {
        let description = text.trim();
        if description.is_empty() {
            return Err(AppError::invalid_input("Meal description is empty"));
        }

        let parsed = self
            .client
            .parse_meal_log(description)
            .await
            .inspect_err(|e| warn!(error = %e, "Meal tracking failed"))?;

        let log = meal_log_from_parsed(parsed, description);
        self.store.log_meal(log.clone()).await;
        info!(
            id = %log.id,
            meal_type = %log.meal_type,
            calories = log.nutrition.calories,
            "Meal tracked"
        );
        Ok(log)
    }
}
