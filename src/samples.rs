// ABOUTME: Demo kitchen data and loading of kitchen seed files for the CLI
// ABOUTME: Provides the starter inventory, appliances, preferences and the static insight list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Samples
//!
//! A kitchen seed file is JSON with the same field names the models
//! serialize with. Ids are not part of the file; they are assigned on load.
//!
//! ```json
//! {
//!   "inventory": [{"name": "Eggs", "quantity": "6", "unit": "pcs"}],
//!   "appliances": [{"name": "Stove"}, {"name": "Grill", "available": false}],
//!   "preferences": {"allergies": ["Peanuts"], "healthGoal": "muscle-gain", "dailyCalorieTarget": 2600}
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::kitchen::KitchenState;
use crate::models::{
    Complexity, HealthGoal, Insight, InsightPriority, InsightType, NewAppliance, NewIngredient,
    UserPreferences,
};

/// Kitchen contents as stored in a seed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenSeed {
    /// Ingredient drafts
    #[serde(default)]
    pub inventory: Vec<NewIngredient>,
    /// Appliance drafts
    #[serde(default)]
    pub appliances: Vec<NewAppliance>,
    /// Dietary profile
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl KitchenSeed {
    /// The built-in demo kitchen
    #[must_use]
    pub fn demo() -> Self {
        Self {
            inventory: demo_inventory(),
            appliances: demo_appliances(),
            preferences: demo_preferences(),
        }
    }

    /// Parse a seed from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the text is not a valid seed document.
    pub fn from_json(text: &str) -> AppResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            AppError::new(ErrorCode::ConfigInvalid, format!("Invalid kitchen file: {e}"))
                .with_source(e)
        })
    }

    /// Read and parse a seed file
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read and `ConfigInvalid`
    /// if its contents are not a valid seed document.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::storage(format!("Cannot read kitchen file {}: {e}", path.display()))
                .with_source(e)
        })?;
        let seed = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            ingredients = seed.inventory.len(),
            appliances = seed.appliances.len(),
            "Kitchen file loaded"
        );
        Ok(seed)
    }

    /// Build a kitchen state, assigning ids
    #[must_use]
    pub fn into_state(self) -> KitchenState {
        KitchenState::from_drafts(self.inventory, self.appliances, self.preferences)
    }
}

/// Starter inventory with usage forecasts
#[must_use]
pub fn demo_inventory() -> Vec<NewIngredient> {
    vec![
        NewIngredient::new("Eggs", "6", "pcs").with_forecast(14.0, 0.15),
        NewIngredient::new("Spinach", "200", "g").with_forecast(2.0, 0.8),
        NewIngredient::new("Avocado", "1", "pcs").with_forecast(3.0, 0.4),
        NewIngredient::new("Chicken Breast", "400", "g").with_forecast(5.0, 0.9),
    ]
}

/// Starter appliances, all available
#[must_use]
pub fn demo_appliances() -> Vec<NewAppliance> {
    ["Stove", "Oven", "Microwave", "Air Fryer"]
        .into_iter()
        .map(NewAppliance::new)
        .collect()
}

/// Starter dietary profile
#[must_use]
pub fn demo_preferences() -> UserPreferences {
    UserPreferences {
        dietary_restrictions: UserPreferences::set_of(["Keto-friendly"]),
        allergies: UserPreferences::set_of(["Peanuts"]),
        cuisines: UserPreferences::set_of(["Asian", "Mediterranean"]),
        flavors: UserPreferences::set_of(["Umami", "Spicy"]),
        health_goal: HealthGoal::Maintenance,
        daily_calorie_target: 2200,
        workout_times: Vec::new(),
        preferred_complexity: Some(Complexity::Medium),
    }
}

/// Static advisory insights, highest priority first
#[must_use]
pub fn demo_insights() -> Vec<Insight> {
    let insight = |id: &str,
                   insight_type: InsightType,
                   title: &str,
                   description: &str,
                   priority: InsightPriority| Insight {
        id: id.to_owned(),
        insight_type,
        title: title.to_owned(),
        description: description.to_owned(),
        priority,
    };

    let mut insights = vec![
        insight(
            "1",
            InsightType::Inventory,
            "Running Low: Eggs",
            "Based on your 2-week history, you will run out of eggs tomorrow morning.",
            InsightPriority::High,
        ),
        insight(
            "2",
            InsightType::Behavior,
            "Lunch Anomaly Detected",
            "You usually skip lunch on Mondays. We suggest a 5-min prep meal for tomorrow.",
            InsightPriority::Medium,
        ),
        insight(
            "3",
            InsightType::Health,
            "Weekend Protein Drop",
            "Historical data shows a 30% drop in protein on Saturdays. Adjusted weekend plans generated.",
            InsightPriority::Low,
        ),
        insight(
            "4",
            InsightType::Waste,
            "Spinach Expiry Risk",
            "Usage frequency is low for this item. Suggested \"Waste-Hero\" recipe: Spinach Smoothie.",
            InsightPriority::Medium,
        ),
    ];
    // Stable sort keeps id order within a priority
    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    insights
}
