// ABOUTME: Benchmark fixtures generating deterministic kitchens and model replies
// ABOUTME: Sizes range from a near-empty fridge to a fully stocked pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating kitchen state and recipe replies.
//!
//! Output depends only on the requested size, so runs are comparable.

use nutrimind::models::{
    Appliance, HealthGoal, Ingredient, NewAppliance, NewIngredient, UserPreferences,
};
use serde_json::json;

/// Predefined kitchen sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum KitchenSize {
    /// A handful of items
    Small,
    /// A well stocked pantry
    Large,
}

impl KitchenSize {
    #[must_use]
    pub const fn ingredient_count(self) -> usize {
        match self {
            Self::Small => 5,
            Self::Large => 200,
        }
    }

    #[must_use]
    pub const fn appliance_count(self) -> usize {
        match self {
            Self::Small => 3,
            Self::Large => 20,
        }
    }
}

const NAMES: [&str; 8] = [
    "Eggs", "Spinach", "Rice", "Chicken", "Tofu", "Lentils", "Tomato", "Garlic",
];
const UNITS: [&str; 4] = ["g", "pcs", "ml", "tbsp"];

/// Generate an inventory of the given size
#[must_use]
pub fn generate_inventory(size: KitchenSize) -> Vec<Ingredient> {
    (0..size.ingredient_count())
        .map(|index| {
            let name = format!("{} {index}", NAMES[index % NAMES.len()]);
            let quantity = (50 + (index * 37) % 450).to_string();
            Ingredient::from_draft(NewIngredient::new(name, quantity, UNITS[index % UNITS.len()]))
        })
        .collect()
}

/// Generate appliances; every third one is unavailable
#[must_use]
pub fn generate_appliances(size: KitchenSize) -> Vec<Appliance> {
    (0..size.appliance_count())
        .map(|index| {
            Appliance::from_draft(NewAppliance {
                available: index % 3 != 2,
                ..NewAppliance::new(format!("Appliance {index}"))
            })
        })
        .collect()
}

/// Preferences with every set populated
#[must_use]
pub fn generate_preferences() -> UserPreferences {
    UserPreferences {
        dietary_restrictions: UserPreferences::set_of(["Keto-friendly", "Gluten-free"]),
        allergies: UserPreferences::set_of(["Peanuts", "Shellfish"]),
        cuisines: UserPreferences::set_of(["Asian", "Mediterranean", "Mexican"]),
        flavors: UserPreferences::set_of(["Umami", "Spicy"]),
        health_goal: HealthGoal::MuscleGain,
        daily_calorie_target: 2600,
        workout_times: vec!["07:00".to_owned(), "18:30".to_owned()],
        preferred_complexity: None,
    }
}

/// A schema-conforming recipe reply with the given number of steps
#[must_use]
pub fn recipe_reply(steps: usize) -> String {
    let ingredients: Vec<String> = (0..steps).map(|i| format!("{i}00 g item {i}")).collect();
    let instructions: Vec<String> = (0..steps).map(|i| format!("Step {i}: stir")).collect();
    json!({
        "title": "Benchmark Bowl",
        "description": "A bowl built for measuring",
        "ingredients": ingredients,
        "instructions": instructions,
        "nutrition": {"calories": 540, "protein": 38, "carbs": 52, "fat": 18, "fiber": 9},
        "timeEstimate": "30 minutes",
        "difficulty": "Medium"
    })
    .to_string()
}
