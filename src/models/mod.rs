// ABOUTME: Kitchen domain models for inventory, appliances, preferences, meals, recipes and insights
// ABOUTME: Re-exports the record types shared by the prompt builder, generation client and store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain records describing the kitchen. Field names serialize in camelCase
//! and enum tags use the wire names of the web client (`weight-loss`,
//! `snack`, `Easy`), so a kitchen exported as JSON round-trips unchanged.
//!
//! ## Invariants
//!
//! - Ids are assigned on creation (`Uuid::new_v4`) and unique per collection
//! - Nutrition values are non-negative
//! - Preference sets never contain duplicates (`BTreeSet`)

mod appliance;
mod ingredient;
mod insight;
mod meal;
mod preferences;
mod recipe;

pub use appliance::{Appliance, ApplianceType, NewAppliance};
pub use ingredient::{Ingredient, IngredientCategory, NewIngredient};
pub use insight::{Insight, InsightPriority, InsightType};
pub use meal::{MacroNutrients, MealLog, MealType};
pub use preferences::{Complexity, HealthGoal, UserPreferences};
pub use recipe::{Difficulty, Recipe, RecipeNutrition};
