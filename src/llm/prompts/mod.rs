// ABOUTME: Prompt builders for recipe generation and free-text meal parsing
// ABOUTME: Pure functions of the kitchen state; identical inputs give byte-identical prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompt text is assembled line by line from the kitchen state. The fixed
//! closing guidelines are loaded at compile time from a markdown file so
//! they can be edited without touching code.
//!
//! Preference sets are `BTreeSet`s and ingredients keep inventory order, so
//! the output never depends on hashing or timing.

use std::fmt::Write;

use crate::models::{Appliance, HealthGoal, Ingredient, UserPreferences};

/// Opening line establishing the model's role for recipe generation
pub const RECIPE_PERSONA: &str = "Act as a world-class nutritionist and Michelin chef. Generate a personalized recipe based on:";

/// Closing rules appended to every recipe prompt
pub const RECIPE_GUIDELINES: &str = include_str!("recipe_guidelines.md");

/// Fixed macro-ratio clause for a health goal
#[must_use]
pub const fn macro_guidance(goal: HealthGoal) -> &'static str {
    match goal {
        HealthGoal::WeightLoss => "favor a low-carbohydrate, high-fiber macro split",
        HealthGoal::Maintenance => "keep protein, carbohydrate and fat balanced",
        HealthGoal::MuscleGain => "favor a high-protein, moderate-carbohydrate macro split",
    }
}

/// Build the recipe generation prompt
///
/// Every ingredient is listed as `"<quantity> <unit> <name>"`. Only
/// appliances marked available are named. Empty lists render as an empty
/// enumeration after their label.
#[must_use]
pub fn build_recipe_prompt(
    inventory: &[Ingredient],
    appliances: &[Appliance],
    preferences: &UserPreferences,
) -> String {
    let ingredients = join(inventory.iter().map(Ingredient::describe));
    let available_appliances = join(
        appliances
            .iter()
            .filter(|appliance| appliance.available)
            .map(|appliance| appliance.name.clone()),
    );

    let mut prompt = String::with_capacity(512);
    prompt.push_str(RECIPE_PERSONA);
    prompt.push('\n');

    push_line(&mut prompt, "Available Ingredients", &ingredients);
    push_line(
        &mut prompt,
        "AVAILABLE APPLIANCES (STRICTLY ONLY USE THESE)",
        &available_appliances,
    );
    push_line(
        &mut prompt,
        "DIETARY CONSTRAINTS",
        &join(preferences.dietary_restrictions.iter().cloned()),
    );
    push_line(
        &mut prompt,
        "ALLERGIES",
        &join(preferences.allergies.iter().cloned()),
    );
    push_line(
        &mut prompt,
        "CUISINE PREFERENCES",
        &join(preferences.cuisines.iter().cloned()),
    );
    push_line(
        &mut prompt,
        "FLAVOR PROFILE",
        &join(preferences.flavors.iter().cloned()),
    );
    push_line(
        &mut prompt,
        "HEALTH GOAL",
        &format!(
            "{} (Adjust macro ratios accordingly: {})",
            preferences.health_goal,
            macro_guidance(preferences.health_goal)
        ),
    );
    push_line(
        &mut prompt,
        "DAILY CALORIE TARGET",
        &format!("{} kcal", preferences.daily_calorie_target),
    );
    if let Some(complexity) = preferences.preferred_complexity {
        push_line(&mut prompt, "PREFERRED COMPLEXITY", complexity.as_str());
    }
    if !preferences.workout_times.is_empty() {
        push_line(
            &mut prompt,
            "WORKOUT TIMES",
            &join(preferences.workout_times.iter().cloned()),
        );
    }

    prompt.push('\n');
    prompt.push_str(RECIPE_GUIDELINES.trim_end());
    prompt
}

/// Build the meal parsing prompt for a free-text description
#[must_use]
pub fn build_meal_parse_prompt(text: &str) -> String {
    format!(
        "Analyze this meal description and provide estimated nutritional values and identify the most likely meal type (breakfast, lunch, dinner, or snack): \"{}\"",
        inline(text.trim())
    )
}

fn push_line(prompt: &mut String, label: &str, value: &str) {
    // Writing to a String cannot fail
    let _ = writeln!(prompt, "{label}: {value}");
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.map(|item| inline(&item)).collect::<Vec<_>>().join(", ")
}

/// Collapse line breaks so user text cannot start a new prompt line
fn inline(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
