// ABOUTME: Turns raw model text into validated JSON and then into typed recipe and meal values
// ABOUTME: Every failure along the way becomes GenerationError::MalformedResponse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;
use serde_json::Value;

use super::{NutritionEstimate, ParsedMeal};
use crate::constants::limits;
use crate::errors::GenerationError;
use crate::models::{Difficulty, MealType, Recipe, RecipeNutrition};

/// Parse candidate text as JSON
///
/// Absent or blank text is read as `{}`. Surrounding whitespace and a
/// markdown code fence are removed first.
///
/// # Errors
///
/// Returns `MalformedResponse` if the text is not valid JSON.
pub fn parse_json_text(text: Option<&str>) -> Result<Value, GenerationError> {
    let body = strip_code_fence(text.unwrap_or_default());
    let body = if body.is_empty() { "{}" } else { body };

    serde_json::from_str(body).map_err(|e| {
        GenerationError::malformed(format!(
            "response is not valid JSON ({e}): {}",
            preview(body)
        ))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop an info string such as `json` on the opening fence line
    let inner = match inner.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with(['{', '[']) => rest,
        _ => inner.trim_start_matches("json"),
    };
    inner.trim()
}

fn preview(text: &str) -> String {
    if text.chars().count() <= limits::RESPONSE_PREVIEW_CHARS {
        text.to_owned()
    } else {
        let head: String = text.chars().take(limits::RESPONSE_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipePayload {
    title: String,
    description: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    nutrition: RecipeNutritionPayload,
    time_estimate: String,
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct RecipeNutritionPayload {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    #[serde(default)]
    fiber: Option<f64>,
    #[serde(default)]
    sodium: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MealPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "type")]
    meal_type: Option<String>,
    #[serde(default)]
    nutrition: Option<MealNutritionPayload>,
}

#[derive(Debug, Deserialize)]
struct MealNutritionPayload {
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    carbs: Option<f64>,
    #[serde(default)]
    fat: Option<f64>,
}

// ============================================================================
// Conversions
// ============================================================================

fn non_negative(field: &str, value: f64) -> Result<f64, GenerationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GenerationError::malformed(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

fn non_negative_opt(field: &str, value: Option<f64>) -> Result<Option<f64>, GenerationError> {
    value.map(|v| non_negative(field, v)).transpose()
}

/// Convert a schema-validated value into a [`Recipe`]
///
/// # Errors
///
/// Returns `MalformedResponse` if the value cannot be read as a recipe, the
/// difficulty is unknown or a nutrition value is negative.
pub fn recipe_from_value(value: Value) -> Result<Recipe, GenerationError> {
    let payload: RecipePayload = serde_json::from_value(value)
        .map_err(|e| GenerationError::malformed(format!("recipe does not match schema: {e}")))?;

    let difficulty = Difficulty::parse_loose(&payload.difficulty).ok_or_else(|| {
        GenerationError::malformed(format!(
            "unknown recipe difficulty `{}`",
            payload.difficulty
        ))
    })?;

    let raw = payload.nutrition;
    let nutrition = RecipeNutrition {
        calories: non_negative("nutrition.calories", raw.calories)?,
        protein: non_negative("nutrition.protein", raw.protein)?,
        carbs: non_negative("nutrition.carbs", raw.carbs)?,
        fat: non_negative("nutrition.fat", raw.fat)?,
        fiber: non_negative_opt("nutrition.fiber", raw.fiber)?,
        sodium: non_negative_opt("nutrition.sodium", raw.sodium)?,
    };

    Ok(Recipe {
        title: payload.title,
        description: payload.description,
        ingredients: payload.ingredients,
        instructions: payload.instructions,
        nutrition,
        time_estimate: payload.time_estimate,
        difficulty,
    })
}

/// Convert a schema-validated value into a [`ParsedMeal`]
///
/// Blank titles are reported as absent.
///
/// # Errors
///
/// Returns `MalformedResponse` if the meal type is unknown or a nutrition value is negative.
pub fn parsed_meal_from_value(value: Value) -> Result<ParsedMeal, GenerationError> {
    let payload: MealPayload = serde_json::from_value(value).map_err(|e| {
        GenerationError::malformed(format!("meal estimate does not match schema: {e}"))
    })?;

    let meal_type = payload
        .meal_type
        .map(|raw| {
            MealType::parse_loose(&raw)
                .ok_or_else(|| GenerationError::malformed(format!("unknown meal type `{raw}`")))
        })
        .transpose()?;

    let nutrition = payload
        .nutrition
        .map(|raw| -> Result<NutritionEstimate, GenerationError> {
            Ok(NutritionEstimate {
                calories: non_negative_opt("nutrition.calories", raw.calories)?,
                protein: non_negative_opt("nutrition.protein", raw.protein)?,
                carbs: non_negative_opt("nutrition.carbs", raw.carbs)?,
                fat: non_negative_opt("nutrition.fat", raw.fat)?,
            })
        })
        .transpose()?;

    Ok(ParsedMeal {
        title: payload.title.filter(|title| !title.trim().is_empty()),
        meal_type,
        nutrition,
    })
}
