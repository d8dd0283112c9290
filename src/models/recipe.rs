// ABOUTME: Generated recipe record with nutrition, time estimate and difficulty
// ABOUTME: Only the structured generation client constructs these, after schema validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// How hard a recipe is to cook
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Beginner friendly
    Easy,
    /// Some technique required
    Medium,
    /// Demanding
    Hard,
}

impl Difficulty {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Case-insensitive match on the wire name
    #[must_use]
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Nutrition per serving of a recipe
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipeNutrition {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fiber in grams, when the model reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Sodium in milligrams, when the model reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

/// A personalized recipe suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe name
    pub title: String,
    /// Short pitch
    pub description: String,
    /// Ingredient lines with amounts
    pub ingredients: Vec<String>,
    /// Ordered cooking steps
    pub instructions: Vec<String>,
    /// Nutrition per serving
    pub nutrition: RecipeNutrition,
    /// Free-text duration (e.g. "25 minutes")
    pub time_estimate: String,
    /// Cooking difficulty
    pub difficulty: Difficulty,
}
