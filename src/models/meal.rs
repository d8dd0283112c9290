// ABOUTME: Meal log entries and macro nutrient totals
// ABOUTME: Meal logs are append-only; totals are summed for the daily tracker view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter::Sum;
use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which meal of the day an entry belongs to
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Anything between meals
    Snack,
}

impl MealType {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Case-insensitive match on the wire name
    #[must_use]
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" => Some(Self::Snack),
            _ => None,
        }
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Energy and macronutrients of a meal (kcal and grams)
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroNutrients {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl Add for MacroNutrients {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl Sum for MacroNutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A logged meal; never mutated after creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealLog {
    /// Identity assigned on creation
    pub id: Uuid,
    /// When the meal was logged
    pub timestamp: DateTime<Utc>,
    /// What was eaten
    pub description: String,
    /// Meal of the day
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// Estimated nutrition
    pub nutrition: MacroNutrients,
}

impl MealLog {
    /// Create a log entry stamped now
    #[must_use]
    pub fn new(description: impl Into<String>, meal_type: MealType, nutrition: MacroNutrients) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            description: description.into(),
            meal_type,
            nutrition,
        }
    }
}
