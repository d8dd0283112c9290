// ABOUTME: User dietary preferences and health goal that steer recipe generation
// ABOUTME: Preference sets are BTreeSet-backed so duplicates collapse and prompt order is stable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Health goal that drives macro ratios
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HealthGoal {
    /// Calorie deficit: low carbohydrate, high fiber
    WeightLoss,
    /// Balanced macros
    #[default]
    Maintenance,
    /// High protein, moderate carbohydrate
    MuscleGain,
}

impl HealthGoal {
    /// Wire name used in prompts and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight-loss",
            Self::Maintenance => "maintenance",
            Self::MuscleGain => "muscle-gain",
        }
    }
}

impl Display for HealthGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Preferred cooking complexity
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Complexity {
    /// Few steps, minimal technique
    Low,
    /// Everyday cooking
    Medium,
    /// Involved preparations
    High,
}

impl Complexity {
    /// Wire name used in prompts and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Dietary profile; replaced wholesale on update
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Diets to respect (e.g. "Keto-friendly")
    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,
    /// Ingredients that must never be used
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    /// Preferred cuisines
    #[serde(default)]
    pub cuisines: BTreeSet<String>,
    /// Preferred flavor profile
    #[serde(default)]
    pub flavors: BTreeSet<String>,
    /// Macro-ratio goal
    #[serde(default, alias = "healthGoals")]
    pub health_goal: HealthGoal,
    /// Daily energy target in kcal
    #[serde(default)]
    pub daily_calorie_target: u32,
    /// Usual workout times (e.g. "08:00")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workout_times: Vec<String>,
    /// Preferred recipe complexity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_complexity: Option<Complexity>,
}

impl UserPreferences {
    /// Build a preference set from any iterator of strings, trimming and dropping blanks
    #[must_use]
    pub fn set_of<I, S>(items: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .map(|item| item.as_ref().trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect()
    }
}
