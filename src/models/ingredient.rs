// ABOUTME: Ingredient inventory records with quantity, unit and stock forecasting fields
// ABOUTME: NewIngredient is the id-less draft accepted by the kitchen store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad grouping for pantry items
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    /// Vegetables and fruit
    Veg,
    /// Meat and fish
    Meat,
    /// Milk, cheese, eggs and similar
    Dairy,
    /// Spices and seasonings
    Spice,
    /// Anything else
    Other,
}

/// Ingredient draft without an identity, as entered by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    /// Display name (e.g. "Eggs")
    pub name: String,
    /// Free-text amount (e.g. "6", "1/2")
    pub quantity: String,
    /// Unit of the amount (e.g. "pcs", "g")
    pub unit: String,
    /// Optional grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<IngredientCategory>,
    /// Optional best-before date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    /// Average uses per week
    #[serde(default)]
    pub usage_frequency: f64,
    /// Forecast stock level between 0 and 1
    #[serde(default)]
    pub predicted_stock_level: f64,
}

impl NewIngredient {
    /// Draft with only the required fields set
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            category: None,
            expiry_date: None,
            usage_frequency: 0.0,
            predicted_stock_level: 0.0,
        }
    }

    /// Set usage frequency and predicted stock level
    #[must_use]
    pub const fn with_forecast(mut self, usage_frequency: f64, predicted_stock_level: f64) -> Self {
        self.usage_frequency = usage_frequency;
        self.predicted_stock_level = predicted_stock_level;
        self
    }

    /// Set the category
    #[must_use]
    pub const fn with_category(mut self, category: IngredientCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// An item in the pantry or fridge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Identity assigned on creation
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-text amount
    pub quantity: String,
    /// Unit of the amount
    pub unit: String,
    /// Optional grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<IngredientCategory>,
    /// Optional best-before date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    /// Average uses per week, never negative
    pub usage_frequency: f64,
    /// Forecast stock level clamped to [0, 1]
    pub predicted_stock_level: f64,
}

impl Ingredient {
    /// Assign a fresh id to a draft, clamping the forecast fields into range
    #[must_use]
    pub fn from_draft(draft: NewIngredient) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            expiry_date: draft.expiry_date,
            usage_frequency: draft.usage_frequency.max(0.0),
            predicted_stock_level: draft.predicted_stock_level.clamp(0.0, 1.0),
        }
    }

    /// Render as `"<quantity> <unit> <name>"` for prompts and listings
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {} {}", self.quantity, self.unit, self.name)
    }
}
