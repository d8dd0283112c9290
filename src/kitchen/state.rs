// ABOUTME: Immutable kitchen state with pure transitions returning the next state
// ABOUTME: Covers inventory, appliances, preferences, meal logs and the current recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    Appliance, Ingredient, MacroNutrients, MealLog, NewAppliance, NewIngredient, Recipe,
    UserPreferences,
};

/// Everything the user has told us about their kitchen
///
/// Transition methods never modify `self`; they return the next state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenState {
    /// Pantry and fridge contents, in insertion order
    pub inventory: Vec<Ingredient>,
    /// Appliances, in insertion order
    pub appliances: Vec<Appliance>,
    /// Dietary profile
    pub preferences: UserPreferences,
    /// Logged meals, oldest first
    pub meal_logs: Vec<MealLog>,
    /// Last committed recipe suggestion
    pub current_recipe: Option<Recipe>,
}

impl KitchenState {
    /// Build a state from drafts, assigning fresh ids
    #[must_use]
    pub fn from_drafts(
        inventory: impl IntoIterator<Item = NewIngredient>,
        appliances: impl IntoIterator<Item = NewAppliance>,
        preferences: UserPreferences,
    ) -> Self {
        Self {
            inventory: inventory.into_iter().map(Ingredient::from_draft).collect(),
            appliances: appliances.into_iter().map(Appliance::from_draft).collect(),
            preferences,
            meal_logs: Vec::new(),
            current_recipe: None,
        }
    }

    /// Append an ingredient
    #[must_use]
    pub fn with_ingredient(&self, draft: NewIngredient) -> (Self, Ingredient) {
        let ingredient = Ingredient::from_draft(draft);
        let mut next = self.clone();
        next.inventory.push(ingredient.clone());
        (next, ingredient)
    }

    /// Remove an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no ingredient has this id.
    pub fn without_ingredient(&self, id: Uuid) -> AppResult<Self> {
        if !self.inventory.iter().any(|ingredient| ingredient.id == id) {
            return Err(AppError::not_found(format!("Ingredient {id}")));
        }
        let mut next = self.clone();
        next.inventory.retain(|ingredient| ingredient.id != id);
        Ok(next)
    }

    /// Append an appliance
    #[must_use]
    pub fn with_appliance(&self, draft: NewAppliance) -> (Self, Appliance) {
        let appliance = Appliance::from_draft(draft);
        let mut next = self.clone();
        next.appliances.push(appliance.clone());
        (next, appliance)
    }

    /// Flip an appliance's availability
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no appliance has this id.
    pub fn with_appliance_toggled(&self, id: Uuid) -> AppResult<(Self, Appliance)> {
        let position = self
            .appliances
            .iter()
            .position(|appliance| appliance.id == id)
            .ok_or_else(|| AppError::not_found(format!("Appliance {id}")))?;

        let mut next = self.clone();
        let toggled = next.appliances[position].toggled();
        next.appliances[position] = toggled.clone();
        Ok((next, toggled))
    }

    /// Remove an appliance by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no appliance has this id.
    pub fn without_appliance(&self, id: Uuid) -> AppResult<Self> {
        if !self.appliances.iter().any(|appliance| appliance.id == id) {
            return Err(AppError::not_found(format!("Appliance {id}")));
        }
        let mut next = self.clone();
        next.appliances.retain(|appliance| appliance.id != id);
        Ok(next)
    }

    /// Replace the preferences wholesale
    #[must_use]
    pub fn with_preferences(&self, preferences: UserPreferences) -> Self {
        Self {
            preferences,
            ..self.clone()
        }
    }

    /// Append a meal log entry
    #[must_use]
    pub fn with_meal_logged(&self, log: MealLog) -> Self {
        let mut next = self.clone();
        next.meal_logs.push(log);
        next
    }

    /// Replace the current recipe
    #[must_use]
    pub fn with_current_recipe(&self, recipe: Option<Recipe>) -> Self {
        Self {
            current_recipe: recipe,
            ..self.clone()
        }
    }

    /// Appliances currently marked available
    pub fn available_appliances(&self) -> impl Iterator<Item = &Appliance> {
        self.appliances.iter().filter(|appliance| appliance.available)
    }

    /// Meals logged on a UTC calendar day
    pub fn meals_on(&self, day: NaiveDate) -> impl Iterator<Item = &MealLog> {
        self.meal_logs
            .iter()
            .filter(move |log| log.timestamp.date_naive() == day)
    }

    /// Summed nutrition of the meals logged on a UTC calendar day
    #[must_use]
    pub fn totals_for(&self, day: NaiveDate) -> MacroNutrients {
        self.meals_on(day).map(|log| log.nutrition).sum()
    }
}
