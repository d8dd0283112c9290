// ABOUTME: Single-writer kitchen store publishing immutable Arc snapshots
// ABOUTME: Issues monotonically increasing request tokens for latest-request-wins commits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::state::KitchenState;
use crate::errors::AppResult;
use crate::models::{
    Appliance, Ingredient, MealLog, NewAppliance, NewIngredient, Recipe, UserPreferences,
};

/// Identifies one recipe request; later requests get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw counter value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for RequestToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

/// Shared kitchen state container
///
/// Writers are serialized by the lock and each write swaps in a new
/// `Arc<KitchenState>`. Readers get the `Arc` itself, so a snapshot never
/// changes after it is taken.
#[derive(Debug, Default)]
pub struct KitchenStore {
    state: RwLock<Arc<KitchenState>>,
    latest_request: AtomicU64,
}

impl KitchenStore {
    /// Create a store holding an initial state
    #[must_use]
    pub fn new(initial: KitchenState) -> Self {
        Self {
            state: RwLock::new(Arc::new(initial)),
            latest_request: AtomicU64::new(0),
        }
    }

    /// Current state
    pub async fn snapshot(&self) -> Arc<KitchenState> {
        Arc::clone(&*self.state.read().await)
    }

    async fn update<T>(&self, transition: impl FnOnce(&KitchenState) -> (KitchenState, T)) -> T {
        let mut guard = self.state.write().await;
        let current: &KitchenState = &guard;
        let (next, output) = transition(current);
        *guard = Arc::new(next);
        output
    }

    async fn try_update<T>(
        &self,
        transition: impl FnOnce(&KitchenState) -> AppResult<(KitchenState, T)>,
    ) -> AppResult<T> {
        let mut guard = self.state.write().await;
        let current: &KitchenState = &guard;
        let (next, output) = transition(current)?;
        *guard = Arc::new(next);
        Ok(output)
    }

    /// Add an ingredient to the inventory
    pub async fn add_ingredient(&self, draft: NewIngredient) -> Ingredient {
        let ingredient = self.update(|state| state.with_ingredient(draft)).await;
        debug!(id = %ingredient.id, name = %ingredient.name, "Ingredient added");
        ingredient
    }

    /// Remove an ingredient from the inventory
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id is unknown; the state is unchanged.
    pub async fn remove_ingredient(&self, id: Uuid) -> AppResult<()> {
        self.try_update(|state| Ok((state.without_ingredient(id)?, ())))
            .await?;
        debug!(%id, "Ingredient removed");
        Ok(())
    }

    /// Add an appliance
    pub async fn add_appliance(&self, draft: NewAppliance) -> Appliance {
        let appliance = self.update(|state| state.with_appliance(draft)).await;
        debug!(id = %appliance.id, name = %appliance.name, "Appliance added");
        appliance
    }

    /// Flip an appliance's availability and return the updated appliance
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id is unknown; the state is unchanged.
    pub async fn toggle_appliance(&self, id: Uuid) -> AppResult<Appliance> {
        let appliance = self
            .try_update(|state| state.with_appliance_toggled(id))
            .await?;
        debug!(%id, available = appliance.available, "Appliance toggled");
        Ok(appliance)
    }

    /// Remove an appliance
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the id is unknown; the state is unchanged.
    pub async fn remove_appliance(&self, id: Uuid) -> AppResult<()> {
        self.try_update(|state| Ok((state.without_appliance(id)?, ())))
            .await?;
        debug!(%id, "Appliance removed");
        Ok(())
    }

    /// Replace the preferences
    pub async fn update_preferences(&self, preferences: UserPreferences) {
        self.update(|state| (state.with_preferences(preferences), ()))
            .await;
        debug!("Preferences updated");
    }

    /// Append a meal log entry
    pub async fn log_meal(&self, log: MealLog) {
        let id = log.id;
        self.update(|state| (state.with_meal_logged(log), ())).await;
        debug!(%id, "Meal logged");
    }

    /// Issue a token for a new recipe request, superseding all earlier ones
    pub fn issue_request_token(&self) -> RequestToken {
        RequestToken(self.latest_request.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer token has been issued since this one
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest_request.load(Ordering::SeqCst) == token.0
    }

    /// Commit a recipe as current only if its request is still the latest
    ///
    /// Returns `false` and leaves the state unchanged for a stale token.
    pub async fn commit_recipe(&self, token: RequestToken, recipe: Recipe) -> bool {
        let mut guard = self.state.write().await;
        if !self.is_latest(token) {
            debug!(%token, "Discarding stale recipe result");
            return false;
        }
        *guard = Arc::new(guard.with_current_recipe(Some(recipe)));
        debug!(%token, "Recipe committed");
        true
    }
}
