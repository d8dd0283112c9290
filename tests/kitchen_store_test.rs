// ABOUTME: Integration tests for the kitchen store's snapshots and request tokens
// ABOUTME: Verifies snapshot immutability, serialized writes and latest-request-wins commits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{init_test_logging, recipe_value};
use nutrimind::errors::ErrorCode;
use nutrimind::kitchen::{KitchenState, KitchenStore};
use nutrimind::models::{
    HealthGoal, MacroNutrients, MealLog, MealType, NewAppliance, NewIngredient, Recipe,
    UserPreferences,
};
use uuid::Uuid;

fn recipe(title: &str) -> Recipe {
    serde_json::from_value(recipe_value(title)).unwrap()
}

// ============================================================================
// Snapshots
// ============================================================================

#[tokio::test]
async fn test_snapshot_is_unaffected_by_later_writes() {
    init_test_logging();
    let store = KitchenStore::default();
    store.add_ingredient(NewIngredient::new("Eggs", "6", "pcs")).await;

    let before = store.snapshot().await;
    store.add_ingredient(NewIngredient::new("Milk", "1", "l")).await;
    store.add_appliance(NewAppliance::new("Stove")).await;
    let after = store.snapshot().await;

    assert_eq!(before.inventory.len(), 1);
    assert!(before.appliances.is_empty());
    assert_eq!(after.inventory.len(), 2);
    assert_eq!(after.appliances.len(), 1);
}

#[tokio::test]
async fn test_unchanged_store_hands_out_the_same_snapshot() {
    let store = KitchenStore::new(KitchenState::default());
    let first = store.snapshot().await;
    let second = store.snapshot().await;
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_toggle_appliance_round_trips() {
    let store = KitchenStore::default();
    let stove = store.add_appliance(NewAppliance::new("Stove")).await;
    assert!(stove.available);

    let off = store.toggle_appliance(stove.id).await.unwrap();
    assert!(!off.available);
    assert_eq!(store.snapshot().await.available_appliances().count(), 0);

    let on = store.toggle_appliance(stove.id).await.unwrap();
    assert!(on.available);
    assert_eq!(store.snapshot().await.available_appliances().count(), 1);
}

#[tokio::test]
async fn test_unknown_ids_leave_state_unchanged() {
    let store = KitchenStore::default();
    store.add_ingredient(NewIngredient::new("Eggs", "6", "pcs")).await;
    let before = store.snapshot().await;

    let missing = Uuid::new_v4();
    assert_eq!(
        store.remove_ingredient(missing).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    assert_eq!(
        store.toggle_appliance(missing).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
    assert_eq!(
        store.remove_appliance(missing).await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );

    assert!(Arc::ptr_eq(&before, &store.snapshot().await));
}

#[tokio::test]
async fn test_remove_ingredient_by_id() {
    let store = KitchenStore::default();
    let eggs = store.add_ingredient(NewIngredient::new("Eggs", "6", "pcs")).await;
    let milk = store.add_ingredient(NewIngredient::new("Milk", "1", "l")).await;

    store.remove_ingredient(eggs.id).await.unwrap();

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.inventory.len(), 1);
    assert_eq!(snapshot.inventory[0].id, milk.id);
}

#[tokio::test]
async fn test_preferences_are_replaced_wholesale() {
    let store = KitchenStore::default();
    let preferences = UserPreferences {
        allergies: UserPreferences::set_of(["Shellfish"]),
        health_goal: HealthGoal::MuscleGain,
        daily_calorie_target: 2800,
        ..UserPreferences::default()
    };

    store.update_preferences(preferences.clone()).await;
    assert_eq!(store.snapshot().await.preferences, preferences);
}

#[tokio::test]
async fn test_logged_meals_add_up_for_today() {
    let store = KitchenStore::default();
    for calories in [200.0, 450.0] {
        store
            .log_meal(MealLog::new(
                "meal",
                MealType::Lunch,
                MacroNutrients {
                    calories,
                    ..MacroNutrients::default()
                },
            ))
            .await;
    }

    let totals = store.snapshot().await.totals_for(Utc::now().date_naive());
    assert!((totals.calories - 650.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_concurrent_writers_are_all_applied() {
    let store = Arc::new(KitchenStore::default());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .add_ingredient(NewIngredient::new(format!("Item {i}"), "1", "pcs"))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.snapshot().await.inventory.len(), 16);
}

// ============================================================================
// Request Tokens
// ============================================================================

#[tokio::test]
async fn test_tokens_increase_and_supersede() {
    let store = KitchenStore::default();
    let first = store.issue_request_token();
    let second = store.issue_request_token();

    assert!(second > first);
    assert!(!store.is_latest(first));
    assert!(store.is_latest(second));
}

#[tokio::test]
async fn test_latest_token_commits_recipe() {
    let store = KitchenStore::default();
    let token = store.issue_request_token();

    assert!(store.commit_recipe(token, recipe("Omelette")).await);
    assert_eq!(
        store.snapshot().await.current_recipe.as_ref().map(|r| r.title.as_str()),
        Some("Omelette")
    );
}

#[tokio::test]
async fn test_stale_token_is_not_committed() {
    let store = KitchenStore::default();
    let stale = store.issue_request_token();
    let latest = store.issue_request_token();

    assert!(store.commit_recipe(latest, recipe("Newer")).await);
    assert!(!store.commit_recipe(stale, recipe("Older")).await);

    let current = store.snapshot().await.current_recipe.clone().unwrap();
    assert_eq!(current.title, "Newer");
}

#[tokio::test]
async fn test_stale_token_cannot_overwrite_even_when_nothing_committed() {
    let store = KitchenStore::default();
    let stale = store.issue_request_token();
    let _pending = store.issue_request_token();

    assert!(!store.commit_recipe(stale, recipe("Older")).await);
    assert!(store.snapshot().await.current_recipe.is_none());
}
