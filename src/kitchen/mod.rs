// ABOUTME: Kitchen state container, request tokens and the service tying it to the generation client
// ABOUTME: State changes go through a single writer and publish immutable snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Kitchen
//!
//! - [`KitchenState`]: immutable value with pure transition methods
//! - [`KitchenStore`]: single-writer holder of the current `Arc<KitchenState>`
//!   plus the request-token counter used for "latest request wins"
//! - [`KitchenService`]: suggests recipes and tracks meals against the store

mod service;
mod state;
mod store;

pub use service::{meal_log_from_parsed, KitchenService, RecipeOutcome, DEFAULT_MEAL_TYPE};
pub use state::KitchenState;
pub use store::{KitchenStore, RequestToken};
