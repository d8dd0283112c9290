// ABOUTME: Advisory insight messages shown alongside the kitchen panels
// ABOUTME: Insights are static demo content with no lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Area an insight is about
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Food at risk of being thrown away
    Waste,
    /// Nutrition trends
    Health,
    /// Eating habits
    Behavior,
    /// Stock levels
    Inventory,
}

/// Display priority, ordered low to high
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    /// Informational
    Low,
    /// Worth a look
    Medium,
    /// Act soon
    High,
}

/// Precomputed advisory message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    /// Identifier, unique among insights
    pub id: String,
    /// Area the insight covers
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Display priority
    pub priority: InsightPriority,
}
