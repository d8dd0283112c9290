// ABOUTME: Kitchen appliance records with availability toggling
// ABOUTME: Only available appliances may be referenced by generated recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an appliance is used for
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApplianceType {
    /// Stove, oven, microwave, air fryer
    #[default]
    Heating,
    /// Blender, food processor
    Prep,
    /// Fridge, freezer
    Storage,
}

const fn default_available() -> bool {
    true
}

/// Appliance draft; new appliances start out available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAppliance {
    /// Display name
    pub name: String,
    /// Whether it can be used right now
    #[serde(default = "default_available")]
    pub available: bool,
    /// Usage category
    #[serde(default, rename = "type")]
    pub appliance_type: ApplianceType,
}

impl NewAppliance {
    /// Available heating appliance with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            appliance_type: ApplianceType::Heating,
        }
    }

    /// Override the appliance type
    #[must_use]
    pub const fn with_type(mut self, appliance_type: ApplianceType) -> Self {
        self.appliance_type = appliance_type;
        self
    }
}

/// An appliance in the kitchen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appliance {
    /// Identity assigned on creation
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Whether it can be used right now
    pub available: bool,
    /// Usage category
    #[serde(rename = "type")]
    pub appliance_type: ApplianceType,
}

impl Appliance {
    /// Assign a fresh id to a draft
    #[must_use]
    pub fn from_draft(draft: NewAppliance) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            available: draft.available,
            appliance_type: draft.appliance_type,
        }
    }

    /// Copy with availability flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            available: !self.available,
            ..self.clone()
        }
    }
}
