//! Map snapshot: the unit exchanged with persistence and diffed between versions.

use crate::model::component::{Component, ComponentId, Relationship};
use serde::{Deserialize, Serialize};

/// Ordered components and relationships of one map state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl MapSnapshot {
    pub fn new(components: Vec<Component>, relationships: Vec<Relationship>) -> Self {
        Self {
            components,
            relationships,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.relationships.is_empty()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|component| &component.id == id)
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
