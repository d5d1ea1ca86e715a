//! Version comparison between two snapshots.
//!
//! # Invariants
//! - Components are matched by id; relationships by `(source, target, type)`.
//! - Output order follows the order of the snapshot each entry came from.

use crate::model::canvas::Point;
use crate::model::component::{Component, ComponentId, Relationship};
use crate::model::snapshot::MapSnapshot;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A component present in both snapshots at different positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovedComponent {
    pub id: ComponentId,
    pub name: String,
    pub from: Point,
    pub to: Point,
}

/// Changes from `previous` to `current`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapDiff {
    pub added_components: Vec<Component>,
    pub removed_components: Vec<Component>,
    pub moved_components: Vec<MovedComponent>,
    pub added_relationships: Vec<Relationship>,
    pub removed_relationships: Vec<Relationship>,
}

impl MapDiff {
    pub fn is_empty(&self) -> bool {
        self.added_components.is_empty()
            && self.removed_components.is_empty()
            && self.moved_components.is_empty()
            && self.added_relationships.is_empty()
            && self.removed_relationships.is_empty()
    }
}

/// Computes what changed between an older snapshot and the current one.
pub fn diff_snapshots(current: &MapSnapshot, previous: &MapSnapshot) -> MapDiff {
    let previous_by_id: HashMap<&ComponentId, &Component> = previous
        .components
        .iter()
        .map(|component| (&component.id, component))
        .collect();
    let current_ids: HashSet<&ComponentId> =
        current.components.iter().map(|component| &component.id).collect();

    let mut diff = MapDiff::default();
    for component in &current.components {
        match previous_by_id.get(&component.id) {
            None => diff.added_components.push(component.clone()),
            Some(old) if old.x != component.x || old.y != component.y => {
                diff.moved_components.push(MovedComponent {
                    id: component.id.clone(),
                    name: component.name.clone(),
                    from: old.position(),
                    to: component.position(),
                });
            }
            Some(_) => {}
        }
    }
    diff.removed_components = previous
        .components
        .iter()
        .filter(|component| !current_ids.contains(&component.id))
        .cloned()
        .collect();

    let current_keys: HashSet<(&str, &str, &str)> =
        current.relationships.iter().map(relationship_key).collect();
    let previous_keys: HashSet<(&str, &str, &str)> =
        previous.relationships.iter().map(relationship_key).collect();
    diff.added_relationships = current
        .relationships
        .iter()
        .filter(|rel| !previous_keys.contains(&relationship_key(rel)))
        .cloned()
        .collect();
    diff.removed_relationships = previous
        .relationships
        .iter()
        .filter(|rel| !current_keys.contains(&relationship_key(rel)))
        .cloned()
        .collect();

    diff
}

fn relationship_key(relationship: &Relationship) -> (&str, &str, &str) {
    (
        relationship.source.as_str(),
        relationship.target.as_str(),
        relationship.kind.as_str(),
    )
}
