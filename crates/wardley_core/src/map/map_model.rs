//! Mutable map graph with invariant-checked mutators.
//!
//! # Responsibility
//! - Store components and relationships in insertion order.
//! - Enforce identity, uniqueness and finiteness invariants on every write.
//!
//! # Invariants
//! - Component ids are unique and non-empty.
//! - No relationship is a self-loop.
//! - At most one relationship joins any unordered `{source, target}` pair,
//!   regardless of type.
//! - Stored positions are always finite.
//! - Removing a component keeps relationships that reference it; those
//!   become dangling and are skipped by `live_relationships`.

use crate::model::canvas::{CanvasGeometry, Point};
use crate::model::component::{Component, ComponentId, Relationship};
use crate::model::snapshot::MapSnapshot;
use log::{debug, warn};
use rand::Rng;
use std::collections::HashSet;

/// Passive storage for the open map.
#[derive(Debug, Clone, Default)]
pub struct MapModel {
    components: Vec<Component>,
    relationships: Vec<Relationship>,
    geometry: CanvasGeometry,
}

impl MapModel {
    pub fn new(geometry: CanvasGeometry) -> Self {
        Self {
            components: Vec::new(),
            relationships: Vec::new(),
            geometry,
        }
    }

    /// Builds a model from a snapshot, dropping entries that break invariants.
    pub fn from_snapshot(geometry: CanvasGeometry, snapshot: &MapSnapshot) -> Self {
        let mut model = Self::new(geometry);
        model.load_snapshot(snapshot);
        model
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All stored relationships, dangling ones included.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|component| &component.id == id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.component(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.relationships.is_empty()
    }

    /// Whether both endpoints of `relationship` resolve to live components.
    pub fn is_live(&self, relationship: &Relationship) -> bool {
        self.contains(&relationship.source) && self.contains(&relationship.target)
    }

    /// Relationships whose endpoints both resolve, in insertion order.
    pub fn live_relationships(&self) -> Vec<&Relationship> {
        let ids: HashSet<&ComponentId> = self.components.iter().map(|c| &c.id).collect();
        self.relationships
            .iter()
            .filter(|rel| ids.contains(&rel.source) && ids.contains(&rel.target))
            .collect()
    }

    /// First component (in sequence order) whose center lies strictly within `radius`.
    pub fn component_at(&self, point: Point, radius: f64) -> Option<&Component> {
        self.components
            .iter()
            .find(|component| component.position().distance_to(point) < radius)
    }

    /// Adds a component at a random position inside the plot area.
    pub fn add_component(&mut self, name: impl Into<String>) -> Component {
        self.add_component_with_rng(name, &mut rand::thread_rng())
    }

    /// Same as [`MapModel::add_component`] with a caller-supplied RNG.
    pub fn add_component_with_rng<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        rng: &mut R,
    ) -> Component {
        let geometry = self.geometry;
        let x = geometry.plot_left() + rng.gen::<f64>() * geometry.plot_width();
        let y = geometry.plot_top() + rng.gen::<f64>() * geometry.plot_height();
        let component = Component::new(ComponentId::generate(), name, x, y);
        self.push_component(component.clone());
        component
    }

    /// Adds a component at a caller-specified position.
    ///
    /// Returns `None` without mutation when the position is not finite.
    pub fn add_component_at(&mut self, name: impl Into<String>, x: f64, y: f64) -> Option<Component> {
        if !x.is_finite() || !y.is_finite() {
            debug!("event=component_add module=map status=skipped reason=non_finite");
            return None;
        }
        let component = Component::new(ComponentId::generate(), name, x, y);
        self.push_component(component.clone());
        Some(component)
    }

    /// Inserts a component keeping its existing id (import/restore path).
    ///
    /// Refused when the id is empty or taken, or the position is not finite.
    pub fn insert_component(&mut self, component: Component) -> bool {
        if component.id.is_empty() || !component.has_finite_position() {
            debug!("event=component_insert module=map status=skipped reason=invalid");
            return false;
        }
        if self.contains(&component.id) {
            debug!(
                "event=component_insert module=map status=skipped reason=duplicate_id id={}",
                component.id
            );
            return false;
        }
        self.push_component(component);
        true
    }

    pub fn rename_component(&mut self, id: &ComponentId, new_name: impl Into<String>) -> bool {
        match self.components.iter_mut().find(|component| &component.id == id) {
            Some(component) => {
                component.name = new_name.into();
                debug!("event=component_rename module=map status=ok id={id}");
                true
            }
            None => false,
        }
    }

    /// Moves a component. Finite coordinates are stored as-is (no clamping).
    pub fn move_component(&mut self, id: &ComponentId, x: f64, y: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match self.components.iter_mut().find(|component| &component.id == id) {
            Some(component) => {
                component.x = x;
                component.y = y;
                true
            }
            None => false,
        }
    }

    /// Removes a component; relationships referencing it are kept as dangling.
    pub fn remove_component(&mut self, id: &ComponentId) -> Option<Component> {
        let index = self.components.iter().position(|component| &component.id == id)?;
        let removed = self.components.remove(index);
        let dangling = self
            .relationships
            .iter()
            .filter(|rel| rel.references(id))
            .count();
        debug!("event=component_remove module=map status=ok id={id} dangling_relationships={dangling}");
        Some(removed)
    }

    /// Appends a relationship unless it is a self-loop, has an empty
    /// endpoint, or the pair is already joined in either direction.
    pub fn add_relationship(
        &mut self,
        source: &ComponentId,
        target: &ComponentId,
        kind: &str,
    ) -> bool {
        if source.is_empty() || target.is_empty() || source == target {
            debug!("event=relationship_add module=map status=skipped reason=invalid_endpoints");
            return false;
        }
        if self.has_relationship_between(source, target) {
            debug!(
                "event=relationship_add module=map status=skipped reason=duplicate source={source} target={target}"
            );
            return false;
        }
        let relationship = Relationship::new(source.clone(), target.clone(), kind);
        debug!(
            "event=relationship_add module=map status=ok source={source} target={target} kind={}",
            relationship.kind
        );
        self.relationships.push(relationship);
        true
    }

    pub fn has_relationship_between(&self, a: &ComponentId, b: &ComponentId) -> bool {
        self.relationships.iter().any(|rel| rel.joins(a, b))
    }

    /// Empties both sequences in one step.
    pub fn clear(&mut self) {
        self.components.clear();
        self.relationships.clear();
        debug!("event=map_clear module=map status=ok");
    }

    /// Replaces the model content with `snapshot`, sanitizing on the way in.
    pub fn load_snapshot(&mut self, snapshot: &MapSnapshot) {
        self.clear();
        let mut dropped_components = 0usize;
        for component in &snapshot.components {
            if !self.insert_component(component.clone()) {
                dropped_components += 1;
            }
        }
        let mut dropped_relationships = 0usize;
        for relationship in &snapshot.relationships {
            if !self.add_relationship(&relationship.source, &relationship.target, &relationship.kind)
            {
                dropped_relationships += 1;
            }
        }
        if dropped_components > 0 || dropped_relationships > 0 {
            warn!(
                "event=snapshot_load module=map status=sanitized dropped_components={dropped_components} dropped_relationships={dropped_relationships}"
            );
        }
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::new(self.components.clone(), self.relationships.clone())
    }

    fn push_component(&mut self, component: Component) {
        debug!("event=component_add module=map status=ok id={}", component.id);
        self.components.push(component);
    }
}

#[cfg(test)]
mod tests {
    use super::MapModel;
    use crate::model::canvas::{CanvasGeometry, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_placement_stays_inside_plot_area() {
        let mut model = MapModel::default();
        let mut rng = StdRng::seed_from_u64(7);
        for index in 0..50 {
            let component = model.add_component_with_rng(format!("n{index}"), &mut rng);
            assert!((40.0..=760.0).contains(&component.x));
            assert!((40.0..=560.0).contains(&component.y));
        }
        assert_eq!(model.components().len(), 50);
    }

    #[test]
    fn hit_test_uses_strict_radius_and_sequence_order() {
        let mut model = MapModel::new(CanvasGeometry::default());
        let first = model.add_component_at("first", 100.0, 100.0).unwrap();
        model.add_component_at("second", 105.0, 100.0).unwrap();

        let hit = model.component_at(Point::new(103.0, 100.0), 16.0).unwrap();
        assert_eq!(hit.id, first.id);
        assert!(model.component_at(Point::new(116.0, 100.0), 16.0).is_some());
        assert!(model.component_at(Point::new(100.0, 116.0), 16.0).is_none());
    }
}
