//! Canvas editor: owns the map model and runs the gesture state machine.
//!
//! # Responsibility
//! - Interpret pointer-down/move/up/leave, click, double-click and the
//!   link-mode toggle.
//! - Apply resulting mutations through `MapModel` in event order.
//!
//! # Invariants
//! - Dragging starts only from `Idle` with link mode off.
//! - Linking never creates an edge from a node to itself.
//! - A linking source that no longer resolves is dropped, not linked.

use crate::classify::{classify_component, strategic_guidance, Classification, StrategicGuidance};
use crate::config::EditorConfig;
use crate::interaction::prompt::Prompter;
use crate::interaction::state::{EditorAction, InteractionState, Modifiers};
use crate::map::map_model::MapModel;
use crate::model::canvas::Point;
use crate::model::component::{normalize_relationship_kind, Component, ComponentId};
use crate::model::snapshot::MapSnapshot;
use log::debug;

/// Selected component plus its derived classification and strategic text.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDetails {
    pub component: Component,
    pub classification: Classification,
    pub guidance: StrategicGuidance,
}

/// Interaction layer that exclusively owns the open map.
#[derive(Debug, Clone)]
pub struct MapEditor {
    model: MapModel,
    config: EditorConfig,
    state: InteractionState,
    selected: Option<ComponentId>,
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl MapEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            model: MapModel::new(config.canvas),
            config,
            state: InteractionState::Idle,
            selected: None,
        }
    }

    pub fn with_snapshot(config: EditorConfig, snapshot: &MapSnapshot) -> Self {
        let mut editor = Self::new(config);
        editor.model.load_snapshot(snapshot);
        editor
    }

    pub fn model(&self) -> &MapModel {
        &self.model
    }

    /// Direct model access for bulk paths such as import commit.
    pub fn model_mut(&mut self) -> &mut MapModel {
        &mut self.model
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn link_mode(&self) -> bool {
        self.state.is_linking()
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selected.as_ref().and_then(|id| self.model.component(id))
    }

    /// Detail-panel data for the current selection.
    pub fn selected_details(&self) -> Option<ComponentDetails> {
        let component = self.selected_component()?.clone();
        let classification = classify_component(&component, &self.config.canvas);
        let guidance = strategic_guidance(&classification);
        Some(ComponentDetails {
            component,
            classification,
            guidance,
        })
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.model.snapshot()
    }

    /// Adds a component at a random position; blank names become `C{n}`.
    pub fn add_component(&mut self, name: Option<&str>) -> Component {
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("C{}", self.model.components().len() + 1),
        };
        self.model.add_component(name)
    }

    pub fn pointer_down(&mut self, point: Point) -> Vec<EditorAction> {
        if self.state != InteractionState::Idle {
            return Vec::new();
        }
        if let Some(component) = self.model.component_at(point, self.config.hit_radius) {
            let offset = point - component.position();
            debug!("event=drag_start module=interaction id={}", component.id);
            self.state = InteractionState::Dragging {
                id: component.id.clone(),
                offset,
            };
        }
        Vec::new()
    }

    pub fn pointer_move(&mut self, point: Point) -> Vec<EditorAction> {
        let InteractionState::Dragging { id, offset } = &self.state else {
            return Vec::new();
        };
        let target = point - *offset;
        if self.model.move_component(id, target.x, target.y) {
            vec![EditorAction::ComponentMoved {
                id: id.clone(),
                x: target.x,
                y: target.y,
            }]
        } else {
            Vec::new()
        }
    }

    pub fn pointer_up(&mut self) -> Vec<EditorAction> {
        self.end_drag();
        Vec::new()
    }

    pub fn pointer_leave(&mut self) -> Vec<EditorAction> {
        self.end_drag();
        Vec::new()
    }

    /// Enters link mode from `Idle`, or cancels it while linking.
    ///
    /// Ignored during an active drag.
    pub fn toggle_link_mode(&mut self) -> Vec<EditorAction> {
        match self.state {
            InteractionState::Idle => {
                self.state = InteractionState::Linking { source: None };
                vec![EditorAction::LinkModeChanged(true)]
            }
            InteractionState::Linking { .. } => {
                self.state = InteractionState::Idle;
                vec![EditorAction::LinkModeChanged(false)]
            }
            InteractionState::Dragging { .. } => Vec::new(),
        }
    }

    pub fn click(
        &mut self,
        point: Point,
        modifiers: Modifiers,
        prompter: &mut dyn Prompter,
    ) -> Vec<EditorAction> {
        let hit = self
            .model
            .component_at(point, self.config.hit_radius)
            .map(|component| component.id.clone());

        let source = match &self.state {
            InteractionState::Linking { source } => source.clone(),
            _ => return self.select(hit),
        };
        let Some(clicked) = hit else {
            return Vec::new();
        };

        let Some(source) = source else {
            self.state = InteractionState::Linking {
                source: Some(clicked.clone()),
            };
            return vec![EditorAction::LinkSourceSelected(clicked)];
        };
        if source == clicked {
            return Vec::new();
        }

        let (Some(source_component), Some(target_component)) =
            (self.model.component(&source), self.model.component(&clicked))
        else {
            debug!("event=link module=interaction status=skipped reason=stale_source");
            self.state = InteractionState::Linking { source: None };
            return Vec::new();
        };

        let kind = prompter
            .relationship_kind(source_component, target_component)
            .and_then(|raw| normalize_relationship_kind(&raw))
            .unwrap_or_else(|| self.config.default_relationship_kind.clone());

        let mut actions = Vec::new();
        if self.model.add_relationship(&source, &clicked, &kind) {
            if let Some(added) = self.model.relationships().last() {
                actions.push(EditorAction::RelationshipAdded(added.clone()));
            }
        }

        if modifiers.shift && self.config.continue_linking_with_shift {
            self.state = InteractionState::Linking { source: None };
        } else {
            self.state = InteractionState::Idle;
            actions.push(EditorAction::LinkModeChanged(false));
        }
        actions
    }

    /// Renames the double-clicked node while `Idle`.
    pub fn double_click(&mut self, point: Point, prompter: &mut dyn Prompter) -> Vec<EditorAction> {
        if self.state != InteractionState::Idle {
            return Vec::new();
        }
        let Some(component) = self.model.component_at(point, self.config.hit_radius) else {
            return Vec::new();
        };
        let id = component.id.clone();
        let new_name = match prompter.component_name(component) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Vec::new(),
        };
        if new_name == component.name {
            return Vec::new();
        }
        self.model.rename_component(&id, new_name.clone());
        vec![EditorAction::ComponentRenamed { id, name: new_name }]
    }

    pub fn clear_selection(&mut self) -> Vec<EditorAction> {
        self.select(None)
    }

    /// Empties the map and returns the editor to `Idle`.
    pub fn clear_map(&mut self) -> Vec<EditorAction> {
        let mut actions = self.reset_interaction();
        self.model.clear();
        actions.push(EditorAction::MapCleared);
        actions
    }

    /// Replaces the map (restore, nested chain) and returns to `Idle`.
    pub fn replace_map(&mut self, snapshot: &MapSnapshot) -> Vec<EditorAction> {
        let mut actions = self.reset_interaction();
        self.model.load_snapshot(snapshot);
        actions.push(EditorAction::MapReplaced);
        actions
    }

    fn select(&mut self, hit: Option<ComponentId>) -> Vec<EditorAction> {
        if self.selected == hit {
            return Vec::new();
        }
        self.selected = hit.clone();
        vec![EditorAction::SelectionChanged(hit)]
    }

    fn end_drag(&mut self) {
        if self.state.is_dragging() {
            self.state = InteractionState::Idle;
        }
    }

    fn reset_interaction(&mut self) -> Vec<EditorAction> {
        let mut actions = Vec::new();
        if self.state.is_linking() {
            actions.push(EditorAction::LinkModeChanged(false));
        }
        self.state = InteractionState::Idle;
        if self.selected.take().is_some() {
            actions.push(EditorAction::SelectionChanged(None));
        }
        actions
    }
}
