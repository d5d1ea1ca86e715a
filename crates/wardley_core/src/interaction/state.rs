//! Interaction states, modifiers and host-facing actions.

use crate::model::canvas::Point;
use crate::model::component::{ComponentId, Relationship};

/// Gesture state of the canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A node follows the pointer; `offset` is pointer minus node center at
    /// pointer-down so the node does not jump.
    Dragging { id: ComponentId, offset: Point },
    /// Link mode is on; `source` is set after the first node click.
    Linking { source: Option<ComponentId> },
}

impl InteractionState {
    pub fn is_linking(&self) -> bool {
        matches!(self, Self::Linking { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Keeps link mode active after a relationship is created.
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };

    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Observable changes reported to the host after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    ComponentMoved { id: ComponentId, x: f64, y: f64 },
    ComponentRenamed { id: ComponentId, name: String },
    RelationshipAdded(Relationship),
    LinkSourceSelected(ComponentId),
    LinkModeChanged(bool),
    SelectionChanged(Option<ComponentId>),
    MapReplaced,
    MapCleared,
}
