//! Component and relationship records.
//!
//! # Responsibility
//! - Define the node (`Component`) and edge (`Relationship`) shapes.
//! - Keep one canonical endpoint naming (`source`/`target`) internally.
//!
//! # Invariants
//! - `ComponentId` is stable text; numeric ids from older payloads are
//!   converted to text on input and always serialized as text.
//! - A relationship kind is never blank; blank input falls back to
//!   `DEFAULT_RELATIONSHIP_KIND`.
//! - `parent`/`child` endpoint names are accepted on input only.

use crate::model::canvas::Point;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Relationship kind used when the user leaves the type blank.
pub const DEFAULT_RELATIONSHIP_KIND: &str = "depends_on";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Opaque, text-comparable component identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh id that is never reused for another component.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Empty ids are treated as "no component" by every mutator.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for ComponentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Float(f64),
        }

        let text = match RawId::deserialize(deserializer)? {
            RawId::Text(value) => value,
            RawId::Signed(value) => value.to_string(),
            RawId::Unsigned(value) => value.to_string(),
            RawId::Float(value) => value.to_string(),
        };
        Ok(Self(text))
    }
}

/// A node on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    #[serde(default)]
    pub name: String,
    /// Canvas X; evolution grows to the right.
    pub x: f64,
    /// Canvas Y; visibility grows upward (smaller Y).
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            description: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn has_finite_position(&self) -> bool {
        self.position().is_finite()
    }

    /// Label used for display; falls back to the id for unnamed components.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            self.name.as_str()
        }
    }
}

/// A directed, typed dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRelationship")]
pub struct Relationship {
    pub source: ComponentId,
    pub target: ComponentId,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Relationship {
    pub fn new(
        source: impl Into<ComponentId>,
        target: impl Into<ComponentId>,
        kind: impl AsRef<str>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: normalize_relationship_kind(kind.as_ref())
                .unwrap_or_else(|| DEFAULT_RELATIONSHIP_KIND.to_string()),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn references(&self, id: &ComponentId) -> bool {
        &self.source == id || &self.target == id
    }

    /// Returns whether this edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: &ComponentId, b: &ComponentId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

/// Trims and collapses whitespace in a user-entered relationship kind.
///
/// Returns `None` when the input is blank.
pub fn normalize_relationship_kind(raw: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// Input shape accepting both `source/target` and `parent/child` naming.
#[derive(Deserialize)]
struct RawRelationship {
    #[serde(default)]
    source: Option<ComponentId>,
    #[serde(default)]
    target: Option<ComponentId>,
    #[serde(default)]
    parent: Option<ComponentId>,
    #[serde(default)]
    child: Option<ComponentId>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl TryFrom<RawRelationship> for Relationship {
    type Error = String;

    fn try_from(raw: RawRelationship) -> Result<Self, Self::Error> {
        let source = raw
            .source
            .or(raw.parent)
            .ok_or_else(|| "relationship is missing `source`".to_string())?;
        let target = raw
            .target
            .or(raw.child)
            .ok_or_else(|| "relationship is missing `target`".to_string())?;
        Ok(Relationship::new(
            source,
            target,
            raw.kind.unwrap_or_default(),
        ))
    }
}
