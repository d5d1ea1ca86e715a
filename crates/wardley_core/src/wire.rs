//! Request/response shapes exchanged with the persistence collaborator.
//!
//! # Responsibility
//! - Define the JSON contracts for analysis, map creation and versioning.
//! - Derive a user-facing message from a failed request.
//!
//! # Invariants
//! - Ids travel as text on the wire; `MapId` also accepts numeric JSON.
//! - Relationships serialize as `source/target/type`; `parent/child` is
//!   accepted on input only (see `model::component`).

use crate::model::component::{Component, Relationship};
use crate::model::snapshot::MapSnapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MAP_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,18})\s*$").expect("map id regex must compile"));

/// Server-assigned numeric map id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MapId(i64);

impl MapId {
    pub fn new(value: i64) -> Result<Self, MapIdError> {
        if value <= 0 {
            return Err(MapIdError::Invalid(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses an id received as text.
    ///
    /// # Errors
    /// - `MapIdError::Missing` for blank input.
    /// - `MapIdError::Invalid` for anything that is not a positive integer.
    pub fn parse(raw: &str) -> Result<Self, MapIdError> {
        if raw.trim().is_empty() {
            return Err(MapIdError::Missing);
        }
        let captures = MAP_ID_RE
            .captures(raw)
            .ok_or_else(|| MapIdError::Invalid(raw.to_string()))?;
        let value: i64 = captures[1]
            .parse()
            .map_err(|_| MapIdError::Invalid(raw.to_string()))?;
        Self::new(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for MapId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for MapId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapIdVisitor;

        impl Visitor<'_> for MapIdVisitor {
            type Value = MapId;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a positive integer map id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<MapId, E> {
                MapId::new(value).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<MapId, E> {
                let value = i64::try_from(value).map_err(E::custom)?;
                MapId::new(value).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<MapId, E> {
                MapId::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MapIdVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapIdError {
    Missing,
    Invalid(String),
}

impl Display for MapIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "map id is missing"),
            Self::Invalid(raw) => write!(f, "map id is invalid: {raw:?}"),
        }
    }
}

impl Error for MapIdError {}

/// Body of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeMapRequest {
    pub components: Vec<Component>,
    pub relationships: Vec<Relationship>,
}

impl From<&MapSnapshot> for AnalyzeMapRequest {
    fn from(snapshot: &MapSnapshot) -> Self {
        Self {
            components: snapshot.components.clone(),
            relationships: snapshot.relationships.clone(),
        }
    }
}

/// Opaque analysis result: metric name to JSON value.
pub type AnalysisResult = BTreeMap<String, Value>;

/// Map content submitted with a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDraft {
    pub components: Vec<Component>,
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MapDraft {
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::new(self.components.clone(), self.relationships.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMapRequest {
    pub name: String,
    pub description: String,
    pub owner_id: String,
    #[serde(default)]
    pub current_version: Option<MapDraft>,
}

impl CreateMapRequest {
    /// Request for a map created by hand from the editor.
    pub fn manual(snapshot: &MapSnapshot) -> Self {
        Self {
            name: "New Map".to_string(),
            description: "Created manually".to_string(),
            owner_id: "1".to_string(),
            current_version: Some(MapDraft {
                components: snapshot.components.clone(),
                relationships: snapshot.relationships.clone(),
                description: Some("Created manually".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMapResponse {
    pub id: MapId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveVersionRequest {
    pub components: Vec<Component>,
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SaveVersionRequest {
    pub fn new(snapshot: &MapSnapshot, comment: Option<String>) -> Self {
        Self {
            components: snapshot.components.clone(),
            relationships: snapshot.relationships.clone(),
            comment,
        }
    }
}

/// One row of a version listing. `created_at` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub id: i64,
    pub version: u32,
    pub created_at: i64,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Message banner shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Derives a user-facing message from a failed request.
///
/// Precedence: text body, joined `detail[].msg`, text `detail`, object
/// `detail` as JSON, whole body as JSON, transport error text, `fallback`.
pub fn error_message(body: Option<&Value>, transport_error: Option<&str>, fallback: &str) -> String {
    if let Some(body) = body.filter(|body| !body.is_null()) {
        if let Value::String(text) = body {
            return text.clone();
        }
        match body.get("detail") {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .map(|item| match item.get("msg") {
                        Some(Value::String(msg)) => msg.clone(),
                        Some(other) => other.to_string(),
                        None => String::new(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            Some(Value::String(detail)) => return detail.clone(),
            Some(detail @ Value::Object(_)) => return detail.to_string(),
            _ => return body.to_string(),
        }
    }
    match transport_error.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
