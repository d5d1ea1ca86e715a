//! Builds a value chain from an indented outline of component names.
//!
//! Row `i` is placed at `(100 + indent * 100, 80 + i * 80)`. Consecutive rows
//! are chained, and each indented row is also linked from the closest
//! earlier row one indent level up.

use crate::map::map_model::MapModel;
use crate::model::canvas::CanvasGeometry;
use crate::model::component::{Component, ComponentId, DEFAULT_RELATIONSHIP_KIND};
use crate::model::snapshot::MapSnapshot;
use serde::{Deserialize, Serialize};

const CHAIN_ORIGIN_X: f64 = 100.0;
const CHAIN_INDENT_STEP: f64 = 100.0;
const CHAIN_ORIGIN_Y: f64 = 80.0;
const CHAIN_ROW_STEP: f64 = 80.0;

/// One outline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRow {
    pub name: String,
    #[serde(default)]
    pub indent: u32,
}

impl ChainRow {
    pub fn new(name: impl Into<String>, indent: u32) -> Self {
        Self {
            name: name.into(),
            indent,
        }
    }
}

/// Builds the nested chain as a sanitized snapshot.
pub fn build_nested_chain(rows: &[ChainRow], geometry: CanvasGeometry) -> MapSnapshot {
    let mut model = MapModel::new(geometry);
    let mut ids: Vec<ComponentId> = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let id = ComponentId::generate();
        let x = CHAIN_ORIGIN_X + f64::from(row.indent) * CHAIN_INDENT_STEP;
        let y = CHAIN_ORIGIN_Y + index as f64 * CHAIN_ROW_STEP;
        model.insert_component(Component::new(id.clone(), row.name.trim(), x, y));
        ids.push(id);
    }

    for pair in ids.windows(2) {
        model.add_relationship(&pair[0], &pair[1], DEFAULT_RELATIONSHIP_KIND);
    }

    for (index, row) in rows.iter().enumerate() {
        if row.indent == 0 {
            continue;
        }
        let parent = rows[..index]
            .iter()
            .rposition(|candidate| Some(candidate.indent) == row.indent.checked_sub(1));
        if let Some(parent_index) = parent {
            model.add_relationship(&ids[parent_index], &ids[index], DEFAULT_RELATIONSHIP_KIND);
        }
    }

    model.snapshot()
}

#[cfg(test)]
mod tests {
    use super::{build_nested_chain, ChainRow};
    use crate::model::canvas::CanvasGeometry;

    #[test]
    fn empty_outline_builds_empty_map() {
        let snapshot = build_nested_chain(&[], CanvasGeometry::default());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn single_row_has_no_edges() {
        let snapshot = build_nested_chain(&[ChainRow::new("Only", 2)], CanvasGeometry::default());
        assert_eq!(snapshot.components.len(), 1);
        assert_eq!(snapshot.components[0].x, 300.0);
        assert!(snapshot.relationships.is_empty());
    }
}
