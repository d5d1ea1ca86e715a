use wardley_core::{CanvasGeometry, ComponentId, MapModel, MapSnapshot};
use wardley_core::{Component, Relationship};

fn model_with(names: &[&str]) -> (MapModel, Vec<ComponentId>) {
    let mut model = MapModel::new(CanvasGeometry::default());
    let ids = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            model
                .add_component_at(*name, 100.0 + index as f64 * 50.0, 300.0)
                .unwrap()
                .id
        })
        .collect();
    (model, ids)
}

#[test]
fn duplicate_pair_keeps_first_relationship_regardless_of_type() {
    let (mut model, ids) = model_with(&["a", "b"]);

    assert!(model.add_relationship(&ids[0], &ids[1], "uses"));
    assert!(!model.add_relationship(&ids[0], &ids[1], "feeds"));

    assert_eq!(model.relationships().len(), 1);
    assert_eq!(model.relationships()[0].kind, "uses");
}

#[test]
fn reverse_direction_counts_as_duplicate() {
    let (mut model, ids) = model_with(&["a", "b"]);

    assert!(model.add_relationship(&ids[0], &ids[1], "depends_on"));
    assert!(!model.add_relationship(&ids[1], &ids[0], "depends_on"));
    assert_eq!(model.relationships().len(), 1);
}

#[test]
fn self_loop_is_a_no_op() {
    let (mut model, ids) = model_with(&["a"]);
    let before = model.snapshot();

    assert!(!model.add_relationship(&ids[0], &ids[0], "depends_on"));
    assert_eq!(model.snapshot(), before);
}

#[test]
fn blank_kind_defaults_to_depends_on() {
    let (mut model, ids) = model_with(&["a", "b"]);
    model.add_relationship(&ids[0], &ids[1], "  ");
    assert_eq!(model.relationships()[0].kind, "depends_on");
}

#[test]
fn removal_keeps_dangling_relationships_but_excludes_them_from_live_view() {
    let (mut model, ids) = model_with(&["a", "b", "c"]);
    model.add_relationship(&ids[0], &ids[1], "depends_on");
    model.add_relationship(&ids[1], &ids[2], "depends_on");

    let removed = model.remove_component(&ids[1]).unwrap();
    assert_eq!(removed.name, "b");

    assert_eq!(model.relationships().len(), 2);
    assert!(model.live_relationships().is_empty());
    assert!(!model.is_live(&model.relationships()[0]));
}

#[test]
fn unknown_ids_are_ignored() {
    let (mut model, _) = model_with(&["a"]);
    let ghost = ComponentId::from("ghost");
    let before = model.snapshot();

    assert!(!model.rename_component(&ghost, "x"));
    assert!(!model.move_component(&ghost, 1.0, 1.0));
    assert!(model.remove_component(&ghost).is_none());
    assert_eq!(model.snapshot(), before);
}

#[test]
fn non_finite_positions_are_refused() {
    let (mut model, ids) = model_with(&["a"]);

    assert!(model.add_component_at("nan", f64::NAN, 10.0).is_none());
    assert!(!model.move_component(&ids[0], f64::INFINITY, 10.0));
    assert_eq!(model.components().len(), 1);
    assert_eq!(model.components()[0].x, 100.0);
}

#[test]
fn move_accepts_positions_outside_the_plot() {
    let (mut model, ids) = model_with(&["a"]);
    assert!(model.move_component(&ids[0], -20.0, 900.0));
    let moved = model.component(&ids[0]).unwrap();
    assert_eq!((moved.x, moved.y), (-20.0, 900.0));
}

#[test]
fn generated_ids_are_never_reused() {
    let mut model = MapModel::default();
    let first = model.add_component("a");
    model.remove_component(&first.id);
    let second = model.add_component("a");
    assert_ne!(first.id, second.id);
}

#[test]
fn clear_empties_both_sequences() {
    let (mut model, ids) = model_with(&["a", "b"]);
    model.add_relationship(&ids[0], &ids[1], "depends_on");
    model.clear();
    assert!(model.is_empty());
    assert!(model.relationships().is_empty());
}

#[test]
fn loading_a_snapshot_sanitizes_invalid_entries() {
    let snapshot = MapSnapshot::new(
        vec![
            Component::new("a", "A", 100.0, 100.0),
            Component::new("a", "A again", 200.0, 200.0),
            Component::new("b", "B", f64::NAN, 100.0),
            Component::new("c", "C", 300.0, 300.0),
        ],
        vec![
            Relationship::new("a", "c", "depends_on"),
            Relationship::new("c", "a", "uses"),
            Relationship::new("c", "c", "depends_on"),
            Relationship::new("a", "missing", "depends_on"),
        ],
    );

    let model = MapModel::from_snapshot(CanvasGeometry::default(), &snapshot);

    let names: Vec<&str> = model.components().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(model.relationships().len(), 2);
    assert_eq!(model.live_relationships().len(), 1);
}

#[test]
fn snapshot_json_accepts_parent_child_and_numeric_ids() {
    let snapshot = MapSnapshot::from_json_str(
        r#"{
            "components": [
                {"id": 1, "name": "User", "x": 100, "y": 100},
                {"id": "2", "name": "Need", "x": 200, "y": 200}
            ],
            "relationships": [{"parent": 1, "child": "2"}]
        }"#,
    )
    .unwrap();

    assert_eq!(snapshot.components[0].id, ComponentId::from("1"));
    let relationship = &snapshot.relationships[0];
    assert_eq!(relationship.source, ComponentId::from("1"));
    assert_eq!(relationship.target, ComponentId::from("2"));
    assert_eq!(relationship.kind, "depends_on");

    let json = serde_json::to_value(relationship).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"source": "1", "target": "2", "type": "depends_on"})
    );
}
