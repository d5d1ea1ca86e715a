use wardley_core::{diff_snapshots, Component, MapSnapshot, Relationship};

fn previous() -> MapSnapshot {
    MapSnapshot::new(
        vec![
            Component::new("a", "User", 100.0, 100.0),
            Component::new("b", "Web", 300.0, 200.0),
            Component::new("c", "Legacy", 500.0, 400.0),
        ],
        vec![
            Relationship::new("a", "b", "depends_on"),
            Relationship::new("b", "c", "depends_on"),
        ],
    )
}

#[test]
fn identical_snapshots_have_empty_diff() {
    assert!(diff_snapshots(&previous(), &previous()).is_empty());
}

#[test]
fn reports_added_removed_and_moved_components() {
    let current = MapSnapshot::new(
        vec![
            Component::new("a", "User", 100.0, 100.0),
            Component::new("b", "Web", 350.0, 200.0),
            Component::new("d", "Cloud", 700.0, 450.0),
        ],
        vec![
            Relationship::new("a", "b", "depends_on"),
            Relationship::new("b", "d", "depends_on"),
        ],
    );

    let diff = diff_snapshots(&current, &previous());

    let added: Vec<&str> = diff.added_components.iter().map(|c| c.id.as_str()).collect();
    let removed: Vec<&str> = diff.removed_components.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(added, vec!["d"]);
    assert_eq!(removed, vec!["c"]);
    assert_eq!(diff.moved_components.len(), 1);
    assert_eq!(diff.moved_components[0].id.as_str(), "b");
    assert_eq!(diff.moved_components[0].from.x, 300.0);
    assert_eq!(diff.moved_components[0].to.x, 350.0);

    assert_eq!(diff.added_relationships, vec![Relationship::new("b", "d", "depends_on")]);
    assert_eq!(diff.removed_relationships, vec![Relationship::new("b", "c", "depends_on")]);
}

#[test]
fn relationship_type_change_is_remove_plus_add() {
    let mut current = previous();
    current.relationships[0] = Relationship::new("a", "b", "uses");

    let diff = diff_snapshots(&current, &previous());
    assert_eq!(diff.added_relationships.len(), 1);
    assert_eq!(diff.removed_relationships.len(), 1);
    assert!(diff.moved_components.is_empty());
}

#[test]
fn rename_alone_is_not_a_move() {
    let mut current = previous();
    current.components[0].name = "Customer".to_string();
    assert!(diff_snapshots(&current, &previous()).is_empty());
}
