use serde_json::json;
use wardley_core::wire::{
    error_message, AnalyzeMapRequest, CreateMapRequest, CreateMapResponse, MapId, VersionSummary,
};
use wardley_core::{Component, MapSnapshot, Relationship};

const FALLBACK: &str = "Error saving version. Please try again.";

#[test]
fn detail_list_messages_are_joined() {
    let body = json!({"detail": [{"msg": "a"}, {"msg": "b"}]});
    assert_eq!(error_message(Some(&body), Some("boom"), FALLBACK), "a; b");
}

#[test]
fn string_detail_and_string_body_are_used_verbatim() {
    let detail = json!({"detail": "Map not found"});
    assert_eq!(error_message(Some(&detail), None, FALLBACK), "Map not found");

    let text = json!("Internal Server Error");
    assert_eq!(error_message(Some(&text), None, FALLBACK), "Internal Server Error");
}

#[test]
fn object_detail_and_other_bodies_are_stringified() {
    let detail = json!({"detail": {"code": 7}});
    assert_eq!(error_message(Some(&detail), None, FALLBACK), r#"{"code":7}"#);

    let body = json!({"error": "nope"});
    assert_eq!(error_message(Some(&body), None, FALLBACK), r#"{"error":"nope"}"#);
}

#[test]
fn transport_text_then_fallback() {
    assert_eq!(
        error_message(None, Some("Network Error"), FALLBACK),
        "Network Error"
    );
    assert_eq!(error_message(None, Some("  "), FALLBACK), FALLBACK);
    assert_eq!(error_message(None, None, FALLBACK), FALLBACK);
}

#[test]
fn map_id_accepts_number_or_numeric_text() {
    let from_number: CreateMapResponse = serde_json::from_value(json!({"id": 12})).unwrap();
    let from_text: CreateMapResponse = serde_json::from_value(json!({"id": "12"})).unwrap();
    assert_eq!(from_number.id, MapId::new(12).unwrap());
    assert_eq!(from_text, from_number);

    assert!(serde_json::from_value::<CreateMapResponse>(json!({"id": "twelve"})).is_err());
    assert!(serde_json::from_value::<CreateMapResponse>(json!({"id": null})).is_err());
}

#[test]
fn manual_create_request_matches_backend_shape() {
    let snapshot = MapSnapshot::new(
        vec![Component::new("1", "User", 100.0, 100.0)],
        Vec::new(),
    );
    let value = serde_json::to_value(CreateMapRequest::manual(&snapshot)).unwrap();

    assert_eq!(value["name"], "New Map");
    assert_eq!(value["owner_id"], "1");
    assert_eq!(value["current_version"]["description"], "Created manually");
    assert_eq!(value["current_version"]["components"][0]["id"], "1");
}

#[test]
fn analyze_request_uses_canonical_relationship_names() {
    let snapshot = MapSnapshot::new(
        vec![
            Component::new("a", "A", 1.0, 1.0),
            Component::new("b", "B", 2.0, 2.0),
        ],
        vec![Relationship::new("a", "b", "uses")],
    );
    let value = serde_json::to_value(AnalyzeMapRequest::from(&snapshot)).unwrap();
    assert_eq!(
        value["relationships"][0],
        json!({"source": "a", "target": "b", "type": "uses"})
    );
}

#[test]
fn version_summary_round_trips_through_json() {
    let summary: VersionSummary = serde_json::from_value(json!({
        "id": 3, "version": 2, "created_at": 1700000000000i64, "comment": "Version 2"
    }))
    .unwrap();
    assert_eq!(summary.version, 2);
    assert_eq!(summary.comment, "Version 2");
}
