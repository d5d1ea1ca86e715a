use rusqlite::Connection;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use wardley_core::db::open_db_in_memory;
use wardley_core::repo::map_repo::{MapRepository, RepoError, RepoResult, SqliteMapRepository};
use wardley_core::wire::{CreateMapRequest, SaveVersionRequest, Severity, VersionSummary};
use wardley_core::{Component, MapId, MapService, MapServiceError, MapSnapshot, Relationship};

fn sample(x: f64) -> MapSnapshot {
    MapSnapshot::new(
        vec![
            Component::new("a", "User", x, 100.0),
            Component::new("b", "Power", 700.0, 500.0),
        ],
        vec![Relationship::new("a", "b", "depends_on")],
    )
}

#[test]
fn create_map_stores_initial_version() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::try_new(&conn).unwrap();

    let map_id = repo.create_map(&CreateMapRequest::manual(&sample(100.0))).unwrap();
    let versions = repo.list_versions(map_id).unwrap();

    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version, 1);
    assert_eq!(versions[0].comment, "Initial version");
    assert_eq!(repo.get_version(map_id, 1).unwrap(), Some(sample(100.0)));
}

#[test]
fn create_without_current_version_has_no_history() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::try_new(&conn).unwrap();
    let request = CreateMapRequest {
        current_version: None,
        ..CreateMapRequest::manual(&MapSnapshot::default())
    };

    let map_id = repo.create_map(&request).unwrap();
    assert!(repo.list_versions(map_id).unwrap().is_empty());
}

#[test]
fn versions_increment_and_list_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::try_new(&conn).unwrap();
    let map_id = repo.create_map(&CreateMapRequest::manual(&sample(100.0))).unwrap();

    let second = repo
        .save_version(map_id, &SaveVersionRequest::new(&sample(150.0), None))
        .unwrap();
    let third = repo
        .save_version(
            map_id,
            &SaveVersionRequest::new(&sample(200.0), Some("moved user".to_string())),
        )
        .unwrap();

    assert_eq!((second.version, second.comment.as_str()), (2, "Version 2"));
    assert_eq!((third.version, third.comment.as_str()), (3, "moved user"));

    let listed: Vec<u32> = repo
        .list_versions(map_id)
        .unwrap()
        .iter()
        .map(|summary| summary.version)
        .collect();
    assert_eq!(listed, vec![3, 2, 1]);
    assert_eq!(repo.get_version(map_id, 2).unwrap(), Some(sample(150.0)));
    assert_eq!(repo.get_version(map_id, 9).unwrap(), None);
}

#[test]
fn saving_to_unknown_map_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::try_new(&conn).unwrap();
    let missing = MapId::new(42).unwrap();

    let err = repo
        .save_version(missing, &SaveVersionRequest::new(&sample(1.0), None))
        .unwrap_err();
    assert!(matches!(err, RepoError::MapNotFound(id) if id == missing));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    match SqliteMapRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection { actual_version, .. }) => {
            assert_eq!(actual_version, 0)
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be rejected"),
    }
}

#[test]
fn service_save_without_map_id_never_reaches_repository() {
    let conn = open_db_in_memory().unwrap();
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn).unwrap());

    let err = service.save_version(&sample(1.0), None).unwrap_err();

    assert!(matches!(err, MapServiceError::MissingMapId(_)));
    let notification = service.state().notification.clone().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert!(notification.message.contains("Map ID is missing"));
    let stored: i64 = conn
        .query_row("SELECT COUNT(*) FROM map_versions;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, 0);
}

#[test]
fn service_create_save_restore_and_compare() {
    let conn = open_db_in_memory().unwrap();
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn).unwrap());

    let map_id = service.create_map(&sample(100.0)).unwrap();
    assert_eq!(service.current_map_id(), Some(map_id));
    assert_eq!(service.state().versions.len(), 1);

    service.save_version(&sample(300.0), None).unwrap();
    let state = service.state();
    assert_eq!(state.versions[0].version, 2);
    assert_eq!(
        state.notification.as_ref().map(|n| n.message.as_str()),
        Some("New version saved")
    );
    assert!(!state.loading);

    let restored = service.restore_version(1).unwrap();
    assert_eq!(restored, sample(100.0));

    let diff = service.compare_version(1, &sample(300.0)).unwrap();
    assert_eq!(diff.moved_components.len(), 1);
    assert_eq!(diff.moved_components[0].from.x, 100.0);
    assert_eq!(diff.moved_components[0].to.x, 300.0);
}

#[test]
fn service_missing_version_becomes_error_notification() {
    let conn = open_db_in_memory().unwrap();
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn).unwrap());
    service.create_map(&sample(100.0)).unwrap();
    let versions_before = service.state().versions.clone();

    let err = service.restore_version(7).unwrap_err();

    assert!(matches!(err, MapServiceError::VersionNotFound { version: 7, .. }));
    assert_eq!(service.state().versions, versions_before);
    assert_eq!(
        service.state().notification.as_ref().map(|n| n.severity),
        Some(Severity::Error)
    );
    service.dismiss_notification();
    assert!(service.state().notification.is_none());
}

#[test]
fn service_select_map_rejects_non_numeric_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.select_map("abc"),
        Err(MapServiceError::MissingMapId(_))
    ));
    assert!(service.current_map_id().is_none());
}

#[test]
fn external_failure_uses_structured_detail() {
    let conn = open_db_in_memory().unwrap();
    let mut service = MapService::new(SqliteMapRepository::try_new(&conn).unwrap());
    service.set_loading(true);

    let body = json!({"detail": [{"msg": "field required"}, {"msg": "value is not a number"}]});
    service.report_request_failure(Some(&body), Some("Network Error"), "Error fetching map analysis.");

    let state = service.state();
    assert!(!state.loading);
    assert_eq!(
        state.notification.as_ref().map(|n| n.message.as_str()),
        Some("field required; value is not a number")
    );
}

/// Store whose version listing can be switched to fail.
struct FlakyListing<'conn> {
    inner: SqliteMapRepository<'conn>,
    fail_listing: Rc<Cell<bool>>,
}

impl MapRepository for FlakyListing<'_> {
    fn create_map(&self, request: &CreateMapRequest) -> RepoResult<MapId> {
        self.inner.create_map(request)
    }

    fn save_version(&self, map_id: MapId, request: &SaveVersionRequest) -> RepoResult<VersionSummary> {
        self.inner.save_version(map_id, request)
    }

    fn list_versions(&self, map_id: MapId) -> RepoResult<Vec<VersionSummary>> {
        if self.fail_listing.get() {
            return Err(RepoError::MapNotFound(map_id));
        }
        self.inner.list_versions(map_id)
    }

    fn get_version(&self, map_id: MapId, version: u32) -> RepoResult<Option<MapSnapshot>> {
        self.inner.get_version(map_id, version)
    }
}

fn flaky_service(conn: &Connection) -> (MapService<FlakyListing<'_>>, Rc<Cell<bool>>) {
    let fail_listing = Rc::new(Cell::new(false));
    let repo = FlakyListing {
        inner: SqliteMapRepository::try_new(conn).unwrap(),
        fail_listing: Rc::clone(&fail_listing),
    };
    (MapService::new(repo), fail_listing)
}

#[test]
fn service_save_keeps_version_list_when_reload_fails() {
    let conn = open_db_in_memory().unwrap();
    let (mut service, fail_listing) = flaky_service(&conn);
    service.create_map(&sample(100.0)).unwrap();
    let versions_before = service.state().versions.clone();
    assert_eq!(versions_before.len(), 1);

    fail_listing.set(true);
    let err = service.save_version(&sample(300.0), None).unwrap_err();

    assert!(matches!(err, MapServiceError::Repo(RepoError::MapNotFound(_))));
    let state = service.state();
    assert_eq!(state.versions, versions_before);
    assert_eq!(
        state.notification.as_ref().map(|n| n.severity),
        Some(Severity::Error)
    );
    assert!(!state.loading);

    fail_listing.set(false);
    let versions = service.refresh_versions().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version, 2);
}

#[test]
fn service_create_does_not_switch_maps_when_listing_fails() {
    let conn = open_db_in_memory().unwrap();
    let (mut service, fail_listing) = flaky_service(&conn);
    fail_listing.set(true);

    assert!(service.create_map(&sample(100.0)).is_err());

    let state = service.state();
    assert!(state.current_map_id.is_none());
    assert!(state.versions.is_empty());
    assert_eq!(
        state.notification.as_ref().map(|n| n.severity),
        Some(Severity::Error)
    );
}
