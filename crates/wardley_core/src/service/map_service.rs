//! Map/version use-case service.
//!
//! # Responsibility
//! - Thread explicit application state (current map, notification, loading
//!   flag, version list) through create/save/restore/compare flows.
//! - Turn every failure into an error notification.
//!
//! # Invariants
//! - Saving without a current map id never reaches the repository.
//! - A failed operation leaves the previous valid state in place, apart from
//!   the notification.
//! - The map model itself is never held here; snapshots flow in and out.

use crate::map::diff::{diff_snapshots, MapDiff};
use crate::model::snapshot::MapSnapshot;
use crate::repo::map_repo::{MapRepository, RepoError};
use crate::wire::{
    error_message, AnalyzeMapRequest, CreateMapRequest, MapId, MapIdError, Notification,
    SaveVersionRequest, VersionSummary,
};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MISSING_MAP_ID_MESSAGE: &str =
    "Error: Map ID is missing or invalid when trying to save a version.";

pub type ServiceResult<T> = Result<T, MapServiceError>;

#[derive(Debug)]
pub enum MapServiceError {
    /// No usable map id is selected.
    MissingMapId(MapIdError),
    VersionNotFound { map_id: MapId, version: u32 },
    Repo(RepoError),
}

impl Display for MapServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMapId(err) => write!(f, "{err}"),
            Self::VersionNotFound { map_id, version } => {
                write!(f, "version {version} of map {map_id} not found")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MapServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingMapId(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::VersionNotFound { .. } => None,
        }
    }
}

impl From<RepoError> for MapServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Explicit application state shared with the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub current_map_id: Option<MapId>,
    pub notification: Option<Notification>,
    pub loading: bool,
    /// Newest first.
    pub versions: Vec<VersionSummary>,
}

/// Map/version use-case facade.
pub struct MapService<R: MapRepository> {
    repository: R,
    state: AppState,
}

impl<R: MapRepository> MapService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_map_id(&self) -> Option<MapId> {
        self.state.current_map_id
    }

    /// Creates a map from the editor's snapshot and makes it current.
    pub fn create_map(&mut self, snapshot: &MapSnapshot) -> ServiceResult<MapId> {
        let request = CreateMapRequest::manual(snapshot);
        let map_id = self.guarded("Error creating map. Please try again.", |service| {
            Ok(service.repository.create_map(&request)?)
        })?;
        let fallback = format!("Map {map_id} was created, but its versions could not be loaded.");
        let versions = self.load_versions(map_id, &fallback)?;
        self.state.current_map_id = Some(map_id);
        self.state.versions = versions;
        self.notify(Notification::success("New map created"));
        info!("event=map_create module=service status=ok map_id={map_id}");
        Ok(map_id)
    }

    /// Makes an existing map current from its textual id.
    pub fn select_map(&mut self, raw_id: &str) -> ServiceResult<MapId> {
        let map_id = match MapId::parse(raw_id) {
            Ok(map_id) => map_id,
            Err(err) => {
                self.notify(Notification::error(format!("Error: {err}")));
                return Err(MapServiceError::MissingMapId(err));
            }
        };
        let versions = self.load_versions(map_id, "Error loading versions. Please try again.")?;
        self.state.current_map_id = Some(map_id);
        self.state.versions = versions;
        Ok(map_id)
    }

    /// Saves the snapshot as the next version of the current map.
    ///
    /// A stored version whose list reload fails is still reported as an
    /// error; the previous version list stays in place.
    pub fn save_version(
        &mut self,
        snapshot: &MapSnapshot,
        comment: Option<String>,
    ) -> ServiceResult<VersionSummary> {
        let map_id = self.require_map_id()?;
        let request = SaveVersionRequest::new(snapshot, comment);
        let summary = self.guarded("Error saving version. Please try again.", |service| {
            Ok(service.repository.save_version(map_id, &request)?)
        })?;
        let versions = self.load_versions(
            map_id,
            "Version saved, but the version list could not be refreshed.",
        )?;
        self.state.versions = versions;
        self.notify(Notification::success("New version saved"));
        Ok(summary)
    }

    pub fn refresh_versions(&mut self) -> ServiceResult<&[VersionSummary]> {
        let map_id = self.require_map_id()?;
        let versions = self.load_versions(map_id, "Error loading versions. Please try again.")?;
        self.state.versions = versions;
        Ok(&self.state.versions)
    }

    /// Fetches a stored version for the editor to load.
    pub fn restore_version(&mut self, version: u32) -> ServiceResult<MapSnapshot> {
        let snapshot = self.fetch_version(version, "Error restoring version. Please try again.")?;
        self.notify(Notification::success("Version restored"));
        Ok(snapshot)
    }

    /// Diffs the editor's current snapshot against a stored version.
    pub fn compare_version(&mut self, version: u32, current: &MapSnapshot) -> ServiceResult<MapDiff> {
        let previous =
            self.fetch_version(version, "Error loading version for comparison. Please try again.")?;
        Ok(diff_snapshots(current, &previous))
    }

    /// Body for the external analysis request.
    pub fn analysis_request(&self, snapshot: &MapSnapshot) -> AnalyzeMapRequest {
        AnalyzeMapRequest::from(snapshot)
    }

    /// Host hook: marks an external request as in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
    }

    /// Host hook: reports a failed external request.
    pub fn report_request_failure(
        &mut self,
        body: Option<&Value>,
        transport_error: Option<&str>,
        fallback: &str,
    ) {
        self.state.loading = false;
        self.notify(Notification::error(error_message(body, transport_error, fallback)));
    }

    pub fn dismiss_notification(&mut self) {
        self.state.notification = None;
    }

    fn fetch_version(&mut self, version: u32, fallback: &str) -> ServiceResult<MapSnapshot> {
        let map_id = self.require_map_id()?;
        let snapshot = self.guarded(fallback, |service| {
            service
                .repository
                .get_version(map_id, version)?
                .ok_or(MapServiceError::VersionNotFound { map_id, version })
        })?;
        Ok(snapshot)
    }

    /// Lists versions without touching `state.versions`; callers commit on success.
    fn load_versions(&mut self, map_id: MapId, fallback: &str) -> ServiceResult<Vec<VersionSummary>> {
        self.guarded(fallback, |service| Ok(service.repository.list_versions(map_id)?))
    }

    fn require_map_id(&mut self) -> ServiceResult<MapId> {
        match self.state.current_map_id {
            Some(map_id) => Ok(map_id),
            None => {
                warn!("event=map_id_check module=service status=error reason=missing");
                self.notify(Notification::error(MISSING_MAP_ID_MESSAGE));
                Err(MapServiceError::MissingMapId(MapIdError::Missing))
            }
        }
    }

    /// Runs `op` with the loading flag raised and reports failures.
    fn guarded<T>(
        &mut self,
        fallback: &str,
        op: impl FnOnce(&mut Self) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        self.state.loading = true;
        let result = op(self);
        self.state.loading = false;
        if let Err(err) = &result {
            warn!("event=service_op module=service status=error error={err}");
            let message = error_message(None, Some(&err.to_string()), fallback);
            self.notify(Notification::error(message));
        }
        result
    }

    fn notify(&mut self, notification: Notification) {
        self.state.notification = Some(notification);
    }
}
