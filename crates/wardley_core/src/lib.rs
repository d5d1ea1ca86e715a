//! Core logic for value-chain (Wardley) maps.
//! This crate owns the map model, its invariants and every derived figure.

pub mod classify;
pub mod config;
pub mod db;
pub mod export;
pub mod import;
pub mod interaction;
pub mod logging;
pub mod map;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod service;
pub mod wire;

pub use classify::{classify, Classification, EvolutionStage, VisibilityLevel};
pub use config::{ConfigError, EditorConfig};
pub use export::{export, ExportError, ExportFormat};
pub use import::{ImportError, ImportSession, OrientationPoints, PlaceholderDetector};
pub use interaction::{EditorAction, InteractionState, MapEditor, Modifiers, Prompter};
pub use logging::{default_log_level, init_logging, init_logging_from_env, logging_status};
pub use map::diff::{diff_snapshots, MapDiff};
pub use map::map_model::MapModel;
pub use map::nested_chain::{build_nested_chain, ChainRow};
pub use metrics::{analyze, MapMetrics};
pub use model::canvas::{CanvasGeometry, Point};
pub use model::component::{Component, ComponentId, Relationship};
pub use model::snapshot::MapSnapshot;
pub use repo::map_repo::{MapRepository, RepoError, RepoResult, SqliteMapRepository};
pub use service::map_service::{AppState, MapService, MapServiceError};
pub use wire::{MapId, Notification};

/// Minimal health-check API for hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
