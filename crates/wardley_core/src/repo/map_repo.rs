//! Map/version repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist maps and their numbered snapshot history.
//! - Keep SQL and JSON column encoding inside the persistence boundary.
//!
//! # Invariants
//! - Version numbers per map start at 1 and increase by one per save.
//! - Listings are ordered newest version first.
//! - Stored snapshots are written and read as wire-form JSON.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::component::{Component, Relationship};
use crate::model::snapshot::MapSnapshot;
use crate::wire::{CreateMapRequest, MapId, SaveVersionRequest, VersionSummary};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INITIAL_VERSION_COMMENT: &str = "Initial version";

const NOW_MS_SQL: &str = "(CAST(strftime('%s', 'now') AS INTEGER) * 1000)";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MapNotFound(MapId),
    /// Connection schema is not at the version this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MapNotFound(id) => write!(f, "map not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "map repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Serialization(err) => write!(f, "invalid stored map content: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted map data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::MapNotFound(_) | Self::UninitializedConnection { .. } | Self::InvalidData(_) => {
                None
            }
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Persistence contract for maps and versions.
pub trait MapRepository {
    /// Creates a map; stores version 1 when a current version is supplied.
    fn create_map(&self, request: &CreateMapRequest) -> RepoResult<MapId>;
    /// Appends the next version of `map_id`.
    fn save_version(&self, map_id: MapId, request: &SaveVersionRequest) -> RepoResult<VersionSummary>;
    /// Lists versions newest first.
    fn list_versions(&self, map_id: MapId) -> RepoResult<Vec<VersionSummary>>;
    fn get_version(&self, map_id: MapId, version: u32) -> RepoResult<Option<MapSnapshot>>;
}

/// SQLite-backed map repository.
pub struct SqliteMapRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMapRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl MapRepository for SqliteMapRepository<'_> {
    fn create_map(&self, request: &CreateMapRequest) -> RepoResult<MapId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            &format!(
                "INSERT INTO maps (name, description, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, {NOW_MS_SQL}, {NOW_MS_SQL});"
            ),
            params![request.name, request.description, request.owner_id],
        )?;
        let map_id = to_map_id(tx.last_insert_rowid())?;

        if let Some(draft) = request.current_version.as_ref() {
            insert_version(
                &tx,
                map_id,
                1,
                &draft.components,
                &draft.relationships,
                INITIAL_VERSION_COMMENT,
            )?;
        }
        tx.commit()?;

        info!(
            "event=map_create module=repo status=ok map_id={map_id} with_version={}",
            request.current_version.is_some()
        );
        Ok(map_id)
    }

    fn save_version(&self, map_id: MapId, request: &SaveVersionRequest) -> RepoResult<VersionSummary> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_map_exists(&tx, map_id)?;

        let latest: Option<u32> = tx.query_row(
            "SELECT MAX(version) FROM map_versions WHERE map_id = ?1;",
            [map_id.get()],
            |row| row.get(0),
        )?;
        let version = latest.map_or(1, |latest| latest + 1);
        let comment = match request.comment.as_deref().map(str::trim) {
            Some(comment) if !comment.is_empty() => comment.to_string(),
            _ => format!("Version {version}"),
        };

        let id = insert_version(
            &tx,
            map_id,
            version,
            &request.components,
            &request.relationships,
            &comment,
        )?;
        tx.execute(
            &format!("UPDATE maps SET updated_at = {NOW_MS_SQL} WHERE id = ?1;"),
            [map_id.get()],
        )?;
        let summary = tx.query_row(
            "SELECT id, version, created_at, comment FROM map_versions WHERE id = ?1;",
            [id],
            parse_summary_row,
        )?;
        tx.commit()?;

        info!("event=version_save module=repo status=ok map_id={map_id} version={version}");
        Ok(summary)
    }

    fn list_versions(&self, map_id: MapId) -> RepoResult<Vec<VersionSummary>> {
        ensure_map_exists(self.conn, map_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, version, created_at, comment
             FROM map_versions
             WHERE map_id = ?1
             ORDER BY version DESC;",
        )?;
        let rows = stmt.query_map([map_id.get()], parse_summary_row)?;
        let mut versions = Vec::new();
        for row in rows {
            versions.push(row?);
        }
        Ok(versions)
    }

    fn get_version(&self, map_id: MapId, version: u32) -> RepoResult<Option<MapSnapshot>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT components, relationships
                 FROM map_versions
                 WHERE map_id = ?1 AND version = ?2;",
                params![map_id.get(), version],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((components, relationships)) = row else {
            return Ok(None);
        };
        let components: Vec<Component> = serde_json::from_str(&components)?;
        let relationships: Vec<Relationship> = serde_json::from_str(&relationships)?;
        Ok(Some(MapSnapshot::new(components, relationships)))
    }
}

fn insert_version(
    conn: &Connection,
    map_id: MapId,
    version: u32,
    components: &[Component],
    relationships: &[Relationship],
    comment: &str,
) -> RepoResult<i64> {
    let components = serde_json::to_string(components)?;
    let relationships = serde_json::to_string(relationships)?;
    conn.execute(
        &format!(
            "INSERT INTO map_versions (map_id, version, components, relationships, comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, {NOW_MS_SQL});"
        ),
        params![map_id.get(), version, components, relationships, comment],
    )?;
    Ok(conn.last_insert_rowid())
}

fn ensure_map_exists(conn: &Connection, map_id: MapId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM maps WHERE id = ?1);",
        [map_id.get()],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MapNotFound(map_id))
    }
}

fn to_map_id(raw: i64) -> RepoResult<MapId> {
    MapId::new(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}

fn parse_summary_row(row: &Row<'_>) -> rusqlite::Result<VersionSummary> {
    Ok(VersionSummary {
        id: row.get(0)?,
        version: row.get(1)?,
        created_at: row.get(2)?,
        comment: row.get(3)?,
    })
}
