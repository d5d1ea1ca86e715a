//! Snapshot export adapters.
//!
//! # Responsibility
//! - Serialize a snapshot as pretty JSON or as a standalone SVG document.
//!
//! # Invariants
//! - Export never mutates the snapshot.
//! - PNG is produced by the host rasterizing the SVG output.

mod svg;

use crate::model::canvas::CanvasGeometry;
use crate::model::snapshot::MapSnapshot;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use svg::render_svg;

/// Base name of exported files.
pub const EXPORT_BASENAME: &str = "wardley-map";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json;charset=utf-8",
            Self::Svg => "image/svg+xml;charset=utf-8",
        }
    }

    /// Suggested download name, e.g. `wardley-map.svg`.
    pub fn file_name(self) -> String {
        format!("{EXPORT_BASENAME}.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "png" => Err(ExportError::HostRendered("png")),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    UnsupportedFormat(String),
    /// Raster formats are rendered by the host from SVG.
    HostRendered(&'static str),
    Json(serde_json::Error),
    Format(std::fmt::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat(format) => write!(f, "unsupported export type: {format}"),
            Self::HostRendered(format) => {
                write!(f, "{format} export must be rasterized from svg by the host")
            }
            Self::Json(err) => write!(f, "json export failed: {err}"),
            Self::Format(err) => write!(f, "svg export failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::UnsupportedFormat(_) | Self::HostRendered(_) => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(value: std::fmt::Error) -> Self {
        Self::Format(value)
    }
}

/// Renders `snapshot` in `format`.
pub fn export(
    format: ExportFormat,
    snapshot: &MapSnapshot,
    geometry: &CanvasGeometry,
) -> Result<String, ExportError> {
    let output = match format {
        ExportFormat::Json => serde_json::to_string_pretty(snapshot)?,
        ExportFormat::Svg => render_svg(snapshot, geometry)?,
    };
    info!(
        "event=map_export module=export status=ok format={} components={} bytes={}",
        format.extension(),
        snapshot.components.len(),
        output.len()
    );
    Ok(output)
}
