//! Import session lifecycle.
//!
//! # Responsibility
//! - Hold the loaded image, its orientation frame and detected candidates.
//! - Apply user adjustments and commit candidates into a `MapModel`.
//!
//! # Invariants
//! - Orientation points reset only when an image is loaded.
//! - Commit is refused when there is nothing to import.
//! - A committed or closed session holds no image state.

use crate::import::detector::{ComponentDetector, DetectedComponent, DetectedRelationship};
use crate::import::orientation::{OrientationHandle, OrientationPoints};
use crate::map::map_model::MapModel;
use crate::model::canvas::{CanvasGeometry, Point};
use crate::model::component::{Component, ComponentId};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Delay hosts wait between `begin_detection` and `complete_detection`.
pub const DETECTION_DELAY: Duration = Duration::from_millis(1500);

/// Accepted image file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Svg,
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }
}

/// Declared size and format of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub width: f64,
    pub height: f64,
    pub format: ImageFormat,
}

impl ImageInfo {
    /// # Errors
    /// - `ImportError::InvalidImage` when either dimension is not a positive
    ///   finite number.
    pub fn new(width: f64, height: f64, format: ImageFormat) -> Result<Self, ImportError> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ImportError::InvalidImage(format!(
                "image size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    NoImage,
    ImageLoaded,
    Detecting,
    Detected,
}

/// Counts reported by a successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added_components: Vec<ComponentId>,
    pub added_relationships: usize,
    pub skipped_components: usize,
    pub skipped_relationships: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    NoImage,
    NotDetecting,
    NothingToImport,
    DegenerateOrientation,
    InvalidImage(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoImage => write!(f, "no image loaded"),
            Self::NotDetecting => write!(f, "detection was not started"),
            Self::NothingToImport => write!(f, "no components or relationships detected"),
            Self::DegenerateOrientation => {
                write!(f, "orientation points do not span a usable frame")
            }
            Self::InvalidImage(message) => write!(f, "invalid image: {message}"),
        }
    }
}

impl Error for ImportError {}

#[derive(Debug, Clone)]
struct LoadedImage {
    info: ImageInfo,
    orientation: OrientationPoints,
}

/// State of one import dialog.
#[derive(Debug, Clone)]
pub struct ImportSession {
    image: Option<LoadedImage>,
    detecting: bool,
    components: Vec<DetectedComponent>,
    relationships: Vec<DetectedRelationship>,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self {
            image: None,
            detecting: false,
            components: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn phase(&self) -> ImportPhase {
        match (&self.image, self.detecting) {
            (None, _) => ImportPhase::NoImage,
            (Some(_), true) => ImportPhase::Detecting,
            (Some(_), false) if self.components.is_empty() && self.relationships.is_empty() => {
                ImportPhase::ImageLoaded
            }
            (Some(_), false) => ImportPhase::Detected,
        }
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref().map(|loaded| &loaded.info)
    }

    pub fn orientation(&self) -> Option<&OrientationPoints> {
        self.image.as_ref().map(|loaded| &loaded.orientation)
    }

    pub fn candidates(&self) -> &[DetectedComponent] {
        &self.components
    }

    pub fn candidate_relationships(&self) -> &[DetectedRelationship] {
        &self.relationships
    }

    /// Loads a new image, resetting the frame and discarding candidates.
    pub fn load_image(&mut self, info: ImageInfo) {
        self.image = Some(LoadedImage {
            info,
            orientation: OrientationPoints::defaults_for(info.width, info.height),
        });
        self.detecting = false;
        self.components.clear();
        self.relationships.clear();
        info!(
            "event=import_image_load module=import status=ok format={:?} width={} height={}",
            info.format, info.width, info.height
        );
    }

    /// Starts detection; the host calls `complete_detection` after
    /// [`DETECTION_DELAY`].
    pub fn begin_detection(&mut self) -> Result<(), ImportError> {
        if self.image.is_none() {
            return Err(ImportError::NoImage);
        }
        self.detecting = true;
        self.components.clear();
        self.relationships.clear();
        Ok(())
    }

    /// Finishes detection and stores the detector's candidates.
    ///
    /// Returns the number of candidate components.
    pub fn complete_detection(
        &mut self,
        detector: &dyn ComponentDetector,
    ) -> Result<usize, ImportError> {
        let Some(loaded) = self.image.as_ref() else {
            return Err(ImportError::NoImage);
        };
        if !self.detecting {
            return Err(ImportError::NotDetecting);
        }
        let detection = detector.detect(&loaded.info);
        self.detecting = false;
        self.components = detection.components;
        self.relationships = detection.relationships;
        info!(
            "event=import_detect module=import status=ok components={} relationships={}",
            self.components.len(),
            self.relationships.len()
        );
        Ok(self.components.len())
    }

    /// Moves an orientation point by a pixel delta.
    pub fn drag_orientation_point(&mut self, handle: OrientationHandle, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        match self.image.as_mut() {
            Some(loaded) => {
                loaded.orientation.translate(handle, dx, dy);
                true
            }
            None => false,
        }
    }

    /// Moves a candidate component by a pixel delta.
    pub fn drag_candidate(&mut self, id: &ComponentId, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        match self.components.iter_mut().find(|candidate| &candidate.id == id) {
            Some(candidate) => {
                candidate.position = candidate.position + Point::new(dx, dy);
                true
            }
            None => false,
        }
    }

    pub fn can_commit(&self) -> bool {
        self.phase() == ImportPhase::Detected
    }

    /// Candidates as they would land on the canvas.
    ///
    /// Unnamed candidates are called `Component {n}` by position.
    pub fn mapped_candidates(&self, geometry: &CanvasGeometry) -> Result<Vec<Component>, ImportError> {
        let loaded = self.image.as_ref().ok_or(ImportError::NoImage)?;
        self.components
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let position = loaded
                    .orientation
                    .map_to_canvas(candidate.position, geometry)
                    .ok_or(ImportError::DegenerateOrientation)?;
                let name = if candidate.name.trim().is_empty() {
                    format!("Component {}", index + 1)
                } else {
                    candidate.name.clone()
                };
                Ok(Component::new(
                    candidate.id.clone(),
                    name,
                    position.x,
                    position.y,
                ))
            })
            .collect()
    }

    /// Appends mapped candidates and relationships to `model`, then closes
    /// the session.
    ///
    /// Candidates whose id already exists in the model are skipped, together
    /// with candidate relationships touching them.
    ///
    /// # Errors
    /// - `NoImage` / `NothingToImport` when commit is not enabled.
    /// - `DegenerateOrientation` when the frame cannot be projected; the
    ///   model is left untouched.
    pub fn commit(&mut self, model: &mut MapModel) -> Result<ImportOutcome, ImportError> {
        if self.image.is_none() {
            return Err(ImportError::NoImage);
        }
        if !self.can_commit() {
            return Err(ImportError::NothingToImport);
        }
        let mapped = self.mapped_candidates(model.geometry())?;

        let mut outcome = ImportOutcome::default();
        let mut refused: HashSet<ComponentId> = HashSet::new();
        for component in mapped {
            let id = component.id.clone();
            if model.insert_component(component) {
                outcome.added_components.push(id);
            } else {
                outcome.skipped_components += 1;
                refused.insert(id);
            }
        }
        for relationship in &self.relationships {
            let touches_refused =
                refused.contains(&relationship.source) || refused.contains(&relationship.target);
            if !touches_refused
                && model.add_relationship(&relationship.source, &relationship.target, &relationship.kind)
            {
                outcome.added_relationships += 1;
            } else {
                outcome.skipped_relationships += 1;
            }
        }

        if outcome.skipped_components > 0 || outcome.skipped_relationships > 0 {
            warn!(
                "event=import_commit module=import status=partial skipped_components={} skipped_relationships={}",
                outcome.skipped_components, outcome.skipped_relationships
            );
        }
        info!(
            "event=import_commit module=import status=ok components={} relationships={}",
            outcome.added_components.len(),
            outcome.added_relationships
        );
        self.close();
        Ok(outcome)
    }

    /// Discards image, frame and candidates.
    pub fn close(&mut self) {
        *self = Self::new();
    }
}
