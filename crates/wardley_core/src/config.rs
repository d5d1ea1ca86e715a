//! Editor configuration.
//!
//! # Responsibility
//! - Hold the tunables shared by the map model, hit testing and import.
//! - Load overrides from JSON with every field optional.
//!
//! # Invariants
//! - A validated config has a non-empty plot area and a positive hit radius.

use crate::model::canvas::CanvasGeometry;
use crate::model::component::DEFAULT_RELATIONSHIP_KIND;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hit-test radius around a component center, in canvas units.
pub const DEFAULT_HIT_RADIUS: f64 = 16.0;

/// Editor-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasGeometry,
    pub hit_radius: f64,
    pub default_relationship_kind: String,
    /// Holding shift while completing a link keeps link mode on.
    pub continue_linking_with_shift: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasGeometry::default(),
            hit_radius: DEFAULT_HIT_RADIUS,
            default_relationship_kind: DEFAULT_RELATIONSHIP_KIND.to_string(),
            continue_linking_with_shift: true,
        }
    }
}

impl EditorConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    ///
    /// # Errors
    /// - Returns `ConfigError::Parse` for malformed JSON.
    /// - Returns `ConfigError::Invalid` when the parsed values fail `validate`.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.canvas;
        let dimensions = [canvas.width, canvas.height, canvas.margin];
        if dimensions.iter().any(|value| !value.is_finite()) {
            return Err(ConfigError::Invalid(
                "canvas dimensions must be finite".to_string(),
            ));
        }
        if canvas.margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "canvas margin must not be negative, got {}",
                canvas.margin
            )));
        }
        if canvas.plot_width() <= 0.0 || canvas.plot_height() <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "plot area is empty for {}x{} canvas with margin {}",
                canvas.width, canvas.height, canvas.margin
            )));
        }
        if !self.hit_radius.is_finite() || self.hit_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hit_radius must be positive, got {}",
                self.hit_radius
            )));
        }
        if self.default_relationship_kind.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_relationship_kind must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid editor config: {err}"),
            Self::Invalid(message) => write!(f, "invalid editor config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
