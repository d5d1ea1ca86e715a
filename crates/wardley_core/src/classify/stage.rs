//! Evolution stage and visibility level bins.

use crate::model::canvas::{CanvasGeometry, Point};
use crate::model::component::Component;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Evolution stage derived from the horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvolutionStage {
    Genesis,
    Custom,
    Product,
    Commodity,
}

impl EvolutionStage {
    /// All stages in axis order (left to right).
    pub const ALL: [EvolutionStage; 4] = [
        EvolutionStage::Genesis,
        EvolutionStage::Custom,
        EvolutionStage::Product,
        EvolutionStage::Commodity,
    ];

    /// Bins a normalized X value: `[0,0.25)`, `[0.25,0.5)`, `[0.5,0.75)`, rest.
    pub fn from_normalized(normalized_x: f64) -> Self {
        if normalized_x < 0.25 {
            Self::Genesis
        } else if normalized_x < 0.5 {
            Self::Custom
        } else if normalized_x < 0.75 {
            Self::Product
        } else {
            Self::Commodity
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Genesis => "Genesis",
            Self::Custom => "Custom",
            Self::Product => "Product",
            Self::Commodity => "Commodity",
        }
    }

    /// Genesis and Custom are the early (still evolving) stages.
    pub fn is_early(self) -> bool {
        matches!(self, Self::Genesis | Self::Custom)
    }

    /// Stage to the right on the axis; `None` for Commodity.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Genesis => Some(Self::Custom),
            Self::Custom => Some(Self::Product),
            Self::Product => Some(Self::Commodity),
            Self::Commodity => None,
        }
    }
}

impl Display for EvolutionStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility level derived from the vertical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
}

impl VisibilityLevel {
    /// All levels from most to least visible.
    pub const ALL: [VisibilityLevel; 4] = [
        VisibilityLevel::VeryHigh,
        VisibilityLevel::High,
        VisibilityLevel::Medium,
        VisibilityLevel::Low,
    ];

    pub fn from_normalized(normalized_y: f64) -> Self {
        if normalized_y > 0.75 {
            Self::VeryHigh
        } else if normalized_y > 0.5 {
            Self::High
        } else if normalized_y > 0.25 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Self::VeryHigh | Self::High)
    }
}

impl Display for VisibilityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary visibility split used by recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityBand {
    High,
    Low,
}

impl VisibilityBand {
    pub fn from_normalized(normalized_y: f64) -> Self {
        if normalized_y > 0.5 {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Result of classifying one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub normalized_x: f64,
    pub normalized_y: f64,
    pub evolution_stage: EvolutionStage,
    pub visibility_level: VisibilityLevel,
}

impl Classification {
    pub fn visibility_band(&self) -> VisibilityBand {
        VisibilityBand::from_normalized(self.normalized_y)
    }

    /// Rounded evolution readout in percent of the plot width.
    pub fn evolution_percent(&self) -> i64 {
        (self.normalized_x * 100.0).round() as i64
    }

    /// Rounded visibility readout in percent of the plot height.
    pub fn visibility_percent(&self) -> i64 {
        (self.normalized_y * 100.0).round() as i64
    }
}

/// Classifies a canvas position against `geometry`.
pub fn classify(x: f64, y: f64, geometry: &CanvasGeometry) -> Classification {
    let (normalized_x, normalized_y) = geometry.normalize(Point::new(x, y));
    Classification {
        normalized_x,
        normalized_y,
        evolution_stage: EvolutionStage::from_normalized(normalized_x),
        visibility_level: VisibilityLevel::from_normalized(normalized_y),
    }
}

pub fn classify_component(component: &Component, geometry: &CanvasGeometry) -> Classification {
    classify(component.x, component.y, geometry)
}
