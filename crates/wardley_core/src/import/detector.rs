//! Component detection seam for imported images.
//!
//! Real recognition is out of scope; `PlaceholderDetector` returns a fixed
//! demo layout scaled to the image's declared size.

use crate::import::session::ImageInfo;
use crate::model::canvas::Point;
use crate::model::component::{ComponentId, DEFAULT_RELATIONSHIP_KIND};

/// Candidate component in image pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedComponent {
    pub id: ComponentId,
    pub name: String,
    pub position: Point,
}

/// Candidate relationship between two detected ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedRelationship {
    pub source: ComponentId,
    pub target: ComponentId,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub components: Vec<DetectedComponent>,
    pub relationships: Vec<DetectedRelationship>,
}

impl Detection {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.relationships.is_empty()
    }
}

/// Produces candidates for one loaded image.
pub trait ComponentDetector {
    fn detect(&self, image: &ImageInfo) -> Detection;
}

/// Fixed layout: (id, name, fraction of width, fraction of height).
const PLACEHOLDER_COMPONENTS: [(&str, &str, f64, f64); 10] = [
    ("c1", "Customer", 0.196, 0.110),
    ("c2", "Online Image Manipulation", 0.118, 0.151),
    ("c3", "Online Photo Storage", 0.168, 0.192),
    ("c4", "Print", 0.338, 0.134),
    ("c5", "Web Site", 0.396, 0.205),
    ("c6", "CRM", 0.413, 0.251),
    ("c7", "Platform", 0.298, 0.339),
    ("c8", "Compute", 0.401, 0.445),
    ("c9", "Data Centre", 0.318, 0.509),
    ("c10", "Power", 0.499, 0.509),
];

const PLACEHOLDER_RELATIONSHIPS: [(&str, &str); 13] = [
    ("c1", "c2"),
    ("c1", "c4"),
    ("c1", "c5"),
    ("c2", "c3"),
    ("c3", "c5"),
    ("c4", "c5"),
    ("c5", "c6"),
    ("c5", "c7"),
    ("c6", "c8"),
    ("c7", "c8"),
    ("c8", "c9"),
    ("c8", "c10"),
    ("c9", "c10"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDetector;

impl ComponentDetector for PlaceholderDetector {
    fn detect(&self, image: &ImageInfo) -> Detection {
        let components = PLACEHOLDER_COMPONENTS
            .iter()
            .map(|(id, name, fx, fy)| DetectedComponent {
                id: ComponentId::from(*id),
                name: (*name).to_string(),
                position: Point::new(fx * image.width, fy * image.height),
            })
            .collect();
        let relationships = PLACEHOLDER_RELATIONSHIPS
            .iter()
            .map(|(source, target)| DetectedRelationship {
                source: ComponentId::from(*source),
                target: ComponentId::from(*target),
                kind: DEFAULT_RELATIONSHIP_KIND.to_string(),
            })
            .collect();
        Detection {
            components,
            relationships,
        }
    }
}
