//! Image import: orientation-frame remapping and the import session.
//!
//! # Responsibility
//! - Map pixel positions on an imported map image onto canvas coordinates
//!   through three user-adjustable orientation points.
//! - Drive the load -> detect -> adjust -> commit lifecycle.
//!
//! # Invariants
//! - Import only inserts through `MapModel`, so model invariants hold.
//! - Nothing is committed from a degenerate orientation frame.

pub mod detector;
pub mod orientation;
pub mod session;

pub use detector::{
    ComponentDetector, DetectedComponent, DetectedRelationship, Detection, PlaceholderDetector,
};
pub use orientation::{OrientationHandle, OrientationPoints, RelativePosition};
pub use session::{
    ImageFormat, ImageInfo, ImportError, ImportOutcome, ImportPhase, ImportSession,
    DETECTION_DELAY,
};
