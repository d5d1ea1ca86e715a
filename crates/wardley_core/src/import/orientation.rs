//! Orientation frame on an imported image.
//!
//! The frame is oblique: relative coordinates are scalar projections onto
//! the two basis vectors, not an affine solve. For a rectangular frame both
//! agree; for a skewed frame the projection is kept deliberately.

use crate::model::canvas::{CanvasGeometry, Point};
use serde::{Deserialize, Serialize};

/// Inset of the default orientation points from the image edges.
const DEFAULT_INSET: f64 = 0.05;

/// Which orientation point a drag applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationHandle {
    BottomLeft,
    TopLeft,
    BottomRight,
}

/// Position expressed in the orientation frame: `(0, 0)` at bottom-left,
/// `rel_y == 1` at top-left, `rel_x == 1` at bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelativePosition {
    pub rel_x: f64,
    pub rel_y: f64,
}

impl RelativePosition {
    /// Canvas position for this relative position.
    pub fn to_canvas(self, geometry: &CanvasGeometry) -> Point {
        Point::new(
            geometry.plot_left() + self.rel_x * geometry.plot_width(),
            geometry.plot_bottom() - self.rel_y * geometry.plot_height(),
        )
    }
}

/// Three reference points in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationPoints {
    pub bottom_left: Point,
    pub top_left: Point,
    pub bottom_right: Point,
}

impl OrientationPoints {
    /// Default frame inset 5% from each image edge.
    pub fn defaults_for(width: f64, height: f64) -> Self {
        let near = DEFAULT_INSET;
        let far = 1.0 - DEFAULT_INSET;
        Self {
            bottom_left: Point::new(width * near, height * far),
            top_left: Point::new(width * near, height * near),
            bottom_right: Point::new(width * far, height * far),
        }
    }

    pub fn get(&self, handle: OrientationHandle) -> Point {
        match handle {
            OrientationHandle::BottomLeft => self.bottom_left,
            OrientationHandle::TopLeft => self.top_left,
            OrientationHandle::BottomRight => self.bottom_right,
        }
    }

    /// Shifts one point by a pixel delta.
    pub fn translate(&mut self, handle: OrientationHandle, dx: f64, dy: f64) {
        let delta = Point::new(dx, dy);
        let point = match handle {
            OrientationHandle::BottomLeft => &mut self.bottom_left,
            OrientationHandle::TopLeft => &mut self.top_left,
            OrientationHandle::BottomRight => &mut self.bottom_right,
        };
        *point = *point + delta;
    }

    /// True when either basis vector has zero length.
    pub fn is_degenerate(&self) -> bool {
        let vertical = self.top_left - self.bottom_left;
        let horizontal = self.bottom_right - self.bottom_left;
        let vv = vertical.dot(vertical);
        let hh = horizontal.dot(horizontal);
        !(vv.is_finite() && hh.is_finite()) || vv == 0.0 || hh == 0.0
    }

    /// Projects an image point into the frame.
    ///
    /// Returns `None` for a degenerate frame or a non-finite result.
    pub fn project(&self, point: Point) -> Option<RelativePosition> {
        if self.is_degenerate() {
            return None;
        }
        let v = point - self.bottom_left;
        let vertical = self.top_left - self.bottom_left;
        let horizontal = self.bottom_right - self.bottom_left;
        let rel_y = v.dot(vertical) / vertical.dot(vertical);
        let rel_x = v.dot(horizontal) / horizontal.dot(horizontal);
        if !rel_x.is_finite() || !rel_y.is_finite() {
            return None;
        }
        Some(RelativePosition { rel_x, rel_y })
    }

    /// Image point straight to canvas coordinates.
    pub fn map_to_canvas(&self, point: Point, geometry: &CanvasGeometry) -> Option<Point> {
        self.project(point).map(|relative| relative.to_canvas(geometry))
    }
}
