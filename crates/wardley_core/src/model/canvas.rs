//! Canvas geometry and 2-D points.
//!
//! # Invariants
//! - The usable plot area is the canvas inset by `margin` on every side.
//! - Canvas Y grows downward; visibility grows upward.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
pub const DEFAULT_PLOT_MARGIN: f64 = 40.0;

/// Point (or vector) in canvas or image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Canvas size plus the margin that bounds the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            margin: DEFAULT_PLOT_MARGIN,
        }
    }
}

impl CanvasGeometry {
    pub fn plot_left(&self) -> f64 {
        self.margin
    }

    pub fn plot_right(&self) -> f64 {
        self.width - self.margin
    }

    pub fn plot_top(&self) -> f64 {
        self.margin
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.margin
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// Maps a canvas position onto the normalized plot square.
    ///
    /// Values are not clamped: positions outside the plot area yield
    /// coordinates outside `[0, 1]`.
    pub fn normalize(&self, point: Point) -> (f64, f64) {
        let normalized_x = (point.x - self.margin) / self.plot_width();
        let normalized_y = (self.height - self.margin - point.y) / self.plot_height();
        (normalized_x, normalized_y)
    }

    /// Inverse of [`CanvasGeometry::normalize`].
    pub fn denormalize(&self, normalized_x: f64, normalized_y: f64) -> Point {
        Point::new(
            self.plot_left() + normalized_x * (self.plot_right() - self.plot_left()),
            self.plot_bottom() - normalized_y * (self.plot_bottom() - self.plot_top()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasGeometry, Point};

    #[test]
    fn plot_corners_normalize_to_unit_square() {
        let geometry = CanvasGeometry::default();
        assert_eq!(geometry.normalize(Point::new(40.0, 560.0)), (0.0, 0.0));
        assert_eq!(geometry.normalize(Point::new(760.0, 40.0)), (1.0, 1.0));
    }

    #[test]
    fn denormalize_inverts_normalize() {
        let geometry = CanvasGeometry::default();
        let point = geometry.denormalize(0.5, 0.5);
        assert_eq!(point, Point::new(400.0, 300.0));
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a - Point::new(1.0, 1.0), Point::new(2.0, 3.0));
        assert_eq!(a.distance_to(Point::default()), 5.0);
        assert_eq!(a.dot(Point::new(2.0, 0.5)), 8.0);
    }
}
