//! Axis-aligned rectangle algebra.

use serde::{Deserialize, Serialize};

use crate::constants::VERTEX_HIT_THRESHOLD;
use crate::geometry::{Point, clamp_to_range, feasible_delta_range, nearest_within};

/// Axis-aligned box given by two opposite corners.
///
/// The corners are not required to be ordered; readers use min/max.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub class_id: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Corner ids, in the order used for hit-testing ties.
///
/// 1 = (x1,y1), 2 = (x2,y1), 3 = (x2,y2), 4 = (x1,y2).
pub const RECT_VERTEX_IDS: [u8; 4] = [1, 2, 3, 4];

impl Rectangle {
    /// Create a rectangle from two opposite corners.
    pub fn new(class_id: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            class_id,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// Degenerate rectangle with both corners at `p`.
    pub fn at(class_id: u32, p: Point) -> Self {
        Self::new(class_id, p.x, p.y, p.x, p.y)
    }

    /// Translate by the closest feasible delta to `(dx, dy)`.
    ///
    /// Each axis is clamped independently into the range that keeps both
    /// corner coordinates inside `[0,1]`.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        let (min_dx, max_dx) = feasible_delta_range([self.x1, self.x2]);
        let (min_dy, max_dy) = feasible_delta_range([self.y1, self.y2]);
        let dx = clamp_to_range(dx, min_dx, max_dx);
        let dy = clamp_to_range(dy, min_dy, max_dy);

        Self {
            x1: self.x1 + dx,
            x2: self.x2 + dx,
            y1: self.y1 + dy,
            y2: self.y2 + dy,
            ..*self
        }
    }

    /// Move corner `vertex_id` (1..=4) to the clamped target.
    ///
    /// Unknown ids return the rectangle unchanged.
    #[must_use]
    pub fn move_vertex(&self, x: f64, y: f64, vertex_id: u8) -> Self {
        let target = Point::new(x, y).clamped();
        let mut rect = *self;
        match vertex_id {
            1 => {
                rect.x1 = target.x;
                rect.y1 = target.y;
            }
            2 => {
                rect.x2 = target.x;
                rect.y1 = target.y;
            }
            3 => {
                rect.x2 = target.x;
                rect.y2 = target.y;
            }
            4 => {
                rect.x1 = target.x;
                rect.y2 = target.y;
            }
            _ => {}
        }
        rect
    }

    /// Corner position for a vertex id (1..=4).
    pub fn vertex(&self, vertex_id: u8) -> Option<Point> {
        match vertex_id {
            1 => Some(Point::new(self.x1, self.y1)),
            2 => Some(Point::new(self.x2, self.y1)),
            3 => Some(Point::new(self.x2, self.y2)),
            4 => Some(Point::new(self.x1, self.y2)),
            _ => None,
        }
    }

    /// All four corners in id order.
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    /// Id of the closest corner within the default hit radius.
    pub fn find_nearest_vertex(&self, x: f64, y: f64) -> Option<u8> {
        self.find_nearest_vertex_within(x, y, VERTEX_HIT_THRESHOLD)
    }

    /// Id of the closest corner strictly within `threshold`.
    pub fn find_nearest_vertex_within(&self, x: f64, y: f64, threshold: f64) -> Option<u8> {
        nearest_within(self.vertices(), Point::new(x, y), threshold)
            .map(|index| RECT_VERTEX_IDS[index])
    }

    /// Strict interior test, independent of corner order.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (x_min, y_min, x_max, y_max) = self.bounds();
        x_min < x && x < x_max && y_min < y && y < y_max
    }

    /// `(x_min, y_min, x_max, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    /// Longer of width and height.
    pub fn longest_dim_size(&self) -> f64 {
        self.width().max(self.height())
    }
}
