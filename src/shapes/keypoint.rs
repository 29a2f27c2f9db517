//! Single keypoint algebra.

use serde::{Deserialize, Serialize};

use crate::constants::VERTEX_HIT_THRESHOLD;
use crate::geometry::{Point, distance};

/// A standalone point annotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub class_id: u32,
    pub x: f64,
    pub y: f64,
}

impl Keypoint {
    /// Create a keypoint of class `class_id` at `(x, y)`.
    pub fn new(class_id: u32, x: f64, y: f64) -> Self {
        Self { class_id, x, y }
    }

    /// Replace the position outright; callers clamp beforehand.
    #[must_use]
    pub fn move_to(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Relative translation, used by generic shape moves.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        self.move_to(self.x + dx, self.y + dy)
    }

    /// Position as a [`Point`].
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Hit-test within the default radius.
    pub fn is_near(&self, x: f64, y: f64) -> bool {
        self.is_near_within(x, y, VERTEX_HIT_THRESHOLD)
    }

    /// Whether `(x, y)` lies within `threshold` of the keypoint.
    pub fn is_near_within(&self, x: f64, y: f64, threshold: f64) -> bool {
        distance(self.position(), Point::new(x, y)) < threshold
    }
}
