//! Pose algebra: a bounding box plus an ordered list of keypoints.

use serde::{Deserialize, Serialize};

use crate::constants::VERTEX_HIT_THRESHOLD;
use crate::geometry::{Point, clamp_to_range, distance, feasible_delta_range, nearest_within};

/// One keypoint of a pose. `class_id` is the keypoint id within the pose class.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseKeypoint {
    pub class_id: u32,
    pub x: f64,
    pub y: f64,
    /// Visibility flag.
    pub v: bool,
}

impl PoseKeypoint {
    /// Create a pose keypoint with keypoint id `class_id`.
    pub fn new(class_id: u32, x: f64, y: f64, v: bool) -> Self {
        Self { class_id, x, y, v }
    }

    /// Position as a [`Point`].
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pose annotation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub class_id: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub keypoints: Vec<PoseKeypoint>,
}

impl Pose {
    /// Create a pose box with no keypoints.
    pub fn new(class_id: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            class_id,
            x1,
            y1,
            x2,
            y2,
            keypoints: Vec::new(),
        }
    }

    /// Degenerate pose box anchored at `p`, no keypoints.
    pub fn at(class_id: u32, p: Point) -> Self {
        Self::new(class_id, p.x, p.y, p.x, p.y)
    }

    /// Box corner `index`: 0 = (x1,y1), 1 = (x2,y1), 2 = (x2,y2), 3 = (x1,y2).
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices().get(index).copied()
    }

    /// Box corners in index order.
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }

    /// Translate box and keypoints together by the closest feasible delta.
    ///
    /// Each axis is clamped into the intersection of the ranges allowed by
    /// every box corner and every keypoint; an empty intersection blocks that
    /// axis entirely.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        let points = self
            .vertices()
            .into_iter()
            .chain(self.keypoints.iter().map(PoseKeypoint::position))
            .collect::<Vec<_>>();
        let (min_dx, max_dx) = feasible_delta_range(points.iter().map(|p| p.x));
        let (min_dy, max_dy) = feasible_delta_range(points.iter().map(|p| p.y));
        let dx = clamp_to_range(dx, min_dx, max_dx);
        let dy = clamp_to_range(dy, min_dy, max_dy);

        Self {
            class_id: self.class_id,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
            keypoints: self
                .keypoints
                .iter()
                .map(|kp| PoseKeypoint {
                    x: kp.x + dx,
                    y: kp.y + dy,
                    ..*kp
                })
                .collect(),
        }
    }

    /// Move box corner `index` (0..=3) to the clamped target. Keypoints stay put.
    #[must_use]
    pub fn move_vertex(&self, x: f64, y: f64, index: usize) -> Self {
        let target = Point::new(x, y).clamped();
        let mut pose = self.clone();
        match index {
            0 => {
                pose.x1 = target.x;
                pose.y1 = target.y;
            }
            1 => {
                pose.x2 = target.x;
                pose.y1 = target.y;
            }
            2 => {
                pose.x2 = target.x;
                pose.y2 = target.y;
            }
            3 => {
                pose.x1 = target.x;
                pose.y2 = target.y;
            }
            _ => return self.clone(),
        }
        if !pose.vertices().iter().all(Point::is_in_unit_square) {
            return self.clone();
        }
        pose
    }

    /// Set the box corner opposite the anchor `(x1, y1)`.
    #[must_use]
    pub fn with_second_corner(&self, x: f64, y: f64) -> Self {
        Self {
            x2: x,
            y2: y,
            ..self.clone()
        }
    }

    /// Append a keypoint.
    #[must_use]
    pub fn add_keypoint(&self, x: f64, y: f64, v: bool, class_id: u32) -> Self {
        let mut pose = self.clone();
        pose.keypoints.push(PoseKeypoint::new(class_id, x, y, v));
        pose
    }

    /// Move keypoint `index` to the clamped target, keeping its id and visibility.
    #[must_use]
    pub fn move_keypoint(&self, x: f64, y: f64, index: usize) -> Self {
        let mut pose = self.clone();
        if let Some(kp) = pose.keypoints.get_mut(index) {
            kp.x = x.clamp(0.0, 1.0);
            kp.y = y.clamp(0.0, 1.0);
        }
        pose
    }

    /// Whether a keypoint with this id has been placed.
    pub fn has_keypoint(&self, keypoint_id: u32) -> bool {
        self.keypoints.iter().any(|kp| kp.class_id == keypoint_id)
    }

    /// Index of the closest box corner within the default hit radius.
    pub fn find_nearest_vertex(&self, x: f64, y: f64) -> Option<usize> {
        nearest_within(self.vertices(), Point::new(x, y), VERTEX_HIT_THRESHOLD)
    }

    /// Whether `(x, y)` is within the hit radius of box corner `index`.
    pub fn is_near_vertex(&self, x: f64, y: f64, index: usize) -> bool {
        self.vertex(index)
            .is_some_and(|v| distance(v, Point::new(x, y)) < VERTEX_HIT_THRESHOLD)
    }

    /// Index of the closest keypoint within the default hit radius.
    pub fn find_nearest_keypoint(&self, x: f64, y: f64) -> Option<usize> {
        nearest_within(
            self.keypoints.iter().map(PoseKeypoint::position),
            Point::new(x, y),
            VERTEX_HIT_THRESHOLD,
        )
    }

    /// Whether `(x, y)` is within the hit radius of keypoint `index`.
    pub fn is_near_keypoint(&self, x: f64, y: f64, index: usize) -> bool {
        self.keypoints
            .get(index)
            .is_some_and(|kp| distance(kp.position(), Point::new(x, y)) < VERTEX_HIT_THRESHOLD)
    }

    /// Strict interior test of the bounding box.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (x_min, x_max) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (y_min, y_max) = (self.y1.min(self.y2), self.y1.max(self.y2));
        x_min < x && x < x_max && y_min < y && y < y_max
    }

    /// Longer side of the pose box.
    pub fn longest_dim_size(&self) -> f64 {
        (self.y2 - self.y1).abs().max((self.x2 - self.x1).abs())
    }
}
