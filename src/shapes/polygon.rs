//! Polygon algebra.
//!
//! The shell is an ordered vertex list; the closing edge from the last vertex
//! back to the first is implied. No boundary clamping is applied to polygon
//! moves or vertex edits.

use serde::{Deserialize, Serialize};

use crate::constants::{EDGE_EPSILON, VERTEX_HIT_THRESHOLD};
use crate::geometry::{Point, distance, nearest_within};

/// Polygon with an ordered shell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub class_id: u32,
    pub shell: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its shell vertices.
    pub fn new(class_id: u32, shell: Vec<Point>) -> Self {
        Self { class_id, shell }
    }

    /// Unconditional translation of every vertex.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        Self {
            class_id: self.class_id,
            shell: self.shell.iter().map(|p| p.translated(dx, dy)).collect(),
        }
    }

    /// Insert a vertex before `index`; indices past the end append.
    #[must_use]
    pub fn add_vertex(&self, x: f64, y: f64, index: usize) -> Self {
        let mut shell = self.shell.clone();
        shell.insert(index.min(shell.len()), Point::new(x, y));
        Self {
            class_id: self.class_id,
            shell,
        }
    }

    /// Append a vertex at the end of the shell.
    #[must_use]
    pub fn push_vertex(&self, x: f64, y: f64) -> Self {
        self.add_vertex(x, y, self.shell.len())
    }

    /// Replace vertex `index`; a missing index leaves the shell untouched.
    #[must_use]
    pub fn move_vertex(&self, x: f64, y: f64, index: usize) -> Self {
        let mut shell = self.shell.clone();
        if let Some(vertex) = shell.get_mut(index) {
            *vertex = Point::new(x, y);
        }
        Self {
            class_id: self.class_id,
            shell,
        }
    }

    /// Replace the last vertex, if any.
    #[must_use]
    pub fn move_last_vertex(&self, x: f64, y: f64) -> Self {
        match self.shell.len() {
            0 => self.clone(),
            len => self.move_vertex(x, y, len - 1),
        }
    }

    /// Drop the last vertex.
    #[must_use]
    pub fn without_last_vertex(&self) -> Self {
        let mut shell = self.shell.clone();
        shell.pop();
        Self {
            class_id: self.class_id,
            shell,
        }
    }

    /// Index of the closest shell vertex within the default hit radius.
    pub fn find_nearest_vertex(&self, x: f64, y: f64) -> Option<usize> {
        nearest_within(self.shell.iter().copied(), Point::new(x, y), VERTEX_HIT_THRESHOLD)
    }

    /// Whether `(x, y)` is within the default hit radius of vertex `index`.
    pub fn is_near_vertex(&self, x: f64, y: f64, index: usize) -> bool {
        self.is_near_vertex_within(x, y, index, VERTEX_HIT_THRESHOLD)
    }

    /// Whether `(x, y)` lies within `threshold` of vertex `index`.
    pub fn is_near_vertex_within(&self, x: f64, y: f64, index: usize, threshold: f64) -> bool {
        self.shell
            .get(index)
            .is_some_and(|v| distance(*v, Point::new(x, y)) < threshold)
    }

    /// Ray-casting parity test.
    ///
    /// A point lying exactly on a crossing edge counts as contained.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let n = self.shell.len();
        let mut inside = false;

        for i in 0..n {
            let a = self.shell[i];
            let b = self.shell[(i + 1) % n];

            if (a.y > y) == (b.y > y) {
                continue;
            }
            if a.x > x && b.x > x {
                inside = !inside;
            } else if a.x < x && b.x < x {
                continue;
            } else {
                let x_intersect = (b.x - a.x) * (y - a.y) / (b.y - a.y + EDGE_EPSILON) + a.x;
                if (x - x_intersect).abs() < EDGE_EPSILON {
                    return true;
                }
                if x < x_intersect {
                    inside = !inside;
                }
            }
        }

        inside
    }

    /// `(min_x, min_y, max_x, max_y)`; infinities for an empty shell.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.shell.iter().fold(
            (
                f64::INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
            ),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    /// Longer side of the bounding box.
    pub fn longest_dim_size(&self) -> f64 {
        let (min_x, min_y, max_x, max_y) = self.bounding_box();
        (max_x - min_x).max(max_y - min_y)
    }

    /// Shoelace area in normalized units.
    pub fn area(&self) -> f64 {
        let n = self.shell.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.shell[i];
                let b = self.shell[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }
}
