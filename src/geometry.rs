//! Geometry primitives shared by the shape algebras.
//!
//! All coordinates are normalized to the unit square `[0,1]×[0,1]` relative to
//! the source image. Pixel conversion only happens when a shape needs the
//! image aspect ratio (oriented boxes) or when exporting.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// A 2D point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Return this point translated by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Return this point with both coordinates clamped into `[0,1]`.
    #[must_use]
    pub fn clamped(&self) -> Point {
        Point::new(clamp01(self.x), clamp01(self.y))
    }

    /// Whether both coordinates lie in the closed unit interval.
    pub fn is_in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// ============================================================================
// Scalar helpers
// ============================================================================

/// Clamp a value into `[0,1]`.
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// `hypot(dx, dy)` between two points.
pub fn distance(p: Point, q: Point) -> f64 {
    (p.x - q.x).hypot(p.y - q.y)
}

/// Clamp `v` into `[lo, hi]`, or return 0 when the range is empty.
///
/// An empty range means no movement is allowed on that axis.
pub fn clamp_to_range(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return 0.0;
    }
    v.max(lo).min(hi)
}

/// Closed interval of translations `d` keeping every coordinate `c + d` in `[0,1]`.
///
/// Returns `(lo, hi)`; with no coordinates the range is unbounded.
pub fn feasible_delta_range(coords: impl IntoIterator<Item = f64>) -> (f64, f64) {
    coords
        .into_iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(lo, hi), c| {
            (lo.max(-c), hi.min(1.0 - c))
        })
}

/// Whether every point lies in the closed unit square.
pub fn all_in_unit_square<'a>(points: impl IntoIterator<Item = &'a Point>) -> bool {
    points.into_iter().all(Point::is_in_unit_square)
}

// ============================================================================
// Rotation
// ============================================================================

/// Project a normalized displacement onto a rotated frame's local axes.
///
/// The frame is defined by `alpha` in pixel space, so the displacement is
/// scaled to pixels with `width`/`height` before projection and each component
/// is scaled back to normalized units along its own axis. Returns `(du, dv)`:
/// `du` runs along the frame's length axis, `dv` across it.
pub fn decompose_vector(dx: f64, dy: f64, alpha: f64, width: f64, height: f64) -> (f64, f64) {
    let (uy, ux) = alpha.sin_cos();
    let (vx, vy) = (-uy, ux);

    let du = (dx * width * ux + dy * height * uy) / width;
    let dv = (dx * width * vx + dy * height * vy) / height;
    (du, dv)
}

/// Largest fraction in `[0,1]` for which `fits` holds, found by bisection.
///
/// `fits(0.0)` is assumed to hold. After `iterations` steps the result is
/// within `2^-iterations` of the true boundary.
pub fn bisect_fraction(iterations: usize, fits: impl Fn(f64) -> bool) -> f64 {
    let (mut low, mut high) = (0.0_f64, 1.0_f64);
    for _ in 0..iterations {
        let mid = (low + high) / 2.0;
        if fits(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

// ============================================================================
// Hit testing
// ============================================================================

/// Index of the candidate strictly closest to `target` within `threshold`.
///
/// Ties keep the first candidate in iteration order.
pub fn nearest_within<I>(candidates: I, target: Point, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = Point>,
{
    let mut nearest = None;
    let mut min_dist = f64::INFINITY;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let dist = distance(candidate, target);
        if dist < threshold && dist < min_dist {
            min_dist = dist;
            nearest = Some(index);
        }
    }
    nearest
}

// ============================================================================
// Coordinate conversion
// ============================================================================

/// Convert pixel coordinates to normalized coordinates.
pub fn normalize_coordinates(pixel_x: f64, pixel_y: f64, width: u32, height: u32) -> Point {
    Point {
        x: pixel_x / f64::from(width.max(1)),
        y: pixel_y / f64::from(height.max(1)),
    }
}

/// Convert normalized coordinates to pixel coordinates.
pub fn denormalize_coordinates(point: &Point, width: u32, height: u32) -> (f64, f64) {
    (point.x * f64::from(width), point.y * f64::from(height))
}
