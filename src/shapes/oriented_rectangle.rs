//! Oriented (rotated) rectangle algebra.
//!
//! Rotation is computed in pixel space using the reference image size, since
//! normalized coordinates are not square for non-square images. Only the
//! stored parameters are normalized.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, MIN_MOVEMENT_FRACTION, OBB_HANDLE_OFFSET_RATIO,
    OBB_ROTATION_SEARCH_ITERATIONS, OBB_VERTEX_SEARCH_ITERATIONS, VERTEX_HIT_THRESHOLD,
};
use crate::geometry::{
    Point, all_in_unit_square, bisect_fraction, decompose_vector, distance, nearest_within,
};

/// Rotated box: center, full width/height, rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRectangle {
    pub class_id: u32,
    pub xc: f64,
    pub yc: f64,
    pub w: f64,
    pub h: f64,
    pub alpha: f64,
    /// Reference image width in pixels.
    #[serde(rename = "imgW", default = "default_img_w")]
    pub img_w: f64,
    /// Reference image height in pixels.
    #[serde(rename = "imgH", default = "default_img_h")]
    pub img_h: f64,
}

fn default_img_w() -> f64 {
    f64::from(DEFAULT_IMAGE_WIDTH)
}

fn default_img_h() -> f64 {
    f64::from(DEFAULT_IMAGE_HEIGHT)
}

impl Default for OrientedRectangle {
    fn default() -> Self {
        Self {
            class_id: 0,
            xc: 0.0,
            yc: 0.0,
            w: 0.0,
            h: 0.0,
            alpha: 0.0,
            img_w: default_img_w(),
            img_h: default_img_h(),
        }
    }
}

/// Width/height sign applied when dragging each corner.
fn vertex_direction(index: usize) -> (f64, f64) {
    match index {
        0 => (-1.0, -1.0),
        1 => (1.0, -1.0),
        2 => (1.0, 1.0),
        3 => (-1.0, 1.0),
        _ => (0.0, 0.0),
    }
}

impl OrientedRectangle {
    /// Create an oriented box with the default reference image size.
    pub fn new(class_id: u32, xc: f64, yc: f64, w: f64, h: f64, alpha: f64) -> Self {
        Self {
            class_id,
            xc,
            yc,
            w,
            h,
            alpha,
            ..Self::default()
        }
    }

    /// Set the reference image size in pixels.
    #[must_use]
    pub fn with_image_size(mut self, img_w: f64, img_h: f64) -> Self {
        self.img_w = img_w;
        self.img_h = img_h;
        self
    }

    /// Reference size used for pixel-space math; unusable values fall back to 1.
    pub fn pixel_size(&self) -> (f64, f64) {
        let usable = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        (usable(self.img_w), usable(self.img_h))
    }

    /// Corner `index` (0 = top-left .. 3 = bottom-left in the unrotated frame).
    pub fn vertex(&self, index: usize) -> Option<Point> {
        let (img_w, img_h) = self.pixel_size();
        let xc = self.xc * img_w;
        let yc = self.yc * img_h;
        let dw = self.w * img_w * 0.5;
        let dh = self.h * img_h * 0.5;
        let (sin, cos) = self.alpha.sin_cos();

        let (x, y) = match index {
            0 => (xc - dw * cos + dh * sin, yc - dw * sin - dh * cos),
            1 => (xc + dw * cos + dh * sin, yc + dw * sin - dh * cos),
            2 => (xc + dw * cos - dh * sin, yc + dw * sin + dh * cos),
            3 => (xc - dw * cos - dh * sin, yc - dw * sin + dh * cos),
            _ => return None,
        };
        Some(Point::new(x / img_w, y / img_h))
    }

    /// All four corners, index order.
    pub fn vertices(&self) -> [Point; 4] {
        let (img_w, img_h) = self.pixel_size();
        let xc = self.xc * img_w;
        let yc = self.yc * img_h;
        let dw = self.w * img_w * 0.5;
        let dh = self.h * img_h * 0.5;
        let (sin, cos) = self.alpha.sin_cos();

        [
            (xc - dw * cos + dh * sin, yc - dw * sin - dh * cos),
            (xc + dw * cos + dh * sin, yc + dw * sin - dh * cos),
            (xc + dw * cos - dh * sin, yc + dw * sin + dh * cos),
            (xc - dw * cos - dh * sin, yc - dw * sin + dh * cos),
        ]
        .map(|(x, y)| Point::new(x / img_w, y / img_h))
    }

    fn is_in_bounds(&self) -> bool {
        all_in_unit_square(&self.vertices())
    }

    /// Rotation handle: a third of the pixel width from the center along `alpha`.
    pub fn handle(&self) -> Point {
        let (img_w, img_h) = self.pixel_size();
        let length = self.w * img_w * OBB_HANDLE_OFFSET_RATIO;
        let (sin, cos) = self.alpha.sin_cos();
        Point::new(
            (self.xc * img_w + length * cos) / img_w,
            (self.yc * img_h + length * sin) / img_h,
        )
    }

    /// Whether `(x, y)` is within the hit radius of the rotation handle.
    pub fn is_hovering_handle(&self, x: f64, y: f64) -> bool {
        distance(self.handle(), Point::new(x, y)) < VERTEX_HIT_THRESHOLD
    }

    /// Absolute angle from the center to `(x, y)`, in pixel space.
    pub fn angle_towards(&self, x: f64, y: f64) -> f64 {
        let (img_w, img_h) = self.pixel_size();
        ((y - self.yc) * img_h).atan2((x - self.xc) * img_w)
    }

    /// Translate by `(dx, dy)` only if every corner stays inside the unit square.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        let fits = self
            .vertices()
            .iter()
            .all(|v| v.translated(dx, dy).is_in_unit_square());
        if !fits {
            return *self;
        }
        Self {
            xc: self.xc + dx,
            yc: self.yc + dy,
            ..*self
        }
    }

    fn apply_vertex_movement(&self, index: usize, fx: f64, fy: f64) -> Self {
        let (img_w, img_h) = self.pixel_size();
        let (du, dv) = decompose_vector(fx, fy, self.alpha, img_w, img_h);
        let (su, sv) = vertex_direction(index);
        Self {
            xc: self.xc + fx / 2.0,
            yc: self.yc + fy / 2.0,
            w: (self.w + du * su).abs(),
            h: (self.h + dv * sv).abs(),
            ..*self
        }
    }

    /// Drag corner `index` towards the clamped target, keeping the box in bounds.
    ///
    /// The full displacement is applied when it fits; otherwise the largest
    /// fitting fraction is found by bisection. Returns the box unchanged when
    /// no positive fraction fits or `index` is not a corner.
    #[must_use]
    pub fn move_vertex(&self, x: f64, y: f64, index: usize) -> Self {
        let Some(vertex) = self.vertex(index) else {
            return *self;
        };
        let target = Point::new(x, y).clamped();
        let dx = target.x - vertex.x;
        let dy = target.y - vertex.y;

        let full = self.apply_vertex_movement(index, dx, dy);
        if full.is_in_bounds() {
            return full;
        }

        let low = bisect_fraction(OBB_VERTEX_SEARCH_ITERATIONS, |t| {
            self.apply_vertex_movement(index, dx * t, dy * t)
                .is_in_bounds()
        });
        if low <= MIN_MOVEMENT_FRACTION {
            return *self;
        }
        self.apply_vertex_movement(index, dx * low, dy * low)
    }

    /// Rotate by `delta_alpha`, or by the largest fitting fraction of it.
    #[must_use]
    pub fn rotate(&self, delta_alpha: f64) -> Self {
        let rotated = |t: f64| Self {
            alpha: self.alpha + delta_alpha * t,
            ..*self
        };

        let full = rotated(1.0);
        if full.is_in_bounds() {
            return full;
        }

        let low = bisect_fraction(OBB_ROTATION_SEARCH_ITERATIONS, |t| {
            rotated(t).is_in_bounds()
        });
        if low <= MIN_MOVEMENT_FRACTION {
            return *self;
        }
        rotated(low)
    }

    /// Index of the closest corner within the default hit radius.
    pub fn find_nearest_vertex(&self, x: f64, y: f64) -> Option<usize> {
        nearest_within(self.vertices(), Point::new(x, y), VERTEX_HIT_THRESHOLD)
    }

    /// Inclusive containment, tested on the box's own axes in pixel space.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let (img_w, img_h) = self.pixel_size();
        let xt = (x - self.xc) * img_w;
        let yt = (y - self.yc) * img_h;
        let (sin, cos) = self.alpha.sin_cos();

        let dw = xt * cos + yt * sin;
        let dh = -xt * sin + yt * cos;

        dw.abs() <= self.w * img_w / 2.0 && dh.abs() <= self.h * img_h / 2.0
    }

    /// Longer of `w` and `h`, in normalized units.
    pub fn longest_dim_size(&self) -> f64 {
        self.h.max(self.w)
    }
}
