//! Global constants for the annotation engine

/// Hit-test radius for vertices, keypoints, handles and polygon closing (normalized units).
pub const VERTEX_HIT_THRESHOLD: f64 = 0.02;

/// Epsilon used by the polygon ray-casting test.
pub const EDGE_EPSILON: f64 = 1e-12;

/// Fractions at or below this are treated as "no movement possible".
pub const MIN_MOVEMENT_FRACTION: f64 = 1e-6;

/// Bisection steps when an oriented box vertex drag leaves the unit square.
pub const OBB_VERTEX_SEARCH_ITERATIONS: usize = 15;

/// Bisection steps when an oriented box rotation leaves the unit square.
pub const OBB_ROTATION_SEARCH_ITERATIONS: usize = 10;

/// Rotation handle distance from the center, as a fraction of the pixel width.
pub const OBB_HANDLE_OFFSET_RATIO: f64 = 1.0 / 3.0;

/// Initial zoom value (pixels along the longest image side).
pub const DEFAULT_ZOOM: u32 = 800;

/// Zoom increment per wheel notch.
pub const ZOOM_STEP: u32 = 50;

/// Lower zoom bound.
pub const MIN_ZOOM: u32 = 400;

/// Default canvas/image width in pixels.
pub const DEFAULT_IMAGE_WIDTH: u32 = 640;

/// Default canvas/image height in pixels.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 640;

/// RGB used when a class has no registered color.
pub const FALLBACK_COLOR: [u8; 3] = [255, 255, 255];
