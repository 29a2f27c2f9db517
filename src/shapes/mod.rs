//! Shape algebras.
//!
//! Every operation is pure: it takes a shape by reference and returns a new
//! value, so stored shapes can be shared with history snapshots.

mod keypoint;
mod oriented_rectangle;
mod polygon;
mod pose;
mod rectangle;

#[cfg(test)]
mod tests;

pub use keypoint::Keypoint;
pub use oriented_rectangle::OrientedRectangle;
pub use polygon::Polygon;
pub use pose::{Pose, PoseKeypoint};
pub use rectangle::{RECT_VERTEX_IDS, Rectangle};
