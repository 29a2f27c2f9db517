//! Annotation object types.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::shapes::{Keypoint, OrientedRectangle, Polygon, Pose, Rectangle};

/// Unique identifier for an annotation within a store.
pub type AnnotationId = u32;

/// Discriminant of an [`AnnotationObject`], also used to key class buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Bbox,
    Obb,
    Polygon,
    Keypoint,
    Pose,
}

impl ShapeKind {
    /// Serialized tag of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Bbox => "bbox",
            ShapeKind::Obb => "obb",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Keypoint => "keypoint",
            ShapeKind::Pose => "pose",
        }
    }

    /// Get all shape kinds.
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Bbox,
            ShapeKind::Obb,
            ShapeKind::Polygon,
            ShapeKind::Keypoint,
            ShapeKind::Pose,
        ]
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored annotation shape, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationObject {
    Bbox(Rectangle),
    Obb(OrientedRectangle),
    Polygon(Polygon),
    Keypoint(Keypoint),
    Pose(Pose),
}

impl AnnotationObject {
    /// Shape kind of this annotation.
    pub fn kind(&self) -> ShapeKind {
        match self {
            AnnotationObject::Bbox(_) => ShapeKind::Bbox,
            AnnotationObject::Obb(_) => ShapeKind::Obb,
            AnnotationObject::Polygon(_) => ShapeKind::Polygon,
            AnnotationObject::Keypoint(_) => ShapeKind::Keypoint,
            AnnotationObject::Pose(_) => ShapeKind::Pose,
        }
    }

    /// Class id, whatever the shape.
    pub fn class_id(&self) -> u32 {
        match self {
            AnnotationObject::Bbox(s) => s.class_id,
            AnnotationObject::Obb(s) => s.class_id,
            AnnotationObject::Polygon(s) => s.class_id,
            AnnotationObject::Keypoint(s) => s.class_id,
            AnnotationObject::Pose(s) => s.class_id,
        }
    }

    /// Copy of this object with a different class id.
    #[must_use]
    pub fn with_class_id(&self, class_id: u32) -> Self {
        let mut object = self.clone();
        match &mut object {
            AnnotationObject::Bbox(s) => s.class_id = class_id,
            AnnotationObject::Obb(s) => s.class_id = class_id,
            AnnotationObject::Polygon(s) => s.class_id = class_id,
            AnnotationObject::Keypoint(s) => s.class_id = class_id,
            AnnotationObject::Pose(s) => s.class_id = class_id,
        }
        object
    }

    /// Hover test used by hit resolution: body containment, or proximity for keypoints.
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        match self {
            AnnotationObject::Bbox(s) => s.contains_point(x, y),
            AnnotationObject::Obb(s) => s.contains_point(x, y),
            AnnotationObject::Polygon(s) => s.contains_point(x, y),
            AnnotationObject::Keypoint(s) => s.is_near(x, y),
            AnnotationObject::Pose(s) => s.contains_point(x, y),
        }
    }

    /// Index of the nearest editable vertex, in each shape's own numbering.
    ///
    /// Rectangles use corner ids 1..=4; oriented boxes and pose boxes use
    /// 0..=3; polygons use shell indices. Keypoints have no vertices.
    pub fn find_nearest_vertex(&self, x: f64, y: f64) -> Option<usize> {
        match self {
            AnnotationObject::Bbox(s) => s.find_nearest_vertex(x, y).map(usize::from),
            AnnotationObject::Obb(s) => s.find_nearest_vertex(x, y),
            AnnotationObject::Polygon(s) => s.find_nearest_vertex(x, y),
            AnnotationObject::Keypoint(_) => None,
            AnnotationObject::Pose(s) => s.find_nearest_vertex(x, y),
        }
    }

    /// Dispatch a whole-shape move to the shape's own boundary policy.
    #[must_use]
    pub fn move_by(&self, dx: f64, dy: f64) -> Self {
        match self {
            AnnotationObject::Bbox(s) => AnnotationObject::Bbox(s.move_by(dx, dy)),
            AnnotationObject::Obb(s) => AnnotationObject::Obb(s.move_by(dx, dy)),
            AnnotationObject::Polygon(s) => AnnotationObject::Polygon(s.move_by(dx, dy)),
            AnnotationObject::Keypoint(s) => AnnotationObject::Keypoint(s.move_by(dx, dy)),
            AnnotationObject::Pose(s) => AnnotationObject::Pose(s.move_by(dx, dy)),
        }
    }

    /// Dispatch a vertex drag; see [`Self::find_nearest_vertex`] for numbering.
    #[must_use]
    pub fn move_vertex(&self, x: f64, y: f64, vertex: usize) -> Self {
        match self {
            AnnotationObject::Bbox(s) => match u8::try_from(vertex) {
                Ok(id) => AnnotationObject::Bbox(s.move_vertex(x, y, id)),
                Err(_) => self.clone(),
            },
            AnnotationObject::Obb(s) => AnnotationObject::Obb(s.move_vertex(x, y, vertex)),
            AnnotationObject::Polygon(s) => AnnotationObject::Polygon(s.move_vertex(x, y, vertex)),
            AnnotationObject::Keypoint(_) => self.clone(),
            AnnotationObject::Pose(s) => AnnotationObject::Pose(s.move_vertex(x, y, vertex)),
        }
    }

    /// Vertex ring for painting the shape outline.
    pub fn outline(&self) -> Vec<Point> {
        match self {
            AnnotationObject::Bbox(s) => s.vertices().to_vec(),
            AnnotationObject::Obb(s) => s.vertices().to_vec(),
            AnnotationObject::Polygon(s) => s.shell.clone(),
            AnnotationObject::Keypoint(s) => vec![s.position()],
            AnnotationObject::Pose(s) => s.vertices().to_vec(),
        }
    }

    /// Longest side of the shape's extent.
    pub fn longest_dim_size(&self) -> f64 {
        match self {
            AnnotationObject::Bbox(s) => s.longest_dim_size(),
            AnnotationObject::Obb(s) => s.longest_dim_size(),
            AnnotationObject::Polygon(s) => s.longest_dim_size(),
            AnnotationObject::Keypoint(_) => 0.0,
            AnnotationObject::Pose(s) => s.longest_dim_size(),
        }
    }
}
