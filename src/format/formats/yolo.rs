//! YOLO TXT format implementation.
//!
//! One text file per image, one line per annotation, all coordinates
//! normalized. The line layout depends on the shape:
//!
//! | shape    | line                                   |
//! |----------|----------------------------------------|
//! | bbox     | `class cx cy w h`                      |
//! | obb      | `class x1 y1 x2 y2 x3 y3 x4 y4`        |
//! | polygon  | `class x1 y1 x2 y2 ...`                |
//! | keypoint | `class x y`                            |
//! | pose     | `class x1 y1 x2 y2 (kpclass kx ky kv)*`|

use std::fmt::Write as _;

use crate::format::error::FormatError;
use crate::format::file::AnnotationFile;
use crate::format::traits::{AnnotationFormat, ExportResult, ExportedFile};
use crate::geometry::Point;
use crate::model::{AnnotationObject, ShapeKind};
use crate::registry::ClassRegistry;

/// YOLO TXT format.
pub struct YoloFormat;

fn push_coord(line: &mut String, v: f64) {
    // Writing into a String cannot fail.
    let _ = write!(line, " {:.6}", v);
}

fn push_points<'a>(line: &mut String, points: impl IntoIterator<Item = &'a Point>) {
    for p in points {
        push_coord(line, p.x);
        push_coord(line, p.y);
    }
}

/// Render one annotation as a YOLO line.
pub fn yolo_line(object: &AnnotationObject) -> String {
    let mut line = object.class_id().to_string();
    match object {
        AnnotationObject::Bbox(rect) => {
            let center = rect.center();
            for v in [center.x, center.y, rect.width(), rect.height()] {
                push_coord(&mut line, v);
            }
        }
        AnnotationObject::Obb(obb) => push_points(&mut line, &obb.vertices()),
        AnnotationObject::Polygon(poly) => push_points(&mut line, &poly.shell),
        AnnotationObject::Keypoint(kp) => push_points(&mut line, &[kp.position()]),
        AnnotationObject::Pose(pose) => {
            for v in [pose.x1, pose.y1, pose.x2, pose.y2] {
                push_coord(&mut line, v);
            }
            for kp in &pose.keypoints {
                let _ = write!(line, " {}", kp.class_id);
                push_coord(&mut line, kp.x);
                push_coord(&mut line, kp.y);
                let _ = write!(line, " {}", u8::from(kp.v));
            }
        }
    }
    line
}

impl AnnotationFormat for YoloFormat {
    fn id(&self) -> &'static str {
        "yolo"
    }

    fn display_name(&self) -> &'static str {
        "YOLO (TXT)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn supports(&self, _kind: ShapeKind) -> bool {
        true
    }

    fn export_to_files(
        &self,
        images: &[AnnotationFile],
        _registry: &ClassRegistry,
    ) -> Result<ExportResult, FormatError> {
        let mut result = ExportResult::new();
        for image in images {
            let mut contents = String::new();
            for object in &image.annotations {
                contents.push_str(&yolo_line(object));
                contents.push('\n');
            }
            result.annotations_exported += image.annotations.len();
            result.images_exported += 1;
            result
                .files
                .push(ExportedFile::new(format!("{}.txt", image.stem()), contents));
        }
        Ok(result)
    }
}
