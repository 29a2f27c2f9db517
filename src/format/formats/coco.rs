//! COCO JSON format implementation.
//!
//! Writes a single `annotations.json` holding every image. COCO works in
//! pixels, so images without known dimensions are skipped.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::format::error::FormatError;
use crate::format::file::AnnotationFile;
use crate::format::traits::{AnnotationFormat, ExportResult, ExportedFile, FormatWarning};
use crate::geometry::Point;
use crate::model::{AnnotationObject, ShapeKind};
use crate::registry::ClassRegistry;
use crate::shapes::PoseKeypoint;

/// Name of the single output file.
pub const COCO_FILE_NAME: &str = "annotations.json";

/// COCO JSON format.
///
/// Categories are one per `(shape kind, class id)` pair of the class
/// registry, numbered from 1, with the shape kind as supercategory.
/// - bbox: `bbox` and `area`
/// - obb, polygon: `segmentation` ring plus its bounding `bbox` and area
/// - keypoint: single-point `segmentation`
/// - pose: `bbox`, `keypoints` as `[x, y, v, ...]` (v = 2 visible, 1 hidden,
///   0 not placed) in the category's keypoint order
pub struct CocoFormat;

impl AnnotationFormat for CocoFormat {
    fn id(&self) -> &'static str {
        "coco"
    }

    fn display_name(&self) -> &'static str {
        "COCO (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn supports(&self, _kind: ShapeKind) -> bool {
        true
    }

    fn export_to_files(
        &self,
        images: &[AnnotationFile],
        registry: &ClassRegistry,
    ) -> Result<ExportResult, FormatError> {
        let mut result = ExportResult::new();
        let mut coco = CocoDataset::default();

        let category_ids = build_categories(registry, &mut coco.categories);

        let mut annotation_id = 1u64;
        let mut image_id = 0u64;
        for image in images {
            let Some((width, height)) = image.dimensions() else {
                result.add_warning(
                    FormatWarning::error(
                        FormatError::missing_dimensions(self.id(), &image.name).to_string(),
                    )
                    .with_image(&image.name),
                );
                continue;
            };

            image_id += 1;
            coco.images.push(CocoImage {
                id: image_id,
                file_name: image.name.clone(),
                width,
                height,
            });

            let scale = (f64::from(width), f64::from(height));
            for object in &image.annotations {
                let key = (object.kind(), object.class_id());
                let Some(&category_id) = category_ids.get(&key) else {
                    result.add_warning(
                        FormatWarning::warning(format!(
                            "Unknown {} class {}, skipping annotation",
                            key.0, key.1
                        ))
                        .with_image(&image.name),
                    );
                    continue;
                };
                let layout = keypoint_layout(registry, object);
                coco.annotations.push(convert_annotation(
                    object,
                    annotation_id,
                    image_id,
                    category_id,
                    scale,
                    &layout,
                ));
                annotation_id += 1;
                result.annotations_exported += 1;
            }
            result.images_exported += 1;
        }

        let json = serde_json::to_string_pretty(&coco)?;
        result.files.push(ExportedFile::new(COCO_FILE_NAME, json));
        Ok(result)
    }
}

/// Fill `categories` from the registry and return the `(kind, class) -> id` map.
fn build_categories(
    registry: &ClassRegistry,
    categories: &mut Vec<CocoCategory>,
) -> BTreeMap<(ShapeKind, u32), u32> {
    let mut ids = BTreeMap::new();
    for kind in ShapeKind::all() {
        for class_id in registry.class_ids(*kind) {
            let Some(attrs) = registry.attributes(*kind, class_id) else {
                continue;
            };
            let id = u32::try_from(categories.len() + 1).unwrap_or(u32::MAX);
            let (keypoints, skeleton) = match registry.pose_class(class_id) {
                Some(pose) if *kind == ShapeKind::Pose => (
                    pose.keypoints.values().map(|kp| kp.name.clone()).collect(),
                    // COCO skeletons are 1-based.
                    pose.skeleton.iter().map(|&(a, b)| [a + 1, b + 1]).collect(),
                ),
                _ => (Vec::new(), Vec::new()),
            };
            categories.push(CocoCategory {
                id,
                name: attrs.name,
                supercategory: kind.name().to_string(),
                keypoints,
                skeleton,
            });
            ids.insert((*kind, class_id), id);
        }
    }
    ids
}

/// Keypoint ids in the order the pose's category lists them.
///
/// Poses without a registered pose class fall back to their own ids, ascending.
fn keypoint_layout(registry: &ClassRegistry, object: &AnnotationObject) -> Vec<u32> {
    let AnnotationObject::Pose(pose) = object else {
        return Vec::new();
    };
    match registry.pose_class(pose.class_id) {
        Some(class) => class.keypoints.keys().copied().collect(),
        None => {
            let mut ids: Vec<u32> = pose.keypoints.iter().map(|kp| kp.class_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        }
    }
}

fn to_pixels(points: &[Point], (w, h): (f64, f64)) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x * w, p.y * h)).collect()
}

fn convert_annotation(
    object: &AnnotationObject,
    id: u64,
    image_id: u64,
    category_id: u32,
    scale: (f64, f64),
    layout: &[u32],
) -> CocoAnnotation {
    let (w, h) = scale;
    let mut annotation = CocoAnnotation {
        id,
        image_id,
        category_id,
        bbox: None,
        segmentation: None,
        area: 0.0,
        iscrowd: 0,
        keypoints: None,
        num_keypoints: None,
    };

    match object {
        AnnotationObject::Bbox(rect) => {
            let (x_min, y_min, _, _) = rect.bounds();
            let bbox = [x_min * w, y_min * h, rect.width() * w, rect.height() * h];
            annotation.area = bbox[2] * bbox[3];
            annotation.bbox = Some(bbox);
        }
        AnnotationObject::Obb(_) | AnnotationObject::Polygon(_) => {
            let ring = to_pixels(&object.outline(), scale);
            annotation.area = polygon_area(&ring);
            annotation.bbox = polygon_bbox(&ring);
            annotation.segmentation = Some(vec![ring.iter().flat_map(|(x, y)| [*x, *y]).collect()]);
        }
        AnnotationObject::Keypoint(kp) => {
            annotation.segmentation = Some(vec![vec![kp.x * w, kp.y * h]]);
        }
        AnnotationObject::Pose(pose) => {
            let corners = to_pixels(&pose.vertices(), scale);
            let bbox = polygon_bbox(&corners);
            annotation.area = bbox.map_or(0.0, |b| b[2] * b[3]);
            annotation.bbox = bbox;
            // One triple per category keypoint; unplaced ones are [0, 0, 0].
            let placed: Vec<Option<&PoseKeypoint>> = layout
                .iter()
                .map(|id| pose.keypoints.iter().find(|kp| kp.class_id == *id))
                .collect();
            annotation.keypoints = Some(
                placed
                    .iter()
                    .flat_map(|kp| match kp {
                        Some(kp) => [kp.x * w, kp.y * h, if kp.v { 2.0 } else { 1.0 }],
                        None => [0.0, 0.0, 0.0],
                    })
                    .collect(),
            );
            annotation.num_keypoints = Some(placed.iter().flatten().count());
        }
    }
    annotation
}

/// Calculate the area of a polygon using the shoelace formula.
fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            vertices[i].0 * vertices[j].1 - vertices[j].0 * vertices[i].1
        })
        .sum();
    (twice / 2.0).abs()
}

/// Calculate the bounding box `[x, y, w, h]` of a point set.
fn polygon_bbox(vertices: &[(f64, f64)]) -> Option<[f64; 4]> {
    if vertices.is_empty() {
        return None;
    }

    let min_x = vertices.iter().map(|(x, _)| *x).fold(f64::MAX, f64::min);
    let max_x = vertices.iter().map(|(x, _)| *x).fold(f64::MIN, f64::max);
    let min_y = vertices.iter().map(|(_, y)| *y).fold(f64::MAX, f64::min);
    let max_y = vertices.iter().map(|(_, y)| *y).fold(f64::MIN, f64::max);

    Some([min_x, min_y, max_x - min_x, max_y - min_y])
}

// COCO format structures

#[derive(Debug, Default, Serialize)]
struct CocoDataset {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

#[derive(Debug, Serialize)]
struct CocoImage {
    id: u64,
    file_name: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
struct CocoAnnotation {
    id: u64,
    image_id: u64,
    category_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    segmentation: Option<Vec<Vec<f64>>>,
    area: f64,
    iscrowd: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    keypoints: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_keypoints: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CocoCategory {
    id: u32,
    name: String,
    supercategory: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keypoints: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skeleton: Vec<[usize; 2]>,
}
