//! Tests for the COCO format.

use serde_json::Value;

use crate::format::file::AnnotationFile;
use crate::format::formats::{COCO_FILE_NAME, CocoFormat};
use crate::format::traits::{AnnotationFormat, WarningSeverity};
use crate::geometry::Point;
use crate::model::{AnnotationObject, ClassAttributes, PoseClass, ShapeKind};
use crate::registry::ClassRegistry;
use crate::shapes::{Keypoint, Polygon, Pose, PoseKeypoint, Rectangle};

fn export(images: &[AnnotationFile], registry: &ClassRegistry) -> (Value, usize) {
    let result = CocoFormat.export_to_files(images, registry).unwrap();
    let file = result.file(COCO_FILE_NAME).unwrap();
    (serde_json::from_str(&file.contents).unwrap(), result.warnings.len())
}

fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.add_class(ShapeKind::Bbox, 1, ClassAttributes::new("car", [255, 0, 0]));
    registry.add_pose_class(
        0,
        PoseClass::new("person", [0, 255, 0])
            .with_keypoint(0, ClassAttributes::new("head", [1, 1, 1]))
            .with_keypoint(1, ClassAttributes::new("hip", [2, 2, 2]))
            .with_edge(0, 1),
    );
    registry
}

#[test]
fn test_coco_format_metadata() {
    let format = CocoFormat;
    assert_eq!(format.id(), "coco");
    assert!(format.extensions().contains(&"json"));
    assert!(format.supports(ShapeKind::Pose));
}

#[test]
fn test_bbox_in_pixels() {
    let images = vec![
        AnnotationFile::new("a.jpg")
            .with_dimensions(200, 100)
            .with_annotations(vec![AnnotationObject::Bbox(Rectangle::new(1, 0.5, 0.5, 0.1, 0.1))]),
    ];
    let (coco, warnings) = export(&images, &registry());
    assert_eq!(warnings, 0);

    let ann = &coco["annotations"][0];
    assert_eq!(ann["image_id"], 1);
    let bbox: Vec<f64> = serde_json::from_value(ann["bbox"].clone()).unwrap();
    let expected = [20.0, 10.0, 80.0, 40.0];
    for (got, want) in bbox.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{:?}", bbox);
    }
    assert!((ann["area"].as_f64().unwrap() - 3200.0).abs() < 1e-6);

    let category_id = ann["category_id"].as_u64().unwrap();
    let category = coco["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"].as_u64() == Some(category_id))
        .unwrap();
    assert_eq!(category["name"], "car");
    assert_eq!(category["supercategory"], "bbox");
}

#[test]
fn test_polygon_segmentation_and_area() {
    let poly = Polygon::new(
        0,
        vec![Point::new(0.0, 0.0), Point::new(0.5, 0.0), Point::new(0.5, 0.5), Point::new(0.0, 0.5)],
    );
    let images = vec![
        AnnotationFile::new("a.jpg")
            .with_dimensions(100, 100)
            .with_annotations(vec![AnnotationObject::Polygon(poly)]),
    ];
    let (coco, _) = export(&images, &registry());
    let ann = &coco["annotations"][0];
    assert_eq!(ann["segmentation"][0].as_array().unwrap().len(), 8);
    assert!((ann["area"].as_f64().unwrap() - 2500.0).abs() < 1e-6);
}

#[test]
fn test_pose_keypoints_and_category_skeleton() {
    let mut pose = Pose::new(0, 0.1, 0.1, 0.5, 0.5);
    pose.keypoints = vec![
        PoseKeypoint::new(0, 0.2, 0.2, true),
        PoseKeypoint::new(1, 0.3, 0.4, false),
    ];
    let images = vec![
        AnnotationFile::new("a.jpg")
            .with_dimensions(10, 10)
            .with_annotations(vec![AnnotationObject::Pose(pose)]),
    ];
    let (coco, _) = export(&images, &registry());
    let ann = &coco["annotations"][0];
    assert_eq!(ann["num_keypoints"], 2);
    let keypoints: Vec<f64> = serde_json::from_value(ann["keypoints"].clone()).unwrap();
    assert_eq!(keypoints.len(), 6);
    assert_eq!(keypoints[2], 2.0);
    assert_eq!(keypoints[5], 1.0);

    let person = coco["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "person")
        .unwrap();
    assert_eq!(person["keypoints"], serde_json::json!(["head", "hip"]));
    assert_eq!(person["skeleton"], serde_json::json!([[1, 2]]));
}

#[test]
fn test_pose_keypoints_follow_category_order() {
    let mut pose = Pose::new(0, 0.1, 0.1, 0.5, 0.5);
    // Placed hip first; the head is missing.
    pose.keypoints = vec![PoseKeypoint::new(1, 0.3, 0.4, true)];
    let images = vec![
        AnnotationFile::new("a.jpg")
            .with_dimensions(10, 10)
            .with_annotations(vec![AnnotationObject::Pose(pose)]),
    ];
    let (coco, _) = export(&images, &registry());
    let ann = &coco["annotations"][0];
    assert_eq!(ann["num_keypoints"], 1);
    let keypoints: Vec<f64> = serde_json::from_value(ann["keypoints"].clone()).unwrap();
    assert_eq!(keypoints, vec![0.0, 0.0, 0.0, 3.0, 4.0, 2.0]);
}

#[test]
fn test_images_without_dimensions_are_skipped() {
    let images = vec![
        AnnotationFile::new("no_size.jpg")
            .with_annotations(vec![AnnotationObject::Keypoint(Keypoint::new(0, 0.5, 0.5))]),
        AnnotationFile::new("sized.jpg").with_dimensions(10, 10),
    ];
    let result = CocoFormat.export_to_files(&images, &registry()).unwrap();
    assert_eq!(result.images_exported, 1);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].severity, WarningSeverity::Error);
    assert_eq!(result.warnings[0].image.as_deref(), Some("no_size.jpg"));
}

#[test]
fn test_unknown_class_is_skipped_with_warning() {
    let images = vec![
        AnnotationFile::new("a.jpg")
            .with_dimensions(10, 10)
            .with_annotations(vec![AnnotationObject::Keypoint(Keypoint::new(9, 0.5, 0.5))]),
    ];
    let (coco, warnings) = export(&images, &registry());
    assert_eq!(warnings, 1);
    assert!(coco["annotations"].as_array().unwrap().is_empty());
}
