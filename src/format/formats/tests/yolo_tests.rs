//! Tests for the YOLO format.

use crate::format::file::AnnotationFile;
use crate::format::formats::{YoloFormat, yolo_line};
use crate::format::traits::AnnotationFormat;
use crate::model::AnnotationObject;
use crate::registry::ClassRegistry;
use crate::shapes::{Keypoint, OrientedRectangle, Polygon, Pose, PoseKeypoint, Rectangle};
use crate::geometry::Point;

fn fields(line: &str) -> Vec<f64> {
    line.split_whitespace().map(|f| f.parse().unwrap()).collect()
}

#[test]
fn test_yolo_format_metadata() {
    let format = YoloFormat;
    assert_eq!(format.id(), "yolo");
    assert_eq!(format.display_name(), "YOLO (TXT)");
    assert!(format.extensions().contains(&"txt"));
}

#[test]
fn test_bbox_line_uses_center_and_size() {
    // Corners given in reverse order still produce a positive size.
    let line = yolo_line(&AnnotationObject::Bbox(Rectangle::new(2, 0.5, 0.4, 0.1, 0.2)));
    assert_eq!(line, "2 0.300000 0.300000 0.400000 0.200000");
}

#[test]
fn test_obb_line_lists_four_corners() {
    let obb = OrientedRectangle::new(1, 0.5, 0.5, 0.2, 0.1, 0.0).with_image_size(100.0, 100.0);
    let values = fields(&yolo_line(&AnnotationObject::Obb(obb)));
    assert_eq!(values.len(), 9);
    assert_eq!(values[0], 1.0);
    assert!((values[1] - 0.4).abs() < 1e-6);
    assert!((values[2] - 0.45).abs() < 1e-6);
}

#[test]
fn test_polygon_and_keypoint_lines() {
    let poly = Polygon::new(
        3,
        vec![Point::new(0.1, 0.1), Point::new(0.2, 0.1), Point::new(0.2, 0.3)],
    );
    assert_eq!(
        yolo_line(&AnnotationObject::Polygon(poly)),
        "3 0.100000 0.100000 0.200000 0.100000 0.200000 0.300000"
    );
    assert_eq!(
        yolo_line(&AnnotationObject::Keypoint(Keypoint::new(0, 0.25, 0.75))),
        "0 0.250000 0.750000"
    );
}

#[test]
fn test_pose_line_includes_keypoints_with_visibility() {
    let mut pose = Pose::new(4, 0.1, 0.1, 0.5, 0.5);
    pose.keypoints = vec![
        PoseKeypoint::new(0, 0.2, 0.2, true),
        PoseKeypoint::new(1, 0.3, 0.3, false),
    ];
    assert_eq!(
        yolo_line(&AnnotationObject::Pose(pose)),
        "4 0.100000 0.100000 0.500000 0.500000 0 0.200000 0.200000 1 1 0.300000 0.300000 0"
    );
}

#[test]
fn test_export_writes_one_file_per_image() {
    let images = vec![
        AnnotationFile::new("train/photo001.jpg").with_annotations(vec![
            AnnotationObject::Bbox(Rectangle::new(0, 0.1, 0.1, 0.3, 0.3)),
            AnnotationObject::Keypoint(Keypoint::new(1, 0.5, 0.5)),
        ]),
        AnnotationFile::new("empty.png"),
    ];
    let result = YoloFormat
        .export_to_files(&images, &ClassRegistry::new())
        .unwrap();

    assert_eq!(result.images_exported, 2);
    assert_eq!(result.annotations_exported, 2);
    assert!(!result.has_warnings());

    let photo = result.file("photo001.txt").unwrap();
    assert_eq!(photo.contents.lines().count(), 2);
    assert!(photo.contents.starts_with("0 0.200000 0.200000"));
    assert_eq!(result.file("empty.txt").unwrap().contents, "");
}

#[test]
fn test_export_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("yolo");
    let images = vec![AnnotationFile::new("a.jpg").with_annotations(vec![
        AnnotationObject::Keypoint(Keypoint::new(0, 0.5, 0.5)),
    ])];
    let result = YoloFormat
        .export(&images, &ClassRegistry::new(), &out)
        .unwrap();

    assert_eq!(result.files_created, vec![out.join("a.txt")]);
    let written = std::fs::read_to_string(out.join("a.txt")).unwrap();
    assert_eq!(written, "0 0.500000 0.500000\n");
}
