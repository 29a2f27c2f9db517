//! Drawing tools: boxes, polygons, points and poses.

use super::{assert_close, down, move_to, right_down, up};
use crate::geometry::Point;
use crate::model::{AnnotationObject, ClassAttributes, PoseClass, ShapeKind};
use crate::registry::ClassRegistry;
use crate::shapes::{Polygon, Pose, PoseKeypoint, Rectangle};
use crate::tools::{Editor, Tool};

fn editor_with(tool: Tool) -> Editor {
    let mut editor = Editor::default();
    editor.set_tool(tool);
    editor
}

fn polygon(editor: &Editor, id: u32) -> Polygon {
    match editor.store().get(id) {
        Some(AnnotationObject::Polygon(poly)) => poly.clone(),
        other => panic!("expected polygon, got {:?}", other),
    }
}

fn pose(editor: &Editor, id: u32) -> Pose {
    match editor.store().get(id) {
        Some(AnnotationObject::Pose(pose)) => pose.clone(),
        other => panic!("expected pose, got {:?}", other),
    }
}

#[test]
fn test_draw_rect_gesture() {
    let mut editor = editor_with(Tool::DrawRect);
    down(&mut editor, 0.1, 0.1);
    assert!(editor.state().is_drawing);
    move_to(&mut editor, 0.3, 0.2);
    move_to(&mut editor, 0.5, 0.4);
    up(&mut editor, 0.5, 0.4);

    assert!(!editor.state().is_drawing);
    assert_eq!(editor.store().len(), 1);
    assert_eq!(
        editor.store().get(0),
        Some(&AnnotationObject::Bbox(Rectangle::new(0, 0.1, 0.1, 0.5, 0.4)))
    );
    assert_eq!(editor.store().history().index(), 1);
}

#[test]
fn test_draw_rect_clamps_to_image() {
    let mut editor = editor_with(Tool::DrawRect);
    down(&mut editor, -0.2, 0.5);
    move_to(&mut editor, 1.4, 0.9);
    up(&mut editor, 1.4, 0.9);

    assert_eq!(
        editor.store().get(0),
        Some(&AnnotationObject::Bbox(Rectangle::new(0, 0.0, 0.5, 1.0, 0.9)))
    );
}

#[test]
fn test_release_without_press_does_not_checkpoint() {
    let mut editor = editor_with(Tool::DrawRect);
    move_to(&mut editor, 0.5, 0.5);
    up(&mut editor, 0.5, 0.5);
    assert!(editor.store().is_empty());
    assert!(!editor.store().can_undo());
}

#[test]
fn test_draw_obb_uses_image_size() {
    let mut editor = editor_with(Tool::DrawObb);
    editor.set_image_size(200, 100);
    down(&mut editor, 0.5, 0.5);
    move_to(&mut editor, 0.7, 0.6);
    up(&mut editor, 0.7, 0.6);

    let Some(AnnotationObject::Obb(obb)) = editor.store().get(0) else {
        panic!("expected an oriented box");
    };
    assert_close(obb.xc, 0.6);
    assert_close(obb.yc, 0.55);
    assert_close(obb.w, 0.2);
    assert_close(obb.h, 0.1);
    assert_eq!(obb.alpha, 0.0);
    assert_eq!((obb.img_w, obb.img_h), (200.0, 100.0));
    assert!(editor.store().can_undo());
}

#[test]
fn test_draw_point_finishes_on_press() {
    let mut registry = ClassRegistry::new();
    registry.add_class(ShapeKind::Keypoint, 1, ClassAttributes::new("tree", [0, 128, 0]));
    let mut editor = Editor::new(registry);
    editor.set_tool(Tool::DrawPoint);

    right_down(&mut editor, 0.0, 0.0);
    assert_eq!(editor.state().selected_class_id, 1);
    down(&mut editor, 0.3, 0.3);
    down(&mut editor, 0.6, 0.2);

    assert_eq!(editor.store().len(), 2);
    assert_eq!(editor.store().get(0).map(AnnotationObject::class_id), Some(1));
    assert_eq!(editor.store().history().index(), 2);
}

#[test]
fn test_secondary_press_cycles_and_wraps() {
    let mut registry = ClassRegistry::new();
    registry.add_class(ShapeKind::Bbox, 1, ClassAttributes::new("car", [255, 0, 0]));
    let mut editor = Editor::new(registry);
    editor.set_tool(Tool::DrawRect);

    right_down(&mut editor, 0.5, 0.5);
    assert_eq!(editor.state().selected_class_id, 1);
    right_down(&mut editor, 0.5, 0.5);
    assert_eq!(editor.state().selected_class_id, 0);
    assert!(editor.store().is_empty());
}

#[test]
fn test_draw_polygon_closes_on_first_vertex() {
    let mut editor = editor_with(Tool::DrawPoly);

    down(&mut editor, 0.1, 0.1);
    assert!(editor.state().is_drawing);
    assert_eq!(editor.state().selected_annotation, Some(0));
    assert_eq!(polygon(&editor, 0).shell.len(), 2);

    move_to(&mut editor, 0.5, 0.1);
    down(&mut editor, 0.5, 0.1);
    move_to(&mut editor, 0.5, 0.5);
    down(&mut editor, 0.5, 0.5);
    assert_eq!(polygon(&editor, 0).shell.len(), 4);

    // The live vertex snaps onto the start once closing is possible.
    move_to(&mut editor, 0.105, 0.1);
    assert_eq!(polygon(&editor, 0).shell[3], Point::new(0.1, 0.1));

    down(&mut editor, 0.105, 0.1);
    assert!(!editor.state().is_drawing);
    assert_eq!(
        polygon(&editor, 0).shell,
        vec![Point::new(0.1, 0.1), Point::new(0.5, 0.1), Point::new(0.5, 0.5)]
    );
    assert_eq!(editor.store().history().index(), 1);
}

#[test]
fn test_polygon_needs_enough_vertices_to_close() {
    let mut editor = editor_with(Tool::DrawPoly);
    down(&mut editor, 0.1, 0.1);
    // Only the live vertex exists, so this press adds a vertex.
    down(&mut editor, 0.11, 0.1);
    assert!(editor.state().is_drawing);
    assert_eq!(polygon(&editor, 0).shell.len(), 3);
    assert!(!editor.store().can_undo());
}

#[test]
fn test_draw_pose_places_configured_keypoints() {
    let mut registry = ClassRegistry::new();
    registry.add_pose_class(
        0,
        PoseClass::new("person", [0, 0, 255])
            .with_keypoint(0, ClassAttributes::new("head", [1, 1, 1]))
            .with_keypoint(1, ClassAttributes::new("foot", [2, 2, 2])),
    );
    let mut editor = Editor::new(registry);
    editor.set_tool(Tool::DrawPose);

    down(&mut editor, 0.1, 0.1);
    move_to(&mut editor, 0.6, 0.7);
    down(&mut editor, 0.3, 0.3);
    move_to(&mut editor, 0.35, 0.35);
    down(&mut editor, 0.4, 0.5);
    assert!(editor.state().is_drawing);
    assert!(!editor.store().can_undo());

    // Every keypoint placed: the next press finishes.
    down(&mut editor, 0.9, 0.9);
    assert!(!editor.state().is_drawing);
    assert!(editor.store().can_undo());

    let pose = pose(&editor, 0);
    assert_eq!((pose.x1, pose.y1, pose.x2, pose.y2), (0.1, 0.1, 0.6, 0.7));
    assert_eq!(
        pose.keypoints,
        vec![
            PoseKeypoint::new(0, 0.35, 0.35, true),
            PoseKeypoint::new(1, 0.4, 0.5, true),
        ]
    );
}

#[test]
fn test_pose_without_keypoints_finishes_on_second_press() {
    let mut editor = editor_with(Tool::DrawPose);
    down(&mut editor, 0.2, 0.2);
    move_to(&mut editor, 0.4, 0.4);
    down(&mut editor, 0.4, 0.4);

    assert!(!editor.state().is_drawing);
    let pose = pose(&editor, 0);
    assert!(pose.keypoints.is_empty());
    assert_eq!((pose.x2, pose.y2), (0.4, 0.4));
}
