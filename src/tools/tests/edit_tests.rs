//! Selection and the EDIT_* tools.

use std::f64::consts::FRAC_PI_2;

use super::{assert_close, click, down, move_to, right_down, up};
use crate::model::{AnnotationObject, ClassAttributes, ShapeKind};
use crate::registry::ClassRegistry;
use crate::shapes::{Keypoint, OrientedRectangle, Pose, PoseKeypoint, Rectangle};
use crate::tools::{Editor, Tool};

fn bbox() -> AnnotationObject {
    AnnotationObject::Bbox(Rectangle::new(0, 0.2, 0.2, 0.6, 0.6))
}

fn editor_with(objects: Vec<AnnotationObject>) -> Editor {
    let mut editor = Editor::default();
    editor.load_annotations(objects);
    editor
}

fn rect(editor: &Editor, id: u32) -> Rectangle {
    match editor.store().get(id) {
        Some(AnnotationObject::Bbox(rect)) => *rect,
        other => panic!("expected bbox, got {:?}", other),
    }
}

fn pose(editor: &Editor, id: u32) -> Pose {
    match editor.store().get(id) {
        Some(AnnotationObject::Pose(pose)) => pose.clone(),
        other => panic!("expected pose, got {:?}", other),
    }
}

#[test]
fn test_select_then_drag_moves_shape() {
    let mut editor = editor_with(vec![bbox()]);

    move_to(&mut editor, 0.4, 0.4);
    assert_eq!(editor.state().hovering_annotation, Some(0));
    down(&mut editor, 0.4, 0.4);
    assert_eq!(editor.tool(), Tool::EditRect);
    assert_eq!(editor.selected_annotation(), Some(0));
    assert!(editor.state().is_editing);

    move_to(&mut editor, 0.5, 0.45);
    up(&mut editor, 0.5, 0.45);
    assert!(!editor.state().is_editing);

    let moved = rect(&editor, 0);
    assert_close(moved.x1, 0.3);
    assert_close(moved.y1, 0.25);
    assert_close(moved.x2, 0.7);
    assert_close(moved.y2, 0.65);
    assert_eq!(editor.store().history().index(), 1);

    assert!(editor.undo());
    assert_eq!(editor.store().get(0), Some(&bbox()));
}

#[test]
fn test_move_is_clamped_at_the_border() {
    let mut editor = editor_with(vec![bbox()]);
    move_to(&mut editor, 0.4, 0.4);
    down(&mut editor, 0.4, 0.4);
    move_to(&mut editor, 0.0, 0.4);
    up(&mut editor, 0.0, 0.4);

    let moved = rect(&editor, 0);
    assert_close(moved.x1, 0.0);
    assert_close(moved.x2, 0.4);
    assert_close(moved.y1, 0.2);
}

#[test]
fn test_vertex_drag_resizes() {
    let mut editor = editor_with(vec![bbox()]);
    click(&mut editor, 0.4, 0.4);

    move_to(&mut editor, 0.6, 0.6);
    assert_eq!(editor.state().hovering_vertex, Some(3));
    down(&mut editor, 0.6, 0.6);
    assert_eq!(editor.state().selected_vertex, Some(3));
    move_to(&mut editor, 0.8, 0.9);
    up(&mut editor, 0.8, 0.9);

    assert_eq!(rect(&editor, 0), Rectangle::new(0, 0.2, 0.2, 0.8, 0.9));
    assert_eq!(editor.state().selected_vertex, None);
    assert_eq!(editor.store().history().index(), 2);
}

#[test]
fn test_press_on_empty_space_returns_to_select() {
    let mut editor = editor_with(vec![bbox()]);
    click(&mut editor, 0.4, 0.4);
    assert_eq!(editor.tool(), Tool::EditRect);

    move_to(&mut editor, 0.9, 0.1);
    down(&mut editor, 0.9, 0.1);
    assert_eq!(editor.tool(), Tool::Select);
    assert_eq!(editor.selected_annotation(), None);
}

#[test]
fn test_press_on_other_shape_switches_edit_tool() {
    let mut editor = editor_with(vec![
        bbox(),
        AnnotationObject::Keypoint(Keypoint::new(0, 0.8, 0.8)),
    ]);
    click(&mut editor, 0.4, 0.4);

    move_to(&mut editor, 0.8, 0.8);
    assert_eq!(editor.state().hovering_annotation, Some(1));
    down(&mut editor, 0.8, 0.8);
    assert_eq!(editor.tool(), Tool::EditPoint);
    assert_eq!(editor.selected_annotation(), Some(1));

    assert!(!editor.state().is_editing);

    // Switching only selects; the same gesture does not drag the new shape.
    move_to(&mut editor, 0.85, 0.82);
    up(&mut editor, 0.85, 0.82);
    assert_eq!(
        editor.store().get(1),
        Some(&AnnotationObject::Keypoint(Keypoint::new(0, 0.8, 0.8)))
    );
    assert_eq!(editor.store().history().index(), 1);
}

#[test]
fn test_press_on_other_box_selects_without_moving() {
    let other = AnnotationObject::Bbox(Rectangle::new(0, 0.6, 0.6, 0.8, 0.8));
    let mut editor = editor_with(vec![
        AnnotationObject::Bbox(Rectangle::new(0, 0.1, 0.1, 0.3, 0.3)),
        other.clone(),
    ]);
    click(&mut editor, 0.2, 0.2);
    assert_eq!(editor.selected_annotation(), Some(0));
    let checkpoints = editor.store().history().index();

    move_to(&mut editor, 0.7, 0.7);
    down(&mut editor, 0.7, 0.7);
    assert_eq!(editor.selected_annotation(), Some(1));
    move_to(&mut editor, 0.75, 0.7);
    up(&mut editor, 0.75, 0.7);

    assert_eq!(editor.store().get(1), Some(&other));
    assert_eq!(editor.store().history().index(), checkpoints);

    // A second press on the now-selected box moves it.
    down(&mut editor, 0.75, 0.7);
    move_to(&mut editor, 0.7, 0.7);
    up(&mut editor, 0.7, 0.7);
    let moved = rect(&editor, 1);
    assert_close(moved.x1, 0.55);
    assert_close(moved.x2, 0.75);
    assert_eq!(editor.store().history().index(), checkpoints + 1);
}

#[test]
fn test_handle_drag_rotates_obb() {
    let obb = OrientedRectangle::new(0, 0.5, 0.5, 0.3, 0.1, 0.0).with_image_size(100.0, 100.0);
    let mut editor = editor_with(vec![AnnotationObject::Obb(obb)]);
    click(&mut editor, 0.5, 0.5);
    assert_eq!(editor.tool(), Tool::EditObb);

    move_to(&mut editor, 0.6, 0.5);
    assert!(editor.state().is_hovering_handle);
    down(&mut editor, 0.6, 0.5);
    assert!(editor.state().is_handle_selected);

    // The angle is absolute: pointing straight down means a quarter turn.
    move_to(&mut editor, 0.5, 0.7);
    up(&mut editor, 0.5, 0.7);
    assert!(!editor.state().is_handle_selected);

    let Some(AnnotationObject::Obb(rotated)) = editor.store().get(0) else {
        panic!("expected an oriented box");
    };
    assert_close(rotated.alpha, FRAC_PI_2);
    assert_eq!((rotated.xc, rotated.yc), (0.5, 0.5));
}

#[test]
fn test_handle_drag_sets_angle_even_past_the_border() {
    let obb = OrientedRectangle::new(0, 0.5, 0.85, 0.6, 0.1, 0.0).with_image_size(100.0, 100.0);
    let mut editor = editor_with(vec![AnnotationObject::Obb(obb)]);
    click(&mut editor, 0.5, 0.85);

    move_to(&mut editor, 0.7, 0.85);
    assert!(editor.state().is_hovering_handle);
    down(&mut editor, 0.7, 0.85);
    move_to(&mut editor, 0.5, 0.99);
    up(&mut editor, 0.5, 0.99);

    let Some(AnnotationObject::Obb(rotated)) = editor.store().get(0) else {
        panic!("expected an oriented box");
    };
    // A quarter turn pushes the long side below the image; the angle is taken as is.
    assert_close(rotated.alpha, FRAC_PI_2);
    assert_eq!((rotated.w, rotated.h), (0.6, 0.1));
}

#[test]
fn test_pose_keypoint_drag() {
    let mut pose_shape = Pose::new(0, 0.2, 0.2, 0.8, 0.8);
    pose_shape.keypoints.push(PoseKeypoint::new(0, 0.5, 0.5, true));
    let mut editor = editor_with(vec![AnnotationObject::Pose(pose_shape)]);
    click(&mut editor, 0.3, 0.3);
    assert_eq!(editor.tool(), Tool::EditPose);

    move_to(&mut editor, 0.5, 0.5);
    assert_eq!(editor.state().hovering_keypoint, Some(0));
    down(&mut editor, 0.5, 0.5);
    assert_eq!(editor.state().selected_keypoint, Some(0));
    move_to(&mut editor, 0.55, 0.6);
    up(&mut editor, 0.55, 0.6);

    let edited = pose(&editor, 0);
    assert_eq!(edited.keypoints, vec![PoseKeypoint::new(0, 0.55, 0.6, true)]);
    assert_eq!((edited.x1, edited.y1, edited.x2, edited.y2), (0.2, 0.2, 0.8, 0.8));
}

#[test]
fn test_pose_move_stops_at_keypoint_on_border() {
    let mut pose_shape = Pose::new(0, 0.2, 0.2, 0.8, 0.8);
    pose_shape.keypoints.push(PoseKeypoint::new(0, 0.0, 0.5, true));
    let mut editor = editor_with(vec![AnnotationObject::Pose(pose_shape)]);

    move_to(&mut editor, 0.3, 0.3);
    down(&mut editor, 0.3, 0.3);
    move_to(&mut editor, 0.2, 0.35);
    up(&mut editor, 0.2, 0.35);

    let moved = pose(&editor, 0);
    assert_eq!(moved.x1, 0.2);
    assert_eq!(moved.keypoints[0].x, 0.0);
    assert_close(moved.y1, 0.25);
    assert_close(moved.keypoints[0].y, 0.55);
}

#[test]
fn test_release_checkpoints_once_per_gesture() {
    let mut editor = editor_with(vec![bbox()]);
    click(&mut editor, 0.4, 0.4);
    assert_eq!(editor.store().history().index(), 1);

    // A press and release on the selected shape checkpoints even without movement.
    down(&mut editor, 0.4, 0.4);
    up(&mut editor, 0.4, 0.4);
    assert_eq!(editor.store().history().index(), 2);

    // A release with no gesture does not.
    move_to(&mut editor, 0.45, 0.45);
    up(&mut editor, 0.45, 0.45);
    assert_eq!(editor.store().history().index(), 2);
}

#[test]
fn test_secondary_press_relabels_selection() {
    let mut registry = ClassRegistry::new();
    registry.add_class(ShapeKind::Bbox, 1, ClassAttributes::new("car", [255, 0, 0]));
    let mut editor = Editor::new(registry);
    editor.load_annotations(vec![bbox()]);
    click(&mut editor, 0.4, 0.4);

    right_down(&mut editor, 0.4, 0.4);
    assert_eq!(editor.store().get(0).map(AnnotationObject::class_id), Some(1));
    assert_eq!(editor.state().selected_class_id, 1);
    assert_eq!(editor.store().history().index(), 2);

    right_down(&mut editor, 0.4, 0.4);
    assert_eq!(editor.store().get(0).map(AnnotationObject::class_id), Some(0));
}

#[test]
fn test_secondary_press_without_selection_is_noop() {
    let mut editor = editor_with(vec![bbox()]);
    editor.set_tool(Tool::EditRect);
    right_down(&mut editor, 0.4, 0.4);
    assert_eq!(editor.store().get(0), Some(&bbox()));
    assert!(!editor.store().can_undo());
}

#[test]
fn test_select_tool_cycles_in_newest_shape_bucket() {
    let mut registry = ClassRegistry::new();
    registry.add_class(ShapeKind::Keypoint, 1, ClassAttributes::new("eye", [0, 0, 0]));
    let mut editor = Editor::new(registry);
    editor.load_annotations(vec![AnnotationObject::Keypoint(Keypoint::new(0, 0.5, 0.5))]);

    right_down(&mut editor, 0.1, 0.1);
    assert_eq!(editor.state().selected_class_id, 1);
    assert_eq!(editor.tool(), Tool::Select);
}
