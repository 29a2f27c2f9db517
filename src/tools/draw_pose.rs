//! DRAW_POSE: press to anchor the box, then one click per configured keypoint.
//!
//! The box corner follows the pointer until the first keypoint is placed;
//! after that the newest keypoint follows it. Once every keypoint of the
//! pose class is placed, the next click finishes the pose.

use crate::model::{AnnotationObject, ShapeKind};
use crate::shapes::Pose;

use super::PointerEvent;
use super::common::{ToolContext, cycle_class, update_hover};

fn drawing_pose<'a>(ctx: &'a ToolContext<'_>) -> Option<&'a Pose> {
    let id = ctx.store.drawing_id()?;
    match ctx.store.get(id)? {
        AnnotationObject::Pose(pose) => Some(pose),
        _ => None,
    }
}

/// First configured keypoint id of the pose class not yet placed.
fn next_keypoint_id(ctx: &ToolContext<'_>, pose: &Pose) -> Option<u32> {
    ctx.registry
        .pose_keypoint_ids(pose.class_id)
        .into_iter()
        .find(|id| !pose.has_keypoint(*id))
}

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ev.is_secondary() {
        cycle_class(ctx, ShapeKind::Pose);
        return;
    }
    if !ev.is_primary() {
        return;
    }

    let p = ev.position().clamped();
    if !ctx.state.is_drawing {
        let id = ctx.store.start_draw_pose(ctx.state.selected_class_id, p);
        ctx.state.is_drawing = true;
        log::debug!("✏️ Drawing pose #{}", id);
        return;
    }

    let next = drawing_pose(ctx).map(|pose| next_keypoint_id(ctx, pose));
    match next {
        Some(Some(keypoint_id)) => {
            ctx.store.add_draw_pose_keypoint(p, keypoint_id);
            log::debug!("✏️ Pose keypoint {} placed", keypoint_id);
        }
        // All keypoints placed, or the drawn shape vanished (undo mid-draw).
        Some(None) | None => {
            ctx.state.is_drawing = false;
            log::debug!("✏️ Pose finished");
            ctx.checkpoint();
        }
    }
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ctx.state.is_drawing {
        let p = ev.position().clamped();
        match drawing_pose(ctx).map(|pose| pose.keypoints.is_empty()) {
            Some(true) => ctx.store.update_draw_pose_bbox(p),
            Some(false) => ctx.store.update_draw_pose_keypoint(p),
            None => {}
        }
    }
    update_hover(ctx, ev.position());
}
