//! EDIT_* tools: drag vertices, keypoints, the rotation handle, or the whole shape.
//!
//! All five edit tools share one press/drag/release cycle. Press picks the
//! gesture in this order: hovered vertex, hovered pose keypoint, hovered OBB
//! handle, the selected shape's body (move), another shape (select it
//! only), and finally empty space (back to SELECT). Release checkpoints
//! once per gesture.

use crate::geometry::Point;
use crate::model::AnnotationObject;
use crate::shapes::OrientedRectangle;

use super::common::{ToolContext, deselect, select_for_edit, update_hover};
use super::{PointerEvent, Tool};

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ev.is_secondary() {
        relabel_selected(ctx);
        return;
    }
    if !ev.is_primary() {
        return;
    }

    let p = ev.position();
    let state = &mut *ctx.state;

    if let Some(vertex) = state.hovering_vertex {
        state.selected_vertex = Some(vertex);
        log::debug!("Vertex {} grabbed", vertex);
        return;
    }
    if state.tool == Tool::EditPose
        && let Some(keypoint) = state.hovering_keypoint
    {
        state.selected_keypoint = Some(keypoint);
        log::debug!("Keypoint {} grabbed", keypoint);
        return;
    }
    if state.tool == Tool::EditObb && state.is_hovering_handle {
        state.is_handle_selected = true;
        log::debug!("Rotation handle grabbed");
        return;
    }

    let selected = state.selected_annotation;
    match state.hovering_annotation {
        Some(id) if Some(id) == selected => {
            ctx.state.is_editing = true;
            ctx.state.move_anchor.start(p);
        }
        Some(id) => {
            select_for_edit(ctx, id);
        }
        None => deselect(ctx),
    }
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    let p = ev.position();

    if let Some(vertex) = ctx.state.selected_vertex {
        ctx.update_selected(|object| object.move_vertex(p.x, p.y, vertex));
    } else if let Some(keypoint) = ctx.state.selected_keypoint {
        ctx.update_selected(|object| match object {
            AnnotationObject::Pose(pose) => {
                AnnotationObject::Pose(pose.move_keypoint(p.x, p.y, keypoint))
            }
            other => other.clone(),
        });
    } else if ctx.state.is_handle_selected {
        ctx.update_selected(|object| aim_handle(object, p));
    } else if ctx.state.is_editing
        && let Some((dx, dy)) = ctx.state.move_anchor.update(p)
    {
        ctx.update_selected(|object| match object {
            // Keypoints follow the pointer directly.
            AnnotationObject::Keypoint(kp) => {
                let target = p.clamped();
                AnnotationObject::Keypoint(kp.move_to(target.x, target.y))
            }
            other => other.move_by(dx, dy),
        });
    }

    update_hover(ctx, p);
}

pub fn on_pointer_up(ctx: &mut ToolContext<'_>, _ev: &PointerEvent) {
    if !ctx.state.is_dragging() {
        return;
    }
    let state = &mut *ctx.state;
    state.selected_vertex = None;
    state.selected_keypoint = None;
    state.is_handle_selected = false;
    state.is_editing = false;
    state.move_anchor.end();
    if ctx.selected().is_some() {
        ctx.checkpoint();
    }
}

/// Set an OBB's angle so its handle points at `p`.
///
/// The angle is absolute and is not bounded against the image.
fn aim_handle(object: &AnnotationObject, p: Point) -> AnnotationObject {
    match object {
        AnnotationObject::Obb(obb) => AnnotationObject::Obb(OrientedRectangle {
            alpha: obb.angle_towards(p.x, p.y),
            ..*obb
        }),
        other => other.clone(),
    }
}

/// Secondary press: move the selected shape to the next class and checkpoint.
fn relabel_selected(ctx: &mut ToolContext<'_>) {
    let Some((id, object)) = ctx.selected() else {
        return;
    };
    let kind = object.kind();
    let next = ctx.registry.next_class_id(kind, object.class_id());
    let relabeled = object.with_class_id(next);
    ctx.store.update_annotation(id, relabeled);
    ctx.state.selected_class_id = next;
    log::debug!("🎨 {} #{} -> class {}", kind, id, next);
    ctx.checkpoint();
}
