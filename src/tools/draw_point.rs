//! DRAW_POINT: every primary press places a finished keypoint.

use crate::model::ShapeKind;

use super::PointerEvent;
use super::common::{ToolContext, cycle_class, update_hover};

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ev.is_secondary() {
        cycle_class(ctx, ShapeKind::Keypoint);
        return;
    }
    if !ev.is_primary() {
        return;
    }
    let id = ctx
        .store
        .draw_point(ctx.state.selected_class_id, ev.position().clamped());
    log::debug!("📍 Placed keypoint #{}", id);
    ctx.checkpoint();
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    update_hover(ctx, ev.position());
}
