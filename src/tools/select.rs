//! SELECT tool: click a shape to edit it, drag empty space to pan.

use crate::model::ShapeKind;

use super::PointerEvent;
use super::common::{ToolContext, cycle_class, select_for_edit, update_hover};

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ev.is_secondary() {
        // Cycle within the bucket of the newest shape.
        let kind = ctx
            .store
            .last_annotation()
            .map_or(ShapeKind::Bbox, |(_, object)| object.kind());
        cycle_class(ctx, kind);
        return;
    }
    if !ev.is_primary() {
        return;
    }

    match ctx.state.hovering_annotation {
        Some(id) => {
            if select_for_edit(ctx, id) {
                ctx.state.is_editing = true;
                ctx.state.move_anchor.start(ev.position());
            }
        }
        None => {
            ctx.state.pan_anchor.start(ev.screen());
            log::debug!("Pan started at ({:.1}, {:.1})", ev.screen_x, ev.screen_y);
        }
    }
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if let Some((dx, dy)) = ctx.state.pan_anchor.update(ev.screen()) {
        ctx.state.offset.0 += dx;
        ctx.state.offset.1 += dy;
        log::trace!(
            "🖐️ Panning: delta({:.1}, {:.1}) -> offset({:.1}, {:.1})",
            dx,
            dy,
            ctx.state.offset.0,
            ctx.state.offset.1
        );
    }
    update_hover(ctx, ev.position());
}

pub fn on_pointer_up(ctx: &mut ToolContext<'_>, _ev: &PointerEvent) {
    if ctx.state.pan_anchor.is_active() {
        ctx.state.pan_anchor.end();
        log::debug!("Pan ended");
    }
}
