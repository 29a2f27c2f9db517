//! DRAW_RECT and DRAW_OBB: press to anchor, drag to size, release to finish.

use crate::model::ShapeKind;

use super::PointerEvent;
use super::common::{ToolContext, cycle_class, update_hover};

/// Which box kind is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Axis,
    Oriented,
}

impl BoxKind {
    fn shape_kind(self) -> ShapeKind {
        match self {
            BoxKind::Axis => ShapeKind::Bbox,
            BoxKind::Oriented => ShapeKind::Obb,
        }
    }
}

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent, kind: BoxKind) {
    if ev.is_secondary() {
        cycle_class(ctx, kind.shape_kind());
        return;
    }
    if !ev.is_primary() {
        return;
    }

    let p = ev.position().clamped();
    let class_id = ctx.state.selected_class_id;
    let id = match kind {
        BoxKind::Axis => ctx.store.start_draw_rect(class_id, p),
        BoxKind::Oriented => {
            let (img_w, img_h) = ctx.image_size;
            ctx.store.start_draw_obb(class_id, p, img_w, img_h)
        }
    };
    ctx.state.is_drawing = true;
    log::debug!("✏️ Drawing {} #{} from ({:.3}, {:.3})", kind.shape_kind(), id, p.x, p.y);
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent, kind: BoxKind) {
    if ctx.state.is_drawing {
        let p = ev.position().clamped();
        match kind {
            BoxKind::Axis => ctx.store.update_draw_rect(p),
            BoxKind::Oriented => ctx.store.update_draw_obb(p),
        }
    }
    update_hover(ctx, ev.position());
}

pub fn on_pointer_up(ctx: &mut ToolContext<'_>, _ev: &PointerEvent) {
    if ctx.state.is_drawing {
        ctx.state.is_drawing = false;
        ctx.checkpoint();
    }
}
