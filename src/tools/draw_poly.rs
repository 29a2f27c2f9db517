//! DRAW_POLY: click to add vertices, click the first vertex to close.
//!
//! While drawing, the polygon's last vertex is a live vertex that follows
//! the pointer. A click commits it and pushes a new live vertex.

use crate::geometry::Point;
use crate::model::{AnnotationObject, ShapeKind};
use crate::shapes::Polygon;

use super::PointerEvent;
use super::common::{ToolContext, cycle_class, update_hover};

/// Minimum shell length (live vertex included) before the ring can close.
const MIN_CLOSING_SHELL: usize = 4;

fn drawing_polygon<'a>(ctx: &'a ToolContext<'_>) -> Option<&'a Polygon> {
    let id = ctx.store.drawing_id()?;
    match ctx.store.get(id)? {
        AnnotationObject::Polygon(poly) => Some(poly),
        _ => None,
    }
}

/// Whether `p` closes `poly`: near its first vertex with enough vertices placed.
fn closes_ring(poly: &Polygon, p: Point) -> bool {
    poly.shell.len() >= MIN_CLOSING_SHELL && poly.is_near_vertex(p.x, p.y, 0)
}

pub fn on_pointer_down(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ev.is_secondary() {
        cycle_class(ctx, ShapeKind::Polygon);
        return;
    }
    if !ev.is_primary() {
        return;
    }

    let p = ev.position().clamped();
    if ctx.state.is_drawing {
        let closing = drawing_polygon(ctx).is_some_and(|poly| closes_ring(poly, p));
        if closing {
            ctx.store.finish_draw_poly();
            ctx.state.is_drawing = false;
            log::debug!("✏️ Polygon closed");
            ctx.checkpoint();
        } else {
            ctx.store.push_draw_poly_vertex(p);
        }
        return;
    }

    let id = ctx.store.start_draw_poly(ctx.state.selected_class_id, p);
    ctx.state.is_drawing = true;
    ctx.state.selected_annotation = Some(id);
    log::debug!("✏️ Drawing polygon #{}", id);
}

pub fn on_pointer_move(ctx: &mut ToolContext<'_>, ev: &PointerEvent) {
    if ctx.state.is_drawing {
        let p = ev.position().clamped();
        // Snap the live vertex onto the first one when closing is possible.
        let target = drawing_polygon(ctx)
            .filter(|poly| closes_ring(poly, p))
            .and_then(|poly| poly.shell.first().copied())
            .unwrap_or(p);
        ctx.store.update_draw_poly(target);
    }
    update_hover(ctx, ev.position());
}
