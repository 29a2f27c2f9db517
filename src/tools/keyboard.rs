//! Global key bindings: Ctrl+Z / Ctrl+Y for history, Delete for the selection.

use super::common::{ToolContext, deselect};
use super::{Key, KeyEvent};

pub fn on_key_down(ctx: &mut ToolContext<'_>, ev: &KeyEvent) {
    match (ev.key, ev.ctrl) {
        (Key::Z, true) => {
            if ctx.store.undo() {
                ctx.state.clear_gesture();
            }
        }
        (Key::Y, true) => {
            if ctx.store.redo() {
                ctx.state.clear_gesture();
            }
        }
        (Key::Delete, _) => remove_selected(ctx),
        _ => {}
    }
}

/// Delete the selected shape, checkpoint, and return to SELECT.
pub fn remove_selected(ctx: &mut ToolContext<'_>) {
    let Some(id) = ctx.state.selected_annotation else {
        return;
    };
    if ctx.store.remove_annotation(id) {
        ctx.checkpoint();
    }
    if ctx.state.hovering_annotation == Some(id) {
        ctx.state.hovering_annotation = None;
    }
    deselect(ctx);
}
