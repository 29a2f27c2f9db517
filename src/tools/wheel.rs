//! Wheel zoom. The zoom scalar only sizes the canvas; geometry is unaffected.

use crate::constants::{MIN_ZOOM, ZOOM_STEP};

use super::InteractionState;
use super::WheelEvent;

pub fn on_wheel(state: &mut InteractionState, ev: &WheelEvent) {
    if ev.delta_y > 0.0 {
        zoom_in(state);
    } else if ev.delta_y < 0.0 {
        zoom_out(state);
    }
}

pub fn zoom_in(state: &mut InteractionState) {
    state.zoom = state.zoom.saturating_add(ZOOM_STEP);
    log::debug!("🔍 Zoom in: {}", state.zoom);
}

pub fn zoom_out(state: &mut InteractionState) {
    state.zoom = state.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    log::debug!("🔍 Zoom out: {}", state.zoom);
}
