//! Behavior shared by several tools.

use crate::geometry::Point;
use crate::model::{AnnotationId, AnnotationObject, ShapeKind};
use crate::registry::ClassRegistry;
use crate::store::AnnotationStore;

use super::{InteractionState, Tool};

/// Everything a tool handler may touch while handling one event.
pub struct ToolContext<'a> {
    pub store: &'a mut AnnotationStore,
    pub registry: &'a ClassRegistry,
    pub state: &'a mut InteractionState,
    /// Pixel size of the current image.
    pub image_size: (u32, u32),
}

impl ToolContext<'_> {
    /// The selected shape, if the selection still exists.
    pub fn selected(&self) -> Option<(AnnotationId, &AnnotationObject)> {
        let id = self.state.selected_annotation?;
        self.store.get(id).map(|object| (id, object))
    }

    /// Replace the selected shape with `f(shape)`. No-op without a selection.
    pub fn update_selected(&mut self, f: impl FnOnce(&AnnotationObject) -> AnnotationObject) {
        let Some((id, object)) = self.selected() else {
            return;
        };
        let updated = f(object);
        self.store.update_annotation(id, updated);
    }

    /// Checkpoint the store.
    pub fn checkpoint(&mut self) {
        self.store.save_history();
    }
}

/// Recompute hover targets for pointer position `p`.
///
/// Shapes are tested in id order and the first hit wins. Vertex, keypoint
/// and handle hover are only computed for the selected shape.
pub fn update_hover(ctx: &mut ToolContext<'_>, p: Point) {
    let hovering = ctx
        .store
        .iter()
        .find(|(_, object)| object.hit_test(p.x, p.y))
        .map(|(id, _)| id);

    let (vertex, keypoint, handle) = match ctx.selected() {
        Some((_, object)) => {
            let vertex = object.find_nearest_vertex(p.x, p.y);
            let keypoint = match object {
                AnnotationObject::Pose(pose) => pose.find_nearest_keypoint(p.x, p.y),
                _ => None,
            };
            let handle = match object {
                AnnotationObject::Obb(obb) => obb.is_hovering_handle(p.x, p.y),
                _ => false,
            };
            (vertex, keypoint, handle)
        }
        None => (None, None, false),
    };

    let state = &mut *ctx.state;
    if state.hovering_annotation != hovering || state.hovering_vertex != vertex {
        log::trace!(
            "Hover: annotation {:?}, vertex {:?}, keypoint {:?}",
            hovering,
            vertex,
            keypoint
        );
    }
    state.hovering_annotation = hovering;
    state.hovering_vertex = vertex;
    state.hovering_keypoint = keypoint;
    state.is_hovering_handle = handle;
}

/// Activate `tool`, ending any gesture in progress.
pub fn switch_tool(state: &mut InteractionState, tool: Tool) {
    if state.tool != tool {
        log::debug!("🔧 Tool: {} -> {}", state.tool, tool);
    }
    state.clear_gesture();
    state.tool = tool;
}

/// Select annotation `id` and switch to the edit tool for its kind.
///
/// The selected class follows the shape's class.
pub fn select_for_edit(ctx: &mut ToolContext<'_>, id: AnnotationId) -> bool {
    let Some(object) = ctx.store.get(id) else {
        return false;
    };
    let kind = object.kind();
    let class_id = object.class_id();
    switch_tool(ctx.state, Tool::edit_for(kind));
    ctx.state.selected_class_id = class_id;
    ctx.state.selected_annotation = Some(id);
    log::debug!("Selected {} #{} (class {})", kind, id, class_id);
    true
}

/// Return to SELECT with nothing selected.
pub fn deselect(ctx: &mut ToolContext<'_>) {
    switch_tool(ctx.state, Tool::Select);
    ctx.state.clear_selection();
}

/// Advance the selected class id within `kind`'s bucket.
pub fn cycle_class(ctx: &mut ToolContext<'_>, kind: ShapeKind) -> u32 {
    let next = ctx.registry.next_class_id(kind, ctx.state.selected_class_id);
    log::debug!("🎨 Class ({}): {} -> {}", kind, ctx.state.selected_class_id, next);
    ctx.state.selected_class_id = next;
    next
}
