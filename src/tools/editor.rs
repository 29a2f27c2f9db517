//! The tool manager.
//!
//! [`Editor`] owns the store, the class registry and the interaction state,
//! and routes each [`InputEvent`] to the handler of the active tool.

use crate::constants::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};
use crate::format::AnnotationFile;
use crate::model::{AnnotationId, AnnotationObject};
use crate::registry::ClassRegistry;
use crate::render::{self, DrawRequest};
use crate::store::AnnotationStore;

use super::common::{ToolContext, switch_tool};
use super::draw_rect::BoxKind;
use super::{
    InputEvent, InteractionState, PointerEvent, Tool, draw_point, draw_poly, draw_pose, draw_rect,
    edit, keyboard, select, wheel,
};

/// Headless annotation editor for one image at a time.
#[derive(Debug, Clone)]
pub struct Editor {
    store: AnnotationStore,
    registry: ClassRegistry,
    state: InteractionState,
    image_width: u32,
    image_height: u32,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ClassRegistry::default())
    }
}

impl Editor {
    pub fn new(registry: ClassRegistry) -> Self {
        Self {
            store: AnnotationStore::new(),
            registry,
            state: InteractionState::new(),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
        }
    }

    fn context(&mut self) -> ToolContext<'_> {
        ToolContext {
            store: &mut self.store,
            registry: &self.registry,
            state: &mut self.state,
            image_size: (self.image_width, self.image_height),
        }
    }

    // ------------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(ev) => self.pointer_down(ev),
            InputEvent::PointerMove(ev) => self.pointer_move(ev),
            InputEvent::PointerUp(ev) => self.pointer_up(ev),
            InputEvent::Wheel(ev) => wheel::on_wheel(&mut self.state, ev),
            InputEvent::KeyDown(ev) => keyboard::on_key_down(&mut self.context(), ev),
            InputEvent::SetTool { tool } => self.set_tool(*tool),
        }
    }

    pub fn pointer_down(&mut self, ev: &PointerEvent) {
        let tool = self.state.tool;
        let mut ctx = self.context();
        match tool {
            Tool::Select => select::on_pointer_down(&mut ctx, ev),
            Tool::DrawRect => draw_rect::on_pointer_down(&mut ctx, ev, BoxKind::Axis),
            Tool::DrawObb => draw_rect::on_pointer_down(&mut ctx, ev, BoxKind::Oriented),
            Tool::DrawPoly => draw_poly::on_pointer_down(&mut ctx, ev),
            Tool::DrawPoint => draw_point::on_pointer_down(&mut ctx, ev),
            Tool::DrawPose => draw_pose::on_pointer_down(&mut ctx, ev),
            Tool::EditRect | Tool::EditObb | Tool::EditPoly | Tool::EditPoint | Tool::EditPose => {
                edit::on_pointer_down(&mut ctx, ev)
            }
        }
    }

    pub fn pointer_move(&mut self, ev: &PointerEvent) {
        let tool = self.state.tool;
        let mut ctx = self.context();
        match tool {
            Tool::Select => select::on_pointer_move(&mut ctx, ev),
            Tool::DrawRect => draw_rect::on_pointer_move(&mut ctx, ev, BoxKind::Axis),
            Tool::DrawObb => draw_rect::on_pointer_move(&mut ctx, ev, BoxKind::Oriented),
            Tool::DrawPoly => draw_poly::on_pointer_move(&mut ctx, ev),
            Tool::DrawPoint => draw_point::on_pointer_move(&mut ctx, ev),
            Tool::DrawPose => draw_pose::on_pointer_move(&mut ctx, ev),
            Tool::EditRect | Tool::EditObb | Tool::EditPoly | Tool::EditPoint | Tool::EditPose => {
                edit::on_pointer_move(&mut ctx, ev)
            }
        }
    }

    pub fn pointer_up(&mut self, ev: &PointerEvent) {
        let tool = self.state.tool;
        let mut ctx = self.context();
        match tool {
            Tool::Select => select::on_pointer_up(&mut ctx, ev),
            Tool::DrawRect | Tool::DrawObb => draw_rect::on_pointer_up(&mut ctx, ev),
            // Polygons, points and poses finish on press.
            Tool::DrawPoly | Tool::DrawPoint | Tool::DrawPose => {}
            Tool::EditRect | Tool::EditObb | Tool::EditPoly | Tool::EditPoint | Tool::EditPose => {
                edit::on_pointer_up(&mut ctx, ev)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Tool and selection
    // ------------------------------------------------------------------------

    pub fn tool(&self) -> Tool {
        self.state.tool
    }

    /// Toolbar switch. Ends any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        switch_tool(&mut self.state, tool);
        if !tool.is_edit() {
            self.state.clear_selection();
        }
    }

    pub fn set_selected_class(&mut self, class_id: u32) {
        self.state.selected_class_id = class_id;
    }

    /// Select from a list, without switching tools. Returns false for unknown ids.
    pub fn select_annotation(&mut self, id: AnnotationId) -> bool {
        let Some(object) = self.store.get(id) else {
            return false;
        };
        self.state.selected_class_id = object.class_id();
        self.state.selected_annotation = Some(id);
        true
    }

    pub fn selected_annotation(&self) -> Option<AnnotationId> {
        self.state.selected_annotation
    }

    // ------------------------------------------------------------------------
    // Store operations
    // ------------------------------------------------------------------------

    /// Delete an annotation and checkpoint. Clears the selection if it pointed there.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        if !self.store.remove_annotation(id) {
            return false;
        }
        self.store.save_history();
        if self.state.selected_annotation == Some(id) {
            self.state.clear_selection();
            if self.state.tool.is_edit() {
                switch_tool(&mut self.state, Tool::Select);
            }
        }
        if self.state.hovering_annotation == Some(id) {
            self.state.hovering_annotation = None;
        }
        true
    }

    /// Replace an annotation from a form edit.
    ///
    /// Applied only when the new class exists for the shape's kind.
    pub fn apply_edit(&mut self, id: AnnotationId, object: AnnotationObject) -> bool {
        if !self.registry.contains(object.kind(), object.class_id()) {
            log::warn!(
                "Rejected edit of #{}: {} class {} is not defined",
                id,
                object.kind(),
                object.class_id()
            );
            return false;
        }
        let class_id = object.class_id();
        if !self.store.update_annotation(id, object) {
            return false;
        }
        self.state.selected_class_id = class_id;
        self.store.save_history();
        true
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        if changed {
            self.state.clear_gesture();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        if changed {
            self.state.clear_gesture();
        }
        changed
    }

    /// Replace the store with `objects`, resetting history and selection.
    pub fn load_annotations(&mut self, objects: Vec<AnnotationObject>) {
        self.store.load_annotations(objects);
        self.state.clear_gesture();
        self.state.clear_selection();
        self.state.hovering_annotation = None;
    }

    /// Load an annotation file, taking its image size when present.
    pub fn load_file(&mut self, file: &AnnotationFile) {
        if let (Some(width), Some(height)) = (file.width, file.height) {
            self.set_image_size(width, height);
        }
        self.load_annotations(file.annotations.clone());
    }

    /// Current annotations as a file, in id order.
    pub fn to_annotation_file(&self, name: &str) -> AnnotationFile {
        AnnotationFile {
            name: name.to_string(),
            annotations: self.store.to_vec(),
            labels: Vec::new(),
            width: Some(self.image_width),
            height: Some(self.image_height),
        }
    }

    // ------------------------------------------------------------------------
    // Image and viewport
    // ------------------------------------------------------------------------

    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.image_width = width.max(1);
        self.image_height = height.max(1);
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn zoom(&self) -> u32 {
        self.state.zoom
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.state.zoom = zoom;
    }

    /// Canvas pixel size for the current image: the longer side equals the zoom.
    pub fn canvas_size(&self) -> (u32, u32) {
        canvas_size(self.state.zoom, self.image_width, self.image_height)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClassRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Draw requests for every stored shape, in id order.
    pub fn draw_requests(&self) -> Vec<DrawRequest> {
        render::draw_requests(&self.store, &self.registry, &self.state)
    }
}

/// Canvas pixel size for an `image_w`×`image_h` image at `zoom`.
pub fn canvas_size(zoom: u32, image_w: u32, image_h: u32) -> (u32, u32) {
    let (w, h) = (f64::from(image_w.max(1)), f64::from(image_h.max(1)));
    let zoom_f = f64::from(zoom);
    let scaled = |short: f64, long: f64| (zoom_f * short / long).round() as u32;
    if w >= h {
        (zoom, scaled(h, w))
    } else {
        (scaled(w, h), zoom)
    }
}
