//! Transient interaction state.
//!
//! Nothing here is persisted. It holds what the tool handlers need between
//! events: the active tool, hover and selection targets, and the flags of
//! the gesture in progress.

use crate::constants::DEFAULT_ZOOM;
use crate::geometry::Point;
use crate::model::AnnotationId;

use super::Tool;

/// Incremental drag anchor: each update returns the delta since the last one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragAnchor {
    last: Option<Point>,
}

impl DragAnchor {
    pub fn start(&mut self, pos: Point) {
        self.last = Some(pos);
    }

    /// Delta from the previous position, then re-anchor at `pos`.
    pub fn update(&mut self, pos: Point) -> Option<(f64, f64)> {
        let last = self.last?;
        self.last = Some(pos);
        Some((pos.x - last.x, pos.y - last.y))
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn position(&self) -> Option<Point> {
        self.last
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    pub tool: Tool,
    pub selected_annotation: Option<AnnotationId>,
    /// Vertex being dragged on the selected shape.
    pub selected_vertex: Option<usize>,
    /// Pose keypoint being dragged on the selected shape.
    pub selected_keypoint: Option<usize>,
    pub hovering_annotation: Option<AnnotationId>,
    /// Vertex of the selected shape under the pointer.
    pub hovering_vertex: Option<usize>,
    /// Keypoint of the selected pose under the pointer.
    pub hovering_keypoint: Option<usize>,
    pub is_drawing: bool,
    /// Whole-shape move in progress.
    pub is_editing: bool,
    pub is_handle_selected: bool,
    pub is_hovering_handle: bool,
    /// Anchor of a whole-shape move, in normalized coordinates.
    pub move_anchor: DragAnchor,
    /// Anchor of a pan, in screen pixels.
    pub pan_anchor: DragAnchor,
    /// Accumulated pan offset in screen pixels.
    pub offset: (f64, f64),
    /// Class assigned to new shapes.
    pub selected_class_id: u32,
    pub zoom: u32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            tool: Tool::Select,
            selected_annotation: None,
            selected_vertex: None,
            selected_keypoint: None,
            hovering_annotation: None,
            hovering_vertex: None,
            hovering_keypoint: None,
            is_drawing: false,
            is_editing: false,
            is_handle_selected: false,
            is_hovering_handle: false,
            move_anchor: DragAnchor::default(),
            pan_anchor: DragAnchor::default(),
            offset: (0.0, 0.0),
            selected_class_id: 0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any edit drag (vertex, keypoint, handle or move) is active.
    pub fn is_dragging(&self) -> bool {
        self.selected_vertex.is_some()
            || self.selected_keypoint.is_some()
            || self.is_handle_selected
            || self.is_editing
    }

    /// End every gesture in progress. Selection, class and view are kept.
    pub fn clear_gesture(&mut self) {
        self.is_drawing = false;
        self.is_editing = false;
        self.is_handle_selected = false;
        self.selected_vertex = None;
        self.selected_keypoint = None;
        self.move_anchor.end();
        self.pan_anchor.end();
    }

    pub fn clear_selection(&mut self) {
        self.selected_annotation = None;
        self.selected_vertex = None;
        self.selected_keypoint = None;
        self.hovering_vertex = None;
        self.hovering_keypoint = None;
        self.is_hovering_handle = false;
    }
}
