//! Draw requests handed to the rendering collaborator.
//!
//! The core never paints. It describes each stored shape together with how
//! it should be emphasised and which color its class maps to.

use crate::model::{AnnotationId, AnnotationObject};
use crate::registry::ClassRegistry;
use crate::store::AnnotationStore;
use crate::tools::InteractionState;

/// Paint instructions for one annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub id: AnnotationId,
    pub shape: AnnotationObject,
    /// RGB, white when the class is not registered.
    pub color: [u8; 3],
    pub highlight: bool,
    /// Vertex under the pointer, reported for the selected shape only.
    pub highlighted_vertex: Option<usize>,
    /// Pose keypoint under the pointer, selected shape only.
    pub highlighted_keypoint: Option<usize>,
    /// OBB rotation handle under the pointer, selected shape only.
    pub highlight_handle: bool,
    /// Pose skeleton edges between keypoint positions; empty for other kinds.
    pub skeleton: Vec<(usize, usize)>,
}

/// Build draw requests for every shape in id order.
///
/// In SELECT and draw tools only the selected shape is highlighted. In edit
/// tools the hovered shape is highlighted as well.
pub fn draw_requests(
    store: &AnnotationStore,
    registry: &ClassRegistry,
    state: &InteractionState,
) -> Vec<DrawRequest> {
    store
        .iter()
        .map(|(id, object)| {
            let selected = state.selected_annotation == Some(id);
            let hovered = state.hovering_annotation == Some(id);
            let highlight = selected || (state.tool.is_edit() && hovered);
            let skeleton = match object {
                AnnotationObject::Pose(pose) => registry.skeleton(pose.class_id).to_vec(),
                _ => Vec::new(),
            };
            DrawRequest {
                id,
                shape: object.clone(),
                color: registry.color(object.kind(), object.class_id()),
                highlight,
                highlighted_vertex: state.hovering_vertex.filter(|_| selected),
                highlighted_keypoint: state.hovering_keypoint.filter(|_| selected),
                highlight_handle: selected && state.is_hovering_handle,
                skeleton,
            }
        })
        .collect()
}
