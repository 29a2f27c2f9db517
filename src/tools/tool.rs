//! Tool modes.

use serde::{Deserialize, Serialize};

use crate::model::ShapeKind;

/// The active interaction mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tool {
    #[default]
    Select,
    DrawRect,
    DrawObb,
    DrawPoly,
    DrawPoint,
    DrawPose,
    EditRect,
    EditObb,
    EditPoly,
    EditPoint,
    EditPose,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "SELECT",
            Tool::DrawRect => "DRAW_RECT",
            Tool::DrawObb => "DRAW_OBB",
            Tool::DrawPoly => "DRAW_POLY",
            Tool::DrawPoint => "DRAW_POINT",
            Tool::DrawPose => "DRAW_POSE",
            Tool::EditRect => "EDIT_RECT",
            Tool::EditObb => "EDIT_OBB",
            Tool::EditPoly => "EDIT_POLY",
            Tool::EditPoint => "EDIT_POINT",
            Tool::EditPose => "EDIT_POSE",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::DrawRect,
            Tool::DrawObb,
            Tool::DrawPoly,
            Tool::DrawPoint,
            Tool::DrawPose,
            Tool::EditRect,
            Tool::EditObb,
            Tool::EditPoly,
            Tool::EditPoint,
            Tool::EditPose,
        ]
    }

    /// Edit tool for shapes of `kind`.
    pub fn edit_for(kind: ShapeKind) -> Tool {
        match kind {
            ShapeKind::Bbox => Tool::EditRect,
            ShapeKind::Obb => Tool::EditObb,
            ShapeKind::Polygon => Tool::EditPoly,
            ShapeKind::Keypoint => Tool::EditPoint,
            ShapeKind::Pose => Tool::EditPose,
        }
    }

    /// Draw tool for shapes of `kind`.
    pub fn draw_for(kind: ShapeKind) -> Tool {
        match kind {
            ShapeKind::Bbox => Tool::DrawRect,
            ShapeKind::Obb => Tool::DrawObb,
            ShapeKind::Polygon => Tool::DrawPoly,
            ShapeKind::Keypoint => Tool::DrawPoint,
            ShapeKind::Pose => Tool::DrawPose,
        }
    }

    /// Shape kind this tool creates or edits; `None` for SELECT.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::DrawRect | Tool::EditRect => Some(ShapeKind::Bbox),
            Tool::DrawObb | Tool::EditObb => Some(ShapeKind::Obb),
            Tool::DrawPoly | Tool::EditPoly => Some(ShapeKind::Polygon),
            Tool::DrawPoint | Tool::EditPoint => Some(ShapeKind::Keypoint),
            Tool::DrawPose | Tool::EditPose => Some(ShapeKind::Pose),
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Tool::DrawRect | Tool::DrawObb | Tool::DrawPoly | Tool::DrawPoint | Tool::DrawPose
        )
    }

    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Tool::EditRect | Tool::EditObb | Tool::EditPoly | Tool::EditPoint | Tool::EditPose
        )
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
