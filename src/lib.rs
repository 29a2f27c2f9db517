//! Annotate - geometric image annotation engine
//!
//! Shapes are stored in normalized `[0,1]` image coordinates. Pointer, wheel
//! and key events go through the [`tools::Editor`], which turns gestures into
//! shape mutations with undo/redo history. Finished annotations persist as
//! per-image JSON files and export to YOLO and COCO.
//!
//! ```rust,ignore
//! use annotate::tools::{Editor, InputEvent, PointerEvent, Tool};
//!
//! let mut editor = Editor::default();
//! editor.set_tool(Tool::DrawRect);
//! editor.handle_event(&InputEvent::PointerDown(PointerEvent::at(0.1, 0.1)));
//! editor.handle_event(&InputEvent::PointerMove(PointerEvent::at(0.5, 0.4)));
//! editor.handle_event(&InputEvent::PointerUp(PointerEvent::at(0.5, 0.4)));
//! assert_eq!(editor.store().len(), 1);
//! ```

pub mod config;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod model;
pub mod registry;
pub mod render;
pub mod shapes;
pub mod store;
pub mod tools;
pub mod undo;
