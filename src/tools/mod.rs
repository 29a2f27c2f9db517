//! Interaction state machine.
//!
//! Raw pointer, wheel and key events go into [`Editor::handle_event`], which
//! dispatches them to the handler of the active [`Tool`]. Handlers read and
//! write the annotation store through the shape algebras and keep their
//! between-event state in [`InteractionState`].

mod common;
mod draw_point;
mod draw_poly;
mod draw_pose;
mod draw_rect;
mod edit;
mod editor;
mod event;
mod keyboard;
mod select;
mod state;
mod tool;
mod wheel;

#[cfg(test)]
mod tests;

pub use editor::{Editor, canvas_size};
pub use event::{Button, InputEvent, Key, KeyEvent, PointerEvent, WheelEvent};
pub use state::{DragAnchor, InteractionState};
pub use tool::Tool;
