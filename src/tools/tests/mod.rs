//! Scenario tests that drive the [`Editor`] through raw input events.

mod draw_tests;
mod edit_tests;

use crate::tools::{Button, Editor, InputEvent, Key, KeyEvent, PointerEvent};

const EPS: f64 = 1e-9;

fn assert_close(got: f64, want: f64) {
    assert!((got - want).abs() < EPS, "expected {want}, got {got}");
}

fn down(editor: &mut Editor, x: f64, y: f64) {
    editor.handle_event(&InputEvent::PointerDown(PointerEvent::at(x, y)));
}

fn right_down(editor: &mut Editor, x: f64, y: f64) {
    editor.handle_event(&InputEvent::PointerDown(
        PointerEvent::at(x, y).with_button(Button::Secondary),
    ));
}

fn move_to(editor: &mut Editor, x: f64, y: f64) {
    editor.handle_event(&InputEvent::PointerMove(PointerEvent::at(x, y)));
}

fn up(editor: &mut Editor, x: f64, y: f64) {
    editor.handle_event(&InputEvent::PointerUp(PointerEvent::at(x, y)));
}

/// Hover, press and release at one spot.
fn click(editor: &mut Editor, x: f64, y: f64) {
    move_to(editor, x, y);
    down(editor, x, y);
    up(editor, x, y);
}

fn key(editor: &mut Editor, key: Key, ctrl: bool) {
    editor.handle_event(&InputEvent::KeyDown(KeyEvent::new(key, ctrl)));
}
