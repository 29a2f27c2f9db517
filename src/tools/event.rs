//! Input events fed to the tool manager.
//!
//! Pointer positions are already normalized to the image ([0,1]²). The raw
//! screen position travels alongside because panning works in pixels.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

use super::Tool;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Normalized image x.
    pub x: f64,
    /// Normalized image y.
    pub y: f64,
    /// Screen x in pixels.
    #[serde(default)]
    pub screen_x: f64,
    /// Screen y in pixels.
    #[serde(default)]
    pub screen_y: f64,
    #[serde(default)]
    pub button: Button,
}

impl PointerEvent {
    /// Primary-button event at a normalized position, screen position unset.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_screen(mut self, screen_x: f64, screen_y: f64) -> Self {
        self.screen_x = screen_x;
        self.screen_y = screen_y;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn screen(&self) -> Point {
        Point::new(self.screen_x, self.screen_y)
    }

    pub fn is_primary(&self) -> bool {
        self.button == Button::Primary
    }

    pub fn is_secondary(&self) -> bool {
        self.button == Button::Secondary
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Z,
    Y,
    Delete,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    /// Ctrl (or Cmd) held.
    #[serde(default)]
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn new(key: Key, ctrl: bool) -> Self {
        Self { key, ctrl }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub delta_y: f64,
}

/// One raw event, as recorded for headless replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Wheel(WheelEvent),
    KeyDown(KeyEvent),
    /// Toolbar tool switch.
    SetTool { tool: Tool },
}
