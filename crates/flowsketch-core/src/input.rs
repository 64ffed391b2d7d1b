//! Events the host feeds into the controller and requests it answers.

use crate::shapes::{SerializableColor, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Abort the current gesture (escape key, lost pointer capture).
    Cancel,
    /// Answer to a pending text request; `None` means cancelled.
    TextEntered(Option<String>),
    /// Answer to a pending color request; `None` means cancelled.
    ColorPicked(Option<SerializableColor>),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

/// A question the scene asks its host (a text or color dialog).
#[derive(Debug, Clone, PartialEq)]
pub enum InputRequest {
    /// Text for the text shape `shape` laid out in `rect`.
    Text { shape: ShapeId, rect: Rect },
    /// A new stroke color.
    Color,
}

/// Host capability for answering requests synchronously.
pub trait InputProvider {
    /// Ask for text to place in `rect`; `None` when cancelled.
    fn request_text(&mut self, rect: Rect) -> Option<String>;

    /// Ask for a color; `None` when cancelled.
    fn request_color(&mut self) -> Option<SerializableColor>;
}
