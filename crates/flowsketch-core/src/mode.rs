//! Interaction modes selected from the command surface.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Select and drag shapes.
    #[default]
    Select,
    /// Join two shapes with a connector.
    Connector,
    Line,
    Arrow,
    Rectangle,
    Square,
    Ellipse,
    Circle,
    Diamond,
    Text,
    TextBox,
}

impl Mode {
    /// Kind of shape drawn in this mode, if it is a drawing mode.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Mode::Select | Mode::Connector => None,
            Mode::Line => Some(ShapeKind::Line),
            Mode::Arrow => Some(ShapeKind::Arrow),
            Mode::Rectangle => Some(ShapeKind::Rectangle),
            Mode::Square => Some(ShapeKind::Square),
            Mode::Ellipse => Some(ShapeKind::Ellipse),
            Mode::Circle => Some(ShapeKind::Circle),
            Mode::Diamond => Some(ShapeKind::Diamond),
            Mode::Text => Some(ShapeKind::Text),
            Mode::TextBox => Some(ShapeKind::TextBox),
        }
    }

    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }

    /// Display name for buttons and menus.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Select => "Select/Drag",
            Mode::Connector => "Draw Connector",
            Mode::Line => "Draw Line",
            Mode::Arrow => "Draw Arrow",
            Mode::Rectangle => "Draw Rectangle",
            Mode::Square => "Draw Square",
            Mode::Ellipse => "Draw Ellipse",
            Mode::Circle => "Draw Circle",
            Mode::Diamond => "Draw Diamond",
            Mode::Text => "Add Text",
            Mode::TextBox => "Add Text Box",
        }
    }

    /// All modes in toolbar order.
    pub fn all() -> &'static [Mode] {
        &[
            Mode::Select,
            Mode::Connector,
            Mode::Line,
            Mode::Arrow,
            Mode::Rectangle,
            Mode::Square,
            Mode::Ellipse,
            Mode::Circle,
            Mode::Diamond,
            Mode::Text,
            Mode::TextBox,
        ]
    }
}
