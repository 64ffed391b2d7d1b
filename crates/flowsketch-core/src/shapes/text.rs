//! Text attached to text and text box shapes.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Text content plus the point it is laid out from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Top-left of the text layout.
    pub anchor: Point,
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl TextLabel {
    /// Average glyph advance relative to the font size.
    const CHAR_WIDTH: f64 = 0.5;
    /// Line height relative to the font size.
    const LINE_HEIGHT: f64 = 1.25;

    /// Create an empty label anchored at `anchor`.
    pub fn new(anchor: Point, font_size: f64) -> Self {
        Self {
            anchor,
            content: String::new(),
            font_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Approximate layout size. The host's text engine owns exact metrics.
    pub fn approx_size(&self) -> Size {
        if self.content.is_empty() {
            return Size::ZERO;
        }
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = self.content.lines().count().max(1);
        Size::new(
            widest as f64 * self.font_size * Self::CHAR_WIDTH,
            lines as f64 * self.font_size * Self::LINE_HEIGHT,
        )
    }

    /// Approximate layout rectangle starting at the anchor.
    pub fn approx_bounds(&self) -> Rect {
        Rect::from_origin_size(self.anchor, self.approx_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_has_no_extent() {
        let label = TextLabel::new(Point::new(3.0, 4.0), 16.0);
        assert!(label.is_empty());
        assert_eq!(label.approx_bounds(), Rect::new(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn test_multiline_size_uses_widest_line() {
        let mut label = TextLabel::new(Point::ZERO, 10.0);
        label.content = "abcd\nab".to_string();
        let size = label.approx_size();
        assert!((size.width - 20.0).abs() < f64::EPSILON);
        assert!((size.height - 25.0).abs() < f64::EPSILON);
    }
}
