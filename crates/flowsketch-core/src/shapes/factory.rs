//! Pure geometry construction for new shapes.

use super::{Geometry, ShapeKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// How arrowhead wings are oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrowheadMode {
    /// Wings rotated ±150° from the line direction.
    #[default]
    FollowLine,
    /// Wings fixed along the x axis whatever the line angle.
    ///
    /// This reproduces a known defect of an older editor build and only
    /// exists for drawings whose visuals depend on it.
    Horizontal,
}

/// Arrowhead parameters captured when an arrow is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowheadStyle {
    /// Wing length.
    pub size: f64,
    pub mode: ArrowheadMode,
}

/// Angle between the line direction and each wing.
const WING_ANGLE_DEGREES: f64 = 150.0;

/// Preset shapes offered by the template palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Template {
    Square,
    Rectangle,
    Circle,
}

impl Template {
    /// Kind of the inserted shape.
    pub fn kind(self) -> ShapeKind {
        match self {
            Template::Square => ShapeKind::Square,
            Template::Rectangle => ShapeKind::Rectangle,
            Template::Circle => ShapeKind::Circle,
        }
    }

    /// Frame of the inserted shape, placed at the model origin.
    pub fn frame(self) -> Rect {
        match self {
            Template::Square | Template::Circle => Rect::new(0.0, 0.0, 100.0, 100.0),
            Template::Rectangle => Rect::new(0.0, 0.0, 150.0, 100.0),
        }
    }
}

/// Normalized rectangle spanned by two corner points.
pub fn rect_from_corners(p1: Point, p2: Point) -> Rect {
    Rect::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.x.max(p2.x), p1.y.max(p2.y))
}

/// Square spanned by two corners: the normalized rectangle's top-left with
/// both sides clamped to the shorter one.
pub fn square_from_corners(p1: Point, p2: Point) -> Rect {
    let rect = rect_from_corners(p1, p2);
    let side = rect.width().min(rect.height());
    Rect::new(rect.x0, rect.y0, rect.x0 + side, rect.y0 + side)
}

/// Circle frame spanned by two corners, centered on the dragged rectangle.
pub fn circle_from_corners(p1: Point, p2: Point) -> Rect {
    let rect = rect_from_corners(p1, p2);
    let half = rect.width().min(rect.height()) / 2.0;
    let c = rect.center();
    Rect::new(c.x - half, c.y - half, c.x + half, c.y + half)
}

/// Diamond vertices touching the edge midpoints: top, right, bottom, left.
pub fn diamond_polygon(rect: Rect) -> [Point; 4] {
    let c = rect.center();
    [
        Point::new(c.x, rect.y0),
        Point::new(rect.x1, c.y),
        Point::new(c.x, rect.y1),
        Point::new(rect.x0, c.y),
    ]
}

/// Wing tips of an arrowhead drawn at `end`.
pub fn arrowhead(start: Point, end: Point, size: f64, mode: ArrowheadMode) -> [Point; 2] {
    match mode {
        ArrowheadMode::FollowLine => {
            let dir = direction(start, end);
            let angle = WING_ANGLE_DEGREES.to_radians();
            [end + rotate(dir, angle) * size, end + rotate(dir, -angle) * size]
        }
        ArrowheadMode::Horizontal => {
            let offset = Vec2::new(size, 0.0);
            [end + offset, end - offset]
        }
    }
}

/// Geometry of a `kind` shape dragged from `start` to `current`.
pub fn geometry_for(kind: ShapeKind, start: Point, current: Point) -> Geometry {
    match kind {
        ShapeKind::Line | ShapeKind::Arrow => Geometry::Segment { p1: start, p2: current },
        ShapeKind::Square => Geometry::Frame(square_from_corners(start, current)),
        ShapeKind::Circle => Geometry::Frame(circle_from_corners(start, current)),
        ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Diamond | ShapeKind::TextBox => {
            Geometry::Frame(rect_from_corners(start, current))
        }
        // Free text is sized from its content once the host supplies it.
        ShapeKind::Text => Geometry::Frame(Rect::from_points(start, start)),
    }
}

/// Unit direction from `start` to `end`, +x for a zero-length line.
fn direction(start: Point, end: Point) -> Vec2 {
    let v = end - start;
    let len = v.hypot();
    if len < f64::EPSILON {
        Vec2::new(1.0, 0.0)
    } else {
        v / len
    }
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
