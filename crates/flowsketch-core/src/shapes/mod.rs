//! Shape records for the diagram scene.

mod factory;
mod text;

pub use factory::{
    ArrowheadMode, ArrowheadStyle, Template, arrowhead, circle_from_corners, diamond_polygon,
    geometry_for, rect_from_corners, square_from_corners,
};
pub use text::TextLabel;

use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke properties captured when a shape is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color (also the text color for text shapes).
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The closed set of shape kinds the editor can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Arrow,
    Rectangle,
    Square,
    Ellipse,
    /// An ellipse locked to equal width and height.
    Circle,
    Diamond,
    Text,
    TextBox,
}

impl ShapeKind {
    /// Lines and arrows are stored as two endpoints; everything else as a frame.
    pub fn is_segment(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }

    /// Whether committing this kind needs text from the host.
    pub fn needs_text(self) -> bool {
        matches!(self, ShapeKind::Text | ShapeKind::TextBox)
    }

    /// Whether shapes of this kind can become the scene selection.
    ///
    /// Bare lines and arrows can be dragged around but never selected, so
    /// they only take part in connectors next to a selectable shape.
    pub fn selectable_by_default(self) -> bool {
        !self.is_segment()
    }
}

/// Kind-specific geometry payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Two endpoints (line, arrow).
    Segment { p1: Point, p2: Point },
    /// Normalized axis-aligned frame (every other kind).
    Frame(Rect),
}

impl Geometry {
    /// Axis-aligned bounds of the raw geometry.
    pub fn bounds(&self) -> Rect {
        match *self {
            Geometry::Segment { p1, p2 } => rect_from_corners(p1, p2),
            Geometry::Frame(rect) => rect,
        }
    }

    /// Center of the geometry; the midpoint for segments.
    pub fn center(&self) -> Point {
        match *self {
            Geometry::Segment { p1, p2 } => p1.midpoint(p2),
            Geometry::Frame(rect) => rect.center(),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Geometry::Segment { p1, p2 } => {
                *p1 += delta;
                *p2 += delta;
            }
            Geometry::Frame(rect) => *rect = *rect + delta,
        }
    }
}

/// A shape in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub kind: ShapeKind,
    pub geometry: Geometry,
    pub style: ShapeStyle,
    /// Text content and anchor for text and text box shapes.
    #[serde(default)]
    pub label: Option<TextLabel>,
    /// Arrowhead parameters (arrows only).
    #[serde(default)]
    pub arrowhead: Option<ArrowheadStyle>,
    pub movable: bool,
    pub selectable: bool,
}

impl Shape {
    /// Create a new shape with the default flags for its kind.
    pub fn new(kind: ShapeKind, geometry: Geometry, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            geometry,
            style,
            label: None,
            arrowhead: None,
            movable: true,
            selectable: kind.selectable_by_default(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Both endpoints of a line or arrow.
    pub fn endpoints(&self) -> Option<[Point; 2]> {
        match self.geometry {
            Geometry::Segment { p1, p2 } => Some([p1, p2]),
            Geometry::Frame(_) => None,
        }
    }

    /// The frame of an area shape.
    pub fn frame(&self) -> Option<Rect> {
        match self.geometry {
            Geometry::Frame(rect) => Some(rect),
            Geometry::Segment { .. } => None,
        }
    }

    /// Reference point moved by drags: the first endpoint or the frame's top-left.
    pub fn origin(&self) -> Point {
        match self.geometry {
            Geometry::Segment { p1, .. } => p1,
            Geometry::Frame(rect) => rect.origin(),
        }
    }

    /// Anchor point used by connectors.
    pub fn center(&self) -> Point {
        self.geometry.center()
    }

    /// The four diamond vertices, for diamond shapes.
    pub fn diamond(&self) -> Option<[Point; 4]> {
        match (self.kind, self.geometry) {
            (ShapeKind::Diamond, Geometry::Frame(rect)) => Some(diamond_polygon(rect)),
            _ => None,
        }
    }

    /// The two arrowhead strokes as (end, wing tip) pairs.
    pub fn arrowhead_strokes(&self) -> Option<[(Point, Point); 2]> {
        let head = self.arrowhead?;
        let [p1, p2] = self.endpoints()?;
        let [left, right] = arrowhead(p1, p2, head.size, head.mode);
        Some([(p2, left), (p2, right)])
    }

    /// Bounds of the geometry including arrowhead tips.
    pub fn bounds(&self) -> Rect {
        let mut bounds = self.geometry.bounds();
        if let Some(strokes) = self.arrowhead_strokes() {
            for (_, tip) in strokes {
                bounds = bounds.union_pt(tip);
            }
        }
        bounds
    }

    /// Bounds including half the stroke width, for rendering and export.
    pub fn visual_bounds(&self) -> Rect {
        let half = self.style.stroke_width / 2.0;
        self.bounds().inflate(half, half)
    }

    /// Check if a point (in model coordinates) hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.geometry {
            Geometry::Segment { p1, p2 } => {
                point_to_segment_dist(point, p1, p2) <= tolerance + self.style.stroke_width / 2.0
            }
            Geometry::Frame(rect) => match self.kind {
                ShapeKind::Ellipse | ShapeKind::Circle => {
                    let rx = rect.width() / 2.0 + tolerance;
                    let ry = rect.height() / 2.0 + tolerance;
                    if rx <= 0.0 || ry <= 0.0 {
                        return point == rect.center();
                    }
                    let c = rect.center();
                    let dx = (point.x - c.x) / rx;
                    let dy = (point.y - c.y) / ry;
                    dx * dx + dy * dy <= 1.0
                }
                ShapeKind::Diamond => {
                    let hw = rect.width() / 2.0 + tolerance;
                    let hh = rect.height() / 2.0 + tolerance;
                    if hw <= 0.0 || hh <= 0.0 {
                        return point == rect.center();
                    }
                    let c = rect.center();
                    (point.x - c.x).abs() / hw + (point.y - c.y).abs() / hh <= 1.0
                }
                _ => {
                    let r = rect.inflate(tolerance, tolerance);
                    point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
                }
            },
        }
    }

    /// Translate the shape (and its text anchor) by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.geometry.translate(delta);
        if let Some(label) = &mut self.label {
            label.anchor += delta;
        }
    }

    /// Path for rendering. Free text has no outline; its label is drawn by the host.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        match (self.kind, self.geometry) {
            (_, Geometry::Segment { p1, p2 }) => {
                path.move_to(p1);
                path.line_to(p2);
                if let Some(strokes) = self.arrowhead_strokes() {
                    for (from, tip) in strokes {
                        path.move_to(from);
                        path.line_to(tip);
                    }
                }
            }
            (ShapeKind::Ellipse | ShapeKind::Circle, Geometry::Frame(rect)) => {
                path = KurboEllipse::from_rect(rect).to_path(0.1);
            }
            (ShapeKind::Diamond, Geometry::Frame(rect)) => {
                let [top, right, bottom, left] = diamond_polygon(rect);
                path.move_to(top);
                path.line_to(right);
                path.line_to(bottom);
                path.line_to(left);
                path.close_path();
            }
            (ShapeKind::Text, Geometry::Frame(_)) => {}
            (_, Geometry::Frame(rect)) => {
                path = rect.to_path(0.1);
            }
        }
        path
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}
