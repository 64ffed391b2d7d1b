//! Connectors and the reverse index that keeps them glued to shapes.

use crate::shapes::{Shape, ShapeId, ShapeStyle};
use kurbo::{Line, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// A line bound to two distinct shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub(crate) id: ConnectorId,
    /// Shape the connector starts at.
    pub start: ShapeId,
    /// Shape the connector ends at.
    pub end: ShapeId,
    /// Cached segment between the two anchor points.
    pub(crate) line: Line,
    pub style: ShapeStyle,
}

impl Connector {
    pub(crate) fn new(start: &Shape, end: &Shape, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: start.id(),
            end: end.id(),
            line: anchor_line(start, end),
            style,
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// The cached line, current as of the last shape mutation.
    pub fn line(&self) -> Line {
        self.line
    }

    /// Whether `shape` is one of the two bound shapes.
    pub fn touches(&self, shape: ShapeId) -> bool {
        self.start == shape || self.end == shape
    }

    /// Bounds including half the stroke width.
    pub fn visual_bounds(&self) -> Rect {
        let half = self.style.stroke_width / 2.0;
        Rect::from_points(self.line.p0, self.line.p1)
            .abs()
            .inflate(half, half)
    }
}

/// Segment between the anchor points (centers) of two shapes.
pub fn anchor_line(start: &Shape, end: &Shape) -> Line {
    Line::new(start.center(), end.center())
}

/// Maps each shape to the connectors incident to it.
#[derive(Debug, Clone, Default)]
pub struct ConnectorBindings {
    incident: HashMap<ShapeId, Vec<ConnectorId>>,
}

impl ConnectorBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both ends of a connector.
    pub fn bind(&mut self, connector: &Connector) {
        for shape in [connector.start, connector.end] {
            let ids = self.incident.entry(shape).or_default();
            if !ids.contains(&connector.id) {
                ids.push(connector.id);
            }
        }
    }

    /// Forget both ends of a connector.
    pub fn unbind(&mut self, connector: &Connector) {
        for shape in [connector.start, connector.end] {
            if let Some(ids) = self.incident.get_mut(&shape) {
                ids.retain(|&id| id != connector.id);
                if ids.is_empty() {
                    self.incident.remove(&shape);
                }
            }
        }
    }

    /// Connectors incident to `shape`, in creation order.
    pub fn incident(&self, shape: ShapeId) -> &[ConnectorId] {
        self.incident.get(&shape).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.incident.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Geometry, ShapeKind};
    use kurbo::Point;

    fn boxed(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::new(
            ShapeKind::Rectangle,
            Geometry::Frame(Rect::new(x0, y0, x1, y1)),
            ShapeStyle::default(),
        )
    }

    #[test]
    fn test_anchor_line_joins_centers() {
        let a = boxed(0.0, 0.0, 20.0, 20.0);
        let b = boxed(100.0, 0.0, 140.0, 40.0);
        let line = anchor_line(&a, &b);
        assert_eq!(line.p0, Point::new(10.0, 10.0));
        assert_eq!(line.p1, Point::new(120.0, 20.0));
    }

    #[test]
    fn test_bind_and_unbind() {
        let a = boxed(0.0, 0.0, 20.0, 20.0);
        let b = boxed(100.0, 0.0, 140.0, 40.0);
        let c = boxed(200.0, 0.0, 240.0, 40.0);
        let ab = Connector::new(&a, &b, ShapeStyle::default());
        let bc = Connector::new(&b, &c, ShapeStyle::default());

        let mut bindings = ConnectorBindings::new();
        bindings.bind(&ab);
        bindings.bind(&bc);
        bindings.bind(&ab);

        assert_eq!(bindings.incident(a.id()), &[ab.id()]);
        assert_eq!(bindings.incident(b.id()), &[ab.id(), bc.id()]);

        bindings.unbind(&ab);
        assert!(bindings.incident(a.id()).is_empty());
        assert_eq!(bindings.incident(b.id()), &[bc.id()]);
    }

    #[test]
    fn test_touches() {
        let a = boxed(0.0, 0.0, 20.0, 20.0);
        let b = boxed(100.0, 0.0, 140.0, 40.0);
        let connector = Connector::new(&a, &b, ShapeStyle::default());
        assert!(connector.touches(a.id()));
        assert!(connector.touches(b.id()));
        assert!(!connector.touches(Uuid::new_v4()));
    }
}
