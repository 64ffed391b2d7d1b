//! Scene model: shapes, connectors, selection and the current mode.

use crate::config::EditorConfig;
use crate::connector::{Connector, ConnectorBindings, ConnectorId, anchor_line};
use crate::input::InputRequest;
use crate::mode::Mode;
use crate::shapes::{
    ArrowheadStyle, Geometry, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle, Template,
    TextLabel, geometry_for,
};
use crate::snap::{SnapResult, snap_to_endpoints};
use kurbo::{Line, Point, Rect, Vec2};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from the programmatic scene API.
///
/// Pointer-driven operations never return these; they log and do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
    #[error("Unknown connector: {0}")]
    UnknownConnector(ConnectorId),
    #[error("Cannot connect shape {0} to itself")]
    SelfConnection(ShapeId),
    #[error("Neither {start} nor {end} is selectable")]
    NotSelectable { start: ShapeId, end: ShapeId },
}

/// The shape currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Snapped start point of the gesture.
    pub start: Point,
}

#[derive(Debug, Clone, Copy)]
struct ConnectorDraft {
    start: ShapeId,
    preview: Line,
}

/// Result of finishing a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// The shape is final.
    Committed(ShapeId),
    /// The shape waits for text from the host.
    AwaitingText { shape: ShapeId, rect: Rect },
    /// The shape was removed (cancelled or empty text).
    Discarded(ShapeId),
    /// Nothing matched the call.
    Ignored,
}

/// The authoritative diagram model.
#[derive(Debug, Clone)]
pub struct Scene {
    config: EditorConfig,
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
    connectors: HashMap<ConnectorId, Connector>,
    /// Connectors in creation order.
    connector_order: Vec<ConnectorId>,
    bindings: ConnectorBindings,
    selection: Option<ShapeId>,
    mode: Mode,
    /// Drawing mode restored by `toggle_select_mode`.
    last_drawing_mode: Mode,
    stroke_color: SerializableColor,
    draft: Option<Draft>,
    connector_draft: Option<ConnectorDraft>,
    pending: Option<InputRequest>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            shapes: HashMap::new(),
            z_order: Vec::new(),
            connectors: HashMap::new(),
            connector_order: Vec::new(),
            bindings: ConnectorBindings::new(),
            selection: None,
            mode: Mode::Select,
            last_drawing_mode: Mode::Line,
            stroke_color: SerializableColor::black(),
            draft: None,
            connector_draft: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the interaction mode.
    ///
    /// Any shape or connector still being drawn is discarded, as is an
    /// unanswered text request. Leaving select mode clears the selection.
    pub fn set_mode(&mut self, mode: Mode) {
        self.discard_draft();
        self.connector_draft = None;
        if let Some(InputRequest::Text { shape, .. }) = self.pending.take() {
            self.delete_shape(shape);
        }
        if mode != Mode::Select {
            self.selection = None;
        }
        if mode.is_drawing() {
            self.last_drawing_mode = mode;
        }
        log::debug!("Mode: {}", mode.display_name());
        self.mode = mode;
    }

    /// Flip between select mode and the last drawing mode.
    pub fn toggle_select_mode(&mut self) -> Mode {
        let next = if self.mode == Mode::Select {
            self.last_drawing_mode
        } else {
            Mode::Select
        };
        self.set_mode(next);
        next
    }

    pub fn stroke_color(&self) -> SerializableColor {
        self.stroke_color
    }

    /// Set the color of shapes created from now on. Existing shapes keep theirs.
    pub fn set_stroke_color(&mut self, color: impl Into<SerializableColor>) {
        self.stroke_color = color.into();
    }

    fn new_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.config.stroke_width,
        }
    }

    // --- Shape drawing ---

    /// Snap `point` to the nearest line or arrow endpoint.
    ///
    /// The shape being drawn is never a candidate.
    pub fn snap(&self, point: Point) -> SnapResult {
        let draft = self.draft.map(|d| d.id);
        let candidates = self
            .z_order
            .iter()
            .filter(|id| Some(**id) != draft)
            .filter_map(|id| self.shapes.get(id))
            .filter_map(Shape::endpoints)
            .flatten();
        snap_to_endpoints(
            point,
            candidates,
            self.config.snap_threshold,
            self.config.snap_metric,
        )
    }

    /// Insert a zero-extent shape of `kind` at `point` and make it the draft.
    ///
    /// Line and arrow starts are snapped. A previous unfinished draft is
    /// discarded first.
    pub fn begin_shape(&mut self, kind: ShapeKind, point: Point) -> ShapeId {
        if let Some(previous) = self.draft {
            log::warn!("Starting a new shape while {} is in progress", previous.id);
            self.discard_draft();
        }
        let start = if kind.is_segment() {
            self.snap(point).point
        } else {
            point
        };

        let mut shape = Shape::new(kind, geometry_for(kind, start, start), self.new_style());
        if kind == ShapeKind::Arrow {
            shape.arrowhead = Some(ArrowheadStyle {
                size: self.config.arrow_size,
                mode: self.config.arrowhead,
            });
        }
        let id = shape.id();
        self.insert(shape);
        self.draft = Some(Draft { id, kind, start });
        id
    }

    /// Recompute the draft's geometry from its start point and `point`.
    /// Returns false when `id` is not the draft.
    pub fn update_shape(&mut self, id: ShapeId, point: Point) -> bool {
        let Some(draft) = self.draft.filter(|d| d.id == id) else {
            log::warn!("update_shape: {} is not being drawn", id);
            return false;
        };
        let current = if draft.kind.is_segment() {
            self.snap(point).point
        } else {
            point
        };
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.geometry = geometry_for(draft.kind, draft.start, current);
        self.refresh_connectors(id);
        true
    }

    /// Apply the final point and finish the draft.
    ///
    /// Text kinds are not final yet: they open a text request that
    /// `resolve_text` answers.
    pub fn commit_shape(&mut self, id: ShapeId, point: Point) -> CommitOutcome {
        if !self.update_shape(id, point) {
            return CommitOutcome::Ignored;
        }
        let Some(draft) = self.draft.take() else {
            return CommitOutcome::Ignored;
        };

        if draft.kind.needs_text() {
            if let Some(InputRequest::Text { shape, .. }) = self.pending.take() {
                log::warn!("Text request for {} superseded", shape);
                self.delete_shape(shape);
            }
            let rect = self.shapes.get(&id).map(Shape::bounds).unwrap_or(Rect::ZERO);
            self.pending = Some(InputRequest::Text { shape: id, rect });
            log::debug!("Shape {} awaiting text", id);
            return CommitOutcome::AwaitingText { shape: id, rect };
        }

        log::debug!("Committed {:?} {}", draft.kind, id);
        CommitOutcome::Committed(id)
    }

    /// Remove the draft, if any. Returns its id.
    pub fn discard_draft(&mut self) -> Option<ShapeId> {
        let draft = self.draft.take()?;
        self.delete_shape(draft.id);
        log::debug!("Discarded draft {:?} {}", draft.kind, draft.id);
        Some(draft.id)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    // --- Host requests ---

    pub fn pending_request(&self) -> Option<&InputRequest> {
        self.pending.as_ref()
    }

    /// Answer the pending text request.
    ///
    /// Cancelled or blank text removes the shape. Free text is resized to
    /// its content; a text box keeps its frame and anchors the text at the
    /// frame's top-left.
    pub fn resolve_text(&mut self, text: Option<String>) -> CommitOutcome {
        let shape_id = match self.pending {
            Some(InputRequest::Text { shape, .. }) => shape,
            _ => {
                log::warn!("resolve_text: no text request pending");
                return CommitOutcome::Ignored;
            }
        };
        self.pending = None;

        let Some(content) = text.filter(|t| !t.trim().is_empty()) else {
            self.delete_shape(shape_id);
            log::debug!("Text cancelled, discarded {}", shape_id);
            return CommitOutcome::Discarded(shape_id);
        };

        let font_size = self.config.font_size;
        let Some(shape) = self.shapes.get_mut(&shape_id) else {
            return CommitOutcome::Ignored;
        };
        let mut label = TextLabel::new(shape.origin(), font_size);
        label.content = content;
        if shape.kind == ShapeKind::Text {
            shape.geometry = Geometry::Frame(label.approx_bounds());
        }
        shape.label = Some(label);
        self.refresh_connectors(shape_id);
        log::debug!("Committed text {}", shape_id);
        CommitOutcome::Committed(shape_id)
    }

    /// Open a color request. Returns false if another request is pending.
    pub fn request_color(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(InputRequest::Color);
        true
    }

    /// Answer the pending color request; `None` keeps the current color.
    pub fn resolve_color(&mut self, color: Option<SerializableColor>) -> bool {
        if self.pending != Some(InputRequest::Color) {
            log::warn!("resolve_color: no color request pending");
            return false;
        }
        self.pending = None;
        if let Some(color) = color {
            self.stroke_color = color;
        }
        true
    }

    // --- Connectors ---

    /// Start a connector gesture on the shape under `point`.
    pub fn begin_connector(&mut self, point: Point) -> Option<ShapeId> {
        let start = self.hit_test(point)?;
        self.connector_draft = Some(ConnectorDraft {
            start,
            preview: Line::new(point, point),
        });
        Some(start)
    }

    pub fn update_connector_preview(&mut self, point: Point) {
        if let Some(draft) = &mut self.connector_draft {
            draft.preview.p1 = point;
        }
    }

    /// Preview line of the connector gesture in progress.
    pub fn connector_preview(&self) -> Option<Line> {
        self.connector_draft.map(|d| d.preview)
    }

    /// Finish the connector gesture at `point`.
    ///
    /// A connector is created only when `point` hits a shape other than
    /// the start shape and one of the two is selectable. The preview is
    /// dropped either way.
    pub fn commit_connector(&mut self, point: Point) -> Option<ConnectorId> {
        let draft = self.connector_draft.take()?;
        let Some(end) = self.hit_test(point) else {
            log::debug!("Connector from {} ended on empty space", draft.start);
            return None;
        };
        match self.connect(draft.start, end) {
            Ok(id) => Some(id),
            Err(err) => {
                log::debug!("Connector rejected: {}", err);
                None
            }
        }
    }

    pub fn cancel_connector(&mut self) {
        self.connector_draft = None;
    }

    /// Connect two shapes directly.
    pub fn connect(&mut self, start: ShapeId, end: ShapeId) -> Result<ConnectorId, SceneError> {
        if start == end {
            return Err(SceneError::SelfConnection(start));
        }
        let a = self.shapes.get(&start).ok_or(SceneError::UnknownShape(start))?;
        let b = self.shapes.get(&end).ok_or(SceneError::UnknownShape(end))?;
        if !a.selectable && !b.selectable {
            return Err(SceneError::NotSelectable { start, end });
        }

        let connector = Connector::new(a, b, self.new_style());
        let id = connector.id();
        self.bindings.bind(&connector);
        self.connectors.insert(id, connector);
        self.connector_order.push(id);
        log::debug!("Connected {} -> {} ({})", start, end, id);
        Ok(id)
    }

    /// Recompute one connector's line from its shapes' current centers.
    pub fn recompute_connector(&mut self, id: ConnectorId) -> Result<Line, SceneError> {
        let connector = self
            .connectors
            .get_mut(&id)
            .ok_or(SceneError::UnknownConnector(id))?;
        let a = self
            .shapes
            .get(&connector.start)
            .ok_or(SceneError::UnknownShape(connector.start))?;
        let b = self
            .shapes
            .get(&connector.end)
            .ok_or(SceneError::UnknownShape(connector.end))?;
        connector.line = anchor_line(a, b);
        Ok(connector.line)
    }

    fn refresh_connectors(&mut self, shape: ShapeId) {
        for id in self.bindings.incident(shape) {
            let Some(connector) = self.connectors.get_mut(id) else {
                continue;
            };
            match (
                self.shapes.get(&connector.start),
                self.shapes.get(&connector.end),
            ) {
                (Some(a), Some(b)) => connector.line = anchor_line(a, b),
                _ => log::warn!("Connector {} is bound to a missing shape", id),
            }
        }
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(&id)
    }

    /// Connectors in creation order.
    pub fn connectors_ordered(&self) -> impl Iterator<Item = &Connector> {
        self.connector_order
            .iter()
            .filter_map(|id| self.connectors.get(id))
    }

    /// Connectors attached to `shape`.
    pub fn incident_connectors(&self, shape: ShapeId) -> &[ConnectorId] {
        self.bindings.incident(shape)
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn delete_connector(&mut self, id: ConnectorId) -> bool {
        let Some(connector) = self.connectors.remove(&id) else {
            return false;
        };
        self.connector_order.retain(|&c| c != id);
        self.bindings.unbind(&connector);
        true
    }

    // --- Shapes ---

    fn insert(&mut self, shape: Shape) {
        let id = shape.id();
        self.shapes.insert(id, shape);
        self.z_order.push(id);
    }

    /// Insert a preset shape at the model origin.
    pub fn insert_template(&mut self, template: Template) -> ShapeId {
        let mut shape = Shape::new(
            template.kind(),
            Geometry::Frame(template.frame()),
            self.new_style(),
        );
        shape.movable = true;
        shape.selectable = true;
        let id = shape.id();
        self.insert(shape);
        log::debug!("Inserted {:?} template {}", template, id);
        id
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes from back to front.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost shape at `point`; later insertions win.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        let tolerance = self.config.hit_tolerance;
        self.z_order
            .iter()
            .rev()
            .find(|id| {
                self.shapes
                    .get(*id)
                    .is_some_and(|shape| shape.hit_test(point, tolerance))
            })
            .copied()
    }

    /// Translate a movable shape and re-anchor its connectors.
    pub fn move_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            log::warn!("move_shape: unknown shape {}", id);
            return false;
        };
        if !shape.movable {
            return false;
        }
        shape.translate(delta);
        self.refresh_connectors(id);
        true
    }

    /// Remove a shape together with every connector attached to it.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        if self.shapes.remove(&id).is_none() {
            return false;
        }
        self.z_order.retain(|&s| s != id);

        let incident = self.bindings.incident(id).to_vec();
        if !incident.is_empty() {
            log::debug!("Deleting {} connectors attached to {}", incident.len(), id);
        }
        for connector in incident {
            self.delete_connector(connector);
        }

        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.draft.is_some_and(|d| d.id == id) {
            self.draft = None;
        }
        if self.connector_draft.is_some_and(|d| d.start == id) {
            self.connector_draft = None;
        }
        if matches!(self.pending, Some(InputRequest::Text { shape, .. }) if shape == id) {
            self.pending = None;
        }
        true
    }

    /// Delete the selected shape, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.delete_shape(id),
            None => false,
        }
    }

    // --- Selection ---

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    /// Select a shape. Returns false for unknown or unselectable shapes.
    pub fn select(&mut self, id: ShapeId) -> bool {
        match self.shapes.get(&id) {
            Some(shape) if shape.selectable => {
                self.selection = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Union of everything drawn, including strokes and arrowheads.
    pub fn visual_bounds(&self) -> Option<Rect> {
        let shapes = self.shapes_ordered().map(Shape::visual_bounds);
        let connectors = self.connectors_ordered().map(Connector::visual_bounds);
        shapes.chain(connectors).reduce(|a, b| a.union(b))
    }
}
