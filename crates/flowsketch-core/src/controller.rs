//! Pointer-event state machine driving the scene.
//!
//! The controller is a reducer: the host converts its native events into
//! [`InputEvent`]s and feeds them to [`Controller::handle`] together with
//! the scene. Everything the host must react to comes back as [`Effect`]s.
//! Text and color dialogs are explicit suspension points
//! ([`InteractionState::AwaitingInput`]) so asynchronous hosts can answer
//! them later; blocking hosts use [`Controller::handle_blocking`].

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::connector::ConnectorId;
use crate::input::{InputEvent, InputProvider, InputRequest, MouseButton, PointerEvent};
use crate::mode::Mode;
use crate::scene::{CommitOutcome, Scene};
use crate::shapes::{ShapeId, ShapeKind};
use kurbo::{Point, Rect, Vec2};

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Drawing a new shape.
    Drawing {
        kind: ShapeKind,
        shape: ShapeId,
        start: Point,
    },
    /// Dragging a connector out of `shape`.
    ConnectingStart { shape: ShapeId, start: Point },
    /// A shape is selected and nothing is being dragged.
    SelectedIdle,
    /// Moving a shape.
    Dragging {
        shape: ShapeId,
        /// Pointer minus shape origin, fixed at grab time.
        grab_offset: Vec2,
        /// Shape origin before the drag, restored on cancel.
        original_origin: Point,
    },
    /// Waiting for the host to answer a text (`Some`) or color (`None`) request.
    AwaitingInput { shape: Option<ShapeId> },
}

/// Something the host should act on after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Show a text dialog laid out at `rect`, answer with `TextEntered`.
    RequestText { shape: ShapeId, rect: Rect },
    /// Show a color picker, answer with `ColorPicked`.
    RequestColor,
    /// Show (or hide, for `None`) the snap marker, in model coordinates.
    SnapIndicator(Option<Point>),
    Committed(ShapeId),
    Discarded(ShapeId),
    Connected(ConnectorId),
    /// Zoom or pan changed.
    ViewChanged,
}

/// Turns input events into scene mutations.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: InteractionState,
    /// View transform; pointer positions are mapped through it.
    pub camera: Camera,
    snap_indicator: Option<Point>,
}

impl Controller {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            camera: Camera::from_config(config),
            snap_indicator: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Where the snap marker should be drawn, if anywhere.
    pub fn snap_indicator(&self) -> Option<Point> {
        self.snap_indicator
    }

    /// Process one event.
    pub fn handle(&mut self, scene: &mut Scene, event: InputEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::Pointer(PointerEvent::Scroll {
                position,
                delta,
                modifiers,
            }) => {
                if self.camera.handle_wheel(position, delta, modifiers) {
                    effects.push(Effect::ViewChanged);
                }
            }
            InputEvent::Pointer(_) if matches!(self.state, InteractionState::AwaitingInput { .. }) => {
                log::trace!("Pointer event ignored while awaiting input");
            }
            InputEvent::Pointer(PointerEvent::Down { position, button }) => {
                if button == MouseButton::Left {
                    let point = self.camera.screen_to_world(position);
                    self.pointer_down(scene, point, &mut effects);
                }
            }
            InputEvent::Pointer(PointerEvent::Move { position }) => {
                let point = self.camera.screen_to_world(position);
                self.pointer_move(scene, point, &mut effects);
            }
            InputEvent::Pointer(PointerEvent::Up { position, button }) => {
                if button == MouseButton::Left {
                    let point = self.camera.screen_to_world(position);
                    self.pointer_up(scene, point, &mut effects);
                }
            }
            InputEvent::Cancel => self.cancel_into(scene, &mut effects),
            InputEvent::TextEntered(text) => match self.state {
                InteractionState::AwaitingInput { shape: Some(_) } => {
                    self.state = InteractionState::Idle;
                    push_outcome(scene.resolve_text(text), &mut effects);
                }
                _ => log::warn!("Text entered with no text request pending"),
            },
            InputEvent::ColorPicked(color) => match self.state {
                InteractionState::AwaitingInput { shape: None } => {
                    self.state = InteractionState::Idle;
                    scene.resolve_color(color);
                }
                _ => log::warn!("Color picked with no color request pending"),
            },
        }
        effects
    }

    /// Process one event, answering any request it raises through `provider`.
    ///
    /// The returned effects still include the request effects that were
    /// answered.
    pub fn handle_blocking(
        &mut self,
        scene: &mut Scene,
        event: InputEvent,
        provider: &mut dyn InputProvider,
    ) -> Vec<Effect> {
        let mut effects = self.handle(scene, event);
        while matches!(self.state, InteractionState::AwaitingInput { .. }) {
            let answer = match scene.pending_request() {
                Some(InputRequest::Text { rect, .. }) => {
                    InputEvent::TextEntered(provider.request_text(*rect))
                }
                Some(InputRequest::Color) => InputEvent::ColorPicked(provider.request_color()),
                None => {
                    self.state = InteractionState::Idle;
                    break;
                }
            };
            effects.extend(self.handle(scene, answer));
        }
        effects
    }

    /// Abort the current gesture, leaving the scene as it was before it began.
    pub fn cancel(&mut self, scene: &mut Scene) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.cancel_into(scene, &mut effects);
        effects
    }

    /// Change mode, aborting whatever gesture is in progress.
    pub fn set_mode(&mut self, scene: &mut Scene, mode: Mode) -> Vec<Effect> {
        let effects = self.cancel(scene);
        scene.set_mode(mode);
        self.state = InteractionState::Idle;
        effects
    }

    /// Ask the host for a new stroke color. Only possible between gestures.
    pub fn request_color(&mut self, scene: &mut Scene) -> Vec<Effect> {
        if !matches!(
            self.state,
            InteractionState::Idle | InteractionState::SelectedIdle
        ) {
            return Vec::new();
        }
        if !scene.request_color() {
            return Vec::new();
        }
        self.state = InteractionState::AwaitingInput { shape: None };
        vec![Effect::RequestColor]
    }

    pub fn zoom_in(&mut self) -> bool {
        self.camera.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.camera.zoom_out()
    }

    fn pointer_down(&mut self, scene: &mut Scene, point: Point, effects: &mut Vec<Effect>) {
        if !matches!(
            self.state,
            InteractionState::Idle | InteractionState::SelectedIdle
        ) {
            log::warn!("Pointer down during {:?}, ignored", self.state);
            return;
        }

        match scene.mode() {
            Mode::Select => self.grab(scene, point),
            Mode::Connector => {
                if let Some(shape) = scene.begin_connector(point) {
                    self.state = InteractionState::ConnectingStart { shape, start: point };
                }
            }
            mode => {
                let Some(kind) = mode.shape_kind() else {
                    return;
                };
                let shape = scene.begin_shape(kind, point);
                if kind == ShapeKind::Text {
                    // Free text asks for its content right away.
                    let outcome = scene.commit_shape(shape, point);
                    self.apply_commit(outcome, effects);
                    return;
                }
                let start = scene.draft().map_or(point, |d| d.start);
                self.state = InteractionState::Drawing { kind, shape, start };
                if kind.is_segment() {
                    self.update_indicator(scene, point, effects);
                }
            }
        }
    }

    fn grab(&mut self, scene: &mut Scene, point: Point) {
        let hit = scene.hit_test(point).and_then(|id| scene.shape(id));
        let Some(shape) = hit else {
            scene.clear_selection();
            self.state = InteractionState::Idle;
            return;
        };
        let (id, origin, movable) = (shape.id(), shape.origin(), shape.movable);

        let selected = scene.select(id);
        if !selected {
            scene.clear_selection();
        }
        self.state = if movable {
            InteractionState::Dragging {
                shape: id,
                grab_offset: point - origin,
                original_origin: origin,
            }
        } else if selected {
            InteractionState::SelectedIdle
        } else {
            InteractionState::Idle
        };
    }

    fn pointer_move(&mut self, scene: &mut Scene, point: Point, effects: &mut Vec<Effect>) {
        match self.state {
            InteractionState::Drawing { kind, shape, .. } => {
                scene.update_shape(shape, point);
                if kind.is_segment() {
                    self.update_indicator(scene, point, effects);
                }
            }
            InteractionState::ConnectingStart { .. } => scene.update_connector_preview(point),
            InteractionState::Dragging {
                shape, grab_offset, ..
            } => {
                // Absolute target from the grab offset, so repeated moves never drift.
                let target = point - grab_offset;
                if let Some(origin) = scene.shape(shape).map(|s| s.origin()) {
                    scene.move_shape(shape, target - origin);
                }
            }
            _ => {}
        }
    }

    fn pointer_up(&mut self, scene: &mut Scene, point: Point, effects: &mut Vec<Effect>) {
        match self.state {
            InteractionState::Drawing { shape, .. } => {
                self.clear_indicator(effects);
                let outcome = scene.commit_shape(shape, point);
                self.apply_commit(outcome, effects);
            }
            InteractionState::ConnectingStart { .. } => {
                if let Some(connector) = scene.commit_connector(point) {
                    effects.push(Effect::Connected(connector));
                }
                self.state = InteractionState::Idle;
            }
            InteractionState::Dragging { shape, .. } => {
                self.state = self.rest_state(scene, shape);
            }
            _ => {}
        }
    }

    fn cancel_into(&mut self, scene: &mut Scene, effects: &mut Vec<Effect>) {
        match self.state {
            InteractionState::Drawing { .. } => {
                self.clear_indicator(effects);
                if let Some(shape) = scene.discard_draft() {
                    effects.push(Effect::Discarded(shape));
                }
                self.state = InteractionState::Idle;
            }
            InteractionState::ConnectingStart { .. } => {
                scene.cancel_connector();
                self.state = InteractionState::Idle;
            }
            InteractionState::Dragging {
                shape,
                original_origin,
                ..
            } => {
                if let Some(origin) = scene.shape(shape).map(|s| s.origin()) {
                    scene.move_shape(shape, original_origin - origin);
                }
                self.state = self.rest_state(scene, shape);
            }
            InteractionState::AwaitingInput { shape: Some(_) } => {
                self.state = InteractionState::Idle;
                push_outcome(scene.resolve_text(None), effects);
            }
            InteractionState::AwaitingInput { shape: None } => {
                self.state = InteractionState::Idle;
                scene.resolve_color(None);
            }
            InteractionState::Idle | InteractionState::SelectedIdle => {}
        }
    }

    fn apply_commit(&mut self, outcome: CommitOutcome, effects: &mut Vec<Effect>) {
        self.state = match outcome {
            CommitOutcome::AwaitingText { shape, .. } => {
                InteractionState::AwaitingInput { shape: Some(shape) }
            }
            _ => InteractionState::Idle,
        };
        push_outcome(outcome, effects);
    }

    fn rest_state(&self, scene: &Scene, shape: ShapeId) -> InteractionState {
        if scene.selection() == Some(shape) {
            InteractionState::SelectedIdle
        } else {
            InteractionState::Idle
        }
    }

    fn update_indicator(&mut self, scene: &Scene, point: Point, effects: &mut Vec<Effect>) {
        let target = scene.snap(point).target;
        if target != self.snap_indicator {
            self.snap_indicator = target;
            effects.push(Effect::SnapIndicator(target));
        }
    }

    fn clear_indicator(&mut self, effects: &mut Vec<Effect>) {
        if self.snap_indicator.take().is_some() {
            effects.push(Effect::SnapIndicator(None));
        }
    }
}

fn push_outcome(outcome: CommitOutcome, effects: &mut Vec<Effect>) {
    match outcome {
        CommitOutcome::Committed(shape) => effects.push(Effect::Committed(shape)),
        CommitOutcome::Discarded(shape) => effects.push(Effect::Discarded(shape)),
        CommitOutcome::AwaitingText { shape, rect } => {
            effects.push(Effect::RequestText { shape, rect })
        }
        CommitOutcome::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::Connector;
    use crate::input::Modifiers;
    use crate::shapes::{SerializableColor, Shape};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn setup(mode: Mode) -> (Controller, Scene) {
        init_logging();
        let mut scene = Scene::new();
        scene.set_mode(mode);
        (Controller::default(), scene)
    }

    fn drag(ctl: &mut Controller, scene: &mut Scene, from: (f64, f64), to: (f64, f64)) -> Vec<Effect> {
        let mut effects = ctl.handle(scene, PointerEvent::down(from.0, from.1).into());
        effects.extend(ctl.handle(scene, PointerEvent::moved(to.0, to.1).into()));
        effects.extend(ctl.handle(scene, PointerEvent::up(to.0, to.1).into()));
        effects
    }

    fn last_shape(scene: &Scene) -> &Shape {
        scene.shapes_ordered().last().expect("a shape")
    }

    struct Scripted {
        text: Option<String>,
        color: Option<SerializableColor>,
        asked: usize,
    }

    impl InputProvider for Scripted {
        fn request_text(&mut self, _rect: Rect) -> Option<String> {
            self.asked += 1;
            self.text.clone()
        }

        fn request_color(&mut self) -> Option<SerializableColor> {
            self.asked += 1;
            self.color
        }
    }

    #[test]
    fn test_rectangle_drag_is_normalized() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        let effects = drag(&mut ctl, &mut scene, (10.0, 10.0), (5.0, 40.0));
        let shape = last_shape(&scene);
        assert_eq!(shape.frame(), Some(Rect::new(5.0, 10.0, 10.0, 40.0)));
        assert_eq!(effects, vec![Effect::Committed(shape.id())]);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_square_stays_square_while_dragging() {
        let (mut ctl, mut scene) = setup(Mode::Square);
        ctl.handle(&mut scene, PointerEvent::down(50.0, 50.0).into());
        for &(x, y) in &[(90.0, 60.0), (10.0, 95.0), (45.0, 0.0), (-30.0, -10.0)] {
            ctl.handle(&mut scene, PointerEvent::moved(x, y).into());
            let frame = last_shape(&scene).frame().expect("frame");
            assert!(frame.width() >= 0.0 && frame.height() >= 0.0);
            assert!((frame.width() - frame.height()).abs() < 1e-9);
        }
        ctl.handle(&mut scene, PointerEvent::up(60.0, 70.0).into());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_line_start_snaps_and_reports_indicator() {
        let (mut ctl, mut scene) = setup(Mode::Line);
        drag(&mut ctl, &mut scene, (0.0, 0.0), (100.0, 100.0));

        let effects = ctl.handle(&mut scene, PointerEvent::down(102.0, 102.0).into());
        assert_eq!(effects, vec![Effect::SnapIndicator(Some(Point::new(100.0, 100.0)))]);
        assert_eq!(ctl.snap_indicator(), Some(Point::new(100.0, 100.0)));

        let effects = ctl.handle(&mut scene, PointerEvent::moved(200.0, 100.0).into());
        assert_eq!(effects, vec![Effect::SnapIndicator(None)]);

        ctl.handle(&mut scene, PointerEvent::up(200.0, 100.0).into());
        let [p1, p2] = last_shape(&scene).endpoints().expect("segment");
        assert_eq!(p1, Point::new(100.0, 100.0));
        assert_eq!(p2, Point::new(200.0, 100.0));
        assert_eq!(ctl.snap_indicator(), None);
    }

    #[test]
    fn test_drag_moves_by_grab_offset_and_reanchors() {
        let mut scene = Scene::new();
        let a = scene.insert_template(crate::shapes::Template::Square);
        scene.set_mode(Mode::Rectangle);
        let mut ctl = Controller::default();
        drag(&mut ctl, &mut scene, (300.0, 300.0), (340.0, 340.0));
        let b = last_shape(&scene).id();
        let connector = scene.connect(a, b).expect("connect");

        scene.set_mode(Mode::Select);
        ctl.handle(&mut scene, PointerEvent::down(20.0, 20.0).into());
        assert!(matches!(ctl.state(), InteractionState::Dragging { .. }));
        ctl.handle(&mut scene, PointerEvent::moved(35.0, 45.0).into());
        ctl.handle(&mut scene, PointerEvent::moved(50.0, 70.0).into());
        ctl.handle(&mut scene, PointerEvent::up(50.0, 70.0).into());

        assert_eq!(scene.shape(a).map(Shape::origin), Some(Point::new(30.0, 50.0)));
        let line = scene.connector(connector).map(Connector::line).expect("connector");
        assert_eq!(line.p0, Point::new(80.0, 100.0));
        assert_eq!(ctl.state(), InteractionState::SelectedIdle);
        assert_eq!(scene.selection(), Some(a));
    }

    #[test]
    fn test_select_on_empty_space_deselects() {
        let (mut ctl, mut scene) = setup(Mode::Select);
        let a = scene.insert_template(crate::shapes::Template::Rectangle);
        drag(&mut ctl, &mut scene, (10.0, 10.0), (10.0, 10.0));
        assert_eq!(scene.selection(), Some(a));

        drag(&mut ctl, &mut scene, (500.0, 500.0), (500.0, 500.0));
        assert_eq!(scene.selection(), None);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_lines_drag_without_selection() {
        let (mut ctl, mut scene) = setup(Mode::Line);
        drag(&mut ctl, &mut scene, (0.0, 0.0), (100.0, 0.0));
        ctl.set_mode(&mut scene, Mode::Select);

        drag(&mut ctl, &mut scene, (50.0, 0.0), (50.0, 20.0));
        let [p1, _] = last_shape(&scene).endpoints().expect("segment");
        assert_eq!(p1, Point::new(0.0, 20.0));
        assert_eq!(scene.selection(), None);
    }

    #[test]
    fn test_connector_between_two_shapes() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        drag(&mut ctl, &mut scene, (0.0, 0.0), (20.0, 20.0));
        drag(&mut ctl, &mut scene, (100.0, 0.0), (120.0, 20.0));
        ctl.set_mode(&mut scene, Mode::Connector);

        ctl.handle(&mut scene, PointerEvent::down(10.0, 10.0).into());
        ctl.handle(&mut scene, PointerEvent::moved(60.0, 10.0).into());
        assert_eq!(
            scene.connector_preview().map(|l| l.p1),
            Some(Point::new(60.0, 10.0))
        );
        let effects = ctl.handle(&mut scene, PointerEvent::up(110.0, 10.0).into());

        assert_eq!(scene.connector_count(), 1);
        assert!(matches!(effects.as_slice(), [Effect::Connected(_)]));
        assert!(scene.connector_preview().is_none());
    }

    #[test]
    fn test_connector_to_same_shape_is_rejected() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        drag(&mut ctl, &mut scene, (0.0, 0.0), (50.0, 50.0));
        ctl.set_mode(&mut scene, Mode::Connector);

        let effects = drag(&mut ctl, &mut scene, (10.0, 10.0), (40.0, 40.0));
        assert!(effects.is_empty());
        assert_eq!(scene.connector_count(), 0);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_connector_from_empty_space_never_starts() {
        let (mut ctl, mut scene) = setup(Mode::Connector);
        ctl.handle(&mut scene, PointerEvent::down(10.0, 10.0).into());
        assert_eq!(ctl.state(), InteractionState::Idle);
        assert!(scene.connector_preview().is_none());
    }

    #[test]
    fn test_cancel_drawing_leaves_scene_unchanged() {
        let (mut ctl, mut scene) = setup(Mode::Ellipse);
        ctl.handle(&mut scene, PointerEvent::down(10.0, 10.0).into());
        ctl.handle(&mut scene, PointerEvent::moved(60.0, 40.0).into());
        assert_eq!(scene.len(), 1);

        let effects = ctl.handle(&mut scene, InputEvent::Cancel);
        assert!(scene.is_empty());
        assert!(matches!(effects.as_slice(), [Effect::Discarded(_)]));

        // The release after the cancel does nothing.
        ctl.handle(&mut scene, PointerEvent::up(60.0, 40.0).into());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_cancel_drag_restores_position() {
        let (mut ctl, mut scene) = setup(Mode::Select);
        let a = scene.insert_template(crate::shapes::Template::Circle);
        ctl.handle(&mut scene, PointerEvent::down(50.0, 50.0).into());
        ctl.handle(&mut scene, PointerEvent::moved(150.0, 80.0).into());
        assert_eq!(scene.shape(a).map(Shape::origin), Some(Point::new(100.0, 30.0)));

        ctl.cancel(&mut scene);
        assert_eq!(scene.shape(a).map(Shape::origin), Some(Point::ZERO));
    }

    #[test]
    fn test_textbox_cancel_removes_shape() {
        let (mut ctl, mut scene) = setup(Mode::TextBox);
        let effects = drag(&mut ctl, &mut scene, (0.0, 0.0), (80.0, 30.0));
        let shape = last_shape(&scene).id();
        assert_eq!(
            effects,
            vec![Effect::RequestText { shape, rect: Rect::new(0.0, 0.0, 80.0, 30.0) }]
        );
        assert_eq!(ctl.state(), InteractionState::AwaitingInput { shape: Some(shape) });

        // Pointer input is frozen until the request is answered.
        drag(&mut ctl, &mut scene, (200.0, 200.0), (250.0, 250.0));
        assert_eq!(scene.len(), 1);

        let effects = ctl.handle(&mut scene, InputEvent::TextEntered(None));
        assert_eq!(effects, vec![Effect::Discarded(shape)]);
        assert!(scene.is_empty());
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_free_text_requests_on_press() {
        let (mut ctl, mut scene) = setup(Mode::Text);
        let effects = ctl.handle(&mut scene, PointerEvent::down(30.0, 40.0).into());
        assert!(matches!(effects.as_slice(), [Effect::RequestText { .. }]));

        let effects = ctl.handle(&mut scene, InputEvent::TextEntered(Some("note".into())));
        let shape = last_shape(&scene);
        assert_eq!(effects, vec![Effect::Committed(shape.id())]);
        assert_eq!(shape.origin(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_blocking_host_answers_requests() {
        let (mut ctl, mut scene) = setup(Mode::TextBox);
        let mut host = Scripted { text: Some("label".into()), color: None, asked: 0 };
        ctl.handle_blocking(&mut scene, PointerEvent::down(0.0, 0.0).into(), &mut host);
        let effects = ctl.handle_blocking(&mut scene, PointerEvent::up(40.0, 20.0).into(), &mut host);

        assert_eq!(host.asked, 1);
        assert!(matches!(effects.last(), Some(Effect::Committed(_))));
        let label = last_shape(&scene).label.clone().expect("label");
        assert_eq!(label.content, "label");
        assert_eq!(label.anchor, Point::ZERO);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_color_request_round_trip() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        let blue = SerializableColor::new(0, 0, 255, 255);
        assert_eq!(ctl.request_color(&mut scene), vec![Effect::RequestColor]);
        ctl.handle(&mut scene, InputEvent::ColorPicked(Some(blue)));
        assert_eq!(scene.stroke_color(), blue);

        ctl.request_color(&mut scene);
        ctl.handle(&mut scene, InputEvent::ColorPicked(None));
        assert_eq!(scene.stroke_color(), blue);
        assert_eq!(ctl.state(), InteractionState::Idle);
    }

    #[test]
    fn test_pointer_maps_through_camera() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        ctl.camera.zoom = 2.0;
        drag(&mut ctl, &mut scene, (20.0, 20.0), (60.0, 40.0));
        assert_eq!(last_shape(&scene).frame(), Some(Rect::new(10.0, 10.0, 30.0, 20.0)));
    }

    #[test]
    fn test_ctrl_wheel_reports_view_change() {
        let (mut ctl, mut scene) = setup(Mode::Select);
        let effects = ctl.handle(
            &mut scene,
            PointerEvent::Scroll {
                position: Point::new(100.0, 100.0),
                delta: Vec2::new(0.0, 1.0),
                modifiers: Modifiers::ctrl(),
            }
            .into(),
        );
        assert_eq!(effects, vec![Effect::ViewChanged]);
        assert!((ctl.camera.zoom - 1.2).abs() < 1e-12);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_right_button_is_ignored() {
        let (mut ctl, mut scene) = setup(Mode::Rectangle);
        ctl.handle(
            &mut scene,
            PointerEvent::Down { position: Point::ZERO, button: MouseButton::Right }.into(),
        );
        assert_eq!(ctl.state(), InteractionState::Idle);
        assert!(scene.is_empty());
    }
}
