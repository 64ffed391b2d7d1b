//! FlowSketch Core Library
//!
//! Platform-agnostic scene model and interaction engine for the FlowSketch
//! diagram editor. Hosts feed pointer events into a [`Controller`], which
//! mutates a [`Scene`] and reports [`Effect`]s back.

pub mod camera;
pub mod config;
pub mod connector;
pub mod controller;
pub mod export;
pub mod input;
pub mod mode;
pub mod scene;
pub mod shapes;
pub mod snap;

pub use camera::Camera;
pub use config::{ConfigError, EditorConfig};
pub use connector::{Connector, ConnectorBindings, ConnectorId};
pub use controller::{Controller, Effect, InteractionState};
pub use export::{ExportError, ExportRequest, Exporter};
pub use input::{InputEvent, InputProvider, InputRequest, Modifiers, MouseButton, PointerEvent};
pub use mode::Mode;
pub use scene::{CommitOutcome, Draft, Scene, SceneError};
pub use shapes::{
    ArrowheadMode, ArrowheadStyle, Geometry, SerializableColor, Shape, ShapeId, ShapeKind,
    ShapeStyle, Template, TextLabel,
};
pub use snap::{SNAP_THRESHOLD, SnapMetric, SnapResult, snap_to_endpoints};
