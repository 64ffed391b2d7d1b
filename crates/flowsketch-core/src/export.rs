//! Export seam: the core computes what to export, a backend rasterizes it.

use crate::scene::Scene;
use crate::shapes::SerializableColor;
use kurbo::Rect;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    EmptyScene,
    #[error("Invalid export bounds: {0:?}")]
    InvalidBounds(Rect),
    #[error("Export backend failed: {0}")]
    Backend(String),
}

/// What an exporter is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRequest {
    /// Model-space region to render.
    pub bounds: Rect,
    /// Fill behind the shapes.
    pub background: SerializableColor,
}

/// A read-only consumer of the scene that turns it into image bytes.
pub trait Exporter {
    fn export(&self, scene: &Scene, request: &ExportRequest) -> Result<Vec<u8>, ExportError>;
}

impl Scene {
    /// Export through `exporter`.
    ///
    /// `target` defaults to the scene's visual bounds and `background` to
    /// white.
    pub fn export(
        &self,
        exporter: &dyn Exporter,
        target: Option<Rect>,
        background: Option<SerializableColor>,
    ) -> Result<Vec<u8>, ExportError> {
        let bounds = match target {
            Some(rect) => rect,
            None => self.visual_bounds().ok_or(ExportError::EmptyScene)?,
        };
        if !(bounds.is_finite() && bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(ExportError::InvalidBounds(bounds));
        }

        let request = ExportRequest {
            bounds,
            background: background.unwrap_or_else(SerializableColor::white),
        };
        log::debug!(
            "Exporting {} shapes, {} connectors in {:?}",
            self.len(),
            self.connector_count(),
            request.bounds
        );
        exporter.export(self, &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;
    use kurbo::Point;
    use std::cell::RefCell;

    /// Records requests and returns the shape count as the "image".
    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<ExportRequest>>,
    }

    impl Exporter for Recorder {
        fn export(&self, scene: &Scene, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
            self.requests.borrow_mut().push(*request);
            Ok(vec![scene.len() as u8])
        }
    }

    struct Failing;

    impl Exporter for Failing {
        fn export(&self, _scene: &Scene, _request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Backend("disk full".to_string()))
        }
    }

    fn scene_with_rect() -> Scene {
        let mut scene = Scene::new();
        let id = scene.begin_shape(ShapeKind::Rectangle, Point::new(10.0, 10.0));
        scene.commit_shape(id, Point::new(50.0, 30.0));
        scene
    }

    #[test]
    fn test_defaults_to_visual_bounds_on_white() {
        let scene = scene_with_rect();
        let recorder = Recorder::default();
        let bytes = scene.export(&recorder, None, None).expect("export");
        assert_eq!(bytes, vec![1]);

        let requests = recorder.requests.borrow();
        assert_eq!(requests[0].bounds, Rect::new(9.0, 9.0, 51.0, 31.0));
        assert_eq!(requests[0].background, SerializableColor::white());
    }

    #[test]
    fn test_explicit_target_and_background() {
        let scene = scene_with_rect();
        let recorder = Recorder::default();
        let target = Rect::new(0.0, 0.0, 200.0, 100.0);
        scene
            .export(&recorder, Some(target), Some(SerializableColor::black()))
            .expect("export");
        assert_eq!(recorder.requests.borrow()[0].bounds, target);
    }

    #[test]
    fn test_empty_scene_is_an_error() {
        let result = Scene::new().export(&Recorder::default(), None, None);
        assert!(matches!(result, Err(ExportError::EmptyScene)));
    }

    #[test]
    fn test_degenerate_target_is_rejected() {
        let scene = scene_with_rect();
        let result = scene.export(&Recorder::default(), Some(Rect::new(5.0, 5.0, 5.0, 20.0)), None);
        assert!(matches!(result, Err(ExportError::InvalidBounds(_))));
    }

    #[test]
    fn test_backend_errors_propagate() {
        let result = scene_with_rect().export(&Failing, None, None);
        assert_eq!(
            result.map_err(|e| e.to_string()),
            Err("Export backend failed: disk full".to_string())
        );
    }
}
