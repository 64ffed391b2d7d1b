//! View transform for zoom and pan.

use crate::config::EditorConfig;
use crate::input::Modifiers;
use kurbo::{Affine, Line, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// It maps model coordinates to screen coordinates and back. Zooming and
/// panning only change this mapping; shape geometry stored in the scene is
/// never touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Multiplier for one zoom-in step
    pub zoom_in_factor: f64,
    /// Multiplier for one zoom-out step
    pub zoom_out_factor: f64,
    /// Size of the on-screen viewport
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera using the zoom settings from `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            viewport: Size::new(800.0, 600.0),
        }
    }

    /// Get the affine transform for rendering (model to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling (screen to model).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to model coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a model point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    /// Returns false when the zoom limits leave nothing to change.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
        true
    }

    /// Zoom in one step around the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.viewport_center(), self.zoom_in_factor)
    }

    /// Zoom out one step around the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.viewport_center(), self.zoom_out_factor)
    }

    /// Apply a mouse wheel event.
    ///
    /// With ctrl held the wheel zooms around the cursor (up zooms in);
    /// without it the wheel pans. Returns whether the view changed.
    pub fn handle_wheel(&mut self, position: Point, delta: Vec2, modifiers: Modifiers) -> bool {
        if modifiers.ctrl {
            if delta.y > 0.0 {
                self.zoom_at(position, self.zoom_in_factor)
            } else if delta.y < 0.0 {
                self.zoom_at(position, self.zoom_out_factor)
            } else {
                false
            }
        } else if delta != Vec2::ZERO {
            self.pan(delta);
            true
        } else {
            false
        }
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Part of the model currently visible in the viewport.
    pub fn visible_world_rect(&self) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right =
            self.screen_to_world(Point::new(self.viewport.width, self.viewport.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Model-space background grid lines covering the viewport.
    pub fn grid_lines(&self, grid_size: f64) -> Vec<Line> {
        if grid_size <= 0.0 {
            return Vec::new();
        }
        let visible = self.visible_world_rect();
        let left = (visible.x0 / grid_size).floor() * grid_size;
        let top = (visible.y0 / grid_size).floor() * grid_size;

        let mut lines = Vec::new();
        let mut x = left;
        while x < visible.x1 {
            lines.push(Line::new((x, top), (x, visible.y1)));
            x += grid_size;
        }
        let mut y = top;
        while y < visible.y1 {
            lines.push(Line::new((left, y), (visible.x1, y)));
            y += grid_size;
        }
        lines
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}
