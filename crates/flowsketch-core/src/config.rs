//! Editor tunables.

use crate::shapes::ArrowheadMode;
use crate::snap::{SNAP_THRESHOLD, SnapMetric};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable constants shared by the scene, controller and camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum distance at which a drawn point snaps to a line endpoint.
    pub snap_threshold: f64,
    pub snap_metric: SnapMetric,
    /// Slack added around shapes when hit-testing.
    pub hit_tolerance: f64,
    /// Stroke width of new shapes and connectors.
    pub stroke_width: f64,
    /// Font size of new text.
    pub font_size: f64,
    /// Arrowhead wing length.
    pub arrow_size: f64,
    pub arrowhead: ArrowheadMode,
    /// Scale multiplier for one zoom-in step.
    pub zoom_in_factor: f64,
    /// Scale multiplier for one zoom-out step. Not the inverse of
    /// `zoom_in_factor`: in then out leaves the view at 96%.
    pub zoom_out_factor: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Spacing of the background grid.
    pub grid_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            snap_metric: SnapMetric::Euclidean,
            hit_tolerance: 2.0,
            stroke_width: 2.0,
            font_size: 16.0,
            arrow_size: 10.0,
            arrowhead: ArrowheadMode::FollowLine,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            min_zoom: 0.1,
            max_zoom: 10.0,
            grid_size: 20.0,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("snap_threshold", self.snap_threshold),
            ("stroke_width", self.stroke_width),
            ("font_size", self.font_size),
            ("arrow_size", self.arrow_size),
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
            ("min_zoom", self.min_zoom),
            ("grid_size", self.grid_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {}", value),
                });
            }
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "hit_tolerance",
                reason: format!("expected a non-negative number, got {}", self.hit_tolerance),
            });
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(ConfigError::Invalid {
                field: "max_zoom",
                reason: format!("{} is below min_zoom {}", self.max_zoom, self.min_zoom),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EditorConfig::from_json(r#"{ "snap_threshold": 4.0, "snap_metric": "Manhattan" }"#)
            .expect("valid config");
        assert!((config.snap_threshold - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.snap_metric, SnapMetric::Manhattan);
        assert!((config.zoom_in_factor - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(EditorConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = EditorConfig::from_json(r#"{ "min_zoom": 5.0, "max_zoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_zoom", .. }));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = EditorConfig::from_json(r#"{ "snap_threshold": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "snap_threshold", .. }));
    }

    #[test]
    fn test_json_roundtrip_keeps_arrowhead_mode() {
        let config = EditorConfig {
            arrowhead: ArrowheadMode::Horizontal,
            ..EditorConfig::default()
        };
        let json = config.to_json().expect("serializable");
        assert_eq!(EditorConfig::from_json(&json).expect("valid"), config);
    }
}
