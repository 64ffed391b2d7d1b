//! Endpoint snapping for lines and arrows.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance threshold for endpoint snapping (in model units).
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Distance metric used to rank snap candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapMetric {
    /// Straight-line distance; the snap radius is the same in every direction.
    #[default]
    Euclidean,
    /// |dx| + |dy|; the snap region is a diamond.
    Manhattan,
}

impl SnapMetric {
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            SnapMetric::Euclidean => (a - b).hypot(),
            SnapMetric::Manhattan => (a.x - b.x).abs() + (a.y - b.y).abs(),
        }
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The resolved point: the snap target, or the input unchanged.
    pub point: Point,
    /// The endpoint snapped to, if any.
    pub target: Option<Point>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self { point, target: None }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.target.is_some()
    }
}

/// Snap `point` to the nearest candidate closer than `threshold`.
///
/// Candidates are scanned in order and only a strictly smaller distance
/// replaces the current best, so equal distances resolve to the candidate
/// seen first.
pub fn snap_to_endpoints<I>(point: Point, candidates: I, threshold: f64, metric: SnapMetric) -> SnapResult
where
    I: IntoIterator<Item = Point>,
{
    let mut best: Option<Point> = None;
    let mut best_dist = f64::INFINITY;

    for candidate in candidates {
        let dist = metric.distance(point, candidate);
        if dist < best_dist {
            best_dist = dist;
            best = Some(candidate);
        }
    }

    match best {
        Some(target) if best_dist < threshold => {
            log::trace!("Snapped {:?} to endpoint {:?} ({:.2})", point, target, best_dist);
            SnapResult {
                point: target,
                target: Some(target),
            }
        }
        _ => SnapResult::none(point),
    }
}
