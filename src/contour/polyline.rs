//! Ordered point sequences produced by linking

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Fewest points a polyline needs before it is handed to curve fitting
pub const MIN_RENDER_POINTS: usize = 4;

/// An open chain or closed loop of world points
///
/// Closed polylines repeat their first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of points without the repeated closing point
    pub fn distinct_len(&self) -> usize {
        if self.closed {
            self.points.len().saturating_sub(1)
        } else {
            self.points.len()
        }
    }

    /// True when there are enough points for curve fitting
    pub fn is_renderable(&self, min_points: usize) -> bool {
        self.points.len() >= min_points
    }

    /// Total length along the polyline
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
