//! Traced wavefront report handed to the renderer

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::source::Source;

/// A polyline point annotated with interference from the home source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracedPoint {
    pub x: f64,
    pub y: f64,
    /// Interference in [-1, 1]
    pub interference: f64,
}

/// A render-ready polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedPolyline {
    pub closed: bool,
    pub points: Vec<TracedPoint>,
}

/// All polylines of one arrival-time level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedWavefront {
    /// Position of this level in the ascending threshold list
    pub ring: usize,
    pub threshold: f64,
    pub polylines: Vec<TracedPolyline>,
}

/// Wavefronts of a single source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTrace {
    pub index: usize,
    pub source: Source,
    /// Grid nodes the wave reaches
    pub reached_nodes: usize,
    /// Latest finite arrival time
    pub max_time: Option<f64>,
    pub wavefronts: Vec<TracedWavefront>,
}

/// Everything traced for one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    pub bounds: Rect,
    pub grid_width: usize,
    pub grid_height: usize,
    pub sources: Vec<SourceTrace>,
}

impl TraceReport {
    /// Polylines across all sources and levels
    pub fn polyline_count(&self) -> usize {
        self.wavefronts().map(|w| w.polylines.len()).sum()
    }

    /// Points across all polylines
    pub fn point_count(&self) -> usize {
        self.wavefronts()
            .flat_map(|w| &w.polylines)
            .map(|p| p.points.len())
            .sum()
    }

    fn wavefronts(&self) -> impl Iterator<Item = &TracedWavefront> {
        self.sources.iter().flat_map(|s| &s.wavefronts)
    }
}
