//! Scene-level operations
//!
//! The three entry points used by scene generation and rendering
//! ([`compute_field`], [`extract_contours`], [`interference_at`]) plus
//! [`Scene`], which runs them for every source of a configured scene.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ContourSettings, SceneConfig};
use crate::contour::{
    normalize_thresholds, ring_thresholds, ring_thresholds_until, ContourExtractor, Polyline,
    TopologyLinker,
};
use crate::error::{PropagationError, Result};
use crate::export::{SourceTrace, TraceReport, TracedPoint, TracedPolyline, TracedWavefront};
use crate::geometry::{Grid, Rect};
use crate::interference::SourceField;
use crate::medium::{Medium, Obstacle, SpeedMap};
use crate::solver::{ArrivalTimeSolver, TravelTimeField};
use crate::source::Source;

pub use crate::interference::interference_at;

/// Polylines of one arrival-time level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavefront {
    pub threshold: f64,
    pub polylines: Vec<Polyline>,
}

/// Solve the travel-time field of one source
pub fn compute_field(
    source: &Source,
    obstacles: &[Obstacle],
    grid_width: usize,
    grid_height: usize,
    bounds: Rect,
) -> Result<TravelTimeField> {
    source.validate()?;
    let grid = Grid::new(grid_width, grid_height, bounds)?;
    let medium = Medium::new(obstacles.to_vec());
    Ok(ArrivalTimeSolver::new(&medium, grid).solve(source.position))
}

/// Extract linked wavefronts at each threshold with default settings
pub fn extract_contours(field: &TravelTimeField, thresholds: &[f64]) -> Result<Vec<Wavefront>> {
    extract_contours_with(field, thresholds, &ContourSettings::default())
}

/// Extract linked wavefronts at each threshold
///
/// Thresholds are validated, sorted and deduplicated; the result is in
/// ascending threshold order. No minimum-length filter is applied.
pub fn extract_contours_with(
    field: &TravelTimeField,
    thresholds: &[f64],
    settings: &ContourSettings,
) -> Result<Vec<Wavefront>> {
    let thresholds = normalize_thresholds(thresholds)?;
    let extractor = ContourExtractor::new(settings.saddle);
    let linker = TopologyLinker::new(settings.link_epsilon);

    let wavefronts = extractor
        .extract(field, &thresholds)
        .into_iter()
        .map(|level| {
            let polylines = linker.link(&level.segments);
            let open = polylines.iter().filter(|p| !p.is_closed()).count();
            debug!(
                threshold = level.threshold,
                segments = level.segments.len(),
                polylines = polylines.len(),
                open,
                "linked wavefront"
            );
            Wavefront {
                threshold: level.threshold,
                polylines,
            }
        })
        .collect();

    Ok(wavefronts)
}

/// Where wavefront levels come from
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdPlan {
    /// Fixed list of arrival times
    Explicit(Vec<f64>),
    /// Multiples of `spacing`, `count` of them or until the field runs out
    Rings { spacing: f64, count: Option<usize> },
}

impl ThresholdPlan {
    /// Resolve to an ascending threshold list for one field
    pub fn resolve(&self, field: &TravelTimeField) -> Result<Vec<f64>> {
        match *self {
            ThresholdPlan::Explicit(ref thresholds) => normalize_thresholds(thresholds),
            ThresholdPlan::Rings {
                spacing,
                count: Some(count),
            } => ring_thresholds(spacing, count),
            ThresholdPlan::Rings {
                spacing,
                count: None,
            } => match field.max_finite() {
                Some(max) => ring_thresholds_until(spacing, max),
                None => Ok(Vec::new()),
            },
        }
    }
}

/// A solvable scene: grid, medium, sources and wavefront levels
///
/// The medium is sampled into a speed map once, when the scene is built.
#[derive(Debug, Clone)]
pub struct Scene {
    solver: ArrivalTimeSolver,
    sources: Vec<Source>,
    plan: ThresholdPlan,
    contour: ContourSettings,
}

impl Scene {
    /// Create a scene, checking every parameter up front
    pub fn new(
        grid: Grid,
        medium: Medium,
        sources: Vec<Source>,
        plan: ThresholdPlan,
        contour: ContourSettings,
    ) -> Result<Self> {
        if sources.is_empty() {
            return Err(PropagationError::NoSources);
        }
        for source in &sources {
            source.validate()?;
        }
        match &plan {
            ThresholdPlan::Explicit(thresholds) => {
                normalize_thresholds(thresholds)?;
            }
            ThresholdPlan::Rings { spacing, count } => {
                ring_thresholds(*spacing, count.unwrap_or(0))?;
            }
        }
        let speeds = SpeedMap::sample(&medium, &grid);
        Ok(Self {
            solver: ArrivalTimeSolver::from_speed_map(speeds),
            sources,
            plan,
            contour,
        })
    }

    /// Build from a scene configuration
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        let grid = Grid::new(config.grid.width, config.grid.height, config.bounds)?;
        let plan = match config.rings {
            Some(rings) if config.thresholds.is_empty() => ThresholdPlan::Rings {
                spacing: rings.spacing,
                count: rings.count,
            },
            _ => ThresholdPlan::Explicit(config.thresholds.clone()),
        };
        Self::new(
            grid,
            Medium::new(config.obstacles.clone()),
            config.sources.clone(),
            plan,
            config.contour,
        )
    }

    pub fn grid(&self) -> &Grid {
        self.solver.grid()
    }

    /// Solve one field per source, in parallel when there is more than one
    pub fn compute_fields(&self) -> Vec<SourceField> {
        let solve =
            |source: &Source| SourceField::new(*source, self.solver.solve(source.position));

        if self.sources.len() > 1 {
            self.sources.par_iter().map(solve).collect()
        } else {
            self.sources.iter().map(solve).collect()
        }
    }

    /// Wavefronts of source `index` against already solved fields
    pub fn wavefronts(&self, fields: &[SourceField], index: usize) -> Result<Vec<Wavefront>> {
        let Some(home) = fields.get(index) else {
            return Err(PropagationError::InvalidSourceIndex {
                index,
                count: fields.len(),
            });
        };
        let thresholds = self.plan.resolve(&home.field)?;
        extract_contours_with(&home.field, &thresholds, &self.contour)
    }

    /// Solve every source and trace render-ready wavefronts
    ///
    /// Polylines shorter than `min_points` are dropped. Each kept point
    /// carries the interference value seen from its own source.
    pub fn trace(&self) -> Result<TraceReport> {
        let grid = *self.grid();
        let fields = self.compute_fields();
        info!(
            sources = fields.len(),
            width = grid.width(),
            height = grid.height(),
            "solved travel-time fields"
        );

        let trace = |index| self.trace_source(&fields, index);
        let sources = if fields.len() > 1 {
            (0..fields.len())
                .into_par_iter()
                .map(trace)
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..fields.len()).map(trace).collect::<Result<Vec<_>>>()?
        };

        let report = TraceReport {
            bounds: grid.bounds(),
            grid_width: grid.width(),
            grid_height: grid.height(),
            sources,
        };
        info!(
            polylines = report.polyline_count(),
            points = report.point_count(),
            "traced wavefronts"
        );
        Ok(report)
    }

    fn trace_source(&self, fields: &[SourceField], index: usize) -> Result<SourceTrace> {
        let home = &fields[index];
        let mut wavefronts = Vec::new();

        for (ring, wavefront) in self.wavefronts(fields, index)?.into_iter().enumerate() {
            let mut polylines = Vec::new();
            for polyline in wavefront.polylines {
                if !polyline.is_renderable(self.contour.min_points) {
                    continue;
                }
                let points = polyline
                    .points
                    .iter()
                    .map(|&p| {
                        Ok(TracedPoint {
                            x: p.x,
                            y: p.y,
                            interference: interference_at(p, fields, index)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                polylines.push(TracedPolyline {
                    closed: polyline.closed,
                    points,
                });
            }
            wavefronts.push(TracedWavefront {
                ring,
                threshold: wavefront.threshold,
                polylines,
            });
        }

        Ok(SourceTrace {
            index,
            source: home.source,
            reached_nodes: home.field.reached_count(),
            max_time: home.field.max_finite(),
            wavefronts,
        })
    }
}
