//! Scene configuration schema

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::contour::{SaddleResolution, DEFAULT_LINK_EPSILON, MAX_RINGS, MIN_RENDER_POINTS};
use crate::geometry::{Grid, Rect};
use crate::medium::{Obstacle, Shape};
use crate::source::Source;

/// A complete scene: grid, sources, obstacles and wavefront levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Solver resolution
    #[serde(default)]
    pub grid: GridConfig,

    /// World-space extent covered by the grid
    pub bounds: Rect,

    /// Point sources
    #[serde(default)]
    pub sources: Vec<Source>,

    /// Obstacles, first match wins
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,

    /// Explicit arrival times to extract (takes precedence over `rings`)
    #[serde(default)]
    pub thresholds: Vec<f64>,

    /// Evenly spaced arrival times
    pub rings: Option<RingConfig>,

    /// Contour extraction and linking options
    #[serde(default)]
    pub contour: ContourSettings,
}

impl SceneConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Grid::new(self.grid.width, self.grid.height, self.bounds)?;

        if self.sources.is_empty() {
            bail!("At least one source is required");
        }
        for (i, source) in self.sources.iter().enumerate() {
            if let Err(e) = source.validate() {
                bail!("Source {}: {}", i, e);
            }
        }

        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if !(0.0..=1.0).contains(&obstacle.speed) {
                bail!("Obstacle {}: speed must be between 0.0 and 1.0", i);
            }
            let radius = match obstacle.shape {
                Shape::Circle { radius, .. } | Shape::Capsule { radius, .. } => radius,
                Shape::Rect(_) => 0.0,
            };
            if !(radius.is_finite() && radius >= 0.0) {
                bail!("Obstacle {}: radius must be a non-negative number", i);
            }
        }

        if let Some(&bad) = self.thresholds.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
            bail!("Threshold {} must be a positive arrival time", bad);
        }
        match &self.rings {
            Some(rings) if !(rings.spacing.is_finite() && rings.spacing > 0.0) => {
                bail!("Ring spacing must be positive");
            }
            Some(RingConfig {
                count: Some(count),
                ..
            }) if *count > MAX_RINGS => {
                bail!("Ring count {} exceeds the maximum of {}", count, MAX_RINGS);
            }
            None if self.thresholds.is_empty() => {
                bail!("Either thresholds or rings must be configured");
            }
            _ => {}
        }

        if self.contour.min_points < 2 {
            bail!("contour.min_points must be at least 2");
        }
        if !(self.contour.link_epsilon.is_finite() && self.contour.link_epsilon >= 0.0) {
            bail!("contour.link_epsilon must be a non-negative number");
        }

        Ok(())
    }
}

/// Grid resolution
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    /// Nodes along x (default: 200)
    #[serde(default = "default_resolution")]
    pub width: usize,

    /// Nodes along y (default: 200)
    #[serde(default = "default_resolution")]
    pub height: usize,
}

fn default_resolution() -> usize { 200 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_resolution(),
            height: default_resolution(),
        }
    }
}

/// Evenly spaced wavefront levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingConfig {
    /// Arrival-time gap between rings
    pub spacing: f64,

    /// Number of rings (None = until the field runs out)
    pub count: Option<usize>,
}

/// Contour extraction options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourSettings {
    /// Saddle cell pairing (default: discovery_order)
    #[serde(default)]
    pub saddle: SaddleResolution,

    /// Rounding step for point identity when linking (default: 1e-6)
    #[serde(default = "default_link_epsilon")]
    pub link_epsilon: f64,

    /// Shortest polyline kept for rendering (default: 4)
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

fn default_link_epsilon() -> f64 { DEFAULT_LINK_EPSILON }
fn default_min_points() -> usize { MIN_RENDER_POINTS }

impl Default for ContourSettings {
    fn default() -> Self {
        Self {
            saddle: SaddleResolution::default(),
            link_epsilon: default_link_epsilon(),
            min_points: default_min_points(),
        }
    }
}
