//! Propagation medium
//!
//! An ordered obstacle list answering "how fast does a wave travel here?".
//! Obstacles are matched first-wins in list order; anywhere outside every
//! obstacle is free space with speed 1.0.

mod obstacle;

pub use obstacle::{Obstacle, Shape};

use crate::geometry::{Grid, Point};

/// Speed used outside every obstacle
pub const FREE_SPEED: f64 = 1.0;

/// Obstacle list with speed lookup
#[derive(Debug, Clone, Default)]
pub struct Medium {
    obstacles: Vec<Obstacle>,
}

impl Medium {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Medium with no obstacles
    pub fn free() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Speed multiplier at a point, 0.0-1.0
    pub fn speed_at(&self, p: Point) -> f64 {
        self.obstacles
            .iter()
            .find(|o| o.contains(p))
            .map_or(FREE_SPEED, |o| o.speed)
    }
}

/// Per-node speed lookup sampled once for a grid
///
/// Shared by every source solved on the same grid.
#[derive(Debug, Clone)]
pub struct SpeedMap {
    grid: Grid,
    speeds: Vec<f64>,
}

impl SpeedMap {
    /// Evaluate `medium.speed_at` at every grid node
    pub fn sample(medium: &Medium, grid: &Grid) -> Self {
        let mut speeds = Vec::with_capacity(grid.len());
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                speeds.push(medium.speed_at(grid.grid_to_world(col, row)));
            }
        }
        Self { grid: *grid, speeds }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Speed at a node index
    #[inline]
    pub fn at(&self, index: usize) -> f64 {
        self.speeds[index]
    }

    /// Number of nodes that block propagation
    pub fn blocked_count(&self) -> usize {
        self.speeds.iter().filter(|&&s| s <= 0.0).count()
    }
}
