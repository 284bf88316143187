//! Travel-time field
//!
//! Dense arrival times for one source over one grid. Unreached nodes hold
//! `f64::INFINITY`.

use crate::geometry::{Grid, Point};

/// Tolerance for points that sit on the far edge of the bounds
const EDGE_SLACK: f64 = 1e-9;

/// Arrival time per grid node for a single source
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeField {
    grid: Grid,
    origin: Point,
    values: Vec<f64>,
}

impl TravelTimeField {
    pub(crate) fn new(grid: Grid, origin: Point, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), grid.len());
        Self {
            grid,
            origin,
            values,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Source position the field was solved from (before clamping)
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Raw values, row-major
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arrival time at a node
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.values[self.grid.index(col, row)]
    }

    pub fn is_reached(&self, col: usize, row: usize) -> bool {
        self.get(col, row).is_finite()
    }

    /// Number of nodes with a finite arrival time
    pub fn reached_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Largest finite arrival time, if any node was reached
    pub fn max_finite(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Bilinear arrival time at a world point
    ///
    /// Returns infinity outside the grid or when any of the four
    /// surrounding nodes is unreached.
    pub fn sample(&self, p: Point) -> f64 {
        let (gx, gy) = self.grid.world_to_grid(p);
        let max_x = (self.grid.width() - 1) as f64;
        let max_y = (self.grid.height() - 1) as f64;
        if !(gx >= -EDGE_SLACK && gx <= max_x + EDGE_SLACK) {
            return f64::INFINITY;
        }
        if !(gy >= -EDGE_SLACK && gy <= max_y + EDGE_SLACK) {
            return f64::INFINITY;
        }
        let gx = gx.clamp(0.0, max_x);
        let gy = gy.clamp(0.0, max_y);

        let col = (gx.floor() as usize).min(self.grid.width() - 2);
        let row = (gy.floor() as usize).min(self.grid.height() - 2);
        let fx = gx - col as f64;
        let fy = gy - row as f64;

        let v00 = self.get(col, row);
        let v10 = self.get(col + 1, row);
        let v01 = self.get(col, row + 1);
        let v11 = self.get(col + 1, row + 1);
        if !(v00.is_finite() && v10.is_finite() && v01.is_finite() && v11.is_finite()) {
            return f64::INFINITY;
        }

        let bottom = v00 + (v10 - v00) * fx;
        let top = v01 + (v11 - v01) * fx;
        bottom + (top - bottom) * fy
    }
}
