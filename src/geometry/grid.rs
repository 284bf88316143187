//! Regular node grid laid over a world-space rectangle
//!
//! Node (0, 0) sits on the minimum corner of the bounds and node
//! (width - 1, height - 1) on the maximum corner. Nodes are stored
//! row-major.

use super::{Point, Rect};
use crate::error::{PropagationError, Result};

/// Grid resolution bound to world-space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    bounds: Rect,
}

impl Grid {
    /// Create a grid, rejecting resolutions below 2x2 and degenerate bounds
    pub fn new(width: usize, height: usize, bounds: Rect) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(PropagationError::InvalidResolution { width, height });
        }
        if !bounds.is_valid() {
            return Err(PropagationError::InvalidBounds);
        }
        Ok(Self {
            width,
            height,
            bounds,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Horizontal spacing between adjacent nodes
    pub fn dx(&self) -> f64 {
        self.bounds.width() / (self.width - 1) as f64
    }

    /// Vertical spacing between adjacent nodes
    pub fn dy(&self) -> f64 {
        self.bounds.height() / (self.height - 1) as f64
    }

    /// Scalar cell size (mean of both spacings)
    pub fn cell_size(&self) -> f64 {
        (self.dx() + self.dy()) * 0.5
    }

    /// World length of a step to the neighbour at offset (`dcol`, `drow`)
    pub fn step_length(&self, dcol: isize, drow: isize) -> f64 {
        (dcol as f64 * self.dx()).hypot(drow as f64 * self.dy())
    }

    /// Row-major index of a node
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Inverse of [`Grid::index`]
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// World position of a node
    pub fn grid_to_world(&self, col: usize, row: usize) -> Point {
        Point::new(
            self.bounds.min_x + col as f64 * self.dx(),
            self.bounds.min_y + row as f64 * self.dy(),
        )
    }

    /// Continuous grid coordinates of a world point (not clamped)
    pub fn world_to_grid(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.bounds.min_x) / self.dx(),
            (p.y - self.bounds.min_y) / self.dy(),
        )
    }

    /// Nearest node to a world point, clamped into the grid
    pub fn nearest_node(&self, p: Point) -> (usize, usize) {
        let (gx, gy) = self.world_to_grid(self.bounds.clamp(p));
        let col = (gx.round().max(0.0) as usize).min(self.width - 1);
        let row = (gy.round().max(0.0) as usize).min(self.height - 1);
        (col, row)
    }
}
