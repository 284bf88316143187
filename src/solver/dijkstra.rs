//! Grid Dijkstra over an 8-connected node graph
//!
//! Edge cost into a node is the world length of the step divided by the
//! speed at the destination node: `dx` or `dy` for axis steps and
//! `hypot(dx, dy)` for diagonals. Nodes with speed 0 are never entered.
//!
//! The priority queue is a plain binary heap with lazy deletion: improved
//! nodes are pushed again and stale entries are skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::TravelTimeField;
use crate::error::Result;
use crate::geometry::{Grid, Point, Rect};
use crate::medium::{Medium, SpeedMap};

/// (column, row) offsets of the 8 neighbours
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Heap entry ordered so that `BinaryHeap` pops the smallest time first
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    time: f64,
    index: usize,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Arrival-time solver for a fixed grid and medium
///
/// The speed map is sampled once and reused for every source.
#[derive(Debug, Clone)]
pub struct ArrivalTimeSolver {
    speeds: SpeedMap,
}

impl ArrivalTimeSolver {
    /// Sample `medium` over `grid` and build a solver
    pub fn new(medium: &Medium, grid: Grid) -> Self {
        Self {
            speeds: SpeedMap::sample(medium, &grid),
        }
    }

    /// Build a solver from an already sampled speed map
    pub fn from_speed_map(speeds: SpeedMap) -> Self {
        Self { speeds }
    }

    /// Validate resolution and bounds, then build a solver
    pub fn with_resolution(
        medium: &Medium,
        width: usize,
        height: usize,
        bounds: Rect,
    ) -> Result<Self> {
        let grid = Grid::new(width, height, bounds)?;
        Ok(Self::new(medium, grid))
    }

    pub fn grid(&self) -> &Grid {
        self.speeds.grid()
    }

    pub fn speeds(&self) -> &SpeedMap {
        &self.speeds
    }

    /// Solve arrival times from `origin`
    ///
    /// Origins outside the bounds are clamped to the nearest node.
    pub fn solve(&self, origin: Point) -> TravelTimeField {
        self.solve_with(origin, |_, _| {})
    }

    /// Solve, calling `on_settle(index, time)` each time a node is popped
    /// with its final arrival time
    pub(crate) fn solve_with<F>(&self, origin: Point, mut on_settle: F) -> TravelTimeField
    where
        F: FnMut(usize, f64),
    {
        let grid = *self.grid();
        let width = grid.width() as isize;
        let height = grid.height() as isize;
        let steps = NEIGHBORS.map(|(dc, dr)| (dc, dr, grid.step_length(dc, dr)));

        let mut times = vec![f64::INFINITY; grid.len()];
        let mut heap = BinaryHeap::new();

        let (col, row) = grid.nearest_node(origin);
        let start = grid.index(col, row);
        times[start] = 0.0;
        heap.push(QueueEntry {
            time: 0.0,
            index: start,
        });

        let mut reached = 0usize;
        let mut stale = 0usize;

        while let Some(QueueEntry { time, index }) = heap.pop() {
            if time > times[index] {
                stale += 1;
                continue;
            }
            reached += 1;
            on_settle(index, time);

            let (col, row) = grid.coords(index);
            for &(dc, dr, length) in &steps {
                let nx = col as isize + dc;
                let ny = row as isize + dr;
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                let next = grid.index(nx as usize, ny as usize);
                let speed = self.speeds.at(next);
                if speed <= 0.0 {
                    continue;
                }
                let candidate = time + length / speed;
                if candidate < times[next] {
                    times[next] = candidate;
                    heap.push(QueueEntry {
                        time: candidate,
                        index: next,
                    });
                }
            }
        }

        let field = TravelTimeField::new(grid, origin, times);
        debug!(
            origin_x = origin.x,
            origin_y = origin.y,
            reached,
            max_time = field.max_finite().unwrap_or(0.0),
            stale,
            "solved travel-time field"
        );

        field
    }
}
