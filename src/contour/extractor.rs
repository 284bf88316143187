//! Multi-threshold iso-segment extraction
//!
//! One pass over every 2x2 cell of a travel-time field, testing all
//! thresholds that fall within the cell's finite value range. Edges with an
//! unreached endpoint never produce a crossing.
//!
//! Shared cell edges are always interpolated in the same direction (towards
//! increasing column or row) so both neighbouring cells emit bit-identical
//! crossing points.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::solver::TravelTimeField;

/// One iso-level crossing of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSegment {
    pub a: Point,
    pub b: Point,
}

impl RawSegment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Same segment with endpoints swapped
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }
}

/// How a cell with four crossings is split into two segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaddleResolution {
    /// Pair crossings in the order they are found (bottom, right, top, left)
    #[default]
    DiscoveryOrder,
    /// Pick the pairing implied by the bilinear value at the cell centre
    AsymptoticDecider,
}

/// Raw segments for one threshold
#[derive(Debug, Clone, PartialEq)]
pub struct IsoSegments {
    pub threshold: f64,
    pub segments: Vec<RawSegment>,
}

/// Marching-squares style extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourExtractor {
    saddle: SaddleResolution,
}

/// Corner values and positions of one cell
struct Cell {
    v: [f64; 4],
    p: [Point; 4],
}

// Corner order inside `Cell`
const C00: usize = 0;
const C10: usize = 1;
const C01: usize = 2;
const C11: usize = 3;

/// Edges as (from, to) corner pairs, in discovery order around the cell
const EDGES: [(usize, usize); 4] = [(C00, C10), (C10, C11), (C01, C11), (C00, C01)];

impl ContourExtractor {
    pub fn new(saddle: SaddleResolution) -> Self {
        Self { saddle }
    }

    /// Extract segments for every threshold
    ///
    /// `thresholds` must be ascending; output keeps the same order.
    pub fn extract(&self, field: &TravelTimeField, thresholds: &[f64]) -> Vec<IsoSegments> {
        let mut levels: Vec<IsoSegments> = thresholds
            .iter()
            .map(|&threshold| IsoSegments {
                threshold,
                segments: Vec::new(),
            })
            .collect();
        if thresholds.is_empty() {
            return levels;
        }

        let grid = field.grid();
        for row in 0..grid.height() - 1 {
            for col in 0..grid.width() - 1 {
                let v = [
                    field.get(col, row),
                    field.get(col + 1, row),
                    field.get(col, row + 1),
                    field.get(col + 1, row + 1),
                ];

                let Some((lo, hi)) = finite_range(&v) else {
                    continue;
                };

                let first = thresholds.partition_point(|&t| t < lo);
                if first == thresholds.len() || thresholds[first] > hi {
                    continue;
                }

                let cell = Cell {
                    v,
                    p: [
                        grid.grid_to_world(col, row),
                        grid.grid_to_world(col + 1, row),
                        grid.grid_to_world(col, row + 1),
                        grid.grid_to_world(col + 1, row + 1),
                    ],
                };

                for level in levels[first..].iter_mut() {
                    if level.threshold > hi {
                        break;
                    }
                    self.cell_segments(&cell, level.threshold, &mut level.segments);
                }
            }
        }

        levels
    }

    fn cell_segments(&self, cell: &Cell, t: f64, out: &mut Vec<RawSegment>) {
        let mut crossings = [Point::default(); 4];
        let mut count = 0;
        for &(from, to) in &EDGES {
            if let Some(p) = crossing(cell.p[from], cell.v[from], cell.p[to], cell.v[to], t) {
                crossings[count] = p;
                count += 1;
            }
        }

        match count {
            2 => push_segment(out, crossings[0], crossings[1]),
            4 => {
                let [bottom, right, top, left] = crossings;
                if self.saddle == SaddleResolution::AsymptoticDecider
                    && !centre_joins_diagonal(&cell.v, t)
                {
                    push_segment(out, left, bottom);
                    push_segment(out, right, top);
                } else {
                    push_segment(out, bottom, right);
                    push_segment(out, top, left);
                }
            }
            _ => {}
        }
    }
}

/// Min and max over the finite corner values
fn finite_range(v: &[f64; 4]) -> Option<(f64, f64)> {
    v.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Interpolated crossing of level `t` on edge `pa`-`pb`
fn crossing(pa: Point, va: f64, pb: Point, vb: f64, t: f64) -> Option<Point> {
    if !(va.is_finite() && vb.is_finite()) {
        return None;
    }
    if (va < t) == (vb < t) {
        return None;
    }
    Some(pa.lerp(pb, (t - va) / (vb - va)))
}

/// True when the bilinear centre value falls on the same side of `t` as
/// corners 00 and 11, so those corners connect through the cell
fn centre_joins_diagonal(v: &[f64; 4], t: f64) -> bool {
    let denom = v[C00] + v[C11] - v[C10] - v[C01];
    let centre = (v[C00] * v[C11] - v[C10] * v[C01]) / denom;
    (centre < t) == (v[C00] < t)
}

fn push_segment(out: &mut Vec<RawSegment>, a: Point, b: Point) {
    if a != b {
        out.push(RawSegment::new(a, b));
    }
}
