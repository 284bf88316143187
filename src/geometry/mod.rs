//! Planar geometry shared by every stage
//!
//! Points, rectangles and the regular node grid the solver runs on.

mod grid;
mod point;

pub use grid::Grid;
pub use point::{Point, Rect};
