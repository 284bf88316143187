//! Arrival-time solving
//!
//! Turns a medium and a grid into one travel-time field per source.

mod dijkstra;
mod field;

pub use dijkstra::ArrivalTimeSolver;
pub use field::TravelTimeField;
