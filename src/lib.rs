//! Ripple - Wavefront propagation for generative sound-propagation drawings
//!
//! Solves per-source arrival-time fields around obstacles, extracts the
//! rings of equal arrival time as ordered polylines, and scores how the
//! sources interfere along them.

pub mod config;
pub mod contour;
pub mod error;
pub mod export;
pub mod geometry;
pub mod interference;
pub mod medium;
pub mod scene;
pub mod solver;
pub mod source;

pub use config::SceneConfig;
pub use error::{PropagationError, Result};
pub use scene::{compute_field, extract_contours, interference_at, Scene, Wavefront};
