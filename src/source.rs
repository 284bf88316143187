//! Point sources

use serde::{Deserialize, Serialize};

use crate::error::{PropagationError, Result};
use crate::geometry::Point;

/// A point emitter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// World position
    pub position: Point,

    /// Wavelength in world units (must be positive)
    pub wavelength: f64,

    /// Initial phase in radians (default: 0)
    #[serde(default)]
    pub phase: f64,

    /// Amplitude in (0, 1] (default: 1.0)
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
}

fn default_amplitude() -> f64 {
    1.0
}

impl Source {
    /// Create a source with zero phase and full amplitude
    pub fn new(position: Point, wavelength: f64) -> Self {
        Self {
            position,
            wavelength,
            phase: 0.0,
            amplitude: 1.0,
        }
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(PropagationError::InvalidSource(format!(
                "position ({}, {}) is not finite",
                self.position.x, self.position.y
            )));
        }
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(PropagationError::InvalidSource(format!(
                "wavelength {} must be positive",
                self.wavelength
            )));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(PropagationError::InvalidSource(format!(
                "amplitude {} must be in (0, 1]",
                self.amplitude
            )));
        }
        if !self.phase.is_finite() {
            return Err(PropagationError::InvalidSource(
                "phase is not finite".to_string(),
            ));
        }
        Ok(())
    }
}
