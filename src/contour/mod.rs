//! Wavefront extraction
//!
//! Iso-arrival-time segments from a travel-time field, stitched into
//! ordered polylines.

mod extractor;
mod linker;
mod polyline;

pub use extractor::{ContourExtractor, IsoSegments, RawSegment, SaddleResolution};
pub use linker::{TopologyLinker, DEFAULT_LINK_EPSILON};
pub use polyline::{Polyline, MIN_RENDER_POINTS};

use crate::error::{PropagationError, Result};

/// Check thresholds and return them ascending without duplicates
pub fn normalize_thresholds(thresholds: &[f64]) -> Result<Vec<f64>> {
    if let Some(&bad) = thresholds.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
        return Err(PropagationError::InvalidThreshold(bad));
    }
    let mut sorted = thresholds.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    Ok(sorted)
}

/// Upper limit on the number of ring levels derived from a spacing
pub const MAX_RINGS: usize = 10_000;

/// Evenly spaced thresholds `spacing * k` for k = 1..=count
pub fn ring_thresholds(spacing: f64, count: usize) -> Result<Vec<f64>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(PropagationError::InvalidThreshold(spacing));
    }
    if count > MAX_RINGS {
        return Err(PropagationError::TooManyRings {
            requested: count,
            max: MAX_RINGS,
        });
    }
    Ok((1..=count).map(|k| spacing * k as f64).collect())
}

/// Evenly spaced thresholds up to and including `max_time`
pub fn ring_thresholds_until(spacing: f64, max_time: f64) -> Result<Vec<f64>> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(PropagationError::InvalidThreshold(spacing));
    }
    if !(max_time.is_finite() && max_time >= spacing) {
        return Ok(Vec::new());
    }
    // Saturating cast; oversized counts are rejected by ring_thresholds
    let count = (max_time / spacing).floor() as usize;
    ring_thresholds(spacing, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let t = normalize_thresholds(&[30.0, 10.0, 20.0, 10.0]).unwrap();
        assert_eq!(t, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_normalize_rejects_non_positive() {
        assert_eq!(
            normalize_thresholds(&[10.0, 0.0]),
            Err(PropagationError::InvalidThreshold(0.0))
        );
        assert!(normalize_thresholds(&[-5.0]).is_err());
        assert!(normalize_thresholds(&[f64::INFINITY]).is_err());
        assert!(normalize_thresholds(&[f64::NAN]).is_err());
    }

    #[test]
    fn test_ring_thresholds() {
        assert_eq!(ring_thresholds(20.0, 3).unwrap(), vec![20.0, 40.0, 60.0]);
        assert!(ring_thresholds(0.0, 3).is_err());
    }

    #[test]
    fn test_ring_thresholds_until() {
        assert_eq!(
            ring_thresholds_until(25.0, 80.0).unwrap(),
            vec![25.0, 50.0, 75.0]
        );
        assert!(ring_thresholds_until(25.0, 10.0).unwrap().is_empty());
        assert!(ring_thresholds_until(25.0, f64::INFINITY).unwrap().is_empty());
    }

    #[test]
    fn test_ring_count_is_capped() {
        assert_eq!(ring_thresholds(1.0, MAX_RINGS).unwrap().len(), MAX_RINGS);
        assert_eq!(
            ring_thresholds(1.0, MAX_RINGS + 1),
            Err(PropagationError::TooManyRings {
                requested: MAX_RINGS + 1,
                max: MAX_RINGS
            })
        );
        // 1e11 levels from a tiny spacing are refused before allocating
        assert!(matches!(
            ring_thresholds_until(1e-9, 100.0),
            Err(PropagationError::TooManyRings { .. })
        ));
    }
}
