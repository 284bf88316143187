//! Multi-source interference proxy
//!
//! Each source's arrival time stands in for its phase at a point. The home
//! source contributes a unit crest; every other source contributes
//! `amplitude * cos(phase difference)` relative to the home phase, or zero
//! where it never arrives. The average over all sources is clamped to
//! [-1, 1].

use std::f64::consts::TAU;

use crate::error::{PropagationError, Result};
use crate::geometry::Point;
use crate::solver::TravelTimeField;
use crate::source::Source;

/// A solved field together with the source it was solved for
#[derive(Debug, Clone)]
pub struct SourceField {
    pub source: Source,
    pub field: TravelTimeField,
}

impl SourceField {
    pub fn new(source: Source, field: TravelTimeField) -> Self {
        Self { source, field }
    }

    /// Phase of this source's wave at `p`, or `None` where it never arrives
    pub fn phase_at(&self, p: Point) -> Option<f64> {
        let time = self.field.sample(p);
        time.is_finite()
            .then(|| TAU * time / self.source.wavelength + self.source.phase)
    }
}

/// Interference value in [-1, 1] at `p` as seen from source `home`
pub fn interference_at(p: Point, fields: &[SourceField], home: usize) -> Result<f64> {
    if fields.is_empty() {
        return Err(PropagationError::NoSources);
    }
    let Some(home_field) = fields.get(home) else {
        return Err(PropagationError::InvalidSourceIndex {
            index: home,
            count: fields.len(),
        });
    };

    // Off the home field the reference falls back to its initial phase
    let reference = home_field
        .phase_at(p)
        .unwrap_or(home_field.source.phase);

    let mut sum = 1.0;
    for (j, other) in fields.iter().enumerate() {
        if j == home {
            continue;
        }
        if let Some(phase) = other.phase_at(p) {
            sum += other.source.amplitude * (phase - reference).cos();
        }
    }

    Ok((sum / fields.len() as f64).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use crate::geometry::Rect;
    use crate::medium::{Medium, Obstacle};
    use crate::solver::ArrivalTimeSolver;

    const WAVELENGTH: f64 = 20.0;

    fn solve_all(medium: &Medium, sources: &[Source]) -> Vec<SourceField> {
        let solver =
            ArrivalTimeSolver::with_resolution(medium, 201, 101, Rect::new(-50.0, -50.0, 150.0, 50.0))
                .unwrap();
        sources
            .iter()
            .map(|s| SourceField::new(*s, solver.solve(s.position)))
            .collect()
    }

    fn solve_pair(medium: &Medium, b: Source) -> Vec<SourceField> {
        solve_all(medium, &[Source::new(Point::new(0.0, 0.0), WAVELENGTH), b])
    }

    fn pair(medium: &Medium) -> Vec<SourceField> {
        solve_pair(medium, Source::new(Point::new(100.0, 0.0), WAVELENGTH))
    }

    #[test]
    fn test_midpoint_is_constructive() {
        let fields = pair(&Medium::free());
        let value = interference_at(Point::new(50.0, 0.0), &fields, 0).unwrap();
        assert!(value > 0.99, "expected near 1, got {}", value);
    }

    #[test]
    fn test_half_wavelength_offset_is_destructive() {
        let fields = pair(&Medium::free());
        // 45 from one source, 55 from the other
        let value = interference_at(Point::new(45.0, 0.0), &fields, 0).unwrap();
        assert!(value.abs() < 0.01, "expected near 0, got {}", value);
        let value = interference_at(Point::new(45.0, 0.0), &fields, 1).unwrap();
        assert!(value.abs() < 0.01, "expected near 0, got {}", value);
    }

    #[test]
    fn test_amplitude_scales_contribution() {
        let quiet = Source::new(Point::new(100.0, 0.0), WAVELENGTH).with_amplitude(0.5);
        let fields = solve_pair(&Medium::free(), quiet);
        let value = interference_at(Point::new(50.0, 0.0), &fields, 0).unwrap();
        assert!((value - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_unreached_source_contributes_nothing() {
        let wall = Obstacle::rect(Rect::new(70.0, -60.0, 75.0, 60.0));
        let fields = pair(&Medium::new(vec![wall]));
        assert!(fields[1].field.sample(Point::new(50.0, 0.0)).is_infinite());
        let value = interference_at(Point::new(50.0, 0.0), &fields, 0).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_opposite_phase_cancels_at_midpoint() {
        let shifted = Source::new(Point::new(100.0, 0.0), WAVELENGTH).with_phase(PI);
        let fields = solve_pair(&Medium::free(), shifted);
        let value = interference_at(Point::new(50.0, 0.0), &fields, 0).unwrap();
        assert!(value.abs() < 1e-9, "expected near 0, got {}", value);
        let value = interference_at(Point::new(50.0, 0.0), &fields, 1).unwrap();
        assert!(value.abs() < 1e-9, "expected near 0, got {}", value);
    }

    #[test]
    fn test_unreached_home_uses_initial_phase() {
        // Home is walled off from (50, 0); source 1 arrives after 50 = 2.5 wavelengths
        let wall = Obstacle::rect(Rect::new(25.0, -60.0, 30.0, 60.0));
        let p = Point::new(50.0, 0.0);
        let other = Source::new(Point::new(100.0, 0.0), WAVELENGTH);

        let in_phase = solve_all(
            &Medium::new(vec![wall]),
            &[Source::new(Point::new(0.0, 0.0), WAVELENGTH), other],
        );
        assert!(in_phase[0].field.sample(p).is_infinite());
        assert!((in_phase[1].field.sample(p) - 50.0).abs() < 1e-9);
        let value = interference_at(p, &in_phase, 0).unwrap();
        assert!(value.abs() < 1e-9, "expected near 0, got {}", value);

        let shifted = solve_all(
            &Medium::new(vec![wall]),
            &[Source::new(Point::new(0.0, 0.0), WAVELENGTH).with_phase(PI), other],
        );
        let value = interference_at(p, &shifted, 0).unwrap();
        assert!((value - 1.0).abs() < 1e-9, "expected near 1, got {}", value);
    }

    #[test]
    fn test_single_source_is_unit() {
        let fields = pair(&Medium::free());
        let value = interference_at(Point::new(10.0, 10.0), &fields[..1], 0).unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            interference_at(Point::default(), &[], 0),
            Err(PropagationError::NoSources)
        );
        let fields = pair(&Medium::free());
        assert_eq!(
            interference_at(Point::default(), &fields, 2),
            Err(PropagationError::InvalidSourceIndex { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_result_stays_in_range() {
        let fields = pair(&Medium::free());
        for i in 0..40 {
            let p = Point::new(-40.0 + i as f64 * 4.7, (i as f64 * 1.3) - 20.0);
            let value = interference_at(p, &fields, 0).unwrap();
            assert!((-1.0..=1.0).contains(&value));
        }
    }
}
