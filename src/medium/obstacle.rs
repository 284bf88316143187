//! Obstacle shapes
//!
//! Each obstacle is a closed shape with a propagation speed multiplier.
//! Speed 0 blocks propagation entirely, 1 is free space.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Disc around a center
    Circle { center: Point, radius: f64 },
    /// Segment from `a` to `b` swept by a disc of `radius`
    Capsule { a: Point, b: Point, radius: f64 },
    /// Axis-aligned rectangle
    Rect(Rect),
}

impl Shape {
    /// Point containment test (boundary counts as inside)
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Shape::Circle { center, radius } => p.distance(center) <= radius,
            Shape::Capsule { a, b, radius } => distance_to_segment(p, a, b) <= radius,
            Shape::Rect(rect) => rect.contains(p),
        }
    }
}

/// Distance from `p` to the closest point on segment `a`-`b`
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

/// A shape with its speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(flatten)]
    pub shape: Shape,

    /// Propagation speed inside the shape, 0.0-1.0 (default: 0.0, a wall)
    #[serde(default)]
    pub speed: f64,
}

impl Obstacle {
    /// Create an impassable obstacle
    pub fn new(shape: Shape) -> Self {
        Self { shape, speed: 0.0 }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    pub fn capsule(a: Point, b: Point, radius: f64) -> Self {
        Self::new(Shape::Capsule { a, b, radius })
    }

    pub fn rect(rect: Rect) -> Self {
        Self::new(Shape::Rect(rect))
    }

    /// Set the speed multiplier (clamped to 0.0-1.0)
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed.clamp(0.0, 1.0);
        self
    }

    pub fn contains(&self, p: Point) -> bool {
        self.shape.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains() {
        let c = Obstacle::circle(Point::new(10.0, 10.0), 5.0);
        assert!(c.contains(Point::new(10.0, 10.0)));
        assert!(c.contains(Point::new(15.0, 10.0)));
        assert!(!c.contains(Point::new(15.1, 10.0)));
    }

    #[test]
    fn test_capsule_contains() {
        let c = Obstacle::capsule(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0);
        // Alongside the segment
        assert!(c.contains(Point::new(5.0, 1.9)));
        assert!(!c.contains(Point::new(5.0, 2.1)));
        // Rounded end caps use the clamped projection
        assert!(c.contains(Point::new(11.5, 0.0)));
        assert!(!c.contains(Point::new(11.5, 1.9)));
        assert!(c.contains(Point::new(-1.0, 1.0)));
    }

    #[test]
    fn test_degenerate_capsule_is_circle() {
        let c = Obstacle::capsule(Point::new(3.0, 3.0), Point::new(3.0, 3.0), 1.0);
        assert!(c.contains(Point::new(3.5, 3.5)));
        assert!(!c.contains(Point::new(4.5, 3.0)));
    }

    #[test]
    fn test_rect_contains() {
        let r = Obstacle::rect(Rect::new(0.0, 0.0, 4.0, 2.0));
        assert!(r.contains(Point::new(2.0, 1.0)));
        assert!(!r.contains(Point::new(2.0, 3.0)));
    }

    #[test]
    fn test_speed_clamped() {
        let c = Obstacle::circle(Point::default(), 1.0).with_speed(3.0);
        assert_eq!(c.speed, 1.0);
        let c = c.with_speed(-1.0);
        assert_eq!(c.speed, 0.0);
    }

    #[test]
    fn test_deserialize_shapes() {
        let yaml = r#"
- shape: circle
  center: { x: 10, y: 20 }
  radius: 5
  speed: 0.5
- shape: capsule
  a: { x: 0, y: 0 }
  b: { x: 10, y: 0 }
  radius: 2
- shape: rect
  min_x: 0
  min_y: 0
  max_x: 4
  max_y: 2
  speed: 0.25
"#;
        let obstacles: Vec<Obstacle> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(obstacles.len(), 3);
        assert_eq!(
            obstacles[0].shape,
            Shape::Circle {
                center: Point::new(10.0, 20.0),
                radius: 5.0
            }
        );
        assert_eq!(obstacles[0].speed, 0.5);
        assert_eq!(obstacles[1].speed, 0.0);
        assert_eq!(obstacles[2].shape, Shape::Rect(Rect::new(0.0, 0.0, 4.0, 2.0)));
        assert_eq!(obstacles[2].speed, 0.25);
    }
}
