//! Segment stitching
//!
//! Builds point adjacency from unordered segments and walks it into open
//! chains (from degree-1 endpoints) and closed loops (whatever remains).
//! Points are keyed by coordinates rounded to `epsilon`; output keeps the
//! first unrounded coordinates seen for each key.

use std::collections::HashMap;

use super::{Polyline, RawSegment};
use crate::geometry::Point;

/// Default rounding step for point identity
pub const DEFAULT_LINK_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(i64, i64);

/// Turns raw segments into polylines
#[derive(Debug, Clone, Copy)]
pub struct TopologyLinker {
    epsilon: f64,
}

impl Default for TopologyLinker {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_EPSILON)
    }
}

/// Point graph built from segments, nodes in first-seen order
struct PointGraph {
    points: Vec<Point>,
    adjacency: Vec<Vec<usize>>,
}

impl TopologyLinker {
    /// `epsilon <= 0` keys points by exact coordinate bits
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            0.0
        };
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn key(&self, p: Point) -> PointKey {
        if self.epsilon > 0.0 {
            PointKey(
                (p.x / self.epsilon).round() as i64,
                (p.y / self.epsilon).round() as i64,
            )
        } else {
            PointKey(p.x.to_bits() as i64, p.y.to_bits() as i64)
        }
    }

    fn build_graph(&self, segments: &[RawSegment]) -> PointGraph {
        let mut ids: HashMap<PointKey, usize> = HashMap::with_capacity(segments.len() * 2);
        let mut graph = PointGraph {
            points: Vec::new(),
            adjacency: Vec::new(),
        };

        let mut node = |p: Point, graph: &mut PointGraph| -> usize {
            *ids.entry(self.key(p)).or_insert_with(|| {
                graph.points.push(p);
                graph.adjacency.push(Vec::new());
                graph.points.len() - 1
            })
        };

        for segment in segments {
            let a = node(segment.a, &mut graph);
            let b = node(segment.b, &mut graph);
            if a == b || graph.adjacency[a].contains(&b) {
                continue;
            }
            graph.adjacency[a].push(b);
            graph.adjacency[b].push(a);
        }

        graph
    }

    /// Link segments into open chains followed by closed loops
    pub fn link(&self, segments: &[RawSegment]) -> Vec<Polyline> {
        let graph = self.build_graph(segments);
        let mut visited = vec![false; graph.points.len()];
        let mut polylines = Vec::new();

        for start in 0..graph.points.len() {
            if visited[start] || graph.adjacency[start].len() != 1 {
                continue;
            }
            let path = walk(&graph, start, &mut visited);
            polylines.push(Polyline::open(resolve(&graph, &path)));
        }

        for start in 0..graph.points.len() {
            if visited[start] {
                continue;
            }
            let path = walk(&graph, start, &mut visited);
            let mut points = resolve(&graph, &path);
            let returns = path.len() > 2
                && path
                    .last()
                    .is_some_and(|&last| graph.adjacency[last].contains(&start));
            if returns {
                points.push(graph.points[start]);
                polylines.push(Polyline::closed(points));
            } else {
                polylines.push(Polyline::open(points));
            }
        }

        polylines.retain(|p| p.len() >= 2);
        polylines
    }
}

/// Follow unvisited neighbours from `start` until stuck
fn walk(graph: &PointGraph, start: usize, visited: &mut [bool]) -> Vec<usize> {
    let mut path = vec![start];
    visited[start] = true;
    let mut current = start;
    while let Some(&next) = graph.adjacency[current].iter().find(|&&n| !visited[n]) {
        visited[next] = true;
        path.push(next);
        current = next;
    }
    path
}

fn resolve(graph: &PointGraph, path: &[usize]) -> Vec<Point> {
    path.iter().map(|&i| graph.points[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn seg(a: Point, b: Point) -> RawSegment {
        RawSegment::new(a, b)
    }

    fn segments_of(points: &[Point]) -> Vec<RawSegment> {
        points.windows(2).map(|w| seg(w[0], w[1])).collect()
    }

    fn sorted(points: &[Point]) -> Vec<(f64, f64)> {
        let mut v: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v.dedup();
        v
    }

    #[test]
    fn test_unit_square_closes() {
        let segments = vec![
            seg(p(0.0, 0.0), p(1.0, 0.0)),
            seg(p(1.0, 1.0), p(1.0, 0.0)),
            seg(p(0.0, 1.0), p(1.0, 1.0)),
            seg(p(0.0, 0.0), p(0.0, 1.0)),
        ];
        let polylines = TopologyLinker::default().link(&segments);
        assert_eq!(polylines.len(), 1);
        let square = &polylines[0];
        assert!(square.is_closed());
        assert_eq!(square.len(), 5);
        assert_eq!(square.distinct_len(), 4);
        assert_eq!(square.points.first(), square.points.last());
    }

    #[test]
    fn test_open_chain_from_shuffled_segments() {
        let segments = vec![
            seg(p(2.0, 0.0), p(3.0, 0.0)),
            seg(p(0.0, 0.0), p(1.0, 0.0)),
            seg(p(2.0, 0.0), p(1.0, 0.0)),
        ];
        let polylines = TopologyLinker::default().link(&segments);
        assert_eq!(polylines.len(), 1);
        let chain = &polylines[0];
        assert!(!chain.is_closed());
        assert_eq!(chain.len(), 4);
        let xs: Vec<f64> = chain.points.iter().map(|p| p.x).collect();
        assert!(xs == vec![3.0, 2.0, 1.0, 0.0] || xs == vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_reversed_segments_roundtrip() {
        let chain = vec![p(0.0, 0.0), p(1.0, 0.5), p(2.0, 0.7), p(3.0, 0.6), p(4.0, 0.0)];
        let mut segments = segments_of(&chain);
        segments.reverse();
        let linked = TopologyLinker::default().link(&segments);
        assert_eq!(linked.len(), 1);
        let mut backwards = chain.clone();
        backwards.reverse();
        assert!(linked[0].points == chain || linked[0].points == backwards);

        let ring = vec![p(0.0, 0.0), p(2.0, 0.0), p(3.0, 2.0), p(1.0, 3.0), p(-1.0, 2.0), p(0.0, 0.0)];
        let segments: Vec<RawSegment> = segments_of(&ring).iter().rev().map(|s| s.reversed()).collect();
        let linked = TopologyLinker::default().link(&segments);
        assert_eq!(linked.len(), 1);
        assert!(linked[0].is_closed());
        assert_eq!(sorted(&linked[0].points), sorted(&ring));
    }

    #[test]
    fn test_epsilon_absorbs_drift() {
        let drift = 1e-10;
        let segments = vec![
            seg(p(0.0, 0.0), p(1.0, 0.0)),
            seg(p(1.0 + drift, 0.0), p(2.0, 0.0)),
        ];
        let joined = TopologyLinker::default().link(&segments);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].len(), 3);
        // First-seen coordinate is emitted unrounded
        assert!(joined[0].points.contains(&p(1.0, 0.0)));

        let exact = TopologyLinker::new(0.0).link(&segments);
        assert_eq!(exact.len(), 2);

        // Negative or NaN epsilon also means exact bits
        assert_eq!(TopologyLinker::new(-1.0).epsilon(), 0.0);
        assert_eq!(TopologyLinker::new(f64::NAN).epsilon(), 0.0);
        assert_eq!(TopologyLinker::default().epsilon(), DEFAULT_LINK_EPSILON);
    }

    #[test]
    fn test_disjoint_loops_and_chain() {
        let mut segments = segments_of(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]);
        segments.extend(segments_of(&[p(5.0, 5.0), p(6.0, 5.0), p(6.0, 6.0), p(5.0, 6.0), p(5.0, 5.0)]));
        segments.extend(segments_of(&[p(10.0, 0.0), p(11.0, 0.0)]));
        let polylines = TopologyLinker::default().link(&segments);

        assert_eq!(polylines.len(), 3);
        // Open chains come first
        assert!(!polylines[0].is_closed());
        assert_eq!(polylines[0].len(), 2);
        assert!(polylines[1].is_closed() && polylines[2].is_closed());
        assert_eq!(polylines[1].distinct_len(), 3);
        assert_eq!(polylines[2].distinct_len(), 4);
    }

    #[test]
    fn test_degenerate_segments_ignored() {
        let segments = vec![
            seg(p(1.0, 1.0), p(1.0, 1.0)),
            seg(p(0.0, 0.0), p(1.0, 0.0)),
            seg(p(1.0, 0.0), p(0.0, 0.0)),
        ];
        let polylines = TopologyLinker::default().link(&segments);
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].len(), 2);
    }

    #[test]
    fn test_junction_drops_single_point_remainder() {
        // Y shape: centre has degree 3, the third arm is left as a lone point
        let c = p(0.0, 0.0);
        let segments = vec![
            seg(c, p(1.0, 0.0)),
            seg(c, p(-1.0, 0.0)),
            seg(c, p(0.0, 1.0)),
        ];
        let polylines = TopologyLinker::default().link(&segments);
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].points, vec![p(1.0, 0.0), c, p(-1.0, 0.0)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(TopologyLinker::default().link(&[]).is_empty());
    }
}
