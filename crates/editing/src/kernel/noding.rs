//! Planar noding: splitting segments at their mutual crossings.
//!
//! The polygonizer and the split service both need an edge set in
//! which segments only ever meet at shared endpoints. Crossings are
//! found pairwise with `geo`'s robust line intersection; coordinates
//! are snapped to a fine grid so that the same crossing computed from
//! either side keys to the same vertex.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo_types::{Coord, Line, LineString};

/// Snap grid for vertex identity (map units).
pub(crate) const SNAP_EPSILON: f64 = 1e-9;

/// Quantized coordinate, used as a hash key for vertex identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct VertexKey(i64, i64);

pub(crate) fn vertex_key(c: Coord<f64>) -> VertexKey {
    VertexKey(
        (c.x / SNAP_EPSILON).round() as i64,
        (c.y / SNAP_EPSILON).round() as i64,
    )
}

/// Non-degenerate segments of a set of linestrings.
pub(crate) fn segments(edges: &[LineString<f64>]) -> Vec<Line<f64>> {
    edges
        .iter()
        .flat_map(|ls| ls.lines())
        .filter(|l| vertex_key(l.start) != vertex_key(l.end))
        .collect()
}

/// Position of `point` along `segment`, as a parameter in [0, 1].
fn parameter_along(segment: &Line<f64>, point: Coord<f64>) -> f64 {
    let d = segment.delta();
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return 0.0;
    }
    let w = Coord {
        x: point.x - segment.start.x,
        y: point.y - segment.start.y,
    };
    ((w.x * d.x + w.y * d.y) / len_sq).clamp(0.0, 1.0)
}

/// Cut parameters that `other` induces on `segment`.
fn cut_parameters(segment: &Line<f64>, other: &Line<f64>) -> Vec<f64> {
    match line_intersection(*segment, *other) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => {
            vec![parameter_along(segment, intersection)]
        }
        Some(LineIntersection::Collinear { intersection }) => {
            // Overlap: cut at both ends of the shared stretch.
            vec![
                parameter_along(segment, intersection.start),
                parameter_along(segment, intersection.end),
            ]
        }
        None => vec![],
    }
}

/// Split every segment at its crossings with every other segment.
///
/// The output covers the same point set; any two output segments are
/// either disjoint or share endpoints.
pub(crate) fn node_segments(segments: &[Line<f64>]) -> Vec<Line<f64>> {
    let mut noded = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let mut params = vec![0.0, 1.0];
        for (j, other) in segments.iter().enumerate() {
            if i != j {
                params.extend(cut_parameters(segment, other));
            }
        }
        params.sort_by(|a, b| a.total_cmp(b));
        params.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        let d = segment.delta();
        for pair in params.windows(2) {
            let piece = Line::new(
                Coord {
                    x: segment.start.x + d.x * pair[0],
                    y: segment.start.y + d.y * pair[0],
                },
                Coord {
                    x: segment.start.x + d.x * pair[1],
                    y: segment.start.y + d.y * pair[1],
                },
            );
            if vertex_key(piece.start) != vertex_key(piece.end) {
                noded.push(piece);
            }
        }
    }

    noded
}

/// Distinct points where `a` crosses `b`.
pub(crate) fn line_crossings(a: &LineString<f64>, b: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut seen = Vec::new();
    let mut points = Vec::new();

    let mut push = |c: Coord<f64>| {
        let key = vertex_key(c);
        if !seen.contains(&key) {
            seen.push(key);
            points.push(c);
        }
    };

    for sa in a.lines() {
        for sb in b.lines() {
            match line_intersection(sa, sb) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => push(intersection),
                Some(LineIntersection::Collinear { intersection }) => {
                    push(intersection.start);
                    push(intersection.end);
                }
                None => {}
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn test_node_crossing_segments() {
        let segs = vec![
            Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 0.0 }),
            Line::new(Coord { x: 1.0, y: -1.0 }, Coord { x: 1.0, y: 1.0 }),
        ];
        let noded = node_segments(&segs);
        assert_eq!(noded.len(), 4, "each segment splits at the crossing");
    }

    #[test]
    fn test_node_disjoint_segments_unchanged() {
        let segs = vec![
            Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }),
            Line::new(Coord { x: 5.0, y: 5.0 }, Coord { x: 6.0, y: 6.0 }),
        ];
        let noded = node_segments(&segs);
        assert_eq!(noded.len(), 2);
    }

    #[test]
    fn test_crossings_single_point() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)];
        let b = line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)];
        let points = line_crossings(&a, &b);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 1.0).abs() < 1e-12);
        assert!((points[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossings_none_for_disjoint() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let b = line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 6.0)];
        assert!(line_crossings(&a, &b).is_empty());
    }

    #[test]
    fn test_crossings_dedup_shared_vertex() {
        // b touches a at a vertex shared by two of a's segments.
        let a = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        let b = line_string![(x: 1.0, y: -1.0), (x: 1.0, y: 1.0)];
        let points = line_crossings(&a, &b);
        assert_eq!(points.len(), 1, "shared vertex reported once");
    }
}
