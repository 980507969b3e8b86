//! Cutting one feature along a drawn line.

use geo_types::{Coord, Line, LineString, Polygon};

use mapedit_core::{Error, GeometryKernel, Result};

/// Tolerance for deciding that a crossing lies on a segment.
const ON_SEGMENT_EPSILON: f64 = 1e-9;

/// Parameter of `point` along `segment` if it lies on it.
fn on_segment(segment: &Line<f64>, point: Coord<f64>) -> Option<f64> {
    let d = segment.delta();
    let len_sq = d.x * d.x + d.y * d.y;
    if len_sq == 0.0 {
        return None;
    }
    let t = (((point.x - segment.start.x) * d.x + (point.y - segment.start.y) * d.y) / len_sq)
        .clamp(0.0, 1.0);
    let nearest = Coord {
        x: segment.start.x + d.x * t,
        y: segment.start.y + d.y * t,
    };
    let off = (nearest.x - point.x).hypot(nearest.y - point.y);
    (off < ON_SEGMENT_EPSILON).then_some(t)
}

fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < ON_SEGMENT_EPSILON && (a.y - b.y).abs() < ON_SEGMENT_EPSILON
}

/// Break a polyline into pieces at the given points.
///
/// Points off the line are ignored; points at the line's own endpoints
/// produce no extra piece. Consecutive pieces share the break vertex.
fn break_line_at(line: &LineString<f64>, points: &[Coord<f64>]) -> Vec<LineString<f64>> {
    let mut pieces: Vec<LineString<f64>> = Vec::new();
    let mut current: Vec<Coord<f64>> = match line.0.first() {
        Some(&first) => vec![first],
        None => return pieces,
    };

    for segment in line.lines() {
        let mut cuts: Vec<(f64, Coord<f64>)> = points
            .iter()
            .filter_map(|&p| on_segment(&segment, p).map(|t| (t, p)))
            .collect();
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, p) in cuts {
            if let Some(&last) = current.last() {
                if close(last, p) {
                    // Break lands on the piece boundary already.
                    if current.len() >= 2 {
                        pieces.push(LineString::new(std::mem::take(&mut current)));
                        current.push(p);
                    }
                    continue;
                }
            }
            current.push(p);
            pieces.push(LineString::new(std::mem::take(&mut current)));
            current.push(p);
        }

        match current.last() {
            Some(&last) if close(last, segment.end) => {}
            _ => current.push(segment.end),
        }
    }

    if current.len() >= 2 {
        pieces.push(LineString::new(current));
    }
    pieces
}

/// Split a linestring where the cut line crosses it.
pub(crate) fn split_line(
    kernel: &dyn GeometryKernel,
    target: &LineString<f64>,
    cut: &LineString<f64>,
) -> Result<Vec<LineString<f64>>> {
    let crossings = kernel.crossings(target, cut);
    if crossings.is_empty() {
        return Err(Error::NoSplitProduced);
    }
    let pieces = break_line_at(target, &crossings);
    if pieces.len() < 2 {
        return Err(Error::NoSplitProduced);
    }
    Ok(pieces)
}

/// Split a polygon along the cut line.
///
/// The exterior ring and the cut form a planar graph; its bounded
/// faces are the pieces. A cut that does not traverse the interior
/// leaves a single face and produces no split.
pub(crate) fn split_polygon(
    kernel: &dyn GeometryKernel,
    target: &Polygon<f64>,
    cut: &LineString<f64>,
) -> Result<Vec<Polygon<f64>>> {
    let edges = vec![target.exterior().clone(), cut.clone()];
    let faces = kernel.polygonize(&edges);
    if faces.len() < 2 {
        return Err(Error::NoSplitProduced);
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo::Area;
    use geo_types::{line_string, polygon};

    #[test]
    fn test_one_crossing_two_pieces() {
        let target = line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0)];
        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 1.0)];
        let pieces = split_line(&GeoKernel, &target, &cut).unwrap();

        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
        assert_eq!(pieces[1], line_string![(x: 2.0, y: 0.0), (x: 4.0, y: 0.0)]);
    }

    #[test]
    fn test_two_crossings_three_pieces() {
        let target = line_string![(x: 0.0, y: 0.0), (x: 6.0, y: 0.0)];
        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 1.0), (x: 4.0, y: -1.0)];
        let pieces = split_line(&GeoKernel, &target, &cut).unwrap();
        assert_eq!(pieces.len(), 3);
    }

    #[test]
    fn test_crossing_at_interior_vertex() {
        let target = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 4.0, y: 0.0)];
        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 1.0)];
        let pieces = split_line(&GeoKernel, &target, &cut).unwrap();

        assert_eq!(pieces.len(), 2, "vertex crossing still splits cleanly");
        assert_eq!(pieces[0], line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)]);
        assert_eq!(pieces[1], line_string![(x: 2.0, y: 0.0), (x: 4.0, y: 0.0)]);
    }

    #[test]
    fn test_miss_is_rejected() {
        let target = line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0)];
        let cut = line_string![(x: 0.0, y: 5.0), (x: 4.0, y: 5.0)];
        let err = split_line(&GeoKernel, &target, &cut).unwrap_err();
        assert_eq!(err, Error::NoSplitProduced);
    }

    #[test]
    fn test_touch_at_endpoint_is_rejected() {
        let target = line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0)];
        // Crosses only through the target's start vertex.
        let cut = line_string![(x: 0.0, y: -1.0), (x: 0.0, y: 1.0)];
        let err = split_line(&GeoKernel, &target, &cut).unwrap_err();
        assert_eq!(err, Error::NoSplitProduced, "no interior crossing, no split");
    }

    #[test]
    fn test_polygon_halves() {
        let target = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ];
        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 5.0)];
        let pieces = split_polygon(&GeoKernel, &target, &cut).unwrap();

        assert_eq!(pieces.len(), 2);
        let total: f64 = pieces.iter().map(|p| p.unsigned_area()).sum();
        assert!((total - 16.0).abs() < 1e-9, "pieces partition the polygon");
    }

    #[test]
    fn test_polygon_cut_stopping_inside_is_rejected() {
        let target = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ];
        let cut = line_string![(x: 2.0, y: -1.0), (x: 2.0, y: 2.0)];
        let err = split_polygon(&GeoKernel, &target, &cut).unwrap_err();
        assert_eq!(err, Error::NoSplitProduced);
    }
}
