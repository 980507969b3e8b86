//! Vertex-mean centroids.
//!
//! Anchors for merge and rotation use the plain mean of the distinct
//! vertices, not the area-weighted centroid: the anchor should follow
//! where the user placed vertices, and it must stay defined for
//! zero-area and zero-length geometries.

use geo_types::{Coord, Geometry, LineString};

/// Ring closures are stripped so a closing duplicate does not bias the mean.
fn open_vertices(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = &ring.0;
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => {
            &coords[..coords.len() - 1]
        }
        _ => coords,
    }
}

fn accumulate(geometry: &Geometry<f64>, sum: &mut Coord<f64>, count: &mut usize) {
    let mut take = |coords: &[Coord<f64>]| {
        for c in coords {
            sum.x += c.x;
            sum.y += c.y;
            *count += 1;
        }
    };

    match geometry {
        Geometry::Point(p) => take(&[p.0]),
        Geometry::LineString(ls) => take(open_vertices(ls)),
        Geometry::Polygon(p) => {
            take(open_vertices(p.exterior()));
            for ring in p.interiors() {
                take(open_vertices(ring));
            }
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                take(&[p.0]);
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                take(open_vertices(ls));
            }
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                take(open_vertices(p.exterior()));
                for ring in p.interiors() {
                    take(open_vertices(ring));
                }
            }
        }
        _ => {}
    }
}

/// Mean of a geometry's vertices, or `None` for an empty geometry.
pub fn vertex_mean(geometry: &Geometry<f64>) -> Option<Coord<f64>> {
    vertex_mean_of(std::iter::once(geometry))
}

/// Mean over the vertices of several geometries taken together.
pub fn vertex_mean_of<'a, I>(geometries: I) -> Option<Coord<f64>>
where
    I: IntoIterator<Item = &'a Geometry<f64>>,
{
    let mut sum = Coord { x: 0.0, y: 0.0 };
    let mut count = 0usize;
    for geometry in geometries {
        accumulate(geometry, &mut sum, &mut count);
    }
    if count == 0 {
        None
    } else {
        Some(Coord {
            x: sum.x / count as f64,
            y: sum.y / count as f64,
        })
    }
}
