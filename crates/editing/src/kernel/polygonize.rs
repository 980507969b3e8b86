//! Face extraction from a planar edge graph.
//!
//! Classic planar-subdivision traversal: node the input edges, prune
//! dangling edges, then walk directed edges taking the clockwise-most
//! turn at every vertex. Each bounded face comes out exactly once as a
//! counter-clockwise ring; the unbounded face traces clockwise and is
//! discarded by its negative signed area.

use std::collections::{HashMap, HashSet};

use geo_types::{Coord, LineString, Polygon};

use super::noding::{node_segments, segments, vertex_key, VertexKey};

/// Faces smaller than this are traversal artifacts, not geometry.
const AREA_EPSILON: f64 = 1e-12;

/// Extract the closed faces induced by a set of linestrings.
pub(crate) fn polygonize(edges: &[LineString<f64>]) -> Vec<Polygon<f64>> {
    let noded = node_segments(&segments(edges));

    // Graph over snapped vertices; undirected edges deduplicated.
    let mut coords: HashMap<VertexKey, Coord<f64>> = HashMap::new();
    let mut adjacency: HashMap<VertexKey, Vec<VertexKey>> = HashMap::new();
    let mut undirected: HashSet<(VertexKey, VertexKey)> = HashSet::new();

    for seg in &noded {
        let (a, b) = (vertex_key(seg.start), vertex_key(seg.end));
        coords.entry(a).or_insert(seg.start);
        coords.entry(b).or_insert(seg.end);
        let edge = if a < b { (a, b) } else { (b, a) };
        if undirected.insert(edge) {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
    }

    prune_dangles(&mut adjacency);

    // Deterministic directed-edge order.
    let mut directed: Vec<(VertexKey, VertexKey)> = adjacency
        .iter()
        .flat_map(|(&v, nbrs)| nbrs.iter().map(move |&w| (v, w)))
        .collect();
    directed.sort_unstable();

    let mut visited: HashSet<(VertexKey, VertexKey)> = HashSet::new();
    let mut faces = Vec::new();

    for &start in &directed {
        if visited.contains(&start) {
            continue;
        }
        if let Some(ring) = trace_face(start, &adjacency, &coords, &mut visited) {
            if signed_area(&ring) > AREA_EPSILON {
                faces.push(Polygon::new(LineString::new(ring), vec![]));
            }
        }
    }

    faces
}

/// Iteratively drop edges hanging off degree-1 vertices.
///
/// Dangles (cut-line tails, isolated stubs) cannot bound a face and
/// would otherwise produce zero-area out-and-back rings.
fn prune_dangles(adjacency: &mut HashMap<VertexKey, Vec<VertexKey>>) {
    loop {
        let leaves: Vec<VertexKey> = adjacency
            .iter()
            .filter(|(_, nbrs)| nbrs.len() <= 1)
            .map(|(&v, _)| v)
            .collect();
        if leaves.is_empty() {
            return;
        }
        for leaf in leaves {
            if let Some(nbrs) = adjacency.remove(&leaf) {
                for n in nbrs {
                    if let Some(back) = adjacency.get_mut(&n) {
                        back.retain(|&w| w != leaf);
                    }
                }
            }
        }
    }
}

/// Walk one face starting from a directed edge.
///
/// At each vertex the walk leaves along the clockwise-most edge from
/// the reversed arrival direction, which keeps the face interior on
/// the left and yields counter-clockwise rings for bounded faces.
fn trace_face(
    start: (VertexKey, VertexKey),
    adjacency: &HashMap<VertexKey, Vec<VertexKey>>,
    coords: &HashMap<VertexKey, Coord<f64>>,
    visited: &mut HashSet<(VertexKey, VertexKey)>,
) -> Option<Vec<Coord<f64>>> {
    let max_steps = 2 * adjacency.values().map(Vec::len).sum::<usize>() + 2;
    let mut ring = vec![*coords.get(&start.0)?];
    let mut current = start;

    for _ in 0..max_steps {
        visited.insert(current);
        let (from, at) = current;
        ring.push(*coords.get(&at)?);

        let next = clockwise_most(from, at, adjacency, coords)?;
        current = (at, next);
        if current == start {
            // Ring closes on the starting directed edge.
            return Some(ring);
        }
    }

    // Walk failed to close; degenerate input.
    None
}

/// The neighbor of `at` reached by the clockwise-most turn when
/// arriving from `from`. Falls back to backtracking only at a
/// dead end (cannot happen after dangle pruning).
fn clockwise_most(
    from: VertexKey,
    at: VertexKey,
    adjacency: &HashMap<VertexKey, Vec<VertexKey>>,
    coords: &HashMap<VertexKey, Coord<f64>>,
) -> Option<VertexKey> {
    let at_c = *coords.get(&at)?;
    let from_c = *coords.get(&from)?;
    let back = (from_c.y - at_c.y).atan2(from_c.x - at_c.x);

    let mut best: Option<(f64, VertexKey)> = None;
    for &w in adjacency.get(&at)? {
        if w == from {
            continue;
        }
        let w_c = *coords.get(&w)?;
        let angle = (w_c.y - at_c.y).atan2(w_c.x - at_c.x);
        let mut turn = angle - back;
        while turn <= 0.0 {
            turn += 2.0 * std::f64::consts::PI;
        }
        while turn > 2.0 * std::f64::consts::PI {
            turn -= 2.0 * std::f64::consts::PI;
        }
        match best {
            Some((best_turn, _)) if best_turn >= turn => {}
            _ => best = Some((turn, w)),
        }
    }

    best.map(|(_, w)| w).or(Some(from))
}

/// Shoelace area of a closed coordinate ring.
fn signed_area(ring: &[Coord<f64>]) -> f64 {
    if ring.len() < 4 {
        return 0.0;
    }
    let mut sum = 0.0;
    for pair in ring.windows(2) {
        sum += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
    }
    sum / 2.0
}
