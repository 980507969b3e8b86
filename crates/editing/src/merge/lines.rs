//! Line and multiline merging.

use geo_types::{Coord, Geometry, LineString, MultiLineString};

use mapedit_core::FeatureId;

/// Endpoint identity tolerance (map units).
const JOIN_EPSILON: f64 = 1e-9;

fn joined(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < JOIN_EPSILON && (a.y - b.y).abs() < JOIN_EPSILON
}

fn endpoints(line: &LineString<f64>) -> Option<(Coord<f64>, Coord<f64>)> {
    Some((*line.0.first()?, *line.0.last()?))
}

/// True if any two of the lines share an endpoint.
pub(super) fn any_pair_connected(lines: &[&LineString<f64>]) -> bool {
    for (i, a) in lines.iter().enumerate() {
        let Some((a_start, a_end)) = endpoints(a) else {
            continue;
        };
        for b in &lines[i + 1..] {
            let Some((b_start, b_end)) = endpoints(b) else {
                continue;
            };
            if joined(a_start, b_start)
                || joined(a_start, b_end)
                || joined(a_end, b_start)
                || joined(a_end, b_end)
            {
                return true;
            }
        }
    }
    false
}

/// Chain lines that share endpoints into one linestring.
///
/// The chain grows from the first selected line, absorbing any other
/// line that touches either end, until no line fits. Lines the chain
/// never reaches are secondary chains; their ids come back untouched
/// in the second list and the caller decides their fate.
pub(super) fn chain_lines(
    first: &LineString<f64>,
    others: &[(FeatureId, &LineString<f64>)],
) -> (LineString<f64>, Vec<FeatureId>) {
    let mut chain: Vec<Coord<f64>> = first.0.clone();
    let mut remaining: Vec<(FeatureId, &LineString<f64>)> = others.to_vec();
    let mut absorbed = Vec::new();

    loop {
        let Some((head, tail)) = chain.first().copied().zip(chain.last().copied()) else {
            break;
        };
        let position = remaining.iter().position(|(_, line)| {
            let Some((start, end)) = endpoints(line) else {
                return false;
            };
            joined(start, tail) || joined(end, tail) || joined(start, head) || joined(end, head)
        });
        let Some(position) = position else {
            break;
        };

        let (id, line) = remaining.remove(position);
        let start = line.0[0];
        let end = line.0[line.0.len() - 1];

        if joined(start, tail) {
            chain.extend(line.0.iter().skip(1).copied());
        } else if joined(end, tail) {
            chain.extend(line.0.iter().rev().skip(1).copied());
        } else if joined(end, head) {
            let mut prefix: Vec<Coord<f64>> = line.0[..line.0.len() - 1].to_vec();
            prefix.append(&mut chain);
            chain = prefix;
        } else {
            // start touches head: prepend the line reversed.
            let mut reversed: Vec<Coord<f64>> = line.0.iter().rev().copied().collect();
            reversed.extend(chain.iter().skip(1).copied());
            chain = reversed;
        }
        absorbed.push(id);
    }

    (LineString::new(chain), absorbed)
}

/// Union of the part sets, duplicates across features dropped.
pub(super) fn merge_multi_lines(geometries: &[&Geometry<f64>]) -> MultiLineString<f64> {
    let mut parts: Vec<LineString<f64>> = Vec::new();
    for geometry in geometries {
        if let Geometry::MultiLineString(mls) = geometry {
            for part in &mls.0 {
                if !parts.iter().any(|p| p == part) {
                    parts.push(part.clone());
                }
            }
        }
    }
    MultiLineString::new(parts)
}
