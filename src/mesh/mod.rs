//! Beam discretization
//!
//! A beam is a polyline through its named nodes. Positions along it are
//! measured by the normalized arc-length parameter `eta` in [0, 1]: the
//! first named node sits at 0, the last at 1, and every other named node at
//! its cumulative chord length divided by the total length.
//!
//! A mesh directive shares its element count over the named intervals it
//! covers. Named nodes are always mesh points.

pub mod resolve;

pub use resolve::{interval_span, resolve_beam, BeamLayout, IntervalProperties, MeshRange, RangeCover};

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::elements::{distance, Node};
use crate::error::{FEAError, FEAResult};

/// A discretization point along a beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPoint {
    /// Normalized position along the beam
    pub eta: f64,
    pub coord: [f64; 3],
    /// Position in the beam's named node list, if this point is a named node
    pub named: Option<usize>,
}

/// Normalized arc-length position of every named node
///
/// Fails when consecutive named nodes coincide.
pub fn named_etas(nodes: &[Node]) -> FEAResult<Vec<f64>> {
    let mut cumulative = Vec::with_capacity(nodes.len());
    let mut total = 0.0;
    cumulative.push(0.0);

    for pair in nodes.windows(2) {
        let span = distance(&pair[0].coord, &pair[1].coord);
        if span <= 0.0 || !span.is_finite() {
            return Err(FEAError::geometry(format!(
                "nodes '{}' and '{}' coincide",
                pair[0].uid, pair[1].uid
            )));
        }
        total += span;
        cumulative.push(total);
    }

    let last = cumulative.len() - 1;
    Ok(cumulative
        .iter()
        .enumerate()
        .map(|(k, &s)| if k == last { 1.0 } else { s / total })
        .collect())
}

fn interpolate(nodes: &[Node], etas: &[f64], segment: usize, eta: f64) -> [f64; 3] {
    let a = &nodes[segment].coord;
    let b = &nodes[segment + 1].coord;
    let t = (eta - etas[segment]) / (etas[segment + 1] - etas[segment]);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Split the part of the beam between two named nodes into `nelem` elements
///
/// Returns the points ordered from `from` to `to`. Interior named nodes are
/// always mesh points; see [`interval_counts`] for how the elements are
/// shared between named intervals. Without interior named nodes, or when
/// they fall on the `1/nelem` grid, this is `nelem + 1` points evenly spaced
/// in `eta`.
pub fn discretize(nodes: &[Node], from: &str, to: &str, nelem: usize) -> FEAResult<Vec<MeshPoint>> {
    if nelem < 1 {
        return Err(FEAError::config(format!(
            "mesh '{}'..'{}' needs at least 1 element, got {}",
            from, to, nelem
        )));
    }
    let span = interval_span(0, "mesh", nodes, from, to)
        .map_err(|_| FEAError::config(format!("invalid mesh range '{}'..'{}'", from, to)))?;
    let etas = named_etas(nodes)?;

    let (points, _) = discretize_range(nodes, &etas, span, nelem);
    Ok(points)
}

/// Element count of each named interval in `span` when `nelem` elements are
/// shared over it
///
/// Each interval gets its share of `nelem` in proportion to its length in
/// `eta`, at least one element, with rounding remainders going to the largest
/// fractional shares (earliest first on ties). The counts add up to `nelem`
/// unless there are more intervals than elements.
pub fn interval_counts(etas: &[f64], span: Range<usize>, nelem: usize) -> Vec<usize> {
    let total = etas[span.end] - etas[span.start];
    let shares: Vec<f64> = span
        .map(|k| nelem as f64 * (etas[k + 1] - etas[k]) / total)
        .collect();

    // Shares sitting on an integer up to round-off count as that integer
    let mut counts: Vec<usize> = shares
        .iter()
        .map(|s| ((s + 1e-9).floor() as usize).max(1))
        .collect();

    let assigned: usize = counts.iter().sum();
    if assigned < nelem {
        let mut order: Vec<usize> = (0..counts.len()).collect();
        let remainder = |k: usize| shares[k] - counts[k] as f64;
        order.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)));
        for k in order.into_iter().take(nelem - assigned) {
            counts[k] += 1;
        }
    }

    counts
}

/// Points over `span` and the named interval of each element between them
fn discretize_range(
    nodes: &[Node],
    etas: &[f64],
    span: Range<usize>,
    nelem: usize,
) -> (Vec<MeshPoint>, Vec<usize>) {
    let counts = interval_counts(etas, span.clone(), nelem);
    let mut points = Vec::with_capacity(counts.iter().sum::<usize>() + 1);
    let mut intervals = Vec::with_capacity(points.capacity());

    for (interval, count) in span.zip(counts) {
        let skip = if points.is_empty() { 0 } else { 1 };
        points.extend(discretize_interval(nodes, etas, interval, count).into_iter().skip(skip));
        intervals.extend(std::iter::repeat(interval).take(count));
    }

    (points, intervals)
}

/// `nelem + 1` points on one named interval, equally spaced in `eta`
fn discretize_interval(nodes: &[Node], etas: &[f64], interval: usize, nelem: usize) -> Vec<MeshPoint> {
    let end = interval + 1;
    let eta_a = etas[interval];
    let eta_b = etas[end];

    (0..=nelem)
        .map(|k| {
            if k == 0 {
                MeshPoint {
                    eta: eta_a,
                    coord: nodes[interval].coord,
                    named: Some(interval),
                }
            } else if k == nelem {
                MeshPoint {
                    eta: eta_b,
                    coord: nodes[end].coord,
                    named: Some(end),
                }
            } else {
                let eta = eta_a + (eta_b - eta_a) * k as f64 / nelem as f64;
                MeshPoint {
                    eta,
                    coord: interpolate(nodes, etas, interval, eta),
                    named: None,
                }
            }
        })
        .collect()
}

/// Discretization of a whole beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamMesh {
    /// Mesh points in path order, each point once
    pub points: Vec<MeshPoint>,
    /// Index into `points` of each named node
    pub named_positions: Vec<usize>,
    /// Named interval of each element; element `e` joins points `e` and `e + 1`
    pub element_intervals: Vec<usize>,
}

impl BeamMesh {
    pub fn num_elements(&self) -> usize {
        self.element_intervals.len()
    }
}

/// Mesh a resolved beam, one mesh directive after the other
pub fn mesh_beam(layout: &BeamLayout) -> FEAResult<BeamMesh> {
    let nodes = &layout.nodes;
    let etas = named_etas(nodes).map_err(|err| match err {
        FEAError::Geometry(msg) => FEAError::geometry(format!("beam #{}: {}", layout.index, msg)),
        other => other,
    })?;

    let mut points: Vec<MeshPoint> = Vec::new();
    let mut element_intervals = Vec::new();

    for mesh in &layout.meshes {
        let (span_points, span_intervals) = discretize_range(nodes, &etas, mesh.span.clone(), mesh.nelem);
        let skip = if points.is_empty() { 0 } else { 1 };
        points.extend(span_points.into_iter().skip(skip));
        element_intervals.extend(span_intervals);
    }

    let named_positions = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.named.is_some())
        .map(|(k, _)| k)
        .collect();

    log::debug!(
        "Beam #{}: {} named nodes meshed into {} elements",
        layout.index,
        nodes.len(),
        element_intervals.len()
    );

    Ok(BeamMesh {
        points,
        named_positions,
        element_intervals,
    })
}
