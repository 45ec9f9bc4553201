//! Naive nearest-neighbor search among lines.
//!
//! Exhaustive pairwise comparison, O(n²) over segments by design; no
//! spatial index. Fine for the modest network sizes this crate targets.

use super::{partition_usable, Line};
use crate::error::{NetError, Result};
use crate::primitives::{Point2, Polyline};
use log::trace;
use num_traits::Float;

/// The nearest other line for one line of the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighbor<F> {
    /// The line this record is about.
    pub line_id: u64,
    /// Id of the closest other line.
    pub neighbor_id: u64,
    /// Minimum distance between the two lines (over all segment pairs).
    pub distance: F,
}

/// Result of a nearest-neighbor pass: one record per usable line, plus
/// per-item errors for lines that could not form a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborReport<F> {
    /// One entry per usable line, in input order.
    pub neighbors: Vec<NearestNeighbor<F>>,
    /// Degenerate lines that were reported instead of matched.
    pub rejected: Vec<NetError>,
}

/// Minimum distance between two polylines: the minimum segment-to-segment
/// distance over all pairs.
fn line_distance<F: Float>(a: &Polyline<F>, b: &Polyline<F>) -> F {
    let mut min = F::infinity();
    for sa in a.segments() {
        for sb in b.segments() {
            let d = sa.distance_to_segment(sb, F::epsilon());
            if d < min {
                min = d;
            }
        }
    }
    min
}

/// For every usable line, finds the closest other usable line.
///
/// Distances are exhaustive minima over all segment pairs. Self-pairs are
/// excluded; exact distance ties go to the lower line id. A collection
/// with a single usable line yields an empty mapping (there is no other
/// line to be near).
///
/// # Errors
///
/// [`EmptyInput`](crate::NetError::EmptyInput) when the collection is
/// empty. Lines with fewer than 2 points end up in
/// [`NeighborReport::rejected`].
///
/// # Example
///
/// ```
/// use netgeom::network::{naive_nearest_neighbors, Line};
///
/// let lines = vec![
///     Line::from_coords(1, vec![(0.0_f64, 0.0), (1.0, 0.0)]),
///     Line::from_coords(2, vec![(2.0, 0.0), (3.0, 0.0)]),
///     Line::from_coords(3, vec![(7.0, 0.0), (8.0, 0.0)]),
/// ];
/// let report = naive_nearest_neighbors(&lines).unwrap();
/// assert_eq!(report.neighbors[2].neighbor_id, 2);
/// assert_eq!(report.neighbors[2].distance, 4.0);
/// ```
pub fn naive_nearest_neighbors<F: Float>(lines: &[Line<F>]) -> Result<NeighborReport<F>> {
    if lines.is_empty() {
        return Err(NetError::EmptyInput { what: "line" });
    }

    let (usable, rejected) = partition_usable(lines);
    let mut neighbors = Vec::with_capacity(usable.len());

    for a in &usable {
        let mut best: Option<(F, u64)> = None;

        for b in &usable {
            if b.id == a.id {
                continue;
            }
            let d = line_distance(&a.geometry, &b.geometry);
            let closer = match best {
                None => true,
                Some((bd, bid)) => d < bd || (d == bd && b.id < bid),
            };
            if closer {
                best = Some((d, b.id));
            }
        }

        if let Some((distance, neighbor_id)) = best {
            neighbors.push(NearestNeighbor {
                line_id: a.id,
                neighbor_id,
                distance,
            });
        }
    }

    trace!(
        "nearest-neighbor pass over {} line(s): {} matched, {} rejected",
        lines.len(),
        neighbors.len(),
        rejected.len()
    );

    Ok(NeighborReport {
        neighbors,
        rejected,
    })
}

/// Finds the nearest candidate point strictly closer than `max_distance`
/// and strictly farther than zero (so a point never matches itself).
pub fn nearest_vertex_within<F: Float>(
    candidates: &[Point2<F>],
    point: Point2<F>,
    max_distance: F,
) -> Option<Point2<F>> {
    let mut best: Option<(F, Point2<F>)> = None;

    for &c in candidates {
        let d = point.distance(c);
        if d <= F::zero() || d >= max_distance {
            continue;
        }
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, c));
        }
    }

    best.map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_line_picks_closer_side() {
        // Collinear, non-overlapping: A ... B .. C, with C closer to B.
        let lines = vec![
            Line::from_coords(1, vec![(0.0, 0.0), (1.0, 0.0)]), // A
            Line::from_coords(2, vec![(4.0, 0.0), (5.0, 0.0)]), // B
            Line::from_coords(3, vec![(7.0, 0.0), (8.0, 0.0)]), // C
        ];
        let report = naive_nearest_neighbors(&lines).unwrap();
        let b = &report.neighbors[1];
        assert_eq!(b.line_id, 2);
        assert_eq!(b.neighbor_id, 3);
        assert_eq!(b.distance, 2.0);
    }

    #[test]
    fn test_exact_tie_goes_to_lower_id() {
        // B sits exactly midway between A and C.
        let lines = vec![
            Line::from_coords(3, vec![(8.0, 0.0), (9.0, 0.0)]), // C
            Line::from_coords(1, vec![(0.0, 0.0), (1.0, 0.0)]), // A
            Line::from_coords(2, vec![(4.0, 0.0), (5.0, 0.0)]), // B
        ];
        let report = naive_nearest_neighbors(&lines).unwrap();
        let b = report
            .neighbors
            .iter()
            .find(|n| n.line_id == 2)
            .unwrap();
        assert_eq!(b.neighbor_id, 1);
        assert_eq!(b.distance, 3.0);
    }

    #[test]
    fn test_touching_lines_have_zero_distance() {
        let lines = vec![
            Line::from_coords(1, vec![(0.0, 0.0), (1.0, 1.0)]),
            Line::from_coords(2, vec![(1.0, 1.0), (2.0, 0.0)]),
        ];
        let report = naive_nearest_neighbors(&lines).unwrap();
        assert_eq!(report.neighbors[0].distance, 0.0);
        assert_eq!(report.neighbors[1].distance, 0.0);
    }

    #[test]
    fn test_empty_collection_is_an_error() {
        let lines: Vec<Line<f64>> = vec![];
        assert_eq!(
            naive_nearest_neighbors(&lines),
            Err(NetError::EmptyInput { what: "line" })
        );
    }

    #[test]
    fn test_single_line_yields_empty_mapping() {
        let lines = vec![Line::from_coords(1, vec![(0.0, 0.0), (1.0, 0.0)])];
        let report = naive_nearest_neighbors(&lines).unwrap();
        assert!(report.neighbors.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_degenerate_lines_reported_not_matched() {
        let lines = vec![
            Line::from_coords(1, vec![(0.0, 0.0), (1.0, 0.0)]),
            Line::from_coords(2, vec![(0.5, 3.0)]),
            Line::from_coords(3, vec![(0.0, 1.0), (1.0, 1.0)]),
        ];
        let report = naive_nearest_neighbors(&lines).unwrap();
        assert_eq!(report.neighbors.len(), 2);
        assert!(report.neighbors.iter().all(|n| n.line_id != 2));
        assert_eq!(
            report.rejected,
            vec![NetError::DegenerateLine { id: 2, points: 1 }]
        );
    }

    #[test]
    fn test_nearest_vertex_within() {
        let candidates = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(5.0, 0.0),
        ];
        let p = Point2::new(1.2, 0.0);
        assert_eq!(
            nearest_vertex_within(&candidates, p, 1.0),
            Some(Point2::new(1.0, 0.0))
        );
        // Out of range.
        assert_eq!(nearest_vertex_within(&candidates, p, 0.1), None);
        // Zero distance never matches.
        assert_eq!(
            nearest_vertex_within(&candidates, Point2::new(5.0, 0.0), 0.5),
            None
        );
    }
}
