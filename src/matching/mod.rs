//! Nearest-edge matching: closest line per point, with projection output.
//!
//! For every input point the matcher scans every segment of every
//! candidate line and keeps the minimum-distance projection — O(P × S)
//! with no spatial pruning. Run
//! [`prune_short_segments`](crate::network::prune_short_segments) first to
//! shrink S if needed.

use crate::error::{NetError, Result};
use crate::network::{partition_usable, Line};
use crate::primitives::{Point2, Projection};
use log::trace;
use num_traits::Float;
use rayon::prelude::*;

/// A query point with the caller's reference id attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPoint<F> {
    /// Caller-supplied reference id.
    pub id: u64,
    /// The point location.
    pub position: Point2<F>,
}

impl<F: Float> MatchPoint<F> {
    /// Creates a match point from an id and coordinates.
    #[inline]
    pub fn new(id: u64, x: F, y: F) -> Self {
        Self {
            id,
            position: Point2::new(x, y),
        }
    }
}

/// One point matched to its closest line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<F> {
    /// Id of the matched point.
    pub point_id: u64,
    /// Id of the winning line.
    pub line_id: u64,
    /// Projection onto the winning line's closest segment.
    pub projection: Projection<F>,
}

/// Output of a matching pass: one match per input point, plus the lines
/// that were rejected for having fewer than 2 points.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport<F> {
    /// One match per input point, in input order.
    pub matches: Vec<Match<F>>,
    /// Per-line `DegenerateLine` errors; reported, never silently skipped.
    pub rejected: Vec<NetError>,
}

/// Matches every point to its globally closest line.
///
/// Ties are broken deterministically: a line with a lower id beats an
/// equidistant line with a higher one, and within a line the
/// first-encountered segment wins. Lines whose points all coincide are
/// matched as point-to-point distance through the degenerate-segment
/// projection fallback.
///
/// # Errors
///
/// [`EmptyInput`](crate::NetError::EmptyInput) when either collection is
/// empty, or when every line was rejected as degenerate (the per-line
/// errors are then lost to the caller, so fix the lines first).
///
/// # Example
///
/// ```
/// use netgeom::matching::{match_points_to_lines, MatchPoint};
/// use netgeom::network::Line;
/// use netgeom::primitives::Point2;
///
/// let points = vec![MatchPoint::new(0, 0.0_f64, 0.0)];
/// let lines = vec![Line::from_coords(1, vec![(1.0, 0.0), (1.0, 10.0)])];
///
/// let report = match_points_to_lines(&points, &lines).unwrap();
/// let m = &report.matches[0];
/// assert_eq!(m.line_id, 1);
/// assert_eq!(m.projection.distance, 1.0);
/// assert_eq!(m.projection.foot, Point2::new(1.0, 0.0));
/// ```
pub fn match_points_to_lines<F: Float>(
    points: &[MatchPoint<F>],
    lines: &[Line<F>],
) -> Result<MatchReport<F>> {
    let (usable, rejected) = validate(points, lines)?;

    let matches = points
        .iter()
        .filter_map(|point| best_match(point, &usable))
        .collect();

    finish(points.len(), matches, rejected)
}

/// [`match_points_to_lines`] with the point set partitioned across the
/// rayon thread pool.
///
/// Per-point work is independent and collection preserves input order, so
/// the output is identical to the serial version.
pub fn par_match_points_to_lines<F: Float + Send + Sync>(
    points: &[MatchPoint<F>],
    lines: &[Line<F>],
) -> Result<MatchReport<F>> {
    let (usable, rejected) = validate(points, lines)?;

    let matches = points
        .par_iter()
        .filter_map(|point| best_match(point, &usable))
        .collect();

    finish(points.len(), matches, rejected)
}

fn validate<'a, F: Float>(
    points: &[MatchPoint<F>],
    lines: &'a [Line<F>],
) -> Result<(Vec<&'a Line<F>>, Vec<NetError>)> {
    if points.is_empty() {
        return Err(NetError::EmptyInput { what: "point" });
    }
    if lines.is_empty() {
        return Err(NetError::EmptyInput { what: "line" });
    }

    let (usable, rejected) = partition_usable(lines);
    if usable.is_empty() {
        return Err(NetError::EmptyInput { what: "usable line" });
    }

    Ok((usable, rejected))
}

fn finish<F: Float>(
    point_count: usize,
    matches: Vec<Match<F>>,
    rejected: Vec<NetError>,
) -> Result<MatchReport<F>> {
    trace!(
        "matched {} point(s), {} line(s) rejected",
        point_count,
        rejected.len()
    );
    Ok(MatchReport { matches, rejected })
}

/// The minimum-distance projection of one point over all candidates.
///
/// Returns `None` only for an empty candidate set, which the public
/// entry points rule out before calling.
fn best_match<F: Float>(point: &MatchPoint<F>, usable: &[&Line<F>]) -> Option<Match<F>> {
    let mut best: Option<Match<F>> = None;

    for line in usable {
        for segment in line.geometry.segments() {
            let projection = segment.project(point.position);
            let wins = match &best {
                None => true,
                // Strict inequality within a line keeps the first
                // encountered segment on ties; lower line id wins across
                // lines.
                Some(b) => {
                    projection.distance < b.projection.distance
                        || (projection.distance == b.projection.distance
                            && line.id < b.line_id)
                }
            };
            if wins {
                best = Some(Match {
                    point_id: point.id,
                    line_id: line.id,
                    projection,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_matches_closest_line() {
        let points = vec![MatchPoint::new(0, 0.0, 0.0)];
        let lines = vec![
            Line::from_coords(1, vec![(1.0, 0.0), (1.0, 10.0)]),
            Line::from_coords(2, vec![(5.0, 0.0), (5.0, 10.0)]),
        ];
        let report = match_points_to_lines(&points, &lines).unwrap();
        assert_eq!(report.matches.len(), 1);
        let m = &report.matches[0];
        assert_eq!(m.point_id, 0);
        assert_eq!(m.line_id, 1);
        assert_eq!(m.projection.distance, 1.0);
        assert_eq!(m.projection.foot, Point2::new(1.0, 0.0));
    }

    #[test]
    fn test_projection_lands_mid_segment() {
        let points = vec![MatchPoint::new(0, 3.0, 4.0)];
        let lines = vec![Line::from_coords(1, vec![(0.0, 0.0), (10.0, 0.0)])];
        let report = match_points_to_lines(&points, &lines).unwrap();
        let m = &report.matches[0];
        assert_eq!(m.projection.foot, Point2::new(3.0, 0.0));
        assert_eq!(m.projection.distance, 4.0);
        assert!(m.projection.t > 0.0 && m.projection.t < 1.0);
    }

    #[test]
    fn test_tie_goes_to_lower_line_id() {
        // Two vertical lines equidistant from the origin; higher id first
        // in the input to prove the tie-break ignores input order.
        let points = vec![MatchPoint::new(0, 0.0, 5.0)];
        let lines = vec![
            Line::from_coords(8, vec![(2.0, 0.0), (2.0, 10.0)]),
            Line::from_coords(3, vec![(-2.0, 0.0), (-2.0, 10.0)]),
        ];
        for _ in 0..10 {
            let report = match_points_to_lines(&points, &lines).unwrap();
            assert_eq!(report.matches[0].line_id, 3);
        }
    }

    #[test]
    fn test_multi_segment_line_uses_global_minimum() {
        // An L-shaped line; the point is closest to the second leg.
        let points = vec![MatchPoint::new(0, 9.0, 3.0)];
        let lines = vec![Line::from_coords(
            1,
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)],
        )];
        let report = match_points_to_lines(&points, &lines).unwrap();
        let m = &report.matches[0];
        assert_eq!(m.projection.foot, Point2::new(10.0, 3.0));
        assert_eq!(m.projection.distance, 1.0);
    }

    #[test]
    fn test_collapsed_line_matched_as_point() {
        // Two coincident points still form a (degenerate) segment.
        let points = vec![MatchPoint::new(0, 3.0, 4.0)];
        let lines = vec![Line::from_coords(1, vec![(0.0, 0.0), (0.0, 0.0)])];
        let report = match_points_to_lines(&points, &lines).unwrap();
        let m = &report.matches[0];
        assert_eq!(m.projection.distance, 5.0);
        assert_eq!(m.projection.t, 0.0);
        assert_eq!(m.projection.foot, Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_degenerate_lines_reported() {
        let points = vec![MatchPoint::new(0, 0.0, 0.0)];
        let lines = vec![
            Line::from_coords(1, vec![(1.0, 0.0), (1.0, 10.0)]),
            Line::from_coords(2, vec![(0.1, 0.1)]),
        ];
        let report = match_points_to_lines(&points, &lines).unwrap();
        assert_eq!(report.matches[0].line_id, 1);
        assert_eq!(
            report.rejected,
            vec![NetError::DegenerateLine { id: 2, points: 1 }]
        );
    }

    #[test]
    fn test_empty_inputs_abort() {
        let no_points: Vec<MatchPoint<f64>> = vec![];
        let no_lines: Vec<Line<f64>> = vec![];
        let points = vec![MatchPoint::new(0, 0.0, 0.0)];
        let lines = vec![Line::from_coords(1, vec![(0.0, 0.0), (1.0, 0.0)])];

        assert_eq!(
            match_points_to_lines(&no_points, &lines),
            Err(NetError::EmptyInput { what: "point" })
        );
        assert_eq!(
            match_points_to_lines(&points, &no_lines),
            Err(NetError::EmptyInput { what: "line" })
        );

        // All lines degenerate is as good as no lines.
        let all_bad = vec![Line::from_coords(1, vec![(0.0, 0.0)])];
        assert_eq!(
            match_points_to_lines(&points, &all_bad),
            Err(NetError::EmptyInput { what: "usable line" })
        );
    }

    #[test]
    fn test_one_match_per_point_in_input_order() {
        let points = vec![
            MatchPoint::new(10, 0.0, 1.0),
            MatchPoint::new(11, 5.0, -2.0),
            MatchPoint::new(12, 9.0, 0.5),
        ];
        let lines = vec![Line::from_coords(1, vec![(0.0, 0.0), (10.0, 0.0)])];
        let report = match_points_to_lines(&points, &lines).unwrap();
        let ids: Vec<u64> = report.matches.iter().map(|m| m.point_id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        // A deterministic scatter of points against a small grid of lines.
        let mut points = Vec::new();
        let mut state = 0x2545f4914f6cdd1d_u64;
        for id in 0..200 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let x = (state % 1000) as f64 / 10.0;
            let y = ((state >> 10) % 1000) as f64 / 10.0;
            points.push(MatchPoint::new(id, x, y));
        }
        let mut lines = Vec::new();
        for i in 0..10 {
            let y = i as f64 * 10.0;
            lines.push(Line::from_coords(i, vec![(0.0, y), (50.0, y), (100.0, y + 5.0)]));
        }

        let serial = match_points_to_lines(&points, &lines).unwrap();
        let parallel = par_match_points_to_lines(&points, &lines).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_projection_invariants_hold_for_matches() {
        let points = vec![
            MatchPoint::new(0, -3.0, -3.0),
            MatchPoint::new(1, 50.0, 2.0),
            MatchPoint::new(2, 10.0, 10.0),
        ];
        let lines = vec![
            Line::from_coords(1, vec![(0.0, 0.0), (10.0, 0.0)]),
            Line::from_coords(2, vec![(10.0, 0.0), (10.0, 8.0)]),
        ];
        let report = match_points_to_lines(&points, &lines).unwrap();
        for m in &report.matches {
            assert!(m.projection.distance >= 0.0);
            assert!(m.projection.t >= 0.0 && m.projection.t <= 1.0);
        }
        // Sanity: the far-right point projects onto line 2.
        let far = &report.matches[1];
        assert_eq!(far.line_id, 2);
        assert!(approx_eq(far.projection.foot.x, 10.0, 1e-12));
    }
}
