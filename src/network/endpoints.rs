//! Endpoint census: shared/isolated classification and endpoint snapping.
//!
//! Endpoint locations are grouped by snapping coordinates to a grid of
//! cell size `tolerance`. Grid snapping makes the grouping transitive and
//! deterministic by construction; two endpoints closer than `tolerance`
//! but straddling a cell boundary land in different cells, which is the
//! documented trade-off of this scheme.

use super::{check_threshold, nearest_vertex_within, Line};
use crate::error::Result;
use crate::primitives::{Point2, Polyline};
use log::{debug, warn};
use num_traits::Float;
use std::collections::HashMap;

/// One endpoint location and the line terminations that meet there.
///
/// `line_ids` holds one entry per termination, so a closed line (first
/// vertex == last vertex) contributes its id twice and is not isolated.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord<F> {
    /// Representative coordinate: the first endpoint seen at this location.
    pub position: Point2<F>,
    /// Ids of the terminating lines, sorted, one entry per termination.
    pub line_ids: Vec<u64>,
}

impl<F> EndpointRecord<F> {
    /// Number of line terminations at this location.
    #[inline]
    pub fn degree(&self) -> usize {
        self.line_ids.len()
    }

    /// `true` when exactly one line terminates here.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.degree() == 1
    }
}

/// Snaps a coordinate to its grid cell index.
fn grid_key<F: Float>(p: Point2<F>, cell: F) -> (i64, i64) {
    let gx = (p.x / cell).round().to_i64().unwrap_or(i64::MAX);
    let gy = (p.y / cell).round().to_i64().unwrap_or(i64::MAX);
    (gx, gy)
}

/// Groups all line endpoints by location and reports who terminates where.
///
/// Lines with fewer than 2 points have no endpoints and are skipped; they
/// contribute nothing to the census. Records are ordered by grid cell so
/// the output is deterministic regardless of input order.
///
/// # Errors
///
/// [`InvalidThreshold`](crate::NetError::InvalidThreshold) when
/// `tolerance` is zero, negative, or not finite.
pub fn endpoint_records<F: Float>(
    lines: &[Line<F>],
    tolerance: F,
) -> Result<Vec<EndpointRecord<F>>> {
    check_threshold(tolerance)?;

    let mut census: HashMap<(i64, i64), EndpointRecord<F>> = HashMap::new();

    for line in lines {
        let Some((first, last)) = line.geometry.endpoints() else {
            continue;
        };
        for endpoint in [first, last] {
            census
                .entry(grid_key(endpoint, tolerance))
                .or_insert_with(|| EndpointRecord {
                    position: endpoint,
                    line_ids: Vec::new(),
                })
                .line_ids
                .push(line.id);
        }
    }

    let mut keyed: Vec<((i64, i64), EndpointRecord<F>)> = census.into_iter().collect();
    keyed.sort_by_key(|(key, _)| *key);

    let mut records: Vec<EndpointRecord<F>> = keyed.into_iter().map(|(_, rec)| rec).collect();
    for rec in &mut records {
        rec.line_ids.sort_unstable();
    }

    Ok(records)
}

/// Finds endpoint locations touched by exactly one line termination.
///
/// Returns the original (unsnapped) coordinates. Running this twice on
/// the same input yields the same set; the result only changes if lines
/// are added or removed in between.
///
/// # Example
///
/// ```
/// use netgeom::network::{find_isolated_endpoints, Line};
/// use netgeom::primitives::Point2;
///
/// // Two lines sharing the endpoint (5, 5).
/// let lines = vec![
///     Line::from_coords(1, vec![(0.0_f64, 0.0), (5.0, 5.0)]),
///     Line::from_coords(2, vec![(5.0, 5.0), (9.0, 5.0)]),
/// ];
/// let isolated = find_isolated_endpoints(&lines, 0.001).unwrap();
/// assert_eq!(isolated, vec![Point2::new(0.0, 0.0), Point2::new(9.0, 5.0)]);
/// ```
pub fn find_isolated_endpoints<F: Float>(lines: &[Line<F>], tolerance: F) -> Result<Vec<Point2<F>>> {
    let records = endpoint_records(lines, tolerance)?;
    Ok(records
        .into_iter()
        .filter(|rec| rec.is_isolated())
        .map(|rec| rec.position)
        .collect())
}

/// Snaps isolated endpoints onto the nearest other network vertex within
/// `max_distance`, then drops lines that collapsed to a point.
///
/// Isolated endpoints with no vertex in range are left untouched. The
/// isolation census itself uses a grouping tolerance of
/// `max_distance / 1000`, so only endpoints that genuinely dangle get
/// moved.
///
/// # Errors
///
/// [`InvalidThreshold`](crate::NetError::InvalidThreshold) when
/// `max_distance` is zero, negative, or not finite.
pub fn snap_endpoints<F: Float>(lines: &[Line<F>], max_distance: F) -> Result<Vec<Line<F>>> {
    check_threshold(max_distance)?;

    let isolation_tolerance = max_distance * F::from(0.001).unwrap_or_else(F::epsilon);
    let isolated = find_isolated_endpoints(lines, isolation_tolerance)?;

    let mut snapped: Vec<Line<F>> = lines.to_vec();
    let mut vertices: Vec<Point2<F>> = snapped
        .iter()
        .flat_map(|line| line.geometry.points.iter().copied())
        .collect();

    let eps_sq = isolation_tolerance * isolation_tolerance;
    let mut moved = 0usize;

    for endpoint in isolated {
        let Some(target) = nearest_vertex_within(&vertices, endpoint, max_distance) else {
            continue;
        };

        // Bend the owning line: the one terminating at this endpoint.
        for line in snapped.iter_mut() {
            let Some((first, last)) = line.geometry.endpoints() else {
                continue;
            };
            if first.distance_squared(endpoint) <= eps_sq
                || last.distance_squared(endpoint) <= eps_sq
            {
                line.geometry = super::bend_towards(&line.geometry, endpoint, target);
                moved += 1;
                break;
            }
        }

        // Keep the vertex pool in sync for later snap targets.
        for v in vertices.iter_mut() {
            if v.distance_squared(endpoint) <= eps_sq {
                *v = target;
                break;
            }
        }
    }

    if moved > 0 {
        debug!("snapped {moved} isolated endpoint(s)");
    }

    // Snapping can collapse a line onto a single location; drop those.
    let (kept, collapsed): (Vec<Line<F>>, Vec<Line<F>>) = snapped
        .into_iter()
        .partition(|line| !collapses(&line.geometry, isolation_tolerance));
    for line in &collapsed {
        warn!("line {} collapsed to a point after snapping, dropped", line.id);
    }

    Ok(kept)
}

fn collapses<F: Float>(geometry: &Polyline<F>, eps: F) -> bool {
    !geometry.is_degenerate() && geometry.collapses_to_point(eps)
}
