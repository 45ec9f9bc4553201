//! Cleanup utilities for unordered collections of network lines.
//!
//! A "network" here is nothing more than a flat collection of [`Line`]s;
//! no connectivity structure is maintained. Which endpoints touch, which
//! lines neighbor each other, and what is too short to keep are all
//! recomputed from coordinates with explicit, caller-supplied tolerances.

mod endpoints;
mod neighbors;
mod prune;

pub use endpoints::{endpoint_records, find_isolated_endpoints, snap_endpoints, EndpointRecord};
pub use neighbors::{
    naive_nearest_neighbors, nearest_vertex_within, NearestNeighbor, NeighborReport,
};
pub use prune::{bend_towards, prune_short_lines, prune_short_segments};

use crate::error::{NetError, Result};
use crate::primitives::Polyline;
use log::warn;
use num_traits::Float;

/// A polyline with the caller's reference id attached.
///
/// The id (typically a source row index) is preserved through every
/// operation so results can be traced back to the originating feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<F> {
    /// Caller-supplied reference id.
    pub id: u64,
    /// The line geometry.
    pub geometry: Polyline<F>,
}

impl<F: Float> Line<F> {
    /// Creates a line from an id and a polyline.
    #[inline]
    pub fn new(id: u64, geometry: Polyline<F>) -> Self {
        Self { id, geometry }
    }

    /// Creates a line from an id and a coordinate list.
    ///
    /// # Example
    ///
    /// ```
    /// use netgeom::network::Line;
    ///
    /// let line = Line::from_coords(7, vec![(0.0_f64, 0.0), (1.0, 0.0)]);
    /// assert_eq!(line.id, 7);
    /// assert_eq!(line.geometry.len(), 2);
    /// ```
    #[inline]
    pub fn from_coords(id: u64, coords: Vec<(F, F)>) -> Self {
        Self {
            id,
            geometry: Polyline::from(coords),
        }
    }
}

/// Splits a collection into lines that can form segments and per-item
/// rejection errors for those that cannot (< 2 points).
///
/// Malformed geometries are reported, not silently dropped, so callers can
/// identify the offending source rows.
pub(crate) fn partition_usable<F: Float>(lines: &[Line<F>]) -> (Vec<&Line<F>>, Vec<NetError>) {
    let mut usable = Vec::with_capacity(lines.len());
    let mut rejected = Vec::new();

    for line in lines {
        if line.geometry.is_degenerate() {
            warn!(
                "line {} has {} point(s), cannot form a segment",
                line.id,
                line.geometry.len()
            );
            rejected.push(NetError::DegenerateLine {
                id: line.id,
                points: line.geometry.len(),
            });
        } else {
            usable.push(line);
        }
    }

    (usable, rejected)
}

/// Rejects zero, negative, or non-finite thresholds.
pub(crate) fn check_threshold<F: Float>(value: F) -> Result<()> {
    if value > F::zero() && value.is_finite() {
        Ok(())
    } else {
        Err(NetError::InvalidThreshold {
            value: value.to_f64().unwrap_or(f64::NAN),
        })
    }
}
