//! netgeom - Nearest-edge matching and cleanup for line networks
//!
//! A small toolkit for preparing road/line networks for simplification:
//! match point features to their closest line (with foot point and
//! distance), and clean raw segment collections — prune short segments
//! and lines, find and snap isolated endpoints, compute naive
//! nearest-neighbor relations.
//!
//! Inputs must be in a planar, distance-preserving coordinate system;
//! this crate does no reprojection. Searches are exhaustive by design
//! (O(P×S) matching, O(n²) neighbors) — correct on modest datasets, no
//! spatial index.

pub mod error;
pub mod matching;
pub mod network;
pub mod primitives;

pub use error::{NetError, Result};
pub use matching::{match_points_to_lines, par_match_points_to_lines, Match, MatchPoint, MatchReport};
pub use network::{
    find_isolated_endpoints, naive_nearest_neighbors, prune_short_segments, Line,
};
pub use primitives::{Point2, Polyline, Projection, Segment2, Vec2};
