//! Segment intersection predicate with explicit tolerance.

use super::Segment2;
use num_traits::Float;

/// Tests whether two segments intersect, with tolerance.
///
/// Covers proper crossings, endpoint touches, and collinear overlap.
/// Degenerate segments are treated as points.
pub fn segments_intersect<F: Float>(s1: Segment2<F>, s2: Segment2<F>, eps: F) -> bool {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let cross = d1.cross(d2);
    let d = s2.start - s1.start;

    if cross.abs() <= eps {
        // Parallel. Intersect only if collinear and the spans overlap,
        // which the endpoint-distance test captures for both directions.
        let eps_sq = eps * eps;
        return s1.distance_squared_to_point(s2.start) <= eps_sq
            || s1.distance_squared_to_point(s2.end) <= eps_sq
            || s2.distance_squared_to_point(s1.start) <= eps_sq
            || s2.distance_squared_to_point(s1.end) <= eps_sq;
    }

    // Non-parallel: solve s1.start + t1*d1 = s2.start + t2*d2 by Cramer.
    let t1 = d.cross(d2) / cross;
    let t2 = d.cross(d1) / cross;

    let lo = -eps;
    let hi = F::one() + eps;
    t1 >= lo && t1 <= hi && t2 >= lo && t2 <= hi
}
