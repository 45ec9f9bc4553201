//! Short-segment and short-line pruning.

use super::{check_threshold, Line};
use crate::error::Result;
use crate::primitives::{Point2, Polyline};
use log::{debug, warn};
use num_traits::Float;

/// Removes interior vertices that form segments shorter than `min_length`.
///
/// Walks each line and keeps an interior vertex only when it is at least
/// `min_length` away from the previously kept vertex; a short trailing
/// segment is merged into the final endpoint instead. The first and last
/// vertex of every line are always preserved so connections to touching
/// lines stay intact. A line whose interior prunes away entirely
/// degenerates to its two original endpoints.
///
/// Lines with fewer than 2 points pass through unchanged; consumers that
/// need segments report them.
///
/// # Errors
///
/// [`InvalidThreshold`](crate::NetError::InvalidThreshold) when
/// `min_length` is zero, negative, or not finite — a no-op threshold
/// almost certainly indicates a caller error.
///
/// # Example
///
/// ```
/// use netgeom::network::{prune_short_segments, Line};
///
/// let lines = vec![Line::from_coords(
///     1,
///     vec![(0.0_f64, 0.0), (0.0, 1.0), (0.0, 1.0001)],
/// )];
/// let pruned = prune_short_segments(&lines, 0.01).unwrap();
/// // The near-zero trailing segment is merged into the endpoint.
/// assert_eq!(pruned[0].geometry.len(), 2);
/// ```
pub fn prune_short_segments<F: Float>(lines: &[Line<F>], min_length: F) -> Result<Vec<Line<F>>> {
    check_threshold(min_length)?;

    let pruned = lines
        .iter()
        .map(|line| Line {
            id: line.id,
            geometry: prune_polyline(&line.geometry, min_length),
        })
        .collect();

    Ok(pruned)
}

fn prune_polyline<F: Float>(polyline: &Polyline<F>, min_length: F) -> Polyline<F> {
    let points = &polyline.points;
    if points.len() < 3 {
        return polyline.clone();
    }

    let last = points[points.len() - 1];
    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);

    for &p in &points[1..points.len() - 1] {
        if kept[kept.len() - 1].distance(p) >= min_length {
            kept.push(p);
        }
    }

    // A short tail segment merges into the endpoint: pop interior
    // vertices until the closing segment is long enough. kept[0] is the
    // first vertex and is never popped.
    while kept.len() > 1 && kept[kept.len() - 1].distance(last) < min_length {
        kept.pop();
    }
    kept.push(last);

    if kept.len() < points.len() {
        debug!(
            "pruned {} short-segment vertex(es) from a {}-point line",
            points.len() - kept.len(),
            points.len()
        );
    }

    Polyline::new(kept)
}

/// Removes whole lines shorter than `min_length`, contracting neighbors.
///
/// Every line whose total length is below `min_length` is dropped. Each
/// surviving line that touches a dropped one (comes within
/// `touch_tolerance` of it) gets its nearest vertex bent onto the dropped
/// line's centroid, so the network stays connected where the short line
/// used to bridge.
///
/// # Errors
///
/// [`InvalidThreshold`](crate::NetError::InvalidThreshold) when
/// `min_length` or `touch_tolerance` is zero, negative, or not finite.
pub fn prune_short_lines<F: Float>(
    lines: &[Line<F>],
    min_length: F,
    touch_tolerance: F,
) -> Result<Vec<Line<F>>> {
    check_threshold(min_length)?;
    check_threshold(touch_tolerance)?;

    let mut result: Vec<Line<F>> = lines.to_vec();
    let mut dropped = vec![false; result.len()];

    for i in 0..result.len() {
        let length = result[i].geometry.length();
        if result[i].geometry.is_degenerate() || length >= min_length {
            continue;
        }
        dropped[i] = true;

        let short = result[i].geometry.clone();
        let target = centroid(&short);
        warn!(
            "dropping line {} (length {:.6} < threshold); contracting neighbors",
            result[i].id,
            length.to_f64().unwrap_or(f64::NAN)
        );

        for j in 0..result.len() {
            if j == i || dropped[j] {
                continue;
            }
            if let Some(contact) = contact_point(&result[j].geometry, &short, touch_tolerance) {
                result[j].geometry = bend_towards(&result[j].geometry, contact, target);
            }
        }
    }

    Ok(result
        .into_iter()
        .zip(dropped)
        .filter_map(|(line, gone)| (!gone).then_some(line))
        .collect())
}

/// Moves the vertex of `line` nearest to `at` onto the point `to`.
///
/// An exact vertex hit (within machine epsilon) is preferred; otherwise
/// the closest vertex moves. Returns the bent polyline.
pub fn bend_towards<F: Float>(line: &Polyline<F>, at: Point2<F>, to: Point2<F>) -> Polyline<F> {
    let mut points = line.points.clone();
    if points.is_empty() {
        return line.clone();
    }

    let mut best = 0;
    let mut best_dist = points[0].distance_squared(at);
    for (k, p) in points.iter().enumerate().skip(1) {
        let d = p.distance_squared(at);
        if d < best_dist {
            best = k;
            best_dist = d;
        }
    }

    points[best] = to;
    Polyline::new(points)
}

/// Length-weighted centroid of a polyline (midpoints weighted by segment
/// length). Falls back to the first vertex for zero-length lines.
fn centroid<F: Float>(line: &Polyline<F>) -> Point2<F> {
    let mut total = F::zero();
    let mut sum_x = F::zero();
    let mut sum_y = F::zero();

    for seg in line.segments() {
        let len = seg.length();
        let mid = seg.start.midpoint(seg.end);
        sum_x = sum_x + mid.x * len;
        sum_y = sum_y + mid.y * len;
        total = total + len;
    }

    if total > F::zero() {
        Point2::new(sum_x / total, sum_y / total)
    } else {
        line.points.first().copied().unwrap_or_else(Point2::origin)
    }
}

/// Returns the vertex of `line` closest to `other`, provided it comes
/// within `tolerance` of it (i.e. the lines touch).
fn contact_point<F: Float>(
    line: &Polyline<F>,
    other: &Polyline<F>,
    tolerance: F,
) -> Option<Point2<F>> {
    let mut best: Option<(F, Point2<F>)> = None;

    for &p in &line.points {
        for seg in other.segments() {
            let d = seg.distance_squared_to_point(p);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, p));
            }
        }
    }

    best.and_then(|(d, p)| (d <= tolerance * tolerance).then_some(p))
}
