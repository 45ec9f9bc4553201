//! Polyline type: an ordered sequence of vertices.

use super::{Point2, Segment2};
use num_traits::Float;

/// An ordered sequence of 2D points, interpreted as consecutive segments.
///
/// A polyline needs at least two points to form a segment; shorter ones
/// are considered degenerate and rejected by the operations that need
/// segments.
///
/// # Example
///
/// ```
/// use netgeom::primitives::{Point2, Polyline};
///
/// let line = Polyline::new(vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(3.0, 0.0),
///     Point2::new(3.0, 4.0),
/// ]);
/// assert_eq!(line.length(), 7.0);
/// assert_eq!(line.segments().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<F> {
    pub points: Vec<Point2<F>>,
}

impl<F: Float> Polyline<F> {
    /// Creates a polyline from a vertex list.
    #[inline]
    pub fn new(points: Vec<Point2<F>>) -> Self {
        Self { points }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polyline has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the polyline cannot form a segment (< 2 points).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Iterates over consecutive vertex pairs as segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        self.points
            .windows(2)
            .map(|w| Segment2::new(w[0], w[1]))
    }

    /// Total length: the sum of all segment lengths.
    pub fn length(&self) -> F {
        self.segments()
            .fold(F::zero(), |acc, seg| acc + seg.length())
    }

    /// The first and last vertex, if the polyline can form a segment.
    pub fn endpoints(&self) -> Option<(Point2<F>, Point2<F>)> {
        if self.is_degenerate() {
            return None;
        }
        Some((self.points[0], self.points[self.points.len() - 1]))
    }

    /// Returns `true` if every vertex coincides within `eps`.
    ///
    /// A polyline that collapses this way is matched as a single point.
    pub fn collapses_to_point(&self, eps: F) -> bool {
        match self.points.first() {
            None => true,
            Some(&first) => {
                let eps_sq = eps * eps;
                self.points
                    .iter()
                    .all(|p| p.distance_squared(first) <= eps_sq)
            }
        }
    }
}

impl<F: Float> From<Vec<(F, F)>> for Polyline<F> {
    fn from(coords: Vec<(F, F)>) -> Self {
        Self::new(coords.into_iter().map(Point2::from).collect())
    }
}
