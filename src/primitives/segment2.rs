//! 2D line segment type and point projection.

use super::{Point2, Vec2};
use num_traits::Float;

/// Result of projecting a point onto a segment.
///
/// The foot point always lies on the segment: when the perpendicular foot
/// falls outside the segment's span, the parameter is clamped to the
/// nearer endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection<F> {
    /// The closest point on the segment.
    pub foot: Point2<F>,
    /// Parameter along the segment, clamped to [0, 1].
    pub t: F,
    /// Euclidean distance from the query point to `foot`. Never negative.
    pub distance: F,
}

/// A 2D line segment defined by two endpoints.
///
/// Generic over floating-point types (`f32` or `f64`). A segment may be
/// degenerate (start equals end); all operations handle that case without
/// dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Creates a segment from coordinate pairs.
    #[inline]
    pub fn from_coords(x1: F, y1: F, x2: F, y2: F) -> Self {
        Self {
            start: Point2::new(x1, y1),
            end: Point2::new(x2, y2),
        }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Returns the squared length of the segment.
    #[inline]
    pub fn length_squared(self) -> F {
        self.start.distance_squared(self.end)
    }

    /// Returns the length of the segment. Zero for degenerate segments.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns the point at parameter `t` along the segment.
    ///
    /// - `t = 0` returns `start`
    /// - `t = 1` returns `end`
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Returns `true` if the segment is degenerate (start equals end
    /// within `eps`).
    #[inline]
    pub fn is_degenerate(self, eps: F) -> bool {
        self.length_squared() <= eps * eps
    }

    /// Projects a point onto the segment.
    ///
    /// Computes the scalar projection of `p` onto the infinite line
    /// through the segment and clamps it to [0, 1]. A degenerate segment
    /// falls back to the distance to `start` with `t = 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use netgeom::primitives::{Point2, Segment2};
    ///
    /// let seg = Segment2::from_coords(0.0_f64, 0.0, 10.0, 0.0);
    /// let proj = seg.project(Point2::new(3.0, 4.0));
    /// assert_eq!(proj.foot, Point2::new(3.0, 0.0));
    /// assert_eq!(proj.t, 0.3);
    /// assert_eq!(proj.distance, 4.0);
    ///
    /// // Foot beyond the end is clamped to the endpoint
    /// let past = seg.project(Point2::new(12.0, 0.0));
    /// assert_eq!(past.foot, Point2::new(10.0, 0.0));
    /// assert_eq!(past.t, 1.0);
    /// ```
    pub fn project(self, p: Point2<F>) -> Projection<F> {
        let v = self.direction();
        let len_sq = v.magnitude_squared();

        // Degenerate segment (start == end): distance to the single point.
        if len_sq <= F::epsilon() {
            return Projection {
                foot: self.start,
                t: F::zero(),
                distance: p.distance(self.start),
            };
        }

        let t = (p - self.start).dot(v) / len_sq;
        let t = t.max(F::zero()).min(F::one());
        let foot = self.point_at(t);

        Projection {
            foot,
            t,
            distance: p.distance(foot),
        }
    }

    /// Computes the closest point on the segment to `p` and its parameter.
    #[inline]
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let proj = self.project(p);
        (proj.foot, proj.t)
    }

    /// Computes the squared distance from a point to this segment.
    #[inline]
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance_squared(closest)
    }

    /// Computes the distance from a point to this segment.
    #[inline]
    pub fn distance_to_point(self, p: Point2<F>) -> F {
        self.project(p).distance
    }

    /// Computes the minimum distance between two segments.
    ///
    /// Zero when the segments intersect (tested with tolerance `eps`);
    /// otherwise the minimum over the four endpoint-to-segment
    /// projections. Degenerate segments behave as points.
    pub fn distance_to_segment(self, other: Self, eps: F) -> F {
        if super::segments_intersect(self, other, eps) {
            return F::zero();
        }

        let d1 = self.distance_to_point(other.start);
        let d2 = self.distance_to_point(other.end);
        let d3 = other.distance_to_point(self.start);
        let d4 = other.distance_to_point(self.end);

        d1.min(d2).min(d3.min(d4))
    }
}

impl<F: Float> From<(Point2<F>, Point2<F>)> for Segment2<F> {
    fn from((start, end): (Point2<F>, Point2<F>)) -> Self {
        Self::new(start, end)
    }
}
