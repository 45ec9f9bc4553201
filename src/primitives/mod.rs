//! Floating-point geometric primitives and operations.

mod point2;
mod polyline;
mod predicates;
mod segment2;
mod vec2;

pub use point2::Point2;
pub use polyline::Polyline;
pub use predicates::segments_intersect;
pub use segment2::{Projection, Segment2};
pub use vec2::Vec2;
