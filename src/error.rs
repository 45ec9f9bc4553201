//! Error types for network-geometry operations.

use thiserror::Error;

/// Errors that can occur while matching or cleaning line networks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    /// An operation received an empty collection where at least one
    /// element was required.
    #[error("empty input: at least one {what} is required")]
    EmptyInput {
        /// What was missing ("point", "line", ...).
        what: &'static str,
    },

    /// A line has too few points to form a single segment.
    ///
    /// Reported per line so the caller can trace the failure back to the
    /// source row; batch operations collect these instead of aborting.
    #[error("line {id} has {points} point(s); at least 2 are required")]
    DegenerateLine {
        /// The caller-supplied reference id of the offending line.
        id: u64,
        /// How many points the line actually had.
        points: usize,
    },

    /// A length or tolerance threshold was zero, negative, or not finite.
    #[error("threshold must be positive and finite, got {value}")]
    InvalidThreshold {
        /// The rejected threshold value.
        value: f64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetError>;
