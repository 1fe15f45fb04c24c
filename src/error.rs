//! Error types for grid refinement.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type for grid refinement operations.
pub type RefineResult<T> = Result<T, RefineError>;

/// Errors that can occur while validating or refining a gridded field.
///
/// Every precondition is checked before any buffer is allocated or any
/// sample is written, so a caller receiving one of these has not been
/// handed a partial result.
#[derive(Error, Debug, PartialEq)]
pub enum RefineError {
    /// The shape describes a grid with no axes at all.
    #[error("grid has no axes")]
    NoAxes,

    /// An axis is too short to carry even one spline segment.
    #[error("axis {axis} has {len} grid points; refinement needs at least 2")]
    AxisTooShort { axis: usize, len: usize },

    /// The flattened sample count disagrees with the declared shape.
    #[error("shape describes {expected} grid points but {actual} samples were given")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// The grid spacing is zero, negative, or not finite.
    #[error("grid spacing must be finite and positive")]
    InvalidSpacing,

    /// The refined grid would not fit in the addressable index range.
    #[error("refined grid size overflows the addressable index range")]
    SizeOverflow,

    /// An index or count could not be represented in the sample type.
    #[error("value {0} is not representable in the sample float type")]
    Unrepresentable(usize),

    /// One of the two refinement buffers could not be allocated.
    #[error("failed to allocate a refinement buffer of {points} samples")]
    Allocation {
        points: usize,
        source: TryReserveError,
    },
}
