//! Error type used by the crate.

use thiserror::Error;

use crate::point::{Operation, Point2d};

/// Error enum.
#[derive(Debug, Error)]
pub enum MathObjectsError {
    /// Arithmetic on a [`Point2d`] was requested with an operand that is neither a point nor a
    /// numeric scalar.
    #[error("{operation} not implemented for type {type_name}")]
    UnsupportedOperandType {
        /// Operation that was requested.
        operation: Operation,
        /// Name of the offending operand type.
        type_name: &'static str,
    },
    /// A mesh parameter cannot be interpreted as a [`Point2d`].
    #[error("mesh parameter `{parameter}` must be a Point2d, got {type_name}")]
    InvalidParameterType {
        /// Name of the parameter.
        parameter: &'static str,
        /// Name of the type that was given.
        type_name: &'static str,
    },
    /// A required mesh parameter was not set.
    #[error("mesh parameter `{0}` is not set")]
    MissingParameter(&'static str),
    /// Mesh shape must consist of positive integers.
    #[error("mesh shape must be a pair of positive integers, got {0}")]
    InvalidShape(Point2d),
}

/// Result type with [`MathObjectsError`] as the default error.
pub type Result<T, E = MathObjectsError> = std::result::Result<T, E>;
