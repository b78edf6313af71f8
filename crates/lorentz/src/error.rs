//! Error types for lorentz.

use alloc::string::String;

use thiserror::Error;

use crate::coords::{Dim, Group, System};
use crate::dispatch::Op;

/// Errors raised while building vectors or resolving operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// Two fields describe the same axis group.
    #[error("ambiguous coordinates: `{first}` and `{second}` both set the {group} component")]
    AmbiguousFields {
        group: Group,
        first: String,
        second: String,
    },
    /// A required axis group has no field.
    #[error("incomplete coordinates: no {group} component")]
    IncompleteFields { group: Group },
    /// Field name is not a recognized coordinate.
    #[error("unrecognized coordinate field `{0}`")]
    UnknownField(String),
    /// Value count does not match the coordinate system.
    #[error("{system} takes {expected} values, got {got}")]
    WrongArity {
        system: System,
        expected: usize,
        got: usize,
    },
    /// Operation parameters of the wrong count.
    #[error("{op} takes {expected} parameters, got {got}")]
    Parameters { op: Op, expected: usize, got: usize },
    /// Operand dimensionalities cannot be combined.
    #[error("{op}: cannot combine a {lhs} vector with a {rhs} vector")]
    DimensionMismatch { op: Op, lhs: Dim, rhs: Dim },
    /// Operation called with the wrong number of vector operands.
    #[error("{op} takes {expected} vector operand(s), got {got}")]
    OperandCount { op: Op, expected: usize, got: usize },
    /// Operation is geometrically undefined for the operand.
    #[error("{op} is undefined for a {dim} vector (requires {required} or more)")]
    Domain { op: Op, dim: Dim, required: Dim },
}

/// Coarse classification of [`VectorError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input values or field sets.
    Value,
    /// Operand signatures that do not resolve.
    DimensionMismatch,
    /// Geometrically undefined operation.
    Domain,
}

impl VectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AmbiguousFields { .. }
            | Self::IncompleteFields { .. }
            | Self::UnknownField(_)
            | Self::WrongArity { .. }
            | Self::Parameters { .. } => ErrorKind::Value,
            Self::DimensionMismatch { .. } | Self::OperandCount { .. } => {
                ErrorKind::DimensionMismatch
            }
            Self::Domain { .. } => ErrorKind::Domain,
        }
    }
}

pub type Result<T> = core::result::Result<T, VectorError>;
