//! Error types for lorentz-array.

use lorentz::{ErrorKind, VectorError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error(transparent)]
    Vector(#[from] VectorError),
    /// Columns (or the rows of two operands) differ in length.
    #[error("column length mismatch: expected {expected} rows, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

impl ArrayError {
    /// Same classification as the scalar backend; ragged columns are
    /// malformed values.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Vector(e) => e.kind(),
            Self::LengthMismatch { .. } => ErrorKind::Value,
        }
    }
}

pub type Result<T> = core::result::Result<T, ArrayError>;
