/// Errors raised by the vector/matrix algebra and the pipeline stages
use thiserror::Error;

/// Precondition failures of the algebra core.
///
/// Every variant describes a caller error; nothing here is retried or
/// recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Operand lengths or shapes are incompatible for `op`.
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },
    /// Data cannot form a rectangular matrix or a non-empty vector.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    /// Index outside `[0, len)`. Matrix accesses report the flattened index.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Malformed textual vector.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(op: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            op,
            expected,
            found,
        }
    }
}
