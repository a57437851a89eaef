//! Error types for companion-matrix operations.
//!
//! The public sentinel functions (`frob_a`, `is_nonsingular`, `roots_20`)
//! collapse every variant to `None`. The `Result` forms keep the reason.

use thiserror::Error;

/// Errors that can occur while validating input or running a dense
/// factorization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompanionError {
    /// Input array has the wrong number of axes.
    #[error("Wrong dimensionality: expected {expected}-D input, got {found}-D")]
    WrongDimensionality {
        /// Number of axes the operation requires
        expected: usize,
        /// Number of axes the input has
        found: usize,
    },

    /// Coefficient vector describes no polynomial of degree >= 1.
    #[error("At least 2 coefficients are required, got {0}")]
    TooFewCoefficients(usize),

    /// NaN or infinite entry at the given flat (row-major) index.
    #[error("Non-finite entry at index {index}")]
    NonFiniteEntry {
        /// Flat index of the first offending entry
        index: usize,
    },

    /// Leading coefficient is zero, so the degree is ill-defined.
    #[error("Leading coefficient is zero")]
    ZeroLeadingCoefficient,

    /// Dividing by the leading coefficient overflowed.
    #[error("Normalized coefficient at index {index} is not finite")]
    NormalizationOverflow {
        /// Index of a coefficient whose ratio to the leading one overflowed
        index: usize,
    },

    /// Matrix is not square.
    #[error("Matrix must be square, got {rows}×{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Matrix has no entries.
    #[error("Matrix is empty")]
    EmptyMatrix,

    /// LAPACK eigenvalue routine did not converge.
    #[error("Eigenvalue computation failed: {0}")]
    EigenFailed(String),

    /// LAPACK singular value routine did not converge.
    #[error("Singular value decomposition failed: {0}")]
    SvdFailed(String),

    /// Caller supplied an unusable configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompanionError {
    /// True for failures that come from the numerical backend rather than
    /// from the shape or contents of the input.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            CompanionError::EigenFailed(_) | CompanionError::SvdFailed(_)
        )
    }
}

/// Result type for companion-matrix operations.
pub type CompanionResult<T> = Result<T, CompanionError>;

/// Collapse a result to the `None` sentinel, logging why.
///
/// Input problems are routine and logged at `debug`; backend failures are
/// logged at `warn`.
pub(crate) fn into_sentinel<T>(op: &'static str, result: CompanionResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_numerical() => {
            tracing::warn!(op, error = %err, "numerical backend failure");
            None
        }
        Err(err) => {
            tracing::debug!(op, error = %err, "rejected invalid input");
            None
        }
    }
}
