//! Error types for discretizer construction and iteration
//!
//! Every public entry point returns [`SolverResult`]. Errors are grouped in
//! three families, exposed through [`SolverError::kind`]:
//!
//! - **Unsupported configuration**: unknown scheme, malformed Butcher
//!   tableau, inconsistent input lengths, non-positive time step
//! - **Backend failure**: the linear-algebra layer could not complete an
//!   operation (singular matrix, shape mismatch) or a step produced
//!   non-finite values
//! - **Invariant violation**: asymmetric periodic boundary conditions
//!
//! Nothing is retried: a failed inversion or a failed step is reported as-is.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SolverResult<T> = Result<T, SolverError>;

/// Failure family of a [`SolverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown scheme, malformed tableau or invalid input data
    UnsupportedConfiguration,

    /// The linear-algebra backend reported an error
    BackendFailure,

    /// Boundary conditions violate a structural invariant
    InvariantViolation,
}

/// Errors raised by the linear-algebra layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Matrix could not be inverted or factorized.
    #[error("singular matrix in {operation} ({size}x{size})")]
    SingularMatrix { operation: &'static str, size: usize },

    /// Operand shapes are incompatible.
    #[error("dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: &'static str,
        expected: String,
        actual: String,
    },
}

impl BackendError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(
        operation: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::DimensionMismatch {
            operation,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Crate-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The requested scheme has no implementation.
    #[error("{0} is not implemented")]
    NotImplemented(String),

    /// Butcher tableau is not usable by the lower-triangular evaluator.
    #[error("malformed Butcher tableau: {0}")]
    MalformedTableau(String),

    /// Input data is inconsistent (lengths, grid ordering, time step).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Linear-algebra primitive failure.
    #[error("linear-algebra backend failure: {0}")]
    Backend(#[from] BackendError),

    /// A step produced NaN or infinite values.
    #[error(
        "non-finite value detected at step {step}. This indicates numerical instability, \
         try reducing the time step or switching to an implicit scheme"
    )]
    NumericalInstability { step: usize },

    /// Boundary configuration breaks a structural invariant.
    #[error("boundary invariant violated: {0}")]
    InvariantViolation(String),

    /// Iteration aborted at `step` (1-based).
    #[error("iteration aborted at step {step}: {source}")]
    StepFailed {
        step: usize,
        #[source]
        source: Box<SolverError>,
    },
}

impl SolverError {
    /// Shorthand for [`SolverError::InvalidConfiguration`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Failure family of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolverError::NotImplemented(_)
            | SolverError::MalformedTableau(_)
            | SolverError::InvalidConfiguration(_) => ErrorKind::UnsupportedConfiguration,
            SolverError::Backend(_) | SolverError::NumericalInstability { .. } => {
                ErrorKind::BackendFailure
            }
            SolverError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            SolverError::StepFailed { source, .. } => source.kind(),
        }
    }

    /// Step at which iteration stopped, if this error comes from the advancer.
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            SolverError::StepFailed { step, .. } | SolverError::NumericalInstability { step } => {
                Some(*step)
            }
            _ => None,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
