//! Finite-difference solver
//!
//! This module turns a problem description into matrices and advances a
//! solution with them.
//!
//! # Core Concepts
//!
//! ## The Pipeline
//!
//! ```text
//! ┌──────────────────────┐
//! │ Grid + v + D + BCs   │  (physics::FiniteDifferenceInput)
//! └──────────┬───────────┘
//!            │ build_space_discretizer
//! ┌──────────▼───────────┐
//! │ L  (N × N)           │  du/dt = L·u
//! └──────────┬───────────┘
//!            │ build_time_discretizer
//! ┌──────────▼───────────┐
//! │ A₀ … A_{k-1}         │  uₙ₊₁ = Σ Aᵢ·uₙ₋ᵢ
//! └──────────┬───────────┘
//!            │ iterate (bulk product, boundary injection, ping-pong)
//! ┌──────────▼───────────┐
//! │ solution (N × k)     │
//! └──────────────────────┘
//! ```
//!
//! Building `L` and the stages is done once per problem and may involve
//! matrix inversions; each step afterwards is `k` matrix-vector products plus
//! two boundary writes (1D).
//!
//! # Module Organization
//!
//! - **`traits`**: scheme selectors (`SolverType`, `SpaceDiscretizerType`)
//! - **`boundary`**: boundary conditions and their injection
//! - **`space`**: space discretizer builders (1D and 2D)
//! - **`time`** / **`methods`**: time discretizer and the schemes it uses
//! - **`iterate`**: the advancer
//! - **`scenario`**: ready-to-run pairing of an input with its discretizers
//! - **`backend`**: fallible dense linear-algebra primitives
//!
//! # Quick Start Example
//!
//! ```rust
//! use findiff_rs::physics::{FiniteDifferenceInput, Grid};
//! use findiff_rs::solver::{BoundaryCondition, BoundaryConditions, Scenario, SolverType};
//! use nalgebra::DVector;
//!
//! let grid = Grid::uniform(0.0, 1.0, 21).unwrap();
//! let boundaries = BoundaryConditions::one_d(
//!     BoundaryCondition::dirichlet(0.0),
//!     BoundaryCondition::dirichlet(0.0),
//! );
//! let input = FiniteDifferenceInput::constant_coefficients(
//!     0.001, grid, 0.0, 0.1, SolverType::CrankNicolson, boundaries,
//! );
//!
//! let scenario = Scenario::new(input).unwrap();
//! let profile = DVector::from_fn(21, |i, _| (std::f64::consts::PI * i as f64 / 20.0).sin());
//! let result = scenario.solve(&profile, 100).unwrap();
//!
//! assert!(result.max() < profile.max());
//! ```
//!
//! # Error Handling
//!
//! Every builder and the advancer return [`SolverResult`](crate::error::SolverResult).
//! Failures during a step are wrapped with the step number:
//!
//! ```rust,ignore
//! match scenario.advance(&mut solution, 1000) {
//!     Ok(()) => {}
//!     Err(e) => eprintln!("stopped at step {:?}: {}", e.failed_step(), e),
//! }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod iterate;
mod methods;
mod scenario;
mod space;
mod time;
mod traits;

pub mod backend;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a mutex on every matrix-vector product.
// Relaxed ordering is sufficient: the value is a performance hint, not a
// synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of rows above which the bulk matrix-vector product switches
/// to parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// [`backend::gemv`] computes rows sequentially when the output has at most
/// this many rows, and with Rayon above it, but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use findiff_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use findiff_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. Guards are serialized through a lock so
/// that concurrently running tests never observe each other's threshold.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SolverType, SpaceDiscretizerType};

pub use boundary::{
    apply_boundary_conditions, apply_boundary_conditions_2d, BoundaryCondition,
    BoundaryConditionType, BoundaryConditions, Dimensionality,
};

pub use space::{build_space_discretizer, build_space_discretizer_2d};

pub use methods::{build_runge_kutta, ButcherTableau};
pub use time::{build_time_discretizer, TimeDiscretizer};

pub use iterate::{iterate, IterationConfig, Mesh};

pub use scenario::{Scenario, Scenario2D};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{SolverError, SolverResult};
use crate::physics::Real;

/// Check a fresh solution column for NaN or Inf values
///
/// Non-finite values indicate numerical instability (explicit scheme with a
/// too large time step) or overflow.
///
/// ```rust,ignore
/// validate_column(&column, 42)?;  // Validates the state produced by step 42
/// ```
pub(crate) fn validate_column<T: Real>(column: &[T], step: usize) -> SolverResult<()> {
    if column.iter().any(|x| !x.is_finite()) {
        return Err(SolverError::NumericalInstability { step });
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
