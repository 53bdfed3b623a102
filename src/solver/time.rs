//! Time discretizer
//!
//! A [`TimeDiscretizer`] holds the `k` stage matrices `A₀ … A_{k-1}` of a
//! time scheme applied to a space discretizer `L`. One step of the advancer
//! is then purely linear:
//!
//! ```text
//! uₙ₊₁ = A₀·uₙ + A₁·uₙ₋₁ + … + A_{k-1}·uₙ₋ₖ₊₁
//! ```
//!
//! Single-step schemes have `k = 1`; `k` is always
//! [`SolverType::n_steps`].

use log::debug;
use nalgebra::DMatrix;

use crate::error::{BackendError, SolverResult};
use crate::physics::grid::validate_time_step;
use crate::physics::Real;
use crate::solver::methods::{self, ButcherTableau};
use crate::solver::SolverType;

/// Stage matrices of a time scheme
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDiscretizer<T: Real> {
    stages: Vec<DMatrix<T>>,
    solver_type: SolverType,
    dt: T,
}

impl<T: Real> TimeDiscretizer<T> {
    /// Stage `index`, applied to the snapshot `index` steps in the past
    pub fn stage(&self, index: usize) -> Option<&DMatrix<T>> {
        self.stages.get(index)
    }

    /// All stages, most recent snapshot first
    pub fn stages(&self) -> &[DMatrix<T>] {
        &self.stages
    }

    /// Number of stages (and of solution columns)
    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// Side of every stage matrix
    pub fn size(&self) -> usize {
        self.stages.first().map_or(0, |stage| stage.nrows())
    }

    pub fn solver_type(&self) -> SolverType {
        self.solver_type
    }

    pub fn dt(&self) -> T {
        self.dt
    }
}

/// Build the time discretizer of `solver_type` for the operator `l`
///
/// `l` is read only. Implicit schemes invert (or solve with) a matrix of the
/// size of `l` once, here; the advancer never does.
///
/// # Errors
///
/// - `InvalidConfiguration` if `dt` is not strictly positive and finite
/// - `Backend(DimensionMismatch)` if `l` is not square
/// - `Backend(SingularMatrix)` if an implicit system cannot be solved
///
/// # Example
///
/// ```rust
/// use findiff_rs::solver::{build_time_discretizer, SolverType};
/// use nalgebra::DMatrix;
///
/// let l = DMatrix::from_row_slice(2, 2, &[-1.0, 1.0, 1.0, -1.0]);
/// let td = build_time_discretizer(&l, 0.1, SolverType::AdamsBashforth2).unwrap();
///
/// assert_eq!(td.n_stages(), 2);
/// assert_eq!(td.size(), 2);
/// ```
pub fn build_time_discretizer<T: Real>(
    l: &DMatrix<T>,
    dt: T,
    solver_type: SolverType,
) -> SolverResult<TimeDiscretizer<T>> {
    validate_time_step(dt)?;
    if !l.is_square() {
        return Err(BackendError::dimension_mismatch(
            "build_time_discretizer",
            "square space discretizer",
            format!("{}x{}", l.nrows(), l.ncols()),
        )
        .into());
    }

    let stages = match solver_type {
        SolverType::ExplicitEuler => vec![methods::explicit_euler(l, dt)?],
        SolverType::ImplicitEuler => vec![methods::implicit_euler(l, dt)?],
        SolverType::CrankNicolson => vec![methods::crank_nicolson(l, dt)?],

        SolverType::RungeKuttaRalston => {
            vec![methods::build_runge_kutta(l, dt, &ButcherTableau::ralston())?]
        }
        SolverType::RungeKutta3 => {
            vec![methods::build_runge_kutta(l, dt, &ButcherTableau::rk3())?]
        }
        SolverType::RungeKutta4 => {
            vec![methods::build_runge_kutta(l, dt, &ButcherTableau::rk4())?]
        }
        SolverType::RungeKuttaThreeEight => {
            vec![methods::build_runge_kutta(l, dt, &ButcherTableau::three_eight())?]
        }
        SolverType::RungeKuttaGaussLegendre4 => vec![methods::gauss_legendre_4(l, dt)?],

        SolverType::RichardsonExtrapolation2 => vec![methods::richardson_2(l, dt)?],
        SolverType::RichardsonExtrapolation3 => vec![methods::richardson_3(l, dt)?],

        SolverType::AdamsBashforth2 => methods::adams_bashforth_2(l, dt)?,
        SolverType::AdamsMoulton2 => methods::adams_moulton_2(l, dt)?,
    };

    debug!(
        "{} time discretizer built: {} stage(s) of size {} ({})",
        solver_type,
        stages.len(),
        l.nrows(),
        T::PRECISION
    );

    Ok(TimeDiscretizer {
        stages,
        solver_type,
        dt,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
