//! Two-step Adams methods
//!
//! Multi-step schemes combine the two most recent snapshots:
//!
//! ```text
//! uₙ₊₁ = A₀·uₙ + A₁·uₙ₋₁
//! ```
//!
//! - **Adams-Bashforth 2** (explicit): `A₀ = I + 3/2·dt·L`, `A₁ = −1/2·dt·L`
//! - **Adams-Moulton 2** (implicit, trapezoidal-like with a 3-point history):
//!   `M = (I − 5/12·dt·L)⁻¹`, `A₀ = M·(I + 2/3·dt·L)`, `A₁ = M·(−1/12·dt·L)`
//!
//! The advancer consumes the stages in this order: stage 0 applies to the
//! current snapshot, stage 1 to the previous one.

use nalgebra::DMatrix;

use crate::error::SolverResult;
use crate::physics::Real;
use crate::solver::backend;

/// Stages `[A₀, A₁]` of Adams-Bashforth 2
pub fn adams_bashforth_2<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<Vec<DMatrix<T>>> {
    let current = backend::identity_plus(l, T::constant(1.5) * dt)?;
    let previous = l * (T::constant(-0.5) * dt);
    Ok(vec![current, previous])
}

/// Stages `[A₀, A₁]` of Adams-Moulton 2
///
/// # Errors
///
/// `Backend(SingularMatrix)` if `I − 5/12·dt·L` is singular.
pub fn adams_moulton_2<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<Vec<DMatrix<T>>> {
    let system = backend::identity_plus(l, -T::constant(5.0 / 12.0) * dt)?;

    let mut current = backend::identity_plus(l, T::constant(2.0 / 3.0) * dt)?;
    backend::solve_in_place(&system, &mut current)?;

    let mut previous = l * (T::constant(-1.0 / 12.0) * dt);
    backend::solve_in_place(&system, &mut previous)?;

    Ok(vec![current, previous])
}
