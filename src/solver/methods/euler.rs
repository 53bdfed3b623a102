//! Single-step time discretizers: Euler and Crank-Nicolson
//!
//! # Mathematical Background
//!
//! For `du/dt = L·u`, the three classic one-step schemes are
//!
//! ```text
//! explicit Euler   uₙ₊₁ = (I + dt·L)·uₙ
//! implicit Euler   uₙ₊₁ = (I − dt·L)⁻¹·uₙ
//! Crank-Nicolson   uₙ₊₁ = (I − dt/2·L)⁻¹·(I + dt/2·L)·uₙ
//! ```
//!
//! # Characteristics
//!
//! | Scheme         | Order | Stability                       | Cost        |
//! |----------------|-------|---------------------------------|-------------|
//! | Explicit Euler | 1     | conditional (`dt ≲ h²/2D`)      | 1 add       |
//! | Implicit Euler | 1     | unconditional, damping          | 1 inversion |
//! | Crank-Nicolson | 2     | unconditional, weakly damping   | 1 inversion |
//!
//! The inversion is paid once when the discretizer is built, never per step.

use nalgebra::DMatrix;

use crate::error::SolverResult;
use crate::physics::Real;
use crate::solver::backend;

/// `I + dt·L`
pub fn explicit_euler<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    backend::identity_plus(l, dt)
}

/// `(I − dt·L)⁻¹`
///
/// # Errors
///
/// `Backend(SingularMatrix)` if `I − dt·L` cannot be inverted.
pub fn implicit_euler<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    backend::invert(&backend::identity_plus(l, -dt)?)
}

/// `(I − dt/2·L)⁻¹·(I + dt/2·L)`
///
/// Solved as a linear system with `I + dt/2·L` as right-hand side rather
/// than through an explicit inverse.
pub fn crank_nicolson<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    let half = dt / T::constant(2.0);
    let system = backend::identity_plus(l, -half)?;
    let mut result = backend::identity_plus(l, half)?;
    backend::solve_in_place(&system, &mut result)?;
    Ok(result)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn laplacian(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| match i.abs_diff(j) {
            0 => -2.0,
            1 => 1.0,
            _ => 0.0,
        })
    }

    #[test]
    fn test_explicit_euler() {
        let l = laplacian(4);
        let td = explicit_euler(&l, 0.1).unwrap();

        assert_relative_eq!(td[(0, 0)], 0.8);
        assert_relative_eq!(td[(0, 1)], 0.1);
        assert_relative_eq!(td[(0, 2)], 0.0);
    }

    #[test]
    fn test_explicit_euler_zero_operator_is_identity() {
        let l = DMatrix::<f64>::zeros(5, 5);
        assert_eq!(explicit_euler(&l, 0.7).unwrap(), DMatrix::identity(5, 5));
    }

    #[test]
    fn test_implicit_euler_inverts() {
        let l = laplacian(5);
        let dt = 0.25;
        let td = implicit_euler(&l, dt).unwrap();

        let system = DMatrix::identity(5, 5) - &l * dt;
        assert_relative_eq!(&system * &td, DMatrix::identity(5, 5), epsilon = 1e-12);
    }

    #[test]
    fn test_implicit_euler_singular() {
        // I − dt·L = 0 for L = I/dt
        let l = DMatrix::<f64>::identity(3, 3) * 2.0;
        assert!(implicit_euler(&l, 0.5).is_err());
    }

    #[test]
    fn test_crank_nicolson_cayley_transform() {
        let l = laplacian(5);
        let dt = 0.2;
        let td = crank_nicolson(&l, dt).unwrap();

        let lhs = DMatrix::identity(5, 5) - &l * (dt / 2.0);
        let rhs = DMatrix::identity(5, 5) + &l * (dt / 2.0);
        assert_relative_eq!(&lhs * &td, rhs, epsilon = 1e-12);
    }

    #[test]
    fn test_crank_nicolson_scalar() {
        let l = DMatrix::from_element(1, 1, -4.0);
        let td = crank_nicolson(&l, 0.1).unwrap();
        assert_relative_eq!(td[(0, 0)], 0.8 / 1.2, epsilon = 1e-14);
    }
}
