//! Two-stage Gauss-Legendre (implicit, order 4)
//!
//! The tableau is dense, so the two stage equations
//!
//! ```text
//! k₁ = L·(I + dt·(a₀₀·k₁ + a₀₁·k₂))
//! k₂ = L·(I + dt·(a₁₀·k₁ + a₁₁·k₂))
//! ```
//!
//! are coupled. Since `a₀₀ = a₁₁`, both share the factor `A = I − a₀₀·dt·L`
//! and block elimination gives
//!
//! ```text
//! C  = A⁻¹·L
//! B  = a₁₀·dt·C
//! k₁ = (I − a₀₁·dt·C·B)⁻¹·(C + a₀₁·dt·C·C)
//! k₂ = C + B·k₁
//! TD = I + dt/2·(k₁ + k₂)
//! ```
//!
//! For `L = λ` this is the (2,2) Padé approximant of `exp(λ·dt)`.

use nalgebra::DMatrix;

use crate::error::SolverResult;
use crate::physics::Real;
use crate::solver::backend;
use crate::solver::methods::ButcherTableau;

/// Closed-form Gauss-Legendre 4 time discretizer
///
/// # Errors
///
/// `Backend(SingularMatrix)` if `A` or the stage-1 system is singular.
pub fn gauss_legendre_4<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    let tableau = ButcherTableau::gauss_legendre_4();
    let a00 = T::constant(tableau.a()[(0, 0)]);
    let a01 = T::constant(tableau.a()[(0, 1)]);
    let a10 = T::constant(tableau.a()[(1, 0)]);

    let n = l.nrows();
    let identity = DMatrix::<T>::identity(n, n);

    let mut c = l.clone();
    backend::solve_in_place(&backend::identity_plus(l, -a00 * dt)?, &mut c)?;
    let b = &c * (a10 * dt);

    let cb = backend::multiply(&c, &b)?;
    let system = backend::identity_plus(&cb, -a01 * dt)?;

    let mut k1 = c.clone();
    backend::add_scaled(&mut k1, a01 * dt, &backend::multiply(&c, &c)?)?;
    backend::solve_in_place(&system, &mut k1)?;

    let mut k2 = c;
    backend::add_scaled(&mut k2, T::one(), &backend::multiply(&b, &k1)?)?;

    let half = dt / T::constant(2.0);
    let mut result = identity;
    backend::add_scaled(&mut result, half, &k1)?;
    backend::add_scaled(&mut result, half, &k2)?;
    Ok(result)
}
