//! Richardson extrapolation of implicit Euler
//!
//! With `B(h) = (I − h·L)⁻¹` one implicit Euler step of size `h`, running the
//! same interval with finer sub-steps and combining the results cancels the
//! leading error terms:
//!
//! ```text
//! order 2   TD = 2·B(dt/2)² − B(dt)
//! order 3   TD = (8·B(dt/4)⁴ − 6·B(dt/2)² + B(dt)) / 3
//! ```
//!
//! Every extrapolation is built once; a step costs a single product like any
//! other one-stage discretizer.

use nalgebra::DMatrix;

use crate::error::SolverResult;
use crate::physics::Real;
use crate::solver::backend;
use crate::solver::methods::implicit_euler;

fn substeps<T: Real>(l: &DMatrix<T>, dt: T, count: usize) -> SolverResult<DMatrix<T>> {
    let step = implicit_euler(l, dt / T::constant(count as f64))?;
    let mut result = step.clone();
    for _ in 1..count {
        result = backend::multiply(&result, &step)?;
    }
    Ok(result)
}

/// Second-order Richardson extrapolation
pub fn richardson_2<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    let mut result = substeps(l, dt, 2)? * T::constant(2.0);
    backend::add_scaled(&mut result, -T::one(), &substeps(l, dt, 1)?)?;
    Ok(result)
}

/// Third-order Richardson extrapolation
pub fn richardson_3<T: Real>(l: &DMatrix<T>, dt: T) -> SolverResult<DMatrix<T>> {
    let third = T::one() / T::constant(3.0);
    let mut result = substeps(l, dt, 4)? * (T::constant(8.0) * third);
    backend::add_scaled(&mut result, T::constant(-6.0) * third, &substeps(l, dt, 2)?)?;
    backend::add_scaled(&mut result, third, &substeps(l, dt, 1)?)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_extrapolation() {
        let (lambda, dt) = (-1.0, 0.2);
        let z: f64 = lambda * dt;
        let l = DMatrix::from_element(1, 1, lambda);
        let b = |h: f64| 1.0 / (1.0 - lambda * h);

        let re2 = richardson_2(&l, dt).unwrap();
        assert_relative_eq!(re2[(0, 0)], 2.0 * b(dt / 2.0).powi(2) - b(dt), epsilon = 1e-14);

        let re3 = richardson_3(&l, dt).unwrap();
        let expected = (8.0 * b(dt / 4.0).powi(4) - 6.0 * b(dt / 2.0).powi(2) + b(dt)) / 3.0;
        assert_relative_eq!(re3[(0, 0)], expected, epsilon = 1e-14);

        // Higher order means closer to exp(z)
        let exact = z.exp();
        assert!((re3[(0, 0)] - exact).abs() < (re2[(0, 0)] - exact).abs());
        assert!((re2[(0, 0)] - exact).abs() < (b(dt) - exact).abs());
    }
}
