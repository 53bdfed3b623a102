//! Dense linear-algebra primitives
//!
//! Thin fallible layer over `nalgebra`. Every primitive checks operand shapes
//! and reports singular systems as [`BackendError`], so that discretizer
//! builders and the advancer can propagate failures with `?`.
//!
//! The matrix-vector product used by the advancer is row-parallel (Rayon)
//! when the crate is compiled with the `parallel` feature and the system is
//! larger than [`parallel_threshold()`](crate::solver::parallel_threshold).

use nalgebra::{DMatrix, DVectorView, DVectorViewMut};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{BackendError, SolverResult};
use crate::physics::Real;

fn shape<T: Real>(matrix: &DMatrix<T>) -> String {
    format!("{}x{}", matrix.nrows(), matrix.ncols())
}

fn ensure_square<T: Real>(operation: &'static str, matrix: &DMatrix<T>) -> SolverResult<()> {
    if !matrix.is_square() {
        return Err(BackendError::dimension_mismatch(operation, "square matrix", shape(matrix)).into());
    }
    Ok(())
}

/// `I + alpha * matrix`
pub fn identity_plus<T: Real>(matrix: &DMatrix<T>, alpha: T) -> SolverResult<DMatrix<T>> {
    ensure_square("identity_plus", matrix)?;
    let mut result = matrix * alpha;
    for i in 0..result.nrows() {
        result[(i, i)] = result[(i, i)] + T::one();
    }
    Ok(result)
}

/// `target += alpha * other`
pub fn add_scaled<T: Real>(target: &mut DMatrix<T>, alpha: T, other: &DMatrix<T>) -> SolverResult<()> {
    if target.shape() != other.shape() {
        return Err(BackendError::dimension_mismatch("add_scaled", shape(target), shape(other)).into());
    }
    target.zip_apply(other, |t, o| *t = *t + alpha * o);
    Ok(())
}

/// `left * right`
pub fn multiply<T: Real>(left: &DMatrix<T>, right: &DMatrix<T>) -> SolverResult<DMatrix<T>> {
    if left.ncols() != right.nrows() {
        return Err(BackendError::dimension_mismatch(
            "multiply",
            format!("{} rows", left.ncols()),
            shape(right),
        )
        .into());
    }
    Ok(left * right)
}

/// Inverse through LU decomposition with partial pivoting
pub fn invert<T: Real>(matrix: &DMatrix<T>) -> SolverResult<DMatrix<T>> {
    ensure_square("invert", matrix)?;
    matrix.clone().lu().try_inverse().ok_or_else(|| {
        BackendError::SingularMatrix {
            operation: "invert",
            size: matrix.nrows(),
        }
        .into()
    })
}

/// Solve `system * X = rhs` for `X`, overwriting `rhs`
pub fn solve_in_place<T: Real>(system: &DMatrix<T>, rhs: &mut DMatrix<T>) -> SolverResult<()> {
    ensure_square("solve", system)?;
    if system.nrows() != rhs.nrows() {
        return Err(BackendError::dimension_mismatch("solve", shape(system), shape(rhs)).into());
    }

    if system.clone().lu().solve_mut(rhs) {
        Ok(())
    } else {
        Err(BackendError::SingularMatrix {
            operation: "solve",
            size: system.nrows(),
        }
        .into())
    }
}

/// `y = matrix * x` on raw column slices
pub fn gemv<T: Real>(matrix: &DMatrix<T>, x: &[T], y: &mut [T]) -> SolverResult<()> {
    if matrix.ncols() != x.len() || matrix.nrows() != y.len() {
        return Err(BackendError::dimension_mismatch(
            "gemv",
            shape(matrix),
            format!("x[{}] -> y[{}]", x.len(), y.len()),
        )
        .into());
    }

    #[cfg(feature = "parallel")]
    if y.len() > crate::solver::parallel_threshold() {
        y.par_iter_mut().enumerate().for_each(|(row, value)| {
            *value = x
                .iter()
                .enumerate()
                .fold(T::zero(), |acc, (col, &xc)| acc + matrix[(row, col)] * xc);
        });
        return Ok(());
    }

    let x = DVectorView::from_slice(x, x.len());
    let rows = y.len();
    let mut y = DVectorViewMut::from_slice(y, rows);
    y.gemv(T::one(), matrix, &x, T::zero());
    Ok(())
}

// ==================== Tests ====================
