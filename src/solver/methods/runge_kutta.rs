//! Runge-Kutta time discretizers
//!
//! # Mathematical Background
//!
//! For the linear system `du/dt = L·u`, one step of an `s`-stage Runge-Kutta
//! method is a linear map `u ↦ A·u`. Evaluating the method with the identity
//! as starting state yields `A` directly:
//!
//! ```text
//! kᵢ = L·(I + dt·Σⱼ aᵢⱼ·kⱼ)        i = 0..s
//! A  = I + dt·Σⱼ bⱼ·kⱼ
//! ```
//!
//! Each `kᵢ` is an `N × N` matrix. For a lower-triangular tableau the stages
//! are computed in order; a non-zero diagonal entry turns stage `i` into the
//! linear solve `(I − aᵢᵢ·dt·L)·kᵢ = L·(I + dt·Σ_{j<i} aᵢⱼ·kⱼ)`.
//!
//! Dense tableaus (fully implicit methods) are rejected by the evaluator;
//! Gauss-Legendre has its own closed form in
//! [`gauss_legendre`](super::gauss_legendre).

use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};
use crate::physics::Real;
use crate::solver::backend;

// =================================================================================================
// Butcher tableau
// =================================================================================================

/// Coefficients of a Runge-Kutta method
///
/// `a` is the `s × s` stage matrix and `b` the `s` weights. Nodes `c` are not
/// stored: the system is autonomous.
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl ButcherTableau {
    /// Create a tableau, checking shapes and finiteness
    ///
    /// # Errors
    ///
    /// `MalformedTableau` if `a` is empty or not square, if `b` does not have
    /// one weight per stage, or if any coefficient is not finite.
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> SolverResult<Self> {
        if a.is_empty() || !a.is_square() {
            return Err(SolverError::MalformedTableau(format!(
                "stage matrix must be square and non-empty, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        if b.len() != a.nrows() {
            return Err(SolverError::MalformedTableau(format!(
                "{} weights for {} stages",
                b.len(),
                a.nrows()
            )));
        }
        if a.iter().chain(b.iter()).any(|c| !c.is_finite()) {
            return Err(SolverError::MalformedTableau(
                "coefficients must be finite".to_string(),
            ));
        }
        Ok(Self { a, b })
    }

    /// Create a tableau from row slices of the stage matrix
    pub fn from_rows(rows: &[&[f64]], b: &[f64]) -> SolverResult<Self> {
        let s = rows.len();
        if rows.iter().any(|row| row.len() != s) {
            return Err(SolverError::MalformedTableau(
                "stage matrix rows must all have one entry per stage".to_string(),
            ));
        }
        let a = DMatrix::from_fn(s, s, |i, j| rows[i][j]);
        Self::new(a, DVector::from_column_slice(b))
    }

    // Shapes of the built-in tableaus are known to be valid.
    fn constant(s: usize, a: &[f64], b: &[f64]) -> Self {
        Self {
            a: DMatrix::from_row_slice(s, s, a),
            b: DVector::from_column_slice(b),
        }
    }

    /// Ralston's second-order method
    pub fn ralston() -> Self {
        Self::constant(2, &[0.0, 0.0, 2.0 / 3.0, 0.0], &[0.25, 0.75])
    }

    /// Kutta's third-order method
    pub fn rk3() -> Self {
        Self::constant(
            3,
            &[
                0.0, 0.0, 0.0, //
                0.5, 0.0, 0.0, //
                -1.0, 2.0, 0.0,
            ],
            &[1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
        )
    }

    /// Classic fourth-order method
    pub fn rk4() -> Self {
        Self::constant(
            4,
            &[
                0.0, 0.0, 0.0, 0.0, //
                0.5, 0.0, 0.0, 0.0, //
                0.0, 0.5, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
            &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
        )
    }

    /// Kutta's 3/8 rule
    pub fn three_eight() -> Self {
        Self::constant(
            4,
            &[
                0.0, 0.0, 0.0, 0.0, //
                1.0 / 3.0, 0.0, 0.0, 0.0, //
                -1.0 / 3.0, 1.0, 0.0, 0.0, //
                1.0, -1.0, 1.0, 0.0,
            ],
            &[0.125, 0.375, 0.375, 0.125],
        )
    }

    /// Two-stage Gauss-Legendre (order 4)
    ///
    /// Dense: usable by [`gauss_legendre_4`](super::gauss_legendre_4) but not
    /// by [`build_runge_kutta`].
    pub fn gauss_legendre_4() -> Self {
        let offset = 3.0_f64.sqrt() / 6.0;
        Self::constant(2, &[0.25, 0.25 - offset, 0.25 + offset, 0.25], &[0.5, 0.5])
    }

    /// Stage matrix
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Weights
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Number of stages
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// True when every stage depends only on itself and earlier stages
    pub fn is_lower_triangular(&self) -> bool {
        let s = self.stages();
        (0..s).all(|i| (i + 1..s).all(|j| self.a[(i, j)] == 0.0))
    }

    /// True when no stage requires a linear solve
    pub fn is_explicit(&self) -> bool {
        self.is_lower_triangular() && self.a.diagonal().iter().all(|&d| d == 0.0)
    }
}

// =================================================================================================
// Evaluator
// =================================================================================================

/// Build the time discretizer of a lower-triangular Runge-Kutta method
///
/// Works for explicit and diagonally implicit tableaus. `l` is left
/// untouched.
///
/// # Errors
///
/// - `MalformedTableau` if the tableau has a non-zero entry above the diagonal
/// - `Backend` if `l` is not square or a diagonal stage system is singular
///
/// # Example
///
/// ```rust
/// use findiff_rs::solver::{build_runge_kutta, ButcherTableau};
/// use nalgebra::DMatrix;
///
/// // Backward Euler written as a one-stage tableau
/// let tableau = ButcherTableau::from_rows(&[&[1.0]], &[1.0]).unwrap();
/// let l = DMatrix::from_element(1, 1, -2.0_f64);
/// let td = build_runge_kutta(&l, 0.5, &tableau).unwrap();
///
/// assert!((td[(0, 0)] - 0.5).abs() < 1e-12);
/// ```
pub fn build_runge_kutta<T: Real>(
    l: &DMatrix<T>,
    dt: T,
    tableau: &ButcherTableau,
) -> SolverResult<DMatrix<T>> {
    if !tableau.is_lower_triangular() {
        return Err(SolverError::MalformedTableau(
            "stage matrix has non-zero entries above the diagonal".to_string(),
        ));
    }

    let n = l.nrows();
    let identity = DMatrix::<T>::identity(n, n);
    let mut stages: Vec<DMatrix<T>> = Vec::with_capacity(tableau.stages());

    for i in 0..tableau.stages() {
        let mut rhs = identity.clone();
        for (j, k) in stages.iter().enumerate() {
            let a = tableau.a[(i, j)];
            if a != 0.0 {
                backend::add_scaled(&mut rhs, T::constant(a) * dt, k)?;
            }
        }

        let mut k = backend::multiply(l, &rhs)?;

        let diagonal = tableau.a[(i, i)];
        if diagonal != 0.0 {
            let system = backend::identity_plus(l, -T::constant(diagonal) * dt)?;
            backend::solve_in_place(&system, &mut k)?;
        }

        stages.push(k);
    }

    let mut result = identity;
    for (b, k) in tableau.b.iter().zip(&stages) {
        if *b != 0.0 {
            backend::add_scaled(&mut result, T::constant(*b) * dt, k)?;
        }
    }
    Ok(result)
}

// =================================================================================================
// Tests
// =================================================================================================
