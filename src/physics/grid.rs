//! Space discretization mesh
//!
//! A [`Grid`] is an ordered sequence of at least three strictly increasing
//! coordinates. Spacing may vary from point to point.

use nalgebra::DVector;
use std::ops::Index;

use crate::error::{SolverError, SolverResult};
use crate::physics::data::Real;

/// Minimum number of points: two boundary points and one interior point.
pub const MIN_GRID_POINTS: usize = 3;

/// One-dimensional, possibly non-uniform mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Real> {
    points: DVector<T>,
}

impl<T: Real> Grid<T> {
    /// Create a grid from its coordinates
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when there are fewer than three points, a
    /// coordinate is not finite, or coordinates are not strictly increasing.
    pub fn new(points: DVector<T>) -> SolverResult<Self> {
        if points.len() < MIN_GRID_POINTS {
            return Err(SolverError::invalid(format!(
                "grid needs at least {} points, got {}",
                MIN_GRID_POINTS,
                points.len()
            )));
        }

        if let Some(index) = points.iter().position(|x| !x.is_finite()) {
            return Err(SolverError::invalid(format!(
                "grid coordinate {} is not finite",
                index
            )));
        }

        if let Some(index) = (1..points.len()).find(|&i| points[i] <= points[i - 1]) {
            return Err(SolverError::invalid(format!(
                "grid must be strictly increasing (point {} <= point {})",
                index,
                index - 1
            )));
        }

        Ok(Self { points })
    }

    /// Create a grid from a slice of coordinates
    pub fn from_slice(points: &[T]) -> SolverResult<Self> {
        Self::new(DVector::from_column_slice(points))
    }

    /// Uniform grid of `n` points on `[start, end]`
    pub fn uniform(start: T, end: T, n: usize) -> SolverResult<Self> {
        if n < MIN_GRID_POINTS {
            return Err(SolverError::invalid(format!(
                "grid needs at least {} points, got {}",
                MIN_GRID_POINTS, n
            )));
        }

        let step = (end - start) / T::constant((n - 1) as f64);
        Self::new(DVector::from_fn(n, |i, _| start + step * T::constant(i as f64)))
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid grid has at least three points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates
    pub fn points(&self) -> &DVector<T> {
        &self.points
    }

    /// Distance between point `i` and point `i + 1`
    pub fn spacing(&self, i: usize) -> T {
        self.points[i + 1] - self.points[i]
    }

    /// Distance between the two leftmost points
    pub fn first_spacing(&self) -> T {
        self.spacing(0)
    }

    /// Distance between the two rightmost points
    pub fn last_spacing(&self) -> T {
        self.spacing(self.len() - 2)
    }
}

impl<T: Real> Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

/// Check that a coefficient field has one finite value per grid point
pub(crate) fn validate_field<T: Real>(
    name: &str,
    field: &DVector<T>,
    expected: usize,
) -> SolverResult<()> {
    if field.len() != expected {
        return Err(SolverError::invalid(format!(
            "{} has {} values, expected {}",
            name,
            field.len(),
            expected
        )));
    }

    if let Some(index) = field.iter().position(|x| !x.is_finite()) {
        return Err(SolverError::invalid(format!(
            "{} is not finite at point {}",
            name, index
        )));
    }

    Ok(())
}

/// Check that a time step is positive and finite
pub(crate) fn validate_time_step<T: Real>(dt: T) -> SolverResult<()> {
    if !dt.is_finite() || dt <= T::zero() {
        return Err(SolverError::invalid(format!(
            "time step must be positive and finite, got {}",
            dt
        )));
    }
    Ok(())
}

// ==================== Tests ====================
