//! Simulation scenario
//!
//! A scenario pairs a problem definition with the discretizers built from it.
//! Both matrices are built once in [`Scenario::new`]; the scenario can then
//! advance any number of solutions.
//!
//! # Examples
//!
//! ```rust
//! use findiff_rs::physics::{FiniteDifferenceInput, Grid};
//! use findiff_rs::solver::{BoundaryConditions, Scenario, SolverType};
//! use nalgebra::DVector;
//!
//! let grid = Grid::uniform(0.0, 1.0, 33).unwrap();
//! let input = FiniteDifferenceInput::constant_coefficients(
//!     0.005, grid, 0.5, 0.01, SolverType::RungeKutta4, BoundaryConditions::periodic_1d(),
//! );
//! let scenario = Scenario::new(input).unwrap();
//!
//! let profile = DVector::from_fn(33, |i, _| (-((i as f64 - 16.0) / 4.0).powi(2)).exp());
//! let mut solution = scenario.initial_solution(&profile).unwrap();
//! scenario.advance(&mut solution, 50).unwrap();
//! scenario.advance(&mut solution, 50).unwrap();
//! ```

use std::fmt;

use log::debug;
use nalgebra::{DMatrix, DVector};
use ndarray::Array2;

use crate::error::SolverResult;
use crate::physics::grid::validate_field;
use crate::physics::{FiniteDifferenceInput, FiniteDifferenceInput2D, Real};
use crate::solver::{
    build_space_discretizer, build_space_discretizer_2d, build_time_discretizer, iterate,
    IterationConfig, TimeDiscretizer,
};

/// Replicate `profile` into one column per history snapshot
fn replicate<T: Real>(profile: &DVector<T>, columns: usize) -> DMatrix<T> {
    DMatrix::from_fn(profile.len(), columns, |i, _| profile[i])
}

// =================================================================================================
// 1D scenario
// =================================================================================================

/// One-dimensional simulation scenario
///
/// # Design
///
/// The same input can be re-run with different schemes by changing
/// `solver_type` and building a new scenario: the space discretizer is
/// cheap, the time discretizer holds the expensive inversions.
pub struct Scenario<T: Real> {
    input: FiniteDifferenceInput<T>,
    space_discretizer: DMatrix<T>,
    time_discretizer: TimeDiscretizer<T>,
}

impl<T: Real> Scenario<T> {
    /// Validate `input` and build its discretizers
    pub fn new(input: FiniteDifferenceInput<T>) -> SolverResult<Self> {
        input.validate()?;

        let space_discretizer = build_space_discretizer(
            &input.grid,
            &input.velocity,
            &input.diffusion,
            &input.boundary_conditions,
            input.space_discretizer_type,
            input.dt,
        )?;
        let time_discretizer =
            build_time_discretizer(&space_discretizer, input.dt, input.solver_type)?;

        debug!(
            "Scenario ready: {} / {} on {} points",
            input.solver_type,
            input.space_discretizer_type,
            input.points()
        );

        Ok(Self {
            input,
            space_discretizer,
            time_discretizer,
        })
    }

    pub fn input(&self) -> &FiniteDifferenceInput<T> {
        &self.input
    }

    /// The operator `L`
    pub fn space_discretizer(&self) -> &DMatrix<T> {
        &self.space_discretizer
    }

    pub fn time_discretizer(&self) -> &TimeDiscretizer<T> {
        &self.time_discretizer
    }

    /// Advancer configuration for this scenario's grid and boundaries
    pub fn config(&self) -> IterationConfig<'_, T> {
        IterationConfig::new_1d(&self.input.grid, &self.input.boundary_conditions)
    }

    /// Solution matrix starting from `profile`
    ///
    /// Every history column holds the profile. On a periodic domain the
    /// ghost points are synchronized first (`u[0] = u[N-2]`,
    /// `u[N-1] = u[1]`).
    pub fn initial_solution(&self, profile: &DVector<T>) -> SolverResult<DMatrix<T>> {
        let n = self.input.points();
        validate_field("initial profile", profile, n)?;

        let mut column = profile.clone();
        if self.input.boundary_conditions.is_periodic_x() {
            column[0] = column[n - 2];
            column[n - 1] = column[1];
        }
        Ok(replicate(&column, self.time_discretizer.n_stages()))
    }

    /// Advance `solution` by `n_steps` steps
    pub fn advance(&self, solution: &mut DMatrix<T>, n_steps: usize) -> SolverResult<()> {
        iterate(solution, &self.time_discretizer, &self.config(), n_steps)
    }

    /// Most recent state after `n_steps` steps from `profile`
    pub fn solve(&self, profile: &DVector<T>, n_steps: usize) -> SolverResult<DVector<T>> {
        let mut solution = self.initial_solution(profile)?;
        self.advance(&mut solution, n_steps)?;
        Ok(solution.column(0).into_owned())
    }
}

impl<T: Real> fmt::Debug for Scenario<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("solver", &self.input.solver_type)
            .field("space discretizer", &self.input.space_discretizer_type)
            .field("points", &self.input.points())
            .field("dt", &self.input.dt)
            .field("boundaries", &self.input.boundary_conditions)
            .field("precision", &T::PRECISION)
            .finish()
    }
}

// =================================================================================================
// 2D scenario
// =================================================================================================

/// Two-dimensional simulation scenario
///
/// Solution columns are flattened fields (`i + nx * j`);
/// [`to_field`](Scenario2D::to_field) reshapes one into an `nx × ny` array.
pub struct Scenario2D<T: Real> {
    input: FiniteDifferenceInput2D<T>,
    space_discretizer: DMatrix<T>,
    time_discretizer: TimeDiscretizer<T>,
}

impl<T: Real> Scenario2D<T> {
    /// Validate `input` and build its discretizers
    pub fn new(input: FiniteDifferenceInput2D<T>) -> SolverResult<Self> {
        input.validate()?;

        let space_discretizer = build_space_discretizer_2d(
            &input.x_grid,
            &input.y_grid,
            &input.x_velocity,
            &input.y_velocity,
            &input.diffusion,
            &input.boundary_conditions,
            input.space_discretizer_type,
            input.dt,
        )?;
        let time_discretizer =
            build_time_discretizer(&space_discretizer, input.dt, input.solver_type)?;

        debug!(
            "2D scenario ready: {} / {} on {}x{} points",
            input.solver_type,
            input.space_discretizer_type,
            input.x_grid.len(),
            input.y_grid.len()
        );

        Ok(Self {
            input,
            space_discretizer,
            time_discretizer,
        })
    }

    pub fn input(&self) -> &FiniteDifferenceInput2D<T> {
        &self.input
    }

    pub fn space_discretizer(&self) -> &DMatrix<T> {
        &self.space_discretizer
    }

    pub fn time_discretizer(&self) -> &TimeDiscretizer<T> {
        &self.time_discretizer
    }

    pub fn config(&self) -> IterationConfig<'_, T> {
        IterationConfig::new_2d(
            &self.input.x_grid,
            &self.input.y_grid,
            &self.input.boundary_conditions,
        )
    }

    /// Solution matrix starting from a flattened `profile`
    ///
    /// Periodic axes have their ghost lines synchronized, x first.
    pub fn initial_solution(&self, profile: &DVector<T>) -> SolverResult<DMatrix<T>> {
        let (nx, ny) = (self.input.x_grid.len(), self.input.y_grid.len());
        validate_field("initial profile", profile, nx * ny)?;

        let mut column = profile.clone();
        let boundaries = &self.input.boundary_conditions;
        if boundaries.is_periodic_x() {
            for j in 0..ny {
                let row = nx * j;
                column[row] = column[row + nx - 2];
                column[row + nx - 1] = column[row + 1];
            }
        }
        if boundaries.is_periodic_y() {
            for i in 0..nx {
                column[i] = column[i + nx * (ny - 2)];
                column[i + nx * (ny - 1)] = column[i + nx];
            }
        }
        Ok(replicate(&column, self.time_discretizer.n_stages()))
    }

    pub fn advance(&self, solution: &mut DMatrix<T>, n_steps: usize) -> SolverResult<()> {
        iterate(solution, &self.time_discretizer, &self.config(), n_steps)
    }

    pub fn solve(&self, profile: &DVector<T>, n_steps: usize) -> SolverResult<DVector<T>> {
        let mut solution = self.initial_solution(profile)?;
        self.advance(&mut solution, n_steps)?;
        Ok(solution.column(0).into_owned())
    }

    /// Reshape a flattened column into an `nx × ny` field indexed `[[i, j]]`
    pub fn to_field(&self, column: &DVector<T>) -> SolverResult<Array2<T>> {
        let (nx, ny) = (self.input.x_grid.len(), self.input.y_grid.len());
        validate_field("field", column, nx * ny)?;
        Ok(Array2::from_shape_fn((nx, ny), |(i, j)| column[i + nx * j]))
    }
}

impl<T: Real> fmt::Debug for Scenario2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario2D")
            .field("solver", &self.input.solver_type)
            .field("space discretizer", &self.input.space_discretizer_type)
            .field("nx", &self.input.x_grid.len())
            .field("ny", &self.input.y_grid.len())
            .field("dt", &self.input.dt)
            .field("boundaries", &self.input.boundary_conditions)
            .field("precision", &T::PRECISION)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
