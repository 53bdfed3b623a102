//! Problem definition
//!
//! [`FiniteDifferenceInput`] and [`FiniteDifferenceInput2D`] gather every
//! parameter of an advection-diffusion problem: time step, mesh, coefficient
//! fields, time and space schemes and boundary conditions.
//!
//! ```text
//! ∂u/∂t = v·∂u/∂x + D·∂²u/∂x²
//! ```
//!
//! They are plain data: building discretizers from them is the job of
//! [`Scenario`](crate::solver::Scenario).

use nalgebra::DVector;

use crate::error::{SolverError, SolverResult};
use crate::physics::data::Real;
use crate::physics::grid::{validate_field, validate_time_step, Grid};
use crate::solver::{BoundaryConditions, Dimensionality, SolverType, SpaceDiscretizerType};

// =================================================================================================
// 1D input
// =================================================================================================

/// One-dimensional advection-diffusion problem
#[derive(Debug, Clone)]
pub struct FiniteDifferenceInput<T: Real> {
    /// Time discretization step
    pub dt: T,

    /// Space discretization mesh
    pub grid: Grid<T>,

    /// Advection coefficient, one value per grid point
    pub velocity: DVector<T>,

    /// Diffusion coefficient, one value per grid point
    pub diffusion: DVector<T>,

    /// Time discretizer
    pub solver_type: SolverType,

    /// Space discretizer
    pub space_discretizer_type: SpaceDiscretizerType,

    /// Left/right boundary conditions
    pub boundary_conditions: BoundaryConditions,
}

impl<T: Real> FiniteDifferenceInput<T> {
    pub fn new(
        dt: T,
        grid: Grid<T>,
        velocity: DVector<T>,
        diffusion: DVector<T>,
        solver_type: SolverType,
        space_discretizer_type: SpaceDiscretizerType,
        boundary_conditions: BoundaryConditions,
    ) -> Self {
        Self {
            dt,
            grid,
            velocity,
            diffusion,
            solver_type,
            space_discretizer_type,
            boundary_conditions,
        }
    }

    /// Problem with uniform velocity and diffusion, centered in space
    pub fn constant_coefficients(
        dt: T,
        grid: Grid<T>,
        velocity: T,
        diffusion: T,
        solver_type: SolverType,
        boundary_conditions: BoundaryConditions,
    ) -> Self {
        let n = grid.len();
        Self::new(
            dt,
            grid,
            DVector::from_element(n, velocity),
            DVector::from_element(n, diffusion),
            solver_type,
            SpaceDiscretizerType::Centered,
            boundary_conditions,
        )
    }

    /// Number of grid points
    pub fn points(&self) -> usize {
        self.grid.len()
    }

    /// Validate time step, coefficient fields and boundary conditions
    pub fn validate(&self) -> SolverResult<()> {
        validate_time_step(self.dt)?;
        validate_field("velocity", &self.velocity, self.grid.len())?;
        validate_field("diffusion", &self.diffusion, self.grid.len())?;

        if self.boundary_conditions.dimensionality() != Dimensionality::One {
            return Err(SolverError::invalid(
                "one-dimensional input requires left/right boundary conditions only",
            ));
        }
        self.boundary_conditions.validate()
    }
}

// =================================================================================================
// 2D input
// =================================================================================================

/// Two-dimensional advection-diffusion problem
///
/// Coefficient fields are flattened column-major: the value at `(i, j)` is
/// stored at `i + nx * j`, with `i` along x and `j` along y.
#[derive(Debug, Clone)]
pub struct FiniteDifferenceInput2D<T: Real> {
    /// Time discretization step
    pub dt: T,

    /// Space discretization mesh, x direction
    pub x_grid: Grid<T>,

    /// Space discretization mesh, y direction
    pub y_grid: Grid<T>,

    /// Advection coefficient, x direction
    pub x_velocity: DVector<T>,

    /// Advection coefficient, y direction
    pub y_velocity: DVector<T>,

    /// Diffusion coefficient
    pub diffusion: DVector<T>,

    /// Time discretizer
    pub solver_type: SolverType,

    /// Space discretizer
    pub space_discretizer_type: SpaceDiscretizerType,

    /// Left/right/down/up boundary conditions
    pub boundary_conditions: BoundaryConditions,
}

impl<T: Real> FiniteDifferenceInput2D<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dt: T,
        x_grid: Grid<T>,
        y_grid: Grid<T>,
        x_velocity: DVector<T>,
        y_velocity: DVector<T>,
        diffusion: DVector<T>,
        solver_type: SolverType,
        space_discretizer_type: SpaceDiscretizerType,
        boundary_conditions: BoundaryConditions,
    ) -> Self {
        Self {
            dt,
            x_grid,
            y_grid,
            x_velocity,
            y_velocity,
            diffusion,
            solver_type,
            space_discretizer_type,
            boundary_conditions,
        }
    }

    /// Total number of grid points (`nx * ny`)
    pub fn points(&self) -> usize {
        self.x_grid.len() * self.y_grid.len()
    }

    /// Validate time step, coefficient fields and boundary conditions
    pub fn validate(&self) -> SolverResult<()> {
        validate_time_step(self.dt)?;

        let n = self.points();
        validate_field("x velocity", &self.x_velocity, n)?;
        validate_field("y velocity", &self.y_velocity, n)?;
        validate_field("diffusion", &self.diffusion, n)?;

        if self.boundary_conditions.dimensionality() != Dimensionality::Two {
            return Err(SolverError::invalid(
                "two-dimensional input requires left/right/down/up boundary conditions",
            ));
        }
        self.boundary_conditions.validate()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
