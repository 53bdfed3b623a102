//! findiff-rs: Finite-Difference Advection-Diffusion Engine
//!
//! Solves
//!
//! ```text
//! ∂u/∂t = v·∂u/∂x + D·∂²u/∂x²
//! ```
//!
//! on uneven 1D meshes (and tensor-product 2D meshes) by the method of lines:
//! the space discretization is a dense matrix `L`, each time scheme is turned
//! into a handful of stage matrices once, and time stepping reduces to
//! matrix-vector products plus boundary injection.
//!
//! # Architecture
//!
//! 1. **Separation of Problem and Numerics**
//!    - [`physics`]: grid, coefficient fields, precision (what to solve)
//!    - [`solver`]: discretizers, boundary injection, advancer (how to solve)
//!
//! 2. **Build once, step cheaply**
//!    - implicit schemes pay their inversions at build time
//!    - a step never allocates beyond one work buffer per call
//!
//! # Quick Start
//!
//! ```rust
//! use findiff_rs::prelude::*;
//! use nalgebra::DVector;
//!
//! # fn main() -> SolverResult<()> {
//! // 1. Describe the problem
//! let grid = Grid::uniform(0.0, 1.0, 41)?;
//! let boundaries = BoundaryConditions::one_d(
//!     BoundaryCondition::dirichlet(0.0),
//!     BoundaryCondition::neumann(0.0),
//! );
//! let input = FiniteDifferenceInput::constant_coefficients(
//!     0.002, grid, -0.2, 0.01, SolverType::RungeKutta4, boundaries,
//! );
//!
//! // 2. Build the discretizers
//! let scenario = Scenario::new(input)?;
//!
//! // 3. Run
//! let profile = DVector::from_fn(41, |i, _| if (10..20).contains(&i) { 1.0 } else { 0.0 });
//! let result = scenario.solve(&profile, 200)?;
//!
//! assert_eq!(result[0], 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: problem description
//! - [`solver`]: numerical machinery
//! - [`error`]: error taxonomy

pub mod error;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use findiff_rs::prelude::*;
    //! ```
    pub use crate::error::{ErrorKind, SolverError, SolverResult};
    pub use crate::physics::{FiniteDifferenceInput, FiniteDifferenceInput2D, Grid, Real};
    pub use crate::solver::{
        BoundaryCondition, BoundaryConditionType, BoundaryConditions, IterationConfig, Scenario,
        Scenario2D, SolverType, SpaceDiscretizerType, TimeDiscretizer,
    };
}
