//! Physical problem description
//!
//! This module holds WHAT is being solved:
//!
//! - [`Grid`]: the space discretization mesh
//! - [`FiniteDifferenceInput`] / [`FiniteDifferenceInput2D`]: mesh, coefficient
//!   fields, schemes and boundary conditions of a problem
//! - [`Real`]: the floating-point precision the problem is solved in
//!
//! HOW it is solved (discretizers, boundary injection, time stepping) lives
//! in [`crate::solver`].

pub mod data;
pub mod grid;
pub mod input;

pub use data::{Precision, Real};
pub use grid::Grid;
pub use input::{FiniteDifferenceInput, FiniteDifferenceInput2D};
