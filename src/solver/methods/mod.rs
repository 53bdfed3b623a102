//! Time discretization methods
//!
//! Each function turns the space discretizer `L` into the stage matrices of
//! one scheme. They are the building blocks of
//! [`build_time_discretizer`](crate::solver::build_time_discretizer), which
//! picks one from a [`SolverType`](crate::solver::SolverType).
//!
//! # Available Methods
//!
//! | Method                        | Module              | Stages | Order |
//! |-------------------------------|---------------------|--------|-------|
//! | Explicit / implicit Euler     | [`euler`]           | 1      | 1     |
//! | Crank-Nicolson                | [`euler`]           | 1      | 2     |
//! | Ralston, RK3, RK4, 3/8 rule   | tableau evaluator   | 1      | 2-4   |
//! | Gauss-Legendre 4              | closed form         | 1      | 4     |
//! | Richardson extrapolation 2, 3 | implicit Euler base | 1      | 2, 3  |
//! | Adams-Bashforth 2, Moulton 2  | [`adams`]           | 2      | 2     |
//!
//! Every method reads `L` and allocates its result; nothing is mutated in
//! place.

pub mod adams;
pub mod euler;
mod gauss_legendre;
mod richardson;
mod runge_kutta;

pub use adams::{adams_bashforth_2, adams_moulton_2};
pub use euler::{crank_nicolson, explicit_euler, implicit_euler};
pub use gauss_legendre::gauss_legendre_4;
pub use richardson::{richardson_2, richardson_3};
pub use runge_kutta::{build_runge_kutta, ButcherTableau};
