//! Scheme selectors
//!
//! # Design Philosophy
//!
//! - `SolverType` selects the time discretizer and tells the advancer how
//!   many solution snapshots a step consumes
//! - `SpaceDiscretizerType` selects the stencil weighting of the space
//!   discretizer
//!
//! Both can be decoded from the integer codes used by the C interface of the
//! engine (`TryFrom<u32>`); code `0` is the null selector and is rejected.

use std::fmt;

use crate::error::SolverError;

// =================================================================================================
// Time discretizer type
// =================================================================================================

/// Time discretization scheme
///
/// # Families
///
/// - **Single-step**: `ExplicitEuler`, `ImplicitEuler`, `CrankNicolson`
/// - **Runge-Kutta**: `RungeKuttaRalston` (2nd order), `RungeKutta3`,
///   `RungeKutta4`, `RungeKuttaThreeEight` (4th order), and the implicit
///   `RungeKuttaGaussLegendre4`
/// - **Richardson extrapolation** of implicit Euler: 2nd and 3rd order
/// - **Multi-step**: `AdamsBashforth2`, `AdamsMoulton2` (need two snapshots)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverType {
    ExplicitEuler,
    ImplicitEuler,
    CrankNicolson,

    RungeKuttaRalston,
    RungeKutta3,
    RungeKutta4,
    RungeKuttaThreeEight,
    RungeKuttaGaussLegendre4,

    RichardsonExtrapolation2,
    RichardsonExtrapolation3,

    AdamsBashforth2,
    AdamsMoulton2,
}

impl SolverType {
    /// Every implemented scheme
    pub const ALL: [SolverType; 12] = [
        SolverType::ExplicitEuler,
        SolverType::ImplicitEuler,
        SolverType::CrankNicolson,
        SolverType::RungeKuttaRalston,
        SolverType::RungeKutta3,
        SolverType::RungeKutta4,
        SolverType::RungeKuttaThreeEight,
        SolverType::RungeKuttaGaussLegendre4,
        SolverType::RichardsonExtrapolation2,
        SolverType::RichardsonExtrapolation3,
        SolverType::AdamsBashforth2,
        SolverType::AdamsMoulton2,
    ];

    /// Number of solution snapshots a step consumes
    ///
    /// This is also the number of stage matrices of the time discretizer and
    /// the number of columns of the solution matrix.
    pub fn n_steps(&self) -> usize {
        match self {
            SolverType::AdamsBashforth2 | SolverType::AdamsMoulton2 => 2,
            _ => 1,
        }
    }

    /// True for schemes needing more than one snapshot
    pub fn is_multi_step(&self) -> bool {
        self.n_steps() > 1
    }

    /// True when building the discretizer requires a matrix inversion
    pub fn is_implicit(&self) -> bool {
        matches!(
            self,
            SolverType::ImplicitEuler
                | SolverType::CrankNicolson
                | SolverType::RungeKuttaGaussLegendre4
                | SolverType::RichardsonExtrapolation2
                | SolverType::RichardsonExtrapolation3
                | SolverType::AdamsMoulton2
        )
    }

    /// Nominal order of accuracy in time
    pub fn order(&self) -> usize {
        match self {
            SolverType::ExplicitEuler | SolverType::ImplicitEuler => 1,
            SolverType::CrankNicolson
            | SolverType::RungeKuttaRalston
            | SolverType::RichardsonExtrapolation2
            | SolverType::AdamsBashforth2
            | SolverType::AdamsMoulton2 => 2,
            SolverType::RungeKutta3 | SolverType::RichardsonExtrapolation3 => 3,
            SolverType::RungeKutta4
            | SolverType::RungeKuttaThreeEight
            | SolverType::RungeKuttaGaussLegendre4 => 4,
        }
    }

    /// Get name identifier
    pub fn name(&self) -> &'static str {
        match self {
            SolverType::ExplicitEuler => "Explicit Euler",
            SolverType::ImplicitEuler => "Implicit Euler",
            SolverType::CrankNicolson => "Crank-Nicolson",
            SolverType::RungeKuttaRalston => "Runge-Kutta Ralston",
            SolverType::RungeKutta3 => "Runge-Kutta 3",
            SolverType::RungeKutta4 => "Runge-Kutta 4",
            SolverType::RungeKuttaThreeEight => "Runge-Kutta 3/8",
            SolverType::RungeKuttaGaussLegendre4 => "Runge-Kutta Gauss-Legendre 4",
            SolverType::RichardsonExtrapolation2 => "Richardson Extrapolation 2",
            SolverType::RichardsonExtrapolation3 => "Richardson Extrapolation 3",
            SolverType::AdamsBashforth2 => "Adams-Bashforth 2",
            SolverType::AdamsMoulton2 => "Adams-Moulton 2",
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u32> for SolverType {
    type Error = SolverError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SolverType::ExplicitEuler),
            2 => Ok(SolverType::ImplicitEuler),
            3 => Ok(SolverType::CrankNicolson),
            4 => Ok(SolverType::RungeKuttaRalston),
            5 => Ok(SolverType::RungeKutta3),
            6 => Ok(SolverType::RungeKutta4),
            7 => Ok(SolverType::RungeKuttaThreeEight),
            8 => Ok(SolverType::RungeKuttaGaussLegendre4),
            9 => Ok(SolverType::RichardsonExtrapolation2),
            10 => Ok(SolverType::RichardsonExtrapolation3),
            11 => Ok(SolverType::AdamsBashforth2),
            12 => Ok(SolverType::AdamsMoulton2),
            0 => Err(SolverError::NotImplemented("Null solver type".to_string())),
            other => Err(SolverError::NotImplemented(format!(
                "solver type code {}",
                other
            ))),
        }
    }
}

// =================================================================================================
// Space discretizer type
// =================================================================================================

/// Stencil weighting of the space discretizer
///
/// Every variant couples a point only with its immediate neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpaceDiscretizerType {
    /// Second-order centered differences on an uneven mesh
    #[default]
    Centered,

    /// One-sided advection in the upwind direction, centered diffusion
    Upwind,

    /// Centered differences plus the Lax-Wendroff numerical diffusion `v²·dt/2`
    LaxWendroff,
}

impl SpaceDiscretizerType {
    /// Get name identifier
    pub fn name(&self) -> &'static str {
        match self {
            SpaceDiscretizerType::Centered => "Centered",
            SpaceDiscretizerType::Upwind => "Upwind",
            SpaceDiscretizerType::LaxWendroff => "Lax-Wendroff",
        }
    }
}

impl fmt::Display for SpaceDiscretizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u32> for SpaceDiscretizerType {
    type Error = SolverError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SpaceDiscretizerType::Centered),
            2 => Ok(SpaceDiscretizerType::Upwind),
            3 => Ok(SpaceDiscretizerType::LaxWendroff),
            0 => Err(SolverError::NotImplemented(
                "Null space discretizer type".to_string(),
            )),
            other => Err(SolverError::NotImplemented(format!(
                "space discretizer type code {}",
                other
            ))),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
