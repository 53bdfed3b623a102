//! Boundary conditions and their injection
//!
//! # Design Philosophy
//!
//! Boundary conditions are a fixed set of edges selected by the problem
//! dimensionality rather than a class hierarchy:
//!
//! - 1D: `left`, `right`
//! - 2D: `left`, `right` (x edges) plus `down`, `up` (y edges)
//!
//! The space discretizer leaves boundary rows to this module: after every
//! bulk update, [`apply_boundary_conditions`] overwrites the two end points
//! of the fresh solution column. Periodic axes are the exception, their
//! coupling is folded into the operator and injection is a no-op.

use std::fmt;

use log::trace;

use crate::error::{BackendError, SolverError, SolverResult};
use crate::physics::{Grid, Real};

// =================================================================================================
// Boundary condition
// =================================================================================================

/// Kind of condition imposed on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryConditionType {
    /// Fixed value
    Dirichlet,

    /// Fixed derivative towards the interior
    #[default]
    Neumann,

    /// Wrap-around to the opposite edge
    Periodic,
}

impl TryFrom<u32> for BoundaryConditionType {
    type Error = SolverError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(BoundaryConditionType::Dirichlet),
            2 => Ok(BoundaryConditionType::Neumann),
            3 => Ok(BoundaryConditionType::Periodic),
            other => Err(SolverError::NotImplemented(format!(
                "boundary condition type code {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BoundaryConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryConditionType::Dirichlet => write!(f, "Dirichlet"),
            BoundaryConditionType::Neumann => write!(f, "Neumann"),
            BoundaryConditionType::Periodic => write!(f, "Periodic"),
        }
    }
}

/// Condition on one edge: a type and its value
///
/// The value is ignored for periodic edges. Defaults to a zero-flux Neumann
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryCondition {
    pub kind: BoundaryConditionType,
    pub value: f64,
}

impl BoundaryCondition {
    pub fn new(kind: BoundaryConditionType, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn dirichlet(value: f64) -> Self {
        Self::new(BoundaryConditionType::Dirichlet, value)
    }

    pub fn neumann(flux: f64) -> Self {
        Self::new(BoundaryConditionType::Neumann, flux)
    }

    pub fn periodic() -> Self {
        Self::new(BoundaryConditionType::Periodic, 0.0)
    }

    pub fn is_periodic(&self) -> bool {
        self.kind == BoundaryConditionType::Periodic
    }

    /// Value of the edge point given its nearest interior neighbour
    ///
    /// `spacing` is the distance between the edge and the neighbour. Periodic
    /// edges yield `None`.
    fn edge_value<T: Real>(&self, neighbour: T, spacing: T) -> Option<T> {
        match self.kind {
            BoundaryConditionType::Dirichlet => Some(T::constant(self.value)),
            BoundaryConditionType::Neumann => {
                Some(neighbour - T::constant(self.value) * spacing)
            }
            BoundaryConditionType::Periodic => None,
        }
    }
}

// =================================================================================================
// Boundary conditions
// =================================================================================================

/// Number of spatial dimensions a set of boundary conditions covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    One,
    Two,
}

/// Boundary conditions of every active edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryConditions {
    /// Line: x edges only
    OneD {
        left: BoundaryCondition,
        right: BoundaryCondition,
    },

    /// Plane: x edges then y edges
    TwoD {
        left: BoundaryCondition,
        right: BoundaryCondition,
        down: BoundaryCondition,
        up: BoundaryCondition,
    },
}

impl BoundaryConditions {
    /// Default (zero-flux Neumann) conditions on every edge of the given dimensionality
    pub fn new(dimensionality: Dimensionality) -> Self {
        let edge = BoundaryCondition::default();
        match dimensionality {
            Dimensionality::One => Self::one_d(edge, edge),
            Dimensionality::Two => Self::two_d(edge, edge, edge, edge),
        }
    }

    pub fn one_d(left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self::OneD { left, right }
    }

    pub fn two_d(
        left: BoundaryCondition,
        right: BoundaryCondition,
        down: BoundaryCondition,
        up: BoundaryCondition,
    ) -> Self {
        Self::TwoD {
            left,
            right,
            down,
            up,
        }
    }

    /// Both x edges periodic
    pub fn periodic_1d() -> Self {
        Self::one_d(BoundaryCondition::periodic(), BoundaryCondition::periodic())
    }

    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Self::OneD { .. } => Dimensionality::One,
            Self::TwoD { .. } => Dimensionality::Two,
        }
    }

    pub fn left(&self) -> &BoundaryCondition {
        match self {
            Self::OneD { left, .. } | Self::TwoD { left, .. } => left,
        }
    }

    pub fn right(&self) -> &BoundaryCondition {
        match self {
            Self::OneD { right, .. } | Self::TwoD { right, .. } => right,
        }
    }

    /// Lower y edge, 2D only
    pub fn down(&self) -> Option<&BoundaryCondition> {
        match self {
            Self::OneD { .. } => None,
            Self::TwoD { down, .. } => Some(down),
        }
    }

    /// Upper y edge, 2D only
    pub fn up(&self) -> Option<&BoundaryCondition> {
        match self {
            Self::OneD { .. } => None,
            Self::TwoD { up, .. } => Some(up),
        }
    }

    /// Both x edges periodic (validated configurations only)
    pub fn is_periodic_x(&self) -> bool {
        self.left().is_periodic() && self.right().is_periodic()
    }

    /// Both y edges periodic (validated configurations only)
    pub fn is_periodic_y(&self) -> bool {
        matches!((self.down(), self.up()), (Some(d), Some(u)) if d.is_periodic() && u.is_periodic())
    }

    /// Check that periodicity is symmetric on every axis
    pub fn validate(&self) -> SolverResult<()> {
        check_axis("left", self.left(), "right", self.right())?;
        if let (Some(down), Some(up)) = (self.down(), self.up()) {
            check_axis("down", down, "up", up)?;
        }

        let finite = [Some(self.left()), Some(self.right()), self.down(), self.up()]
            .into_iter()
            .flatten()
            .all(|edge| edge.value.is_finite());
        if !finite {
            return Err(SolverError::invalid("boundary values must be finite"));
        }

        Ok(())
    }
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self::new(Dimensionality::One)
    }
}

fn check_axis(
    lower_name: &str,
    lower: &BoundaryCondition,
    upper_name: &str,
    upper: &BoundaryCondition,
) -> SolverResult<()> {
    if lower.is_periodic() != upper.is_periodic() {
        return Err(SolverError::InvariantViolation(format!(
            "{} edge is {} but {} edge is {}: periodicity must be set on both sides",
            lower_name, lower.kind, upper_name, upper.kind
        )));
    }
    Ok(())
}

// =================================================================================================
// Injection
// =================================================================================================

/// Overwrite the end points of a fresh 1D solution column
///
/// Dirichlet pins the edge to its value; Neumann sets it so that the
/// one-sided difference from the edge to its interior neighbour equals the
/// flux, with the same rule on both edges:
///
/// ```text
/// u[0]   = u[1]   - left  * (x[1]   - x[0])
/// u[N-1] = u[N-2] - right * (x[N-1] - x[N-2])
/// ```
///
/// With both edges periodic nothing is written.
///
/// # Errors
///
/// - `InvariantViolation` when only one edge is periodic (nothing is written)
/// - `Backend` when the column length differs from the grid length
pub fn apply_boundary_conditions<T: Real>(
    column: &mut [T],
    boundaries: &BoundaryConditions,
    grid: &Grid<T>,
) -> SolverResult<()> {
    boundaries.validate()?;

    let n = grid.len();
    if column.len() != n {
        return Err(BackendError::dimension_mismatch(
            "boundary injection",
            n.to_string(),
            column.len().to_string(),
        )
        .into());
    }

    if let Some(value) = boundaries.left().edge_value(column[1], grid.first_spacing()) {
        column[0] = value;
    }
    if let Some(value) = boundaries.right().edge_value(column[n - 2], grid.last_spacing()) {
        column[n - 1] = value;
    }

    trace!("boundary conditions applied on {} points", n);
    Ok(())
}

/// Overwrite the edges of a fresh 2D solution column
///
/// The column is the flattened `nx × ny` field (`i + nx * j`). Left/right
/// conditions are applied along the whole `i = 0` and `i = nx - 1` lines,
/// then down/up along `j = 0` and `j = ny - 1`, so corners take the y-edge
/// value.
pub fn apply_boundary_conditions_2d<T: Real>(
    column: &mut [T],
    boundaries: &BoundaryConditions,
    x_grid: &Grid<T>,
    y_grid: &Grid<T>,
) -> SolverResult<()> {
    boundaries.validate()?;

    let (down, up) = match (boundaries.down(), boundaries.up()) {
        (Some(down), Some(up)) => (down, up),
        _ => {
            return Err(SolverError::invalid(
                "2D boundary injection requires down/up conditions",
            ));
        }
    };

    let (nx, ny) = (x_grid.len(), y_grid.len());
    if column.len() != nx * ny {
        return Err(BackendError::dimension_mismatch(
            "2D boundary injection",
            format!("{} ({}x{})", nx * ny, nx, ny),
            column.len().to_string(),
        )
        .into());
    }

    let (left, right) = (boundaries.left(), boundaries.right());
    for j in 0..ny {
        let row = nx * j;
        if let Some(value) = left.edge_value(column[row + 1], x_grid.first_spacing()) {
            column[row] = value;
        }
        if let Some(value) = right.edge_value(column[row + nx - 2], x_grid.last_spacing()) {
            column[row + nx - 1] = value;
        }
    }

    let top = nx * (ny - 1);
    for i in 0..nx {
        if let Some(value) = down.edge_value(column[nx + i], y_grid.first_spacing()) {
            column[i] = value;
        }
        if let Some(value) = up.edge_value(column[top - nx + i], y_grid.last_spacing()) {
            column[top + i] = value;
        }
    }

    trace!("boundary conditions applied on {}x{} field", nx, ny);
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
