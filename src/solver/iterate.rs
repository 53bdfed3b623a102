//! Iterator / advancer
//!
//! Advances a solution matrix by a fixed number of steps of a
//! [`TimeDiscretizer`]. The solution has one row per grid point and one
//! column per history snapshot: column 0 is the most recent state, column
//! `c` the state `c` steps earlier.
//!
//! # Step state machine
//!
//! ```text
//! StepStart ──► BulkUpdateApplied ──► BoundaryApplied ──► (flip) ──► StepStart
//!                                                           │
//!                                              n_steps done ▼
//!                                                       Finalized
//! ```
//!
//! 1. **Bulk update**: `out_c = A_c · in_c` for every history column
//! 2. **History accumulation** (multi-step only): `out_0 += out_1 + …`,
//!    then `out_c ← in_{c-1}` for `c ≥ 1`
//! 3. **Boundary injection** on `out_0`, after the bulk product returned
//! 4. **Finiteness check** on `out_0`
//!
//! Input and output alternate between the caller's matrix and one work
//! buffer of the same shape ([`ActiveBuffer`]). When the last step left the
//! fresh data in the work buffer, it is copied back once.
//!
//! A failed step never leaves a half-written state in the caller's matrix:
//! it is restored to the last committed step before the error is returned.

use log::{debug, trace, warn};
use nalgebra::DMatrix;

use crate::error::{BackendError, SolverError, SolverResult};
use crate::physics::{Grid, Real};
use crate::solver::{
    apply_boundary_conditions, apply_boundary_conditions_2d, backend, validate_column,
    BoundaryConditions, TimeDiscretizer,
};

// =================================================================================================
// Configuration
// =================================================================================================

/// Mesh the solution columns live on
#[derive(Debug, Clone, Copy)]
pub enum Mesh<'a, T: Real> {
    OneD(&'a Grid<T>),
    TwoD { x: &'a Grid<T>, y: &'a Grid<T> },
}

impl<T: Real> Mesh<'_, T> {
    /// Number of unknowns (rows of a solution column)
    pub fn points(&self) -> usize {
        match self {
            Mesh::OneD(grid) => grid.len(),
            Mesh::TwoD { x, y } => x.len() * y.len(),
        }
    }
}

/// Everything the advancer needs besides the discretizer: mesh and boundary
/// conditions
#[derive(Debug, Clone, Copy)]
pub struct IterationConfig<'a, T: Real> {
    mesh: Mesh<'a, T>,
    boundaries: &'a BoundaryConditions,
}

impl<'a, T: Real> IterationConfig<'a, T> {
    pub fn new_1d(grid: &'a Grid<T>, boundaries: &'a BoundaryConditions) -> Self {
        Self {
            mesh: Mesh::OneD(grid),
            boundaries,
        }
    }

    pub fn new_2d(
        x_grid: &'a Grid<T>,
        y_grid: &'a Grid<T>,
        boundaries: &'a BoundaryConditions,
    ) -> Self {
        Self {
            mesh: Mesh::TwoD {
                x: x_grid,
                y: y_grid,
            },
            boundaries,
        }
    }

    pub fn mesh(&self) -> &Mesh<'a, T> {
        &self.mesh
    }

    pub fn boundaries(&self) -> &BoundaryConditions {
        self.boundaries
    }

    pub fn points(&self) -> usize {
        self.mesh.points()
    }

    /// Inject the boundary conditions into a fresh solution column
    pub(crate) fn apply(&self, column: &mut [T]) -> SolverResult<()> {
        match self.mesh {
            Mesh::OneD(grid) => apply_boundary_conditions(column, self.boundaries, grid),
            Mesh::TwoD { x, y } => apply_boundary_conditions_2d(column, self.boundaries, x, y),
        }
    }
}

// =================================================================================================
// Ping-pong buffer
// =================================================================================================

/// Buffer holding the last committed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveBuffer {
    Solution,
    WorkBuffer,
}

impl ActiveBuffer {
    fn flip(self) -> Self {
        match self {
            ActiveBuffer::Solution => ActiveBuffer::WorkBuffer,
            ActiveBuffer::WorkBuffer => ActiveBuffer::Solution,
        }
    }
}

// =================================================================================================
// Advancer
// =================================================================================================

/// Advance `solution` by `n_steps` steps of `time_discretizer`
///
/// `solution` must be `N × k`, with `N` the discretizer size (and the number
/// of mesh points) and `k` its number of stages. `n_steps == 0` leaves the
/// solution untouched.
///
/// # Errors
///
/// Shape and boundary configuration errors are reported before the first
/// step. A failure during step `s` (1-based) aborts the remaining steps and
/// is returned as `StepFailed { step: s, .. }`; `solution` then holds the
/// state after step `s - 1`.
///
/// # Example
///
/// ```rust
/// use findiff_rs::physics::Grid;
/// use findiff_rs::solver::{
///     build_space_discretizer, build_time_discretizer, iterate, BoundaryCondition,
///     BoundaryConditions, IterationConfig, SolverType, SpaceDiscretizerType,
/// };
/// use nalgebra::{DMatrix, DVector};
///
/// let grid = Grid::uniform(0.0, 1.0, 11).unwrap();
/// let boundaries = BoundaryConditions::one_d(
///     BoundaryCondition::dirichlet(0.0),
///     BoundaryCondition::dirichlet(0.0),
/// );
/// let l = build_space_discretizer(
///     &grid,
///     &DVector::zeros(11),
///     &DVector::from_element(11, 0.1),
///     &boundaries,
///     SpaceDiscretizerType::Centered,
///     0.01,
/// )
/// .unwrap();
/// let td = build_time_discretizer(&l, 0.01, SolverType::CrankNicolson).unwrap();
///
/// let mut solution = DMatrix::from_fn(11, 1, |i, _| if i == 5 { 1.0 } else { 0.0 });
/// iterate(&mut solution, &td, &IterationConfig::new_1d(&grid, &boundaries), 10).unwrap();
///
/// assert!(solution[(5, 0)] < 1.0);
/// assert_eq!(solution[(0, 0)], 0.0);
/// ```
pub fn iterate<T: Real>(
    solution: &mut DMatrix<T>,
    time_discretizer: &TimeDiscretizer<T>,
    config: &IterationConfig<'_, T>,
    n_steps: usize,
) -> SolverResult<()> {
    let n = time_discretizer.size();
    let k = time_discretizer.n_stages();

    if solution.shape() != (n, k) {
        return Err(BackendError::dimension_mismatch(
            "iterate",
            format!("{}x{} solution", n, k),
            format!("{}x{}", solution.nrows(), solution.ncols()),
        )
        .into());
    }
    if config.points() != n {
        return Err(BackendError::dimension_mismatch(
            "iterate",
            format!("{} mesh points", n),
            config.points().to_string(),
        )
        .into());
    }
    config.boundaries().validate()?;

    if n_steps == 0 {
        return Ok(());
    }

    debug!(
        "Advancing {} steps of {} ({} points, {} snapshot(s))",
        n_steps,
        time_discretizer.solver_type(),
        n,
        k
    );

    let mut work = DMatrix::zeros(n, k);
    let mut active = ActiveBuffer::Solution;

    for step in 1..=n_steps {
        let result = match active {
            ActiveBuffer::Solution => advance(time_discretizer, config, solution, &mut work, step),
            ActiveBuffer::WorkBuffer => advance(time_discretizer, config, &work, solution, step),
        };

        if let Err(source) = result {
            if active == ActiveBuffer::WorkBuffer {
                solution.copy_from(&work);
            }
            warn!("Iteration aborted at step {}/{}: {}", step, n_steps, source);
            return Err(SolverError::StepFailed {
                step,
                source: Box::new(source),
            });
        }

        active = active.flip();
        trace!("step {}/{} committed", step, n_steps);
    }

    if active == ActiveBuffer::WorkBuffer {
        solution.copy_from(&work);
    }
    Ok(())
}

/// One step from `input` into `output`
fn advance<T: Real>(
    time_discretizer: &TimeDiscretizer<T>,
    config: &IterationConfig<'_, T>,
    input: &DMatrix<T>,
    output: &mut DMatrix<T>,
    step: usize,
) -> SolverResult<()> {
    let n = input.nrows();
    let k = input.ncols();
    let inputs = input.as_slice();
    let outputs = output.as_mut_slice();

    for ((stage, x), y) in time_discretizer
        .stages()
        .iter()
        .zip(inputs.chunks_exact(n))
        .zip(outputs.chunks_exact_mut(n))
    {
        backend::gemv(stage, x, y)?;
    }

    if k > 1 {
        let (fresh, history) = outputs.split_at_mut(n);
        for column in history.chunks_exact(n) {
            for (value, contribution) in fresh.iter_mut().zip(column) {
                *value = *value + *contribution;
            }
        }
        history.copy_from_slice(&inputs[..n * (k - 1)]);
    }

    let fresh = &mut outputs[..n];
    config.apply(fresh)?;
    validate_column(fresh, step)
}

// =================================================================================================
// Tests
// =================================================================================================
