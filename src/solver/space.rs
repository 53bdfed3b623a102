//! Space discretizer
//!
//! Builds the dense operator `L` of the semi-discrete system `du/dt = L·u`
//! for
//!
//! ```text
//! ∂u/∂t = v·∂u/∂x + D·∂²u/∂x²
//! ```
//!
//! on an uneven mesh. For an interior point `i`, with
//! `dx⁺ = x[i+1] - x[i]`, `dx⁻ = x[i] - x[i-1]` and `dx = dx⁺ + dx⁻`, the
//! centered stencil is
//!
//! ```text
//! L[i][i-1] = (-dx⁺·v[i] + 2·D[i]) / (dx⁻·dx)
//! L[i][i+1] = ( dx⁻·v[i] + 2·D[i]) / (dx⁺·dx)
//! L[i][i]   = -L[i][i-1] - L[i][i+1]
//! ```
//!
//! Boundary rows stay zero: the boundary injector owns those points. When an
//! axis is periodic, its edge rows duplicate the rows of the interior points
//! they mirror (`0 ↔ N-2`, `N-1 ↔ 1`), so that periodicity is carried by the
//! operator itself.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};
use crate::physics::grid::{validate_field, validate_time_step};
use crate::physics::{Grid, Real};
use crate::solver::{BoundaryConditions, Dimensionality, SpaceDiscretizerType};

/// Off-diagonal weights `(lower, upper)` of one 3-point stencil
///
/// The diagonal is always `-(lower + upper)`, so every row sums to zero.
fn stencil<T: Real>(
    scheme: SpaceDiscretizerType,
    dx_minus: T,
    dx_plus: T,
    velocity: T,
    diffusion: T,
    dt: T,
) -> (T, T) {
    let two = T::constant(2.0);
    let dx = dx_plus + dx_minus;

    match scheme {
        SpaceDiscretizerType::Centered => (
            (-dx_plus * velocity + two * diffusion) / (dx_minus * dx),
            (dx_minus * velocity + two * diffusion) / (dx_plus * dx),
        ),
        SpaceDiscretizerType::Upwind => {
            let lower = two * diffusion / (dx_minus * dx);
            let upper = two * diffusion / (dx_plus * dx);
            if velocity >= T::zero() {
                (lower, upper + velocity / dx_plus)
            } else {
                (lower - velocity / dx_minus, upper)
            }
        }
        SpaceDiscretizerType::LaxWendroff => {
            let numerical = velocity * velocity * dt / two;
            stencil(
                SpaceDiscretizerType::Centered,
                dx_minus,
                dx_plus,
                velocity,
                diffusion + numerical,
                dt,
            )
        }
    }
}

/// Build the 1D space discretizer
///
/// `dt` is only used by [`SpaceDiscretizerType::LaxWendroff`] but must be
/// a valid time step for every scheme.
///
/// # Errors
///
/// - `InvalidConfiguration` for coefficient fields not matching the grid, a
///   non-positive `dt`, or 2D boundary conditions
/// - `InvariantViolation` for asymmetric periodic boundaries
pub fn build_space_discretizer<T: Real>(
    grid: &Grid<T>,
    velocity: &DVector<T>,
    diffusion: &DVector<T>,
    boundaries: &BoundaryConditions,
    scheme: SpaceDiscretizerType,
    dt: T,
) -> SolverResult<DMatrix<T>> {
    let n = grid.len();
    validate_field("velocity", velocity, n)?;
    validate_field("diffusion", diffusion, n)?;
    validate_time_step(dt)?;
    if boundaries.dimensionality() != Dimensionality::One {
        return Err(SolverError::invalid(
            "1D space discretizer requires left/right boundary conditions only",
        ));
    }
    boundaries.validate()?;

    let mut operator = DMatrix::zeros(n, n);
    for i in 1..n - 1 {
        let (lower, upper) = stencil(
            scheme,
            grid.spacing(i - 1),
            grid.spacing(i),
            velocity[i],
            diffusion[i],
            dt,
        );
        operator[(i, i - 1)] = lower;
        operator[(i, i + 1)] = upper;
        operator[(i, i)] = -lower - upper;
    }

    if boundaries.is_periodic_x() {
        fold_periodic_rows(&mut operator, |k| k, n);
    }

    debug!(
        "{} space discretizer built: {} points ({})",
        scheme,
        n,
        T::PRECISION
    );
    Ok(operator)
}

/// Build the 2D space discretizer
///
/// Points are flattened column-major, `(i, j) → i + nx·j`, giving an
/// `(nx·ny) × (nx·ny)` operator. Every interior point receives the x stencil
/// (with `x_velocity`) and the y stencil (with `y_velocity`), both using the
/// local diffusion coefficient.
#[allow(clippy::too_many_arguments)]
pub fn build_space_discretizer_2d<T: Real>(
    x_grid: &Grid<T>,
    y_grid: &Grid<T>,
    x_velocity: &DVector<T>,
    y_velocity: &DVector<T>,
    diffusion: &DVector<T>,
    boundaries: &BoundaryConditions,
    scheme: SpaceDiscretizerType,
    dt: T,
) -> SolverResult<DMatrix<T>> {
    let (nx, ny) = (x_grid.len(), y_grid.len());
    let n = nx * ny;
    validate_field("x velocity", x_velocity, n)?;
    validate_field("y velocity", y_velocity, n)?;
    validate_field("diffusion", diffusion, n)?;
    validate_time_step(dt)?;
    if boundaries.dimensionality() != Dimensionality::Two {
        return Err(SolverError::invalid(
            "2D space discretizer requires left/right/down/up boundary conditions",
        ));
    }
    boundaries.validate()?;

    let mut operator = DMatrix::zeros(n, n);
    for j in 1..ny - 1 {
        for i in 1..nx - 1 {
            let idx = i + nx * j;
            let (x_lower, x_upper) = stencil(
                scheme,
                x_grid.spacing(i - 1),
                x_grid.spacing(i),
                x_velocity[idx],
                diffusion[idx],
                dt,
            );
            let (y_lower, y_upper) = stencil(
                scheme,
                y_grid.spacing(j - 1),
                y_grid.spacing(j),
                y_velocity[idx],
                diffusion[idx],
                dt,
            );

            operator[(idx, idx - 1)] = x_lower;
            operator[(idx, idx + 1)] = x_upper;
            operator[(idx, idx - nx)] = y_lower;
            operator[(idx, idx + nx)] = y_upper;
            operator[(idx, idx)] = -x_lower - x_upper - y_lower - y_upper;
        }
    }

    // x first so that folded y edges pick up already-folded corners
    if boundaries.is_periodic_x() {
        for j in 0..ny {
            fold_periodic_rows(&mut operator, |i| i + nx * j, nx);
        }
    }
    if boundaries.is_periodic_y() {
        for i in 0..nx {
            fold_periodic_rows(&mut operator, |j| i + nx * j, ny);
        }
    }

    debug!(
        "{} space discretizer built: {}x{} points ({})",
        scheme,
        nx,
        ny,
        T::PRECISION
    );
    Ok(operator)
}

/// Copy the rows of the mirrored interior points into the edge rows of one line
///
/// `index(k)` maps the position `k` along the line (`0..len`) to a global row.
/// Edge values equal their mirrors, so the edge rows evolve exactly as the
/// mirrored interior rows do.
fn fold_periodic_rows<T: Real>(operator: &mut DMatrix<T>, index: impl Fn(usize) -> usize, len: usize) {
    let lower = operator.row(index(len - 2)).clone_owned();
    let upper = operator.row(index(1)).clone_owned();

    operator.set_row(index(0), &lower);
    operator.set_row(index(len - 1), &upper);
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::solver::BoundaryCondition;
    use approx::assert_relative_eq;

    fn dirichlet() -> BoundaryConditions {
        BoundaryConditions::one_d(
            BoundaryCondition::dirichlet(0.0),
            BoundaryCondition::dirichlet(0.0),
        )
    }

    #[test]
    fn test_centered_uniform_diffusion() {
        let grid = Grid::uniform(0.0_f64, 4.0, 5).unwrap();
        let velocity = DVector::zeros(5);
        let diffusion = DVector::from_element(5, 0.5);

        let l = build_space_discretizer(
            &grid,
            &velocity,
            &diffusion,
            &dirichlet(),
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap();

        // D / h² (u[i-1] - 2u[i] + u[i+1]) with D = 0.5, h = 1
        for i in 1..4 {
            assert_relative_eq!(l[(i, i - 1)], 0.5);
            assert_relative_eq!(l[(i, i)], -1.0);
            assert_relative_eq!(l[(i, i + 1)], 0.5);
        }

        // Boundary rows untouched
        assert!(l.row(0).iter().all(|&x| x == 0.0));
        assert!(l.row(4).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_centered_non_uniform_advection() {
        let grid = Grid::from_slice(&[0.0_f64, 1.0, 3.0]).unwrap();
        let velocity = DVector::from_element(3, 2.0);
        let diffusion = DVector::from_element(3, 1.0);

        let l = build_space_discretizer(
            &grid,
            &velocity,
            &diffusion,
            &dirichlet(),
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap();

        // dx⁻ = 1, dx⁺ = 2, dx = 3
        assert_relative_eq!(l[(1, 0)], (-2.0 * 2.0 + 2.0) / 3.0);
        assert_relative_eq!(l[(1, 2)], (1.0 * 2.0 + 2.0) / 6.0);
        assert_relative_eq!(l[(1, 1)], -(l[(1, 0)] + l[(1, 2)]));
    }

    #[test]
    fn test_centered_differentiates_linear_profile() {
        // v·∂u/∂x for u = x is v; the second derivative vanishes
        let grid = Grid::from_slice(&[0.0_f64, 0.3, 0.5, 1.1, 1.2, 2.0]).unwrap();
        let velocity = DVector::from_element(6, 1.5);
        let diffusion = DVector::from_element(6, 0.7);

        let l = build_space_discretizer(
            &grid,
            &velocity,
            &diffusion,
            &dirichlet(),
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap();

        let lu = &l * grid.points();
        for i in 1..5 {
            assert_relative_eq!(lu[i], 1.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rows_sum_to_zero_for_every_scheme() {
        let grid = Grid::from_slice(&[0.0_f64, 0.2, 0.5, 0.9, 1.0]).unwrap();
        let velocity = DVector::from_vec(vec![1.0, -2.0, 0.5, -0.1, 3.0]);
        let diffusion = DVector::from_element(5, 0.05);

        for scheme in [
            SpaceDiscretizerType::Centered,
            SpaceDiscretizerType::Upwind,
            SpaceDiscretizerType::LaxWendroff,
        ] {
            let l =
                build_space_discretizer(&grid, &velocity, &diffusion, &dirichlet(), scheme, 0.01)
                    .unwrap();
            for i in 0..5 {
                assert_relative_eq!(l.row(i).sum(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_variants_reduce_to_centered_without_advection() {
        let grid = Grid::from_slice(&[0.0_f64, 0.2, 0.5, 0.9, 1.0]).unwrap();
        let velocity = DVector::zeros(5);
        let diffusion = DVector::from_element(5, 0.3);

        let build = |scheme| {
            build_space_discretizer(&grid, &velocity, &diffusion, &dirichlet(), scheme, 0.01)
                .unwrap()
        };

        let centered = build(SpaceDiscretizerType::Centered);
        assert_relative_eq!(build(SpaceDiscretizerType::Upwind), centered);
        assert_relative_eq!(build(SpaceDiscretizerType::LaxWendroff), centered);
    }

    #[test]
    fn test_upwind_direction() {
        let grid = Grid::uniform(0.0_f64, 2.0, 3).unwrap();
        let diffusion = DVector::zeros(3);

        let positive = build_space_discretizer(
            &grid,
            &DVector::from_element(3, 2.0),
            &diffusion,
            &dirichlet(),
            SpaceDiscretizerType::Upwind,
            0.1,
        )
        .unwrap();
        assert_relative_eq!(positive[(1, 0)], 0.0);
        assert_relative_eq!(positive[(1, 2)], 2.0);
        assert_relative_eq!(positive[(1, 1)], -2.0);

        let negative = build_space_discretizer(
            &grid,
            &DVector::from_element(3, -2.0),
            &diffusion,
            &dirichlet(),
            SpaceDiscretizerType::Upwind,
            0.1,
        )
        .unwrap();
        assert_relative_eq!(negative[(1, 0)], 2.0);
        assert_relative_eq!(negative[(1, 2)], 0.0);
        assert_relative_eq!(negative[(1, 1)], -2.0);
    }

    #[test]
    fn test_lax_wendroff_adds_numerical_diffusion() {
        let grid = Grid::uniform(0.0_f64, 2.0, 3).unwrap();
        let velocity = DVector::from_element(3, 2.0);
        let dt = 0.1;

        let lw = build_space_discretizer(
            &grid,
            &velocity,
            &DVector::zeros(3),
            &dirichlet(),
            SpaceDiscretizerType::LaxWendroff,
            dt,
        )
        .unwrap();
        let centered = build_space_discretizer(
            &grid,
            &velocity,
            &DVector::from_element(3, 2.0 * 2.0 * dt / 2.0),
            &dirichlet(),
            SpaceDiscretizerType::Centered,
            dt,
        )
        .unwrap();

        assert_relative_eq!(lw, centered, epsilon = 1e-14);
    }

    #[test]
    fn test_periodic_rows_mirror_interior() {
        let grid = Grid::uniform(0.0_f64, 1.0, 6).unwrap();
        let velocity = DVector::from_element(6, 0.3);
        let diffusion = DVector::from_element(6, 0.1);

        let l = build_space_discretizer(
            &grid,
            &velocity,
            &diffusion,
            &BoundaryConditions::periodic_1d(),
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap();

        assert_eq!(l.row(0), l.row(4));
        assert_eq!(l.row(5), l.row(1));
    }

    #[test]
    fn test_field_length_mismatch() {
        let grid = Grid::uniform(0.0_f64, 1.0, 5).unwrap();
        let result = build_space_discretizer(
            &grid,
            &DVector::zeros(4),
            &DVector::zeros(5),
            &dirichlet(),
            SpaceDiscretizerType::Centered,
            0.1,
        );

        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnsupportedConfiguration);
    }

    #[test]
    fn test_asymmetric_periodic_rejected() {
        let grid = Grid::uniform(0.0_f64, 1.0, 5).unwrap();
        let boundaries = BoundaryConditions::one_d(
            BoundaryCondition::periodic(),
            BoundaryCondition::neumann(0.0),
        );
        let result = build_space_discretizer(
            &grid,
            &DVector::zeros(5),
            &DVector::from_element(5, 1.0),
            &boundaries,
            SpaceDiscretizerType::Centered,
            0.1,
        );

        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_2d_matches_sum_of_1d_stencils() {
        let x_grid = Grid::uniform(0.0_f64, 1.0, 4).unwrap();
        let y_grid = Grid::from_slice(&[0.0, 0.5, 1.5]).unwrap();
        let n = 12;
        let edge = BoundaryCondition::dirichlet(0.0);
        let boundaries = BoundaryConditions::two_d(edge, edge, edge, edge);

        let l = build_space_discretizer_2d(
            &x_grid,
            &y_grid,
            &DVector::zeros(n),
            &DVector::zeros(n),
            &DVector::from_element(n, 1.0),
            &boundaries,
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap();

        // point (1, 1): hx = 1/3, y spacings 0.5 and 1.0
        let idx = 1 + 4;
        let hx = 1.0 / 3.0;
        assert_relative_eq!(l[(idx, idx - 1)], 1.0 / (hx * hx), epsilon = 1e-10);
        assert_relative_eq!(l[(idx, idx + 1)], 1.0 / (hx * hx), epsilon = 1e-10);
        assert_relative_eq!(l[(idx, idx - 4)], 2.0 / (0.5 * 1.5), epsilon = 1e-10);
        assert_relative_eq!(l[(idx, idx + 4)], 2.0 / (1.0 * 1.5), epsilon = 1e-10);
        assert_relative_eq!(l.row(idx).sum(), 0.0, epsilon = 1e-10);

        // edge point (0, 1) untouched
        assert!(l.row(4).iter().all(|&x| x == 0.0));
    }

    fn periodic_2d(x_periodic: bool) -> DMatrix<f64> {
        let x_grid = Grid::uniform(0.0_f64, 1.0, 5).unwrap();
        let y_grid = Grid::from_slice(&[0.0, 0.2, 0.5, 0.7, 1.0]).unwrap();
        let n = 25;
        let x_edge = if x_periodic {
            BoundaryCondition::periodic()
        } else {
            BoundaryCondition::dirichlet(0.0)
        };
        let boundaries = BoundaryConditions::two_d(
            x_edge,
            x_edge,
            BoundaryCondition::periodic(),
            BoundaryCondition::periodic(),
        );

        build_space_discretizer_2d(
            &x_grid,
            &y_grid,
            &DVector::from_element(n, 0.4),
            &DVector::from_element(n, -0.2),
            &DVector::from_fn(n, |k, _| 0.05 + 0.01 * k as f64),
            &boundaries,
            SpaceDiscretizerType::Centered,
            0.1,
        )
        .unwrap()
    }

    #[test]
    fn test_2d_periodic_y_rows_mirror_interior() {
        let (nx, ny) = (5, 5);
        let l = periodic_2d(false);

        for i in 1..nx - 1 {
            assert_eq!(l.row(i), l.row(i + nx * (ny - 2)));
            assert_eq!(l.row(i + nx * (ny - 1)), l.row(i + nx));
            assert!(l.row(i).iter().any(|&x| x != 0.0));
        }

        // x edges stay with the injector
        assert!(l.row(nx).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_2d_fully_periodic_rows_mirror_interior() {
        let (nx, ny) = (5, 5);
        let l = periodic_2d(true);

        for j in 0..ny {
            assert_eq!(l.row(nx * j), l.row(nx * j + nx - 2));
            assert_eq!(l.row(nx * j + nx - 1), l.row(nx * j + 1));
        }
        for i in 0..nx {
            assert_eq!(l.row(i), l.row(i + nx * (ny - 2)));
            assert_eq!(l.row(i + nx * (ny - 1)), l.row(i + nx));
        }

        // Corner mirrors the opposite interior corner
        assert_eq!(l.row(0), l.row((nx - 2) + nx * (ny - 2)));
        assert!(l.row(0).iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_2d_rejects_1d_boundaries() {
        let grid = Grid::uniform(0.0_f64, 1.0, 3).unwrap();
        let result = build_space_discretizer_2d(
            &grid,
            &grid,
            &DVector::zeros(9),
            &DVector::zeros(9),
            &DVector::zeros(9),
            &BoundaryConditions::default(),
            SpaceDiscretizerType::Centered,
            0.1,
        );
        assert!(result.is_err());
    }
}
