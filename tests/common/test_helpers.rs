//! Helper functions for integration tests

#![allow(dead_code)]

use findiff_rs::physics::{FiniteDifferenceInput, Grid};
use findiff_rs::solver::{BoundaryCondition, BoundaryConditions, Scenario, SolverType};
use nalgebra::DVector;

/// Assert that two vectors are close (within an absolute tolerance)
pub fn assert_vectors_close(
    actual: &DVector<f64>,
    expected: &DVector<f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Maximum absolute difference between two vectors
pub fn max_error(actual: &DVector<f64>, expected: &DVector<f64>) -> f64 {
    actual
        .iter()
        .zip(expected.iter())
        .map(|(a, e)| (a - e).abs())
        .fold(0.0, f64::max)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Homogeneous Dirichlet conditions on both edges
pub fn dirichlet_zero() -> BoundaryConditions {
    BoundaryConditions::one_d(
        BoundaryCondition::dirichlet(0.0),
        BoundaryCondition::dirichlet(0.0),
    )
}

/// `sin(π·x)` sampled on a grid spanning [0, 1]
pub fn sine_mode(grid: &Grid<f64>) -> DVector<f64> {
    grid.points().map(|x| (std::f64::consts::PI * x).sin())
}

/// Eigenvalue of the centered diffusion operator for the first sine mode
///
/// `λ = -4·D/h²·sin²(π·h/2)` on a uniform grid of spacing `h`.
pub fn sine_mode_eigenvalue(points: usize, diffusion: f64) -> f64 {
    let h = 1.0 / (points - 1) as f64;
    -4.0 * diffusion / (h * h) * (std::f64::consts::PI * h / 2.0).sin().powi(2)
}

/// Scenario on a uniform grid over [0, 1] with constant coefficients
pub fn uniform_scenario(
    points: usize,
    velocity: f64,
    diffusion: f64,
    dt: f64,
    solver_type: SolverType,
    boundaries: BoundaryConditions,
) -> Scenario<f64> {
    let grid = Grid::uniform(0.0, 1.0, points).unwrap();
    let input = FiniteDifferenceInput::constant_coefficients(
        dt,
        grid,
        velocity,
        diffusion,
        solver_type,
        boundaries,
    );
    Scenario::new(input).unwrap()
}
