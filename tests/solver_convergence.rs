//! Convergence tests for time discretizers
//!
//! The first sine mode of the Dirichlet problem is an eigenvector of the
//! centered diffusion operator, so the semi-discrete solution is known
//! exactly: `u(T) = exp(λ·T)·u(0)`. Refining the time step then isolates the
//! temporal order of each scheme.

use std::f64::consts::PI;

use findiff_rs::physics::Grid;
use findiff_rs::solver::{BoundaryConditions, SolverType};
use nalgebra::DVector;

mod common;
use common::{dirichlet_zero, max_error, sine_mode, sine_mode_eigenvalue, uniform_scenario};

const POINTS: usize = 11;
const DIFFUSION: f64 = 0.1;
const TOTAL_TIME: f64 = 0.5;

const ADVECTION_POINTS: usize = 21;
const VELOCITY: f64 = 1.0;
const ADVECTION_DIFFUSION: f64 = 0.01;

fn temporal_errors(solver_type: SolverType, steps_list: &[usize]) -> Vec<f64> {
    let grid = Grid::uniform(0.0, 1.0, POINTS).unwrap();
    let initial = sine_mode(&grid);
    let lambda = sine_mode_eigenvalue(POINTS, DIFFUSION);
    let exact: DVector<f64> = &initial * (lambda * TOTAL_TIME).exp();

    steps_list
        .iter()
        .map(|&steps| {
            let dt = TOTAL_TIME / steps as f64;
            let scenario =
                uniform_scenario(POINTS, 0.0, DIFFUSION, dt, solver_type, dirichlet_zero());
            let result = scenario.solve(&initial, steps).unwrap();
            max_error(&result, &exact)
        })
        .collect()
}

/// Same refinement on a periodic advection-diffusion problem
///
/// On a periodic uniform grid `sin(k·x)` is a Fourier mode of the centered
/// operator with eigenvalue `σ + iω`, `σ = D·(2cos(kh) - 2)/h²` and
/// `ω = v·sin(kh)/h`, so `u(T) = exp(σ·T)·sin(k·x + ω·T)`. The advective
/// part of the operator drives the phase.
fn advection_errors(solver_type: SolverType, steps_list: &[usize]) -> Vec<f64> {
    let grid = Grid::<f64>::uniform(0.0, 1.0, ADVECTION_POINTS).unwrap();
    let h = grid.spacing(0);
    let period = grid[ADVECTION_POINTS - 2] - grid[0];
    let k = 2.0 * PI / period;

    let sigma = ADVECTION_DIFFUSION * (2.0 * (k * h).cos() - 2.0) / (h * h);
    let omega = VELOCITY * (k * h).sin() / h;
    let initial = grid.points().map(|x| (k * x).sin());
    let exact = grid
        .points()
        .map(|x| (sigma * TOTAL_TIME).exp() * (k * x + omega * TOTAL_TIME).sin());

    steps_list
        .iter()
        .map(|&steps| {
            let dt = TOTAL_TIME / steps as f64;
            let scenario = uniform_scenario(
                ADVECTION_POINTS,
                VELOCITY,
                ADVECTION_DIFFUSION,
                dt,
                solver_type,
                BoundaryConditions::periodic_1d(),
            );
            let result = scenario.solve(&initial, steps).unwrap();
            max_error(&result, &exact)
        })
        .collect()
}

fn assert_order(solver_type: SolverType, steps_list: &[usize], low: f64, high: f64) {
    assert_ratios(solver_type, &temporal_errors(solver_type, steps_list), low, high);
}

fn assert_ratios(solver_type: SolverType, errors: &[f64], low: f64, high: f64) {
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("{} convergence ratio {}->{}: {}", solver_type, i, i + 1, ratio);

        assert!(
            ratio > low && ratio < high,
            "{}: convergence ratio {} outside [{}, {}]",
            solver_type,
            ratio,
            low,
            high
        );
    }
}

#[test]
fn test_euler_first_order_convergence() {
    // dt → dt/2 should give error → error/2
    assert_order(SolverType::ExplicitEuler, &[10, 20, 40, 80], 1.8, 2.2);
    assert_order(SolverType::ImplicitEuler, &[10, 20, 40, 80], 1.8, 2.2);
}

#[test]
fn test_second_order_convergence() {
    for solver_type in [
        SolverType::CrankNicolson,
        SolverType::RungeKuttaRalston,
        SolverType::RichardsonExtrapolation2,
        SolverType::AdamsBashforth2,
        SolverType::AdamsMoulton2,
    ] {
        assert_order(solver_type, &[10, 20, 40, 80], 3.5, 4.5);
    }
}

#[test]
fn test_third_order_convergence() {
    assert_order(SolverType::RungeKutta3, &[4, 8, 16, 32], 7.0, 9.0);
    assert_order(SolverType::RichardsonExtrapolation3, &[10, 20, 40, 80], 7.0, 9.0);
}

#[test]
fn test_fourth_order_convergence() {
    // dt → dt/2 should give error → error/16
    for solver_type in [
        SolverType::RungeKutta4,
        SolverType::RungeKuttaThreeEight,
        SolverType::RungeKuttaGaussLegendre4,
    ] {
        assert_order(solver_type, &[4, 8, 16, 32], 13.0, 19.0);
    }
}

#[test]
fn test_higher_order_is_more_accurate() {
    let euler = temporal_errors(SolverType::ExplicitEuler, &[20])[0];
    let crank_nicolson = temporal_errors(SolverType::CrankNicolson, &[20])[0];
    let rk4 = temporal_errors(SolverType::RungeKutta4, &[20])[0];

    assert!(crank_nicolson < euler);
    assert!(rk4 < crank_nicolson);
}

// =================================================================================================
// Advection-diffusion
// =================================================================================================

#[test]
fn test_advection_diffusion_first_order_convergence() {
    let errors = advection_errors(SolverType::ExplicitEuler, &[40, 80, 160, 320]);
    assert_ratios(SolverType::ExplicitEuler, &errors, 1.8, 2.2);
}

#[test]
fn test_advection_diffusion_second_order_convergence() {
    let errors = advection_errors(SolverType::CrankNicolson, &[10, 20, 40, 80]);
    assert_ratios(SolverType::CrankNicolson, &errors, 3.5, 4.5);
}

#[test]
fn test_advection_diffusion_fourth_order_convergence() {
    let errors = advection_errors(SolverType::RungeKutta4, &[8, 16, 32, 64]);
    assert_ratios(SolverType::RungeKutta4, &errors, 13.0, 19.0);
}
