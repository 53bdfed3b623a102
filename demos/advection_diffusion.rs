//! Advection-Diffusion of a Gaussian Pulse
//!
//! ∂u/∂t = v·∂u/∂x + D·∂²u/∂x²
//!
//! Compares every time scheme on the same problem:
//! - Uneven mesh, finer in the middle of the domain
//! - Left edge: Dirichlet u = 0 (inflow side for v < 0)
//! - Right edge: Neumann ∂u/∂x = 0 (outflow)
//!
//! The reference is Gauss-Legendre 4 with a 16× smaller time step.

use findiff_rs::physics::{FiniteDifferenceInput, Grid};
use findiff_rs::solver::{
    BoundaryCondition, BoundaryConditions, Scenario, SolverType, SpaceDiscretizerType,
};
use nalgebra::DVector;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Advection-Diffusion: Scheme Comparison ===\n");

    // Physical parameters
    let length = 2.0;
    let n_points = 121;
    let velocity = -0.5;
    let diffusion = 0.005;

    // Simulation parameters
    let final_time = 1.0;
    let n_steps = 200;
    let dt = final_time / n_steps as f64;

    println!("Physical Parameters:");
    println!("  Domain length: {}", length);
    println!("  Grid points: {}", n_points);
    println!("  Velocity v: {}", velocity);
    println!("  Diffusion D: {}", diffusion);
    println!("\nSimulation:");
    println!("  Final time: {}", final_time);
    println!("  Time steps: {} (dt = {})\n", n_steps, dt);

    // Mesh: quadratic stretching, finer in the middle of the domain
    let points: Vec<f64> = (0..n_points)
        .map(|i| {
            let s = i as f64 / (n_points - 1) as f64;
            let centred = 2.0 * s - 1.0;
            length * (0.5 + 0.5 * centred * (0.6 + 0.4 * centred.abs()))
        })
        .collect();
    let grid = Grid::from_slice(&points)?;

    let boundaries = BoundaryConditions::one_d(
        BoundaryCondition::dirichlet(0.0),
        BoundaryCondition::neumann(0.0),
    );
    let profile = grid.points().map(|x| (-((x - 0.5) / 0.1).powi(2)).exp());

    let build = |solver_type: SolverType, dt: f64| {
        Scenario::new(FiniteDifferenceInput::new(
            dt,
            grid.clone(),
            DVector::from_element(n_points, velocity),
            DVector::from_element(n_points, diffusion),
            solver_type,
            SpaceDiscretizerType::Centered,
            boundaries,
        ))
    };

    // Reference solution
    let reference = build(SolverType::RungeKuttaGaussLegendre4, dt / 16.0)?
        .solve(&profile, n_steps * 16)?;

    println!("{:<32} {:>12} {:>12} {:>10}", "Scheme", "max error", "mass", "time");
    for solver_type in SolverType::ALL {
        let start = std::time::Instant::now();
        let scenario = build(solver_type, dt)?;
        let result = scenario.solve(&profile, n_steps)?;
        let elapsed = start.elapsed();

        let error = result
            .iter()
            .zip(reference.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        let mass = trapezoid(grid.points(), &result);

        println!(
            "{:<32} {:>12.3e} {:>12.6} {:>8.1}ms",
            solver_type.name(),
            error,
            mass,
            elapsed.as_secs_f64() * 1e3
        );
    }

    println!("\nInitial mass: {:.6}", trapezoid(grid.points(), &profile));
    Ok(())
}

/// Trapezoidal integral of `values` over an uneven mesh
fn trapezoid(x: &DVector<f64>, values: &DVector<f64>) -> f64 {
    (1..x.len())
        .map(|i| 0.5 * (values[i] + values[i - 1]) * (x[i] - x[i - 1]))
        .sum()
}
