//! 2D Heat Equation on the Unit Square
//!
//! ∂u/∂t = D·(∂²u/∂x² + ∂²u/∂y²)
//!
//! - x: periodic
//! - y: Dirichlet u = 0 at the bottom, u = 1 at the top
//!
//! Starting from a cold plate with a warm spot, the field relaxes towards the
//! linear profile u = y imposed by the y edges.

use findiff_rs::physics::{FiniteDifferenceInput2D, Grid};
use findiff_rs::solver::{
    BoundaryCondition, BoundaryConditions, Scenario2D, SolverType, SpaceDiscretizerType,
};
use nalgebra::DVector;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== 2D Heat Equation: Periodic x, Dirichlet y ===\n");

    let (nx, ny) = (17, 13);
    let diffusion: f64 = 0.05;
    let dt: f64 = 0.01;
    let n_steps = 400;

    let x_grid = Grid::<f64>::uniform(0.0, 1.0, nx)?;
    let y_grid = Grid::<f64>::uniform(0.0, 1.0, ny)?;
    let boundaries = BoundaryConditions::two_d(
        BoundaryCondition::periodic(),
        BoundaryCondition::periodic(),
        BoundaryCondition::dirichlet(0.0),
        BoundaryCondition::dirichlet(1.0),
    );

    let input = FiniteDifferenceInput2D::new(
        dt,
        x_grid.clone(),
        y_grid.clone(),
        DVector::zeros(nx * ny),
        DVector::zeros(nx * ny),
        DVector::from_element(nx * ny, diffusion),
        SolverType::CrankNicolson,
        SpaceDiscretizerType::Centered,
        boundaries,
    );

    println!("Grid: {}x{}, D = {}, dt = {}, steps = {}", nx, ny, diffusion, dt, n_steps);
    let start = std::time::Instant::now();
    let scenario = Scenario2D::new(input)?;
    println!("✓ Discretizers built in {:.3}s", start.elapsed().as_secs_f64());

    let profile = DVector::from_fn(nx * ny, |k, _| {
        let (x, y) = (x_grid[k % nx], y_grid[k / nx]);
        2.0 * (-((x - 0.5).powi(2) + (y - 0.5).powi(2)) / 0.01).exp()
    });

    let mut solution = scenario.initial_solution(&profile)?;
    for checkpoint in 1..=4 {
        scenario.advance(&mut solution, n_steps / 4)?;
        let field = scenario.to_field(&solution.column(0).into_owned())?;

        // Distance to the steady state u = y
        let deviation = field
            .indexed_iter()
            .map(|((_, j), value)| (value - y_grid[j]).abs())
            .fold(0.0, f64::max);
        println!(
            "t = {:>5.2}: centre u = {:.5}, max |u - y| = {:.3e}",
            checkpoint as f64 * (n_steps / 4) as f64 * dt,
            field[[nx / 2, ny / 2]],
            deviation
        );
    }

    Ok(())
}
