//! Simple LP example for the vertex-enumeration solver.
//!
//! Solves:
//!   minimize    -x1 - x2
//!   subject to  x1 + 2 x2 <= 4
//!               3 x1 + x2 <= 6
//!               x1, x2 >= 0
//!
//! Optimal solution: x1 = 1.6, x2 = 1.2, objective = -2.8
//!
//! Run with: cargo run -p solver-core --example simple_lp

use solver_core::{feasible_vertices, solve_lp, ConstraintSystem, SolverSettings};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Pilgrim - Simple LP Example");
    println!("===========================");
    println!();

    let system = ConstraintSystem::from_triplets(
        4,
        2,
        vec![
            (0, 0, 1.0),
            (0, 1, 2.0),
            (1, 0, 3.0),
            (1, 1, 1.0),
            (2, 0, -1.0),
            (3, 1, -1.0),
        ],
        &[4.0, 6.0, 0.0, 0.0],
    )?;
    let cost = [-1.0, -1.0];

    let mut settings = SolverSettings::default().with_unbounded_check();
    settings.verbose = true;

    println!("Feasible vertices:");
    for vertex in feasible_vertices(&system, &settings) {
        println!("  rows {:?} -> x = {:?}", vertex.active_set, vertex.x);
    }
    println!();

    let sol = solve_lp(&system, &cost, &settings)?;

    println!("Results:");
    println!("  Objective: {:.6}", sol.obj_val);
    println!("  x: {:?}", sol.x);
    println!("  Active rows: {:?}", sol.active_set);
    println!(
        "  Subsets: {} ({} singular, {} feasible)",
        sol.info.combinations, sol.info.singular, sol.info.feasible_vertices
    );
    println!("  Time: {} ms", sol.info.solve_time_ms);

    Ok(())
}
