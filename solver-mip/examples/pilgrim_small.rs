//! Allocate pilgrims from two ports to two hotels.
//!
//! Run with: RUST_LOG=debug cargo run --release -p solver-mip --example pilgrim_small

use anyhow::Context;
use solver_core::ConstraintSystem;
use solver_mip::{solve_ip, MipSettings};

struct Port {
    name: &'static str,
    pilgrims: f64,
}

struct Hotel {
    name: &'static str,
    beds: f64,
}

/// Flow variables are indexed `port * hotels.len() + hotel`.
fn build(ports: &[Port], hotels: &[Hotel], bus_seats: f64) -> anyhow::Result<ConstraintSystem> {
    let (p, h) = (ports.len(), hotels.len());
    let n = p * h;
    let mut triplets = Vec::new();
    let mut b = Vec::new();
    let mut row = 0;

    // Every pilgrim leaves their port: sum_j x_ij <= s_i and -sum_j x_ij <= -s_i
    for (i, port) in ports.iter().enumerate() {
        for j in 0..h {
            triplets.push((row, i * h + j, 1.0));
            triplets.push((row + 1, i * h + j, -1.0));
        }
        b.extend_from_slice(&[port.pilgrims, -port.pilgrims]);
        row += 2;
    }
    for (j, hotel) in hotels.iter().enumerate() {
        for i in 0..p {
            triplets.push((row, i * h + j, 1.0));
        }
        b.push(hotel.beds);
        row += 1;
    }
    for k in 0..n {
        triplets.push((row, k, 1.0));
        triplets.push((row + 1, k, -1.0));
        b.extend_from_slice(&[bus_seats, 0.0]);
        row += 2;
    }

    ConstraintSystem::from_triplets(row, n, triplets, &b).context("building constraint system")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ports = [
        Port { name: "Port A", pilgrims: 60.0 },
        Port { name: "Port B", pilgrims: 40.0 },
    ];
    let hotels = [
        Hotel { name: "Hotel 1", beds: 80.0 },
        Hotel { name: "Hotel 2", beds: 40.0 },
    ];
    let cost = [100.0, 80.0, 90.0, 120.0];

    let system = build(&ports, &hotels, 50.0)?;
    println!(
        "{} flows, {} constraints",
        system.num_vars(),
        system.num_constraints()
    );

    let sol = solve_ip(&system, &cost, &MipSettings::verbose()).context("solving allocation")?;

    println!();
    println!("Allocation ({:?}):", sol.status);
    for (i, port) in ports.iter().enumerate() {
        for (j, hotel) in hotels.iter().enumerate() {
            let k = i * hotels.len() + j;
            if sol.x[k] > 0.0 {
                println!(
                    "  {} -> {}: {:>4} pilgrims at {:>5.0} each",
                    port.name, hotel.name, sol.x[k], cost[k]
                );
            }
        }
    }
    println!();
    println!("Total cost: {:.0}", sol.obj_val);
    println!(
        "Nodes: {} explored, {} pruned, {} infeasible ({} ms)",
        sol.nodes_explored, sol.nodes_pruned, sol.nodes_infeasible, sol.solve_time_ms
    );

    Ok(())
}
