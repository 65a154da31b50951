//! Collision merging in a crowded system
//!
//! Three moons on crossing paths around a common center. Whenever two of
//! them touch, the heavier absorbs the lighter and the step report lists
//! the merge.
//!
//! Run with: cargo run --package astrodyn --example collision_demo

use astrodyn::collisions::CollisionOutcome;
use astrodyn::config::{AdaptiveConfig, SimulationConfig};
use astrodyn::scenario::three_body;
use astrodyn::world::World;
use tracing_subscriber::EnvFilter;

fn main() -> astrodyn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Collision demo: three moons\n");
    println!("{}", "=".repeat(60));

    let bodies = three_body()?;
    let initial_mass: f64 = bodies.iter().map(|b| b.mass).sum();

    println!("\nInitial system:");
    for body in &bodies {
        println!(
            "  {:<10} m={:.2e} kg, r={:.1e} m",
            body.name, body.mass, body.radius
        );
    }

    let config = SimulationConfig {
        dt: 10.0,
        adaptive: Some(AdaptiveConfig {
            dt_min: 0.1,
            dt_max: 60.0,
            ..AdaptiveConfig::default()
        }),
        step_budget: Some(50_000),
        ..SimulationConfig::default()
    };
    let mut world = World::new(config, bodies)?;
    let initial_momentum = world.total_momentum();

    println!("\nIntegrating...");
    while world.body_count() > 1 {
        let report = match world.step() {
            Ok(report) => report,
            Err(e) => {
                println!("  stopped: {e}");
                break;
            }
        };

        for outcome in &report.collisions.outcomes {
            if let CollisionOutcome::Merged { survivor, absorbed } = outcome {
                println!(
                    "  t={:>9.1} s: {:?} absorbed {:?} ({} bodies left)",
                    report.time,
                    survivor,
                    absorbed,
                    world.body_count()
                );
            }
        }
    }

    let final_mass: f64 = world.bodies().iter().map(|b| b.mass).sum();
    let momentum_error = (world.total_momentum() - initial_momentum).norm()
        / initial_momentum.norm().max(1.0);

    println!("\n{}", "=".repeat(60));
    println!("Final state after {} steps:", world.step_count());
    for body in world.bodies() {
        println!(
            "  {:<10} m={:.3e} kg, r={:.3e} m, v={:.1} m/s",
            body.name,
            body.mass,
            body.radius,
            body.speed()
        );
    }
    println!("\nConservation:");
    println!("  Mass: {:.6e} -> {:.6e} kg", initial_mass, final_mass);
    println!("  Relative momentum change: {:.2e}", momentum_error);

    Ok(())
}
