//! Earth orbiting the Sun for one year
//!
//! Integrates the two-body problem with velocity Verlet and reports the
//! energy and momentum drift once per simulated month.
//!
//! Run with: cargo run --package astrodyn --example simple_orbit

use astrodyn::body::{Body, BodyId};
use astrodyn::config::SimulationConfig;
use astrodyn::diagnostics::relative_energy_error;
use astrodyn::forces::gravity::circular_speed;
use astrodyn::scenario::{AU, SUN_MASS};
use astrodyn::world::World;
use tracing_subscriber::EnvFilter;

const DAY: f64 = 86_400.0;

fn main() -> astrodyn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Two-body orbit: Earth around the Sun\n");
    println!("{}", "=".repeat(60));

    let v_circular = circular_speed(SUN_MASS, AU);
    let bodies = vec![
        Body::from_arrays("Sun", SUN_MASS, 6.957e8, [0.0, 0.0], [0.0, 0.0])?,
        Body::from_arrays("Earth", 5.972e24, 6.371e6, [AU, 0.0], [0.0, v_circular])?,
    ];

    // One hour steps, about 8766 per orbit
    let config = SimulationConfig {
        dt: 3_600.0,
        ..SimulationConfig::default()
    };
    let mut world = World::new(config, bodies)?;

    let initial_energy = world.total_energy();
    let initial_momentum = world.total_momentum();

    println!("\nInitial conditions:");
    println!("  Orbital radius: {:.4e} m", AU);
    println!("  Circular velocity: {:.1} m/s", v_circular);
    println!("  Total energy: {:.6e} J", initial_energy);

    println!("\nIntegrating...");
    for month in 1..=12 {
        world.run_for(30.4375 * DAY)?;

        let sun = world.body(BodyId(0))?;
        let earth = world.body(BodyId(1))?;
        let r = earth.distance_to(sun);
        let energy_error = relative_energy_error(initial_energy, world.total_energy());

        println!(
            "Month {:2}: r={:.6} AU, v={:.1} m/s, ΔE={:.2e}",
            month,
            r / AU,
            earth.speed(),
            energy_error
        );
    }

    let energy_error = relative_energy_error(initial_energy, world.total_energy());
    let momentum_error = (world.total_momentum() - initial_momentum).norm();

    println!("\n{}", "=".repeat(60));
    println!("Final diagnostics after {} steps:", world.step_count());
    println!("  Time: {:.2} days", world.time() / DAY);
    println!("  Energy error: {:.2e}", energy_error);
    println!("  Momentum change: {:.2e} kg m/s", momentum_error);

    if energy_error < 1e-3 {
        println!("✓ Energy conserved to within 0.1%");
    } else {
        println!("✗ Energy error too large: {:.2e}", energy_error);
    }

    Ok(())
}
