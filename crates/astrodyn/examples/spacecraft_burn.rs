//! Orbit raising with a planned engine burn
//!
//! A probe in low Earth orbit performs a prograde burn. Spacecraft mass is
//! far below the gravity threshold, so the probe feels Earth without
//! pulling on it.
//!
//! Run with: cargo run --package astrodyn --example spacecraft_burn

use astrodyn::body::{Body, BodyId, Propulsion};
use astrodyn::config::SimulationConfig;
use astrodyn::forces::ThrustForce;
use astrodyn::forces::gravity::circular_speed;
use astrodyn::forces::thrust::{Burn, BurnSchedule};
use astrodyn::scenario::{NEGLIGIBLE_PERTURBER_MASS, spacecraft};
use astrodyn::world::World;
use tracing_subscriber::EnvFilter;

const EARTH_MASS: f64 = 5.972e24;
const EARTH_RADIUS: f64 = 6.371e6;

fn main() -> astrodyn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Spacecraft burn: raising a low Earth orbit\n");
    println!("{}", "=".repeat(60));

    let r0 = EARTH_RADIUS + 400.0e3;
    let v0 = circular_speed(EARTH_MASS, r0);

    let earth = Body::from_arrays("Earth", EARTH_MASS, EARTH_RADIUS, [0.0, 0.0], [0.0, 0.0])?;
    let probe = spacecraft(
        "Probe",
        [r0, 0.0],
        [0.0, v0],
        800.0,
        2.0,
        Propulsion::new(400.0, 2_000.0, 320.0),
    )?;

    let config = SimulationConfig {
        dt: 1.0,
        mass_threshold: NEGLIGIBLE_PERTURBER_MASS,
        ..SimulationConfig::default()
    };
    let mut world = World::new(config, vec![earth, probe])?;
    let probe_id = BodyId(1);

    // Prograde burn of 100 m/s after ten minutes of coasting, planned from
    // the state at ignition
    world.run_for(600.0)?;
    let at_ignition = world.body(probe_id)?.clone();
    let prograde = at_ignition.velocity.normalize() * 100.0;
    let schedule = BurnSchedule::plan(&at_ignition, vec![Burn::new(600.0, prograde)])?;
    let burn_end = schedule.end_time().unwrap_or(600.0);
    world.add_force(ThrustForce::new().with_maneuver(probe_id, schedule));

    println!("\nBurn from t=600 s to t={:.1} s", burn_end);
    println!("  Mass at ignition: {:.1} kg", at_ignition.mass);
    println!("  Speed at ignition: {:.1} m/s", at_ignition.speed());

    while world.time() < burn_end + 60.0 {
        let report = world.step()?;
        for id in &report.propellant_exhausted {
            println!("  t={:.1} s: {:?} ran out of propellant", report.time, id);
        }
    }

    let after = world.body(probe_id)?;
    println!("\n{}", "=".repeat(60));
    println!("After the burn:");
    println!("  Mass: {:.1} kg", after.mass);
    println!(
        "  Propellant left: {:.1} kg",
        after.propulsion.map_or(0.0, |p| p.propellant_mass)
    );
    println!(
        "  Speed: {:.1} m/s (Δv ≈ {:.1} m/s)",
        after.speed(),
        after.speed() - at_ignition.speed()
    );

    // Coast for an hour to see the raised apoapsis
    let mut apoapsis = 0.0_f64;
    for _ in 0..3_600 {
        world.step()?;
        apoapsis = apoapsis.max(world.body(probe_id)?.position.norm());
    }
    println!(
        "  Highest altitude in the next hour: {:.1} km",
        (apoapsis - EARTH_RADIUS) / 1.0e3
    );

    Ok(())
}
