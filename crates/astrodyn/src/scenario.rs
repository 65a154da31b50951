//! Preset initial conditions
//!
//! Planar (2-D) systems in SI units, ready to hand to `World::new`. The
//! planets start on the +x axis with circular speeds along +y.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::body::{Body, Propulsion};
use crate::error::Result;
use crate::forces::gravity::circular_speed;

/// Astronomical unit (m)
pub const AU: f64 = 1.496e11;

/// Mass of the Sun (kg)
pub const SUN_MASS: f64 = 1.989e30;

/// Mass below which bodies are commonly treated as negligible perturbers (kg)
///
/// Use as `SimulationConfig::mass_threshold` to stop spacecraft and small
/// asteroids from pulling on everything else.
pub const NEGLIGIBLE_PERTURBER_MASS: f64 = 1.0e20;

/// Earth with a low-orbit satellite and an incoming asteroid
pub fn earth_system() -> Result<Vec<Body<2>>> {
    Ok(vec![
        Body::from_arrays("Earth", 5.97219e24, 6.371e6, [0.0, 0.0], [0.0, 0.0])?
            .with_color("blue"),
        Body::from_arrays("Satellite", 4.0e5, 50.0, [6.7781e6, 0.0], [0.0, 7_660.0])?
            .with_color("green"),
        Body::from_arrays(
            "Asteroid",
            1.0e10,
            1.0e3,
            [0.0, 6.371e6 + 5.0e6],
            [3_000.0, 0.0],
        )?
        .with_color("red"),
    ])
}

/// Three comparable moons in a tight, chaotic configuration
pub fn three_body() -> Result<Vec<Body<2>>> {
    Ok(vec![
        Body::from_arrays("Object 1", 5.0e21, 1.0e5, [0.0, 0.0], [0.0, 1_000.0])?
            .with_color("blue"),
        Body::from_arrays("Object 2", 5.0e21, 1.0e5, [0.0, 1.5e6], [-1_000.0, 0.0])?
            .with_color("red"),
        Body::from_arrays("Object 3", 8.0e22, 1.0e5, [0.0, -1.5e6], [-2_000.0, 0.0])?
            .with_color("green"),
    ])
}

/// The Sun, the planets, Pluto and the Moon
pub fn solar_system() -> Result<Vec<Body<2>>> {
    // name, color, orbital radius (m), speed (m/s), mass (kg), radius (m)
    const TABLE: [(&str, &str, f64, f64, f64, f64); 11] = [
        ("Sun", "#f2831f", 0.0, 0.0, 1.989e30, 6.957e8),
        ("Mercury", "#ff0000", 5.791e10, 47_870.0, 3.30104e23, 2.4397e6),
        ("Venus", "#e2c2a5", 1.082e11, 35_020.0, 4.867e24, 6.0518e6),
        ("Earth", "#3399ff", 1.496e11, 29_780.0, 5.972e24, 6.371e6),
        ("Moon", "#cccccc", 1.496e11 + 3.844e8, 29_780.0 + 1_022.0, 7.34767309e22, 1.7374e6),
        ("Mars", "#f27c5f", 2.279e11, 24_077.0, 6.4171e23, 3.3895e6),
        ("Jupiter", "#e85e30", 7.785e11, 13_070.0, 1.8982e27, 6.9911e7),
        ("Saturn", "#f27c5f", 1.429e12, 9_690.0, 5.6834e26, 5.8232e7),
        ("Uranus", "#95bbbe", 2.871e12, 6_810.0, 8.6810e25, 2.5362e7),
        ("Neptune", "#647ba5", 4.495e12, 5_430.0, 1.02413e26, 2.4622e7),
        ("Pluto", "#53035a", 5.906e12, 4_700.0, 1.303e22, 1.1883e6),
    ];

    TABLE
        .iter()
        .map(|&(name, color, r, v, mass, radius)| {
            Ok(Body::from_arrays(name, mass, radius, [r, 0.0], [0.0, v])?.with_color(color))
        })
        .collect()
}

/// The Sun surrounded by `count` asteroids in the main belt
///
/// Asteroids are placed uniformly between 2.1 and 3.4 AU at random angles
/// on prograde circular orbits, with masses of 1e15–5e16 kg, radii of
/// 1–5 km and gray colors. The same seed always yields the same belt.
///
/// # Examples
///
/// ```
/// use astrodyn::scenario::asteroid_belt;
///
/// let belt = asteroid_belt(42, 100).unwrap();
/// assert_eq!(belt.len(), 101);
/// assert_eq!(belt[0].name, "Sun");
/// assert_eq!(belt, asteroid_belt(42, 100).unwrap());
/// ```
pub fn asteroid_belt(seed: u64, count: usize) -> Result<Vec<Body<2>>> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let mut bodies = Vec::with_capacity(count + 1);

    let sun = Body::from_arrays("Sun", SUN_MASS, 6.957e8, [0.0, 0.0], [0.0, 0.0])?;
    bodies.push(sun.with_color("#f2831f"));

    for i in 1..=count {
        let r = rng.random_range(2.1 * AU..3.4 * AU);
        let theta = rng.random_range(0.0..std::f64::consts::TAU);
        let speed = circular_speed(SUN_MASS, r);
        let mass = rng.random_range(1.0e15..5.0e16);
        let radius = rng.random_range(1.0e3..5.0e3);
        let gray: u8 = rng.random_range(80..160);

        let (sin, cos) = theta.sin_cos();
        let asteroid = Body::from_arrays(
            format!("Asteroid {i}"),
            mass,
            radius,
            [r * cos, r * sin],
            [-speed * sin, speed * cos],
        )?
        .with_color(format!("#{gray:02x}{gray:02x}{gray:02x}"));

        bodies.push(asteroid);
    }

    Ok(bodies)
}

/// A spacecraft whose total mass is `dry_mass` plus the propellant load
pub fn spacecraft(
    name: &str,
    position: [f64; 2],
    velocity: [f64; 2],
    dry_mass: f64,
    radius: f64,
    propulsion: Propulsion,
) -> Result<Body<2>> {
    Body::from_arrays(
        name,
        dry_mass + propulsion.propellant_mass,
        radius,
        position,
        velocity,
    )?
    .with_color("white")
    .with_propulsion(propulsion)
}
