//! Conserved-quantity diagnostics
//!
//! Pure functions over a body snapshot. They are meant for monitoring and
//! tests and never feed back into the simulation.

use crate::body::{Body, Vector};

/// Σ ½ m |v|²
pub fn kinetic_energy<const D: usize>(bodies: &[Body<D>]) -> f64 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Σ_{i<j} -G mi mj / rij, skipping coincident pairs
///
/// Unsoftened and ignores any mass threshold, so it measures the true
/// Newtonian potential of the configuration.
pub fn potential_energy<const D: usize>(bodies: &[Body<D>], g: f64) -> f64 {
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| bodies[i + 1..].iter().map(move |b| (a, b)))
        .map(|(a, b)| {
            let r = a.distance_to(b);
            if r == 0.0 { 0.0 } else { -g * a.mass * b.mass / r }
        })
        .sum()
}

/// Total mechanical energy
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::diagnostics::total_energy;
///
/// let bodies = vec![
///     Body::from_arrays("A", 2.0, 0.1, [0.0, 0.0], [3.0, 4.0]).unwrap(),
///     Body::from_arrays("B", 1.0, 0.1, [2.0, 0.0], [0.0, 0.0]).unwrap(),
/// ];
///
/// // KE = ½·2·25 = 25, PE = -1·2·1/2 = -1
/// assert_eq!(total_energy(&bodies, 1.0), 24.0);
/// ```
pub fn total_energy<const D: usize>(bodies: &[Body<D>], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// Σ m v
pub fn total_momentum<const D: usize>(bodies: &[Body<D>]) -> Vector<D> {
    bodies
        .iter()
        .map(|b| b.momentum())
        .fold(Vector::zeros(), |acc, p| acc + p)
}

pub fn total_mass<const D: usize>(bodies: &[Body<D>]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

/// Mass-weighted mean position, `None` for an empty snapshot
pub fn center_of_mass<const D: usize>(bodies: &[Body<D>]) -> Option<Vector<D>> {
    let mass = total_mass(bodies);
    if bodies.is_empty() || mass <= 0.0 {
        return None;
    }
    let weighted = bodies
        .iter()
        .map(|b| b.position * b.mass)
        .fold(Vector::zeros(), |acc, p| acc + p);
    Some(weighted / mass)
}

/// |E - E0| / |E0|
///
/// Falls back to the absolute difference when `initial` is zero.
pub fn relative_energy_error(initial: f64, current: f64) -> f64 {
    let diff = (current - initial).abs();
    if initial == 0.0 {
        diff
    } else {
        diff / initial.abs()
    }
}
