//! Direct N-body gravity (O(N²) implementation)

use std::f64::consts::FRAC_PI_2;

use crate::body::{Body, Vector};
use crate::config::SimulationConfig;
use crate::forces::{ForceModel, G};

/// Direct O(N²) gravitational force computation
///
/// Sums `G m_target m_other / (r² + ε²)` along the unit separation vector
/// over every other body. Two cases contribute zero instead of a term:
///
/// - sources lighter than `mass_threshold` (spacecraft, debris) exert no
///   gravity, although they still feel it;
/// - a source exactly coincident with the target has no defined direction.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::forces::{DirectGravity, ForceModel, G};
///
/// let bodies = vec![
///     Body::from_arrays("Earth", 5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0]).unwrap(),
///     Body::from_arrays("ISS", 4.0e5, 50.0, [6.7781e6, 0.0], [0.0, 7_660.0]).unwrap(),
/// ];
///
/// let gravity = DirectGravity::new();
/// let accel = gravity.acceleration(1, &bodies, 0.0);
///
/// // Points back toward Earth with magnitude GM/r²
/// let expected = G * 5.972e24 / 6.7781e6_f64.powi(2);
/// assert!(accel.x < 0.0);
/// assert!((accel.norm() - expected).abs() / expected < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant
    pub g: f64,
    /// Optional softening length to prevent singularities
    pub softening: f64,
    /// Bodies below this mass are excluded as force sources
    pub mass_threshold: f64,
}

impl DirectGravity {
    /// Creates a new direct gravity force with standard G, no softening and
    /// no mass threshold
    pub fn new() -> Self {
        Self {
            g: G,
            softening: 0.0,
            mass_threshold: 0.0,
        }
    }

    /// Creates a new direct gravity force with specified softening length
    ///
    /// # Examples
    ///
    /// ```
    /// use astrodyn::forces::DirectGravity;
    ///
    /// // 1 km softening for close asteroid encounters
    /// let gravity = DirectGravity::with_softening(1.0e3);
    /// assert_eq!(gravity.softening, 1.0e3);
    /// ```
    pub fn with_softening(softening: f64) -> Self {
        Self {
            softening,
            ..Self::new()
        }
    }

    pub fn with_mass_threshold(mut self, mass_threshold: f64) -> Self {
        self.mass_threshold = mass_threshold;
        self
    }

    pub fn with_constant(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            g: config.gravitational_constant,
            softening: config.softening,
            mass_threshold: config.mass_threshold,
        }
    }

    /// Whether `body` exerts gravity under this model
    pub fn is_source<const D: usize>(&self, body: &Body<D>) -> bool {
        body.mass >= self.mass_threshold
    }

    /// Force exerted on `target` by `source`
    pub fn pair_force<const D: usize>(&self, target: &Body<D>, source: &Body<D>) -> Vector<D> {
        if !self.is_source(source) {
            return Vector::zeros();
        }

        let dr = source.position - target.position;
        let r2 = dr.magnitude_squared();
        if r2 == 0.0 {
            // Coincident pair: skipped rather than treated as a singularity
            return Vector::zeros();
        }

        let r = r2.sqrt();
        let eps2 = self.softening * self.softening;
        let magnitude = self.g * target.mass * source.mass / (r2 + eps2);
        dr * (magnitude / r)
    }

    /// Potential energy of a pair, ignoring the mass threshold
    ///
    /// Its radial derivative is exactly the softened force magnitude
    /// `G m_a m_b / (r² + ε²)`, so `-(G m_a m_b / ε)(π/2 - atan(r/ε))` for
    /// ε > 0 and the Newtonian `-G m_a m_b / r` without softening.
    /// Coincident pairs contribute zero.
    pub fn pair_potential<const D: usize>(&self, a: &Body<D>, b: &Body<D>) -> f64 {
        let r = (a.position - b.position).norm();
        if r == 0.0 {
            return 0.0;
        }

        let gmm = self.g * a.mass * b.mass;
        if self.softening > 0.0 {
            let eps = self.softening;
            -gmm / eps * (FRAC_PI_2 - (r / eps).atan())
        } else {
            -gmm / r
        }
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> ForceModel<D> for DirectGravity {
    fn force(&self, idx: usize, bodies: &[Body<D>], _time: f64) -> Vector<D> {
        let target = &bodies[idx];

        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, other)| self.pair_force(target, other))
            .fold(Vector::zeros(), |acc, f| acc + f)
    }

    fn potential_energy(&self, bodies: &[Body<D>]) -> f64 {
        // Each pair counted once; a pair interacts if either member is a source
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| bodies[i + 1..].iter().map(move |b| (a, b)))
            .filter(|(a, b)| self.is_source(*a) || self.is_source(*b))
            .map(|(a, b)| self.pair_potential(a, b))
            .sum()
    }
}

/// Speed of a circular orbit of radius `radius` around `central_mass`
///
/// # Examples
///
/// ```
/// use astrodyn::forces::gravity::circular_speed;
///
/// // Earth around the Sun, about 29.8 km/s
/// let v = circular_speed(1.989e30, 1.496e11);
/// assert!((v - 29_780.0).abs() < 100.0);
/// ```
pub fn circular_speed(central_mass: f64, radius: f64) -> f64 {
    (G * central_mass / radius).sqrt()
}
