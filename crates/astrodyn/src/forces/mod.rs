//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and its implementations:
//! direct pairwise gravity and the thrust of scheduled engine burns.
//! Models are combined with `CompositeForce`.

use crate::body::{Body, Vector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod gravity;
pub mod thrust;


pub use gravity::DirectGravity;
pub use thrust::{BurnSchedule, Maneuver, ThrustCommand, ThrustForce};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻² (CODATA 2018)
pub const G: f64 = 6.6743e-11;

/// A source of force on bodies in an N-body system
///
/// Implementations must be pure functions of the body slice and time so that
/// every body in a pass sees the same snapshot.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::forces::{DirectGravity, ForceModel};
///
/// let bodies = vec![
///     Body::from_arrays("A", 1.0e10, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap(),
///     Body::from_arrays("B", 1.0e10, 1.0, [100.0, 0.0], [0.0, 0.0]).unwrap(),
/// ];
///
/// let gravity = DirectGravity::new();
/// let force = gravity.force(0, &bodies, 0.0);
/// assert!(force.x > 0.0);
/// ```
pub trait ForceModel<const D: usize>: Send + Sync {
    /// Net force on `bodies[idx]` at simulation time `time`, in newtons
    fn force(&self, idx: usize, bodies: &[Body<D>], time: f64) -> Vector<D>;

    /// Acceleration of `bodies[idx]`
    ///
    /// Body masses are validated positive on insertion, so the division is
    /// always defined.
    fn acceleration(&self, idx: usize, bodies: &[Body<D>], time: f64) -> Vector<D> {
        self.force(idx, bodies, time) / bodies[idx].mass
    }

    /// Potential energy of the whole configuration
    ///
    /// Default implementation returns 0.0 for non-conservative sources.
    fn potential_energy(&self, _bodies: &[Body<D>]) -> f64 {
        0.0
    }

    /// Rate at which `bodies[idx]` loses mass while this force acts (kg/s)
    fn mass_flow(&self, _idx: usize, _bodies: &[Body<D>], _time: f64) -> f64 {
        0.0
    }
}

/// Evaluate the acceleration of every body against the same snapshot
///
/// Results are written to a fresh buffer in body order. With the `parallel`
/// feature the per-body work is spread over rayon's pool; each body's sum is
/// still accumulated sequentially, so both paths give identical results.
pub fn accelerations<const D: usize>(
    force: &dyn ForceModel<D>,
    bodies: &[Body<D>],
    time: f64,
) -> Vec<Vector<D>> {
    #[cfg(feature = "parallel")]
    {
        (0..bodies.len())
            .into_par_iter()
            .map(|i| force.acceleration(i, bodies, time))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..bodies.len())
            .map(|i| force.acceleration(i, bodies, time))
            .collect()
    }
}

/// Combine multiple force models into a single composite force
///
/// # Examples
///
/// ```
/// use astrodyn::forces::{CompositeForce, DirectGravity, ThrustForce};
///
/// let composite = CompositeForce::<2>::new()
///     .with_force(DirectGravity::new())
///     .with_force(ThrustForce::new());
/// assert_eq!(composite.len(), 2);
/// ```
pub struct CompositeForce<const D: usize> {
    models: Vec<Box<dyn ForceModel<D>>>,
}

impl<const D: usize> CompositeForce<D> {
    /// Creates an empty composite force
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Adds a force model to the composite
    pub fn with_force<F: ForceModel<D> + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    pub fn push(&mut self, force: Box<dyn ForceModel<D>>) {
        self.models.push(force);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<const D: usize> Default for CompositeForce<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> ForceModel<D> for CompositeForce<D> {
    fn force(&self, idx: usize, bodies: &[Body<D>], time: f64) -> Vector<D> {
        self.models
            .iter()
            .map(|f| f.force(idx, bodies, time))
            .fold(Vector::zeros(), |acc, f| acc + f)
    }

    fn potential_energy(&self, bodies: &[Body<D>]) -> f64 {
        self.models.iter().map(|f| f.potential_energy(bodies)).sum()
    }

    fn mass_flow(&self, idx: usize, bodies: &[Body<D>], time: f64) -> f64 {
        self.models
            .iter()
            .map(|f| f.mass_flow(idx, bodies, time))
            .sum()
    }
}
