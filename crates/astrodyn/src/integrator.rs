//! Time integration for N-body systems
//!
//! This module provides integrators for evolving N-body systems forward in
//! time. The primary integrator is velocity Verlet, a second-order scheme
//! with good long-term energy behaviour. Explicit Euler is kept as a
//! first-order baseline.
//!
//! Every force pass is evaluated for all bodies into a separate buffer
//! before any position or velocity is written, so results never depend on
//! body order.

use crate::config::IntegratorKind;
use crate::forces::{ForceModel, accelerations};
use crate::state::SystemState;

/// A time integrator for N-body systems
///
/// Integrators advance the system state forward in time by computing
/// accelerations from force models and updating positions and velocities.
pub trait Integrator<const D: usize>: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep in seconds
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState<D>, dt: f64, force: &dyn ForceModel<D>);

    /// Advance the system by multiple timesteps
    ///
    /// # Returns
    ///
    /// Final time after integration
    fn integrate(
        &self,
        state: &mut SystemState<D>,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel<D>,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Velocity Verlet integrator (2nd order)
///
/// Four passes per step, each completed for every body before the next
/// begins:
///
/// 1. a0 = a(x(t))
/// 2. x(t + dt) = x(t) + v(t) dt + a0 dt²/2
/// 3. a1 = a(x(t + dt))
/// 4. v(t + dt) = v(t) + (a0 + a1) dt/2
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::forces::DirectGravity;
/// use astrodyn::integrator::{Integrator, VelocityVerlet};
/// use astrodyn::state::SystemState;
///
/// let mut system = SystemState::new();
/// system.add_body(Body::from_arrays("Earth", 5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
/// system.add_body(Body::from_arrays("Moon", 7.342e22, 1.737e6, [3.844e8, 0.0], [0.0, 1_022.0]).unwrap()).unwrap();
///
/// let integrator = VelocityVerlet;
/// let force = DirectGravity::new();
///
/// integrator.step(&mut system, 60.0, &force);
/// assert_eq!(system.time, 60.0);
/// assert!(system.bodies[1].acceleration.x < 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl<const D: usize> Integrator<D> for VelocityVerlet {
    fn step(&self, state: &mut SystemState<D>, dt: f64, force: &dyn ForceModel<D>) {
        let t0 = state.time;

        let a0 = accelerations(force, &state.bodies, t0);

        state
            .bodies
            .iter_mut()
            .zip(a0.iter())
            .for_each(|(body, a)| {
                body.position += body.velocity * dt + a * (0.5 * dt * dt);
            });

        let a1 = accelerations(force, &state.bodies, t0 + dt);

        state
            .bodies
            .iter_mut()
            .zip(a0.iter().zip(a1))
            .for_each(|(body, (a_old, a_new))| {
                body.velocity += (a_old + a_new) * (0.5 * dt);
                body.acceleration = a_new;
            });

        state.time = t0 + dt;
    }
}

/// Simple Euler integrator (1st order, for comparison only)
///
/// Needs one force evaluation per step instead of two, at the cost of
/// secular energy drift. Use `VelocityVerlet` for energy-sensitive runs.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::forces::DirectGravity;
/// use astrodyn::integrator::{Euler, Integrator};
/// use astrodyn::state::SystemState;
///
/// let mut system = SystemState::new();
/// system.add_body(Body::from_arrays("A", 1.0e12, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
/// system.add_body(Body::from_arrays("B", 1.0e12, 1.0, [1.0e3, 0.0], [0.0, 0.0]).unwrap()).unwrap();
///
/// Euler.step(&mut system, 1.0, &DirectGravity::new());
/// assert!(system.bodies[0].velocity.x > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl<const D: usize> Integrator<D> for Euler {
    fn step(&self, state: &mut SystemState<D>, dt: f64, force: &dyn ForceModel<D>) {
        let accelerations = accelerations(force, &state.bodies, state.time);

        state
            .bodies
            .iter_mut()
            .zip(accelerations)
            .for_each(|(body, accel)| {
                body.position += body.velocity * dt;
                body.velocity += accel * dt;
                body.acceleration = accel;
            });

        state.time += dt;
    }
}

/// Builds the integrator selected in the configuration
pub fn integrator_for<const D: usize>(kind: IntegratorKind) -> Box<dyn Integrator<D>> {
    match kind {
        IntegratorKind::VelocityVerlet => Box::new(VelocityVerlet),
        IntegratorKind::Euler => Box::new(Euler),
    }
}
