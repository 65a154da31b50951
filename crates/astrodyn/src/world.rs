//! The simulation world
//!
//! `World` owns the body collection together with the integrator, the force
//! models, the collision detector and the optional adaptive timestep
//! controller. One call to `step` advances the simulation by exactly one
//! integration step:
//!
//! 1. integrate positions and velocities (and drain propellant)
//! 2. detect and merge collisions
//! 3. in adaptive mode, choose the next timestep
//!
//! Collaborators read state through `snapshot` or the read-only accessors;
//! nothing outside the world mutates bodies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::body::{Body, BodyId, Vector};
use crate::collisions::{CollisionDetector, CollisionReport, DirectDetector, resolve_collisions};
use crate::config::SimulationConfig;
use crate::diagnostics;
use crate::error::{Error, Result};
use crate::forces::thrust::consume_propellant;
use crate::forces::{CompositeForce, DirectGravity, ForceModel};
use crate::integrator::{Integrator, integrator_for};
use crate::state::SystemState;
use crate::timestep::AdaptiveTimestep;

/// Lifecycle of a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No step taken yet
    Idle,
    /// At least one step taken, budget not exhausted
    Stepping,
    /// Step budget exhausted; no further steps are accepted
    Terminal,
}

/// Read-only view of one body for renderers and exporters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot<const D: usize> {
    pub id: BodyId,
    pub name: String,
    pub color: String,
    pub position: Vector<D>,
    pub velocity: Vector<D>,
    pub mass: f64,
    pub radius: f64,
}

impl<const D: usize> From<&Body<D>> for BodySnapshot<D> {
    fn from(body: &Body<D>) -> Self {
        Self {
            id: body.id,
            name: body.name.clone(),
            color: body.color.clone(),
            position: body.position,
            velocity: body.velocity,
            mass: body.mass,
            radius: body.radius,
        }
    }
}

/// State of the world after a given step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<const D: usize> {
    /// Elapsed simulation time (s)
    pub time: f64,
    /// Number of steps taken
    pub step: u64,
    /// Timestep the next step will use (s)
    pub dt: f64,
    pub bodies: Vec<BodySnapshot<D>>,
}

/// Summary of a single step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Index of the step just taken, starting at 1
    pub step: u64,
    /// Simulation time after the step
    pub time: f64,
    /// Timestep used by this step
    pub dt: f64,
    /// Timestep chosen for the next step
    pub next_dt: f64,
    pub collisions: CollisionReport,
    /// Bodies whose propellant ran out during this step
    pub propellant_exhausted: Vec<BodyId>,
}

/// Aggregate owning all simulation state
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::config::SimulationConfig;
/// use astrodyn::world::{Phase, World};
///
/// let bodies = vec![
///     Body::from_arrays("Earth", 5.972e24, 6.371e6, [0.0, 0.0], [0.0, 0.0]).unwrap(),
///     Body::from_arrays("Satellite", 4.0e5, 50.0, [6.7781e6, 0.0], [0.0, 7_660.0]).unwrap(),
/// ];
///
/// let config = SimulationConfig { dt: 1.0, step_budget: Some(10), ..Default::default() };
/// let mut world = World::new(config, bodies).unwrap();
///
/// assert_eq!(world.run(100).unwrap(), 10);
/// assert_eq!(world.phase(), Phase::Terminal);
/// assert!(world.step().is_err());
/// assert_eq!(world.snapshot().time, 10.0);
/// ```
pub struct World<const D: usize> {
    config: SimulationConfig,
    state: SystemState<D>,
    integrator: Box<dyn Integrator<D>>,
    forces: CompositeForce<D>,
    detector: Box<dyn CollisionDetector<D>>,
    controller: Option<AdaptiveTimestep<D>>,
    dt: f64,
    steps: u64,
    phase: Phase,
}

impl<const D: usize> World<D> {
    /// Builds a world from a validated configuration and initial bodies
    ///
    /// Bodies receive IDs in the order given, starting at `BodyId(0)`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` for an invalid configuration and
    /// `Error::InvalidBody` for the first invalid body.
    pub fn new(
        config: SimulationConfig,
        bodies: impl IntoIterator<Item = Body<D>>,
    ) -> Result<Self> {
        config.validate()?;

        let mut state = SystemState::new();
        for body in bodies {
            state.add_body(body)?;
        }

        let forces = CompositeForce::new().with_force(DirectGravity::from_config(&config));
        let controller = config.adaptive.clone().map(AdaptiveTimestep::new);
        let dt = config.initial_dt();

        info!(
            bodies = state.body_count(),
            dimensions = D,
            dt,
            adaptive = controller.is_some(),
            integrator = ?config.integrator,
            "world created"
        );

        Ok(Self {
            integrator: integrator_for(config.integrator),
            config,
            state,
            forces,
            detector: Box::new(DirectDetector),
            controller,
            dt,
            steps: 0,
            phase: Phase::Idle,
        })
    }

    /// Adds a force source on top of gravity, e.g. a `ThrustForce`
    pub fn with_force<F: ForceModel<D> + 'static>(mut self, force: F) -> Self {
        self.add_force(force);
        self
    }

    pub fn add_force<F: ForceModel<D> + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    /// Replaces the collision detector
    pub fn with_detector<C: CollisionDetector<D> + 'static>(mut self, detector: C) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Advances the simulation by one step of the current timestep
    ///
    /// # Errors
    ///
    /// `Error::StepBudgetExhausted` once the configured budget is used up.
    pub fn step(&mut self) -> Result<StepReport> {
        self.advance(self.dt)
    }

    /// Takes up to `n_steps` steps, stopping early at the step budget
    ///
    /// # Returns
    ///
    /// Number of steps actually taken
    pub fn run(&mut self, n_steps: usize) -> Result<usize> {
        let mut taken = 0;
        while taken < n_steps && self.phase != Phase::Terminal {
            self.step()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Advances by `duration` seconds of simulation time
    ///
    /// The final step is shortened to land exactly on the target time; the
    /// nominal timestep is left untouched. Stops early at the step budget.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `duration` is negative or not finite, and
    /// whatever a step returns once the budget is exhausted.
    pub fn run_for(&mut self, duration: f64) -> Result<usize> {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "duration must be finite and non-negative, got {duration}"
            )));
        }

        let target = self.state.time + duration;
        // Leftovers below this are rounding, not time to integrate
        let tolerance = f64::EPSILON * target.abs().max(1.0) * 4.0;
        let mut taken = 0;
        while self.phase != Phase::Terminal {
            let remaining = target - self.state.time;
            if remaining <= tolerance {
                break;
            }
            self.advance(self.dt.min(remaining))?;
            taken += 1;
        }
        Ok(taken)
    }

    fn advance(&mut self, dt: f64) -> Result<StepReport> {
        if self.phase == Phase::Terminal || self.budget_reached() {
            self.phase = Phase::Terminal;
            return Err(Error::StepBudgetExhausted { steps: self.steps });
        }
        self.phase = Phase::Stepping;

        let t0 = self.state.time;
        self.integrator.step(&mut self.state, dt, &self.forces);

        let propellant_exhausted = consume_propellant(&mut self.state.bodies, &self.forces, t0, dt);
        for id in &propellant_exhausted {
            info!(?id, time = self.state.time, "propellant exhausted");
        }

        let events = self.detector.detect(&self.state);
        let collisions = if events.is_empty() {
            CollisionReport::default()
        } else {
            resolve_collisions(&mut self.state, events)
        };
        if collisions.merge_count() > 0 {
            debug!(
                merges = collisions.merge_count(),
                remaining = self.state.body_count(),
                time = self.state.time,
                "collisions resolved"
            );
        }

        if let Some(controller) = self.controller.as_mut() {
            self.dt = controller.next_dt(&self.state.bodies, self.dt);
        }

        self.steps += 1;
        if self.budget_reached() {
            info!(steps = self.steps, time = self.state.time, "step budget exhausted");
            self.phase = Phase::Terminal;
        }

        Ok(StepReport {
            step: self.steps,
            time: self.state.time,
            dt,
            next_dt: self.dt,
            collisions,
            propellant_exhausted,
        })
    }

    fn budget_reached(&self) -> bool {
        self.config.step_budget.is_some_and(|budget| self.steps >= budget)
    }

    pub fn snapshot(&self) -> Snapshot<D> {
        Snapshot {
            time: self.state.time,
            step: self.steps,
            dt: self.dt,
            bodies: self.state.bodies.iter().map(BodySnapshot::from).collect(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    /// Timestep the next step will use
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SystemState<D> {
        &self.state
    }

    pub fn bodies(&self) -> &[Body<D>] {
        &self.state.bodies
    }

    pub fn body_count(&self) -> usize {
        self.state.body_count()
    }

    /// Looks up a live body by id
    ///
    /// # Errors
    ///
    /// `Error::UnknownBody` if the id was never assigned or the body has
    /// been absorbed.
    pub fn body(&self, id: BodyId) -> Result<&Body<D>> {
        self.state.get_body(id).ok_or(Error::UnknownBody(id))
    }

    /// First live body with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&Body<D>> {
        self.state.bodies.iter().find(|b| b.name == name)
    }

    /// Mechanical energy using the world's gravitational constant
    pub fn total_energy(&self) -> f64 {
        diagnostics::total_energy(&self.state.bodies, self.config.gravitational_constant)
    }

    pub fn total_momentum(&self) -> Vector<D> {
        diagnostics::total_momentum(&self.state.bodies)
    }
}
