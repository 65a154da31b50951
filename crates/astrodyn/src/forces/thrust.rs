//! Engine thrust as a pluggable force source
//!
//! A `Maneuver` decides, for one body at a given elapsed time, whether its
//! engine fires and with what force and propellant flow. `ThrustForce`
//! attaches maneuvers to bodies by id and exposes them as a `ForceModel`, so
//! thrust is summed with gravity before integration. Propellant is drained
//! afterwards by `consume_propellant`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId, Vector};
use crate::error::{Error, Result};
use crate::forces::ForceModel;

/// Instantaneous engine output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustCommand<const D: usize> {
    /// Thrust force vector (N)
    pub force: Vector<D>,
    /// Propellant consumption (kg/s)
    pub mass_flow: f64,
}

/// Thrust policy for a single body
pub trait Maneuver<const D: usize>: Send + Sync {
    /// Engine output for `body` at `time`, or `None` while coasting
    fn command(&self, body: &Body<D>, time: f64) -> Option<ThrustCommand<D>>;
}

/// A requested velocity change starting at a given time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burn<const D: usize> {
    /// Elapsed simulation time at ignition (s)
    pub start: f64,
    /// Requested velocity change (m/s)
    pub delta_v: Vector<D>,
}

impl<const D: usize> Burn<D> {
    pub fn new(start: f64, delta_v: Vector<D>) -> Self {
        Self { start, delta_v }
    }
}

/// A burn converted into a thrusting window
#[derive(Debug, Clone, Copy, PartialEq)]
struct BurnWindow<const D: usize> {
    start: f64,
    end: f64,
    direction: Vector<D>,
}

/// Sequence of full-thrust burns planned from a spacecraft's engine
///
/// Each burn fires along its Δv for the duration the rocket equation
/// gives from the mass at ignition,
/// `t = m0 (1 - exp(-|Δv| / ve)) / ṁ`. Burns that would need more
/// propellant than remains are cut short when the tank runs dry.
///
/// # Examples
///
/// ```
/// use astrodyn::body::{Body, Propulsion};
/// use astrodyn::forces::thrust::{Burn, BurnSchedule};
/// use nalgebra::Vector2;
///
/// let probe = Body::from_arrays("Probe", 1_000.0, 2.0, [7.0e6, 0.0], [0.0, 7_500.0])
///     .unwrap()
///     .with_propulsion(Propulsion::new(400.0, 2_000.0, 300.0))
///     .unwrap();
///
/// let schedule = BurnSchedule::plan(&probe, vec![
///     Burn::new(60.0, Vector2::new(0.0, 100.0)),
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.len(), 1);
/// assert!(schedule.is_firing(61.0));
/// assert!(!schedule.is_firing(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BurnSchedule<const D: usize> {
    windows: Vec<BurnWindow<D>>,
    thrust: f64,
    mass_flow: f64,
}

impl<const D: usize> BurnSchedule<D> {
    /// Plans `burns` for `body`, which must carry a `Propulsion` component
    ///
    /// # Errors
    ///
    /// `Error::InvalidBody` if the body has no engine, `Error::InvalidConfig`
    /// for negative start times or burns that overlap once their durations
    /// are known.
    pub fn plan(body: &Body<D>, mut burns: Vec<Burn<D>>) -> Result<Self> {
        let propulsion = body
            .propulsion
            .ok_or_else(|| {
                Error::invalid_body(&body.name, "burns require a propulsion component")
            })?;

        burns.sort_by(|a, b| a.start.total_cmp(&b.start));

        let exhaust_velocity = propulsion.exhaust_velocity();
        let mass_flow = propulsion.mass_flow_rate();
        let mut mass = body.mass;
        let mut propellant = propulsion.propellant_mass;
        let mut windows: Vec<BurnWindow<D>> = Vec::with_capacity(burns.len());

        for burn in burns {
            if !(burn.start.is_finite() && burn.start >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "burn start must be a non-negative time, got {}",
                    burn.start
                )));
            }
            if let Some(previous) = windows.last() {
                if burn.start < previous.end {
                    return Err(Error::InvalidConfig(format!(
                        "burn at t={} overlaps the burn ending at t={}",
                        burn.start, previous.end
                    )));
                }
            }

            let dv = burn.delta_v.magnitude();
            if dv == 0.0 || propellant <= 0.0 {
                continue;
            }

            let required = mass * (1.0 - (-dv / exhaust_velocity).exp());
            let used = required.min(propellant);
            mass -= used;
            propellant -= used;

            windows.push(BurnWindow {
                start: burn.start,
                end: burn.start + used / mass_flow,
                direction: burn.delta_v / dv,
            });
        }

        Ok(Self {
            windows,
            thrust: propulsion.thrust,
            mass_flow,
        })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Whether a planned burn covers `time`
    pub fn is_firing(&self, time: f64) -> bool {
        self.active(time).is_some()
    }

    /// Time the last planned burn ends, if any
    pub fn end_time(&self) -> Option<f64> {
        self.windows.last().map(|w| w.end)
    }

    fn active(&self, time: f64) -> Option<&BurnWindow<D>> {
        self.windows
            .iter()
            .find(|w| w.start <= time && time < w.end)
    }
}

impl<const D: usize> Maneuver<D> for BurnSchedule<D> {
    fn command(&self, body: &Body<D>, time: f64) -> Option<ThrustCommand<D>> {
        let has_propellant = body.propulsion.is_some_and(|p| p.has_propellant());
        if !has_propellant {
            return None;
        }

        self.active(time).map(|window| ThrustCommand {
            force: window.direction * self.thrust,
            mass_flow: self.mass_flow,
        })
    }
}

/// Force model applying the maneuvers attached to individual bodies
///
/// Bodies without a maneuver, or whose maneuver is coasting, receive no
/// force from this model.
#[derive(Default)]
pub struct ThrustForce<const D: usize> {
    maneuvers: HashMap<BodyId, Box<dyn Maneuver<D>>>,
}

impl<const D: usize> ThrustForce<D> {
    pub fn new() -> Self {
        Self {
            maneuvers: HashMap::new(),
        }
    }

    /// Attaches a maneuver to a body, replacing any previous one
    pub fn with_maneuver<M: Maneuver<D> + 'static>(mut self, id: BodyId, maneuver: M) -> Self {
        self.maneuvers.insert(id, Box::new(maneuver));
        self
    }

    pub fn len(&self) -> usize {
        self.maneuvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maneuvers.is_empty()
    }

    fn command(&self, idx: usize, bodies: &[Body<D>], time: f64) -> Option<ThrustCommand<D>> {
        let body = &bodies[idx];
        self.maneuvers
            .get(&body.id)
            .and_then(|m| m.command(body, time))
    }
}

impl<const D: usize> ForceModel<D> for ThrustForce<D> {
    fn force(&self, idx: usize, bodies: &[Body<D>], time: f64) -> Vector<D> {
        self.command(idx, bodies, time)
            .map_or_else(Vector::zeros, |c| c.force)
    }

    fn mass_flow(&self, idx: usize, bodies: &[Body<D>], time: f64) -> f64 {
        self.command(idx, bodies, time).map_or(0.0, |c| c.mass_flow)
    }
}

/// Drain propellant consumed over the step `[t0, t0 + dt]`
///
/// Flow is averaged over both ends of the step, matching the trapezoidal
/// velocity update, and never exceeds the propellant left in the tank.
/// All rates are evaluated before any mass changes.
///
/// # Returns
///
/// IDs of bodies whose tanks ran dry during this step
pub fn consume_propellant<const D: usize>(
    bodies: &mut [Body<D>],
    force: &dyn ForceModel<D>,
    t0: f64,
    dt: f64,
) -> Vec<BodyId> {
    let snapshot: &[Body<D>] = bodies;
    let burned: Vec<f64> = (0..snapshot.len())
        .map(|i| {
            if snapshot[i].propulsion.is_none() {
                return 0.0;
            }
            let start = force.mass_flow(i, snapshot, t0);
            let end = force.mass_flow(i, snapshot, t0 + dt);
            0.5 * (start + end) * dt
        })
        .collect();

    let mut exhausted = Vec::new();
    for (body, burned) in bodies.iter_mut().zip(burned) {
        let Some(propulsion) = body.propulsion.as_mut() else {
            continue;
        };
        if burned <= 0.0 || !propulsion.has_propellant() {
            continue;
        }

        let used = burned.min(propulsion.propellant_mass);
        propulsion.propellant_mass -= used;
        body.mass -= used;

        if !propulsion.has_propellant() {
            exhausted.push(body.id);
        }
    }
    exhausted
}
