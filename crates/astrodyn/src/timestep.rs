//! Adaptive timestep control
//!
//! The controller compares each body's force with the force it felt on the
//! previous step. Quickly changing forces (close encounters) shrink the
//! timestep, quiescent stretches let it grow back toward `dt_max`.

use std::collections::HashMap;

use tracing::trace;

use crate::body::{Body, BodyId, Vector};
use crate::config::AdaptiveConfig;

/// Force-history driven timestep controller
///
/// For every body with a previous force sample:
///
/// ```text
/// relError     = |F_now - F_prev| / (|F_now| + ε)
/// dt_candidate = dt * (tolerance / relError)^α
/// dt_smooth    = (1 - β) dt + β * safety * dt_candidate
/// ```
///
/// The next timestep is the smallest `dt_smooth`, clamped to
/// `[dt_min, dt_max]`. Bodies seen for the first time contribute the
/// current `dt`.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::config::AdaptiveConfig;
/// use astrodyn::timestep::AdaptiveTimestep;
///
/// let mut controller = AdaptiveTimestep::new(AdaptiveConfig::default());
/// let bodies = vec![Body::from_arrays("A", 1.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap()];
///
/// // No history yet: the timestep is unchanged
/// assert_eq!(controller.next_dt(&bodies, 1.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveTimestep<const D: usize> {
    config: AdaptiveConfig,
    previous_forces: HashMap<BodyId, Vector<D>>,
}

impl<const D: usize> AdaptiveTimestep<D> {
    pub fn new(config: AdaptiveConfig) -> Self {
        Self {
            config,
            previous_forces: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// Number of bodies with a stored force sample
    pub fn history_len(&self) -> usize {
        self.previous_forces.len()
    }

    /// Proposes the timestep for the next step and records current forces
    ///
    /// `bodies` must carry the accelerations written by the last integration
    /// step. History of bodies that are no longer present is dropped.
    pub fn next_dt(&mut self, bodies: &[Body<D>], dt: f64) -> f64 {
        let proposed = bodies
            .iter()
            .map(|body| self.candidate(body, dt))
            .fold(f64::INFINITY, f64::min);

        let next = if proposed.is_finite() {
            self.config.clamp(proposed)
        } else {
            // Empty system
            self.config.clamp(dt)
        };

        self.previous_forces = bodies.iter().map(|b| (b.id, b.force())).collect();

        trace!(dt, next, "adaptive timestep");
        next
    }

    /// Smoothed timestep proposal for a single body
    fn candidate(&self, body: &Body<D>, dt: f64) -> f64 {
        let Some(previous) = self.previous_forces.get(&body.id) else {
            return dt;
        };

        let current = body.force();
        let change = (current - previous).magnitude();
        let rel_error = change / (current.magnitude() + self.config.force_floor);

        if !rel_error.is_finite() {
            return dt;
        }

        let raw = if rel_error == 0.0 {
            // Force did not change at all
            self.config.dt_max
        } else {
            dt * (self.config.tolerance / rel_error).powf(self.config.exponent)
        };

        let beta = self.config.smoothing;
        let smoothed = (1.0 - beta) * dt + beta * self.config.safety * raw;

        // Overflow on extreme quiescence still means "as large as allowed"
        if smoothed.is_finite() {
            smoothed
        } else {
            self.config.dt_max
        }
    }

    /// Forgets all force history
    pub fn reset(&mut self) {
        self.previous_forces.clear();
    }
}
