//! Simulation configuration
//!
//! `SimulationConfig` collects the physical constants and numerical
//! parameters of a run. It is `serde`-deserializable so that scenario loaders
//! can build it from whatever format they read; missing fields fall back to
//! the defaults below.
//!
//! ```
//! use astrodyn::config::{AdaptiveConfig, IntegratorKind, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     dt: 10.0,
//!     mass_threshold: 1.0e20,
//!     adaptive: Some(AdaptiveConfig::default()),
//!     ..SimulationConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.integrator, IntegratorKind::VelocityVerlet);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forces::G;

/// Time integration scheme used by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Second-order velocity Verlet, two force evaluations per step
    #[default]
    VelocityVerlet,
    /// First-order explicit Euler, kept for comparison runs
    Euler,
}

/// Global physical and numerical parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravitational_constant: f64, // m³ kg⁻¹ s⁻²
    pub softening: f64,              // softening length ε (m)
    pub mass_threshold: f64,         // bodies lighter than this exert no gravity (kg)
    pub dt: f64,                     // initial or fixed step size (s)
    pub integrator: IntegratorKind,
    pub adaptive: Option<AdaptiveConfig>,
    pub step_budget: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            softening: 0.0,
            mass_threshold: 0.0,
            dt: 0.1,
            integrator: IntegratorKind::VelocityVerlet,
            adaptive: None,
            step_budget: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.gravitational_constant.is_finite() && self.gravitational_constant > 0.0) {
            return Err(Error::InvalidConfig(
                "gravitational constant must be positive".into(),
            ));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(Error::InvalidConfig("softening must be non-negative".into()));
        }
        if !(self.mass_threshold.is_finite() && self.mass_threshold >= 0.0) {
            return Err(Error::InvalidConfig(
                "mass threshold must be non-negative".into(),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if let Some(adaptive) = &self.adaptive {
            adaptive.validate()?;
        }
        Ok(())
    }

    /// Timestep the first step will use
    ///
    /// In adaptive mode the configured `dt` is clamped into the controller's
    /// bounds.
    pub fn initial_dt(&self) -> f64 {
        match &self.adaptive {
            Some(adaptive) => adaptive.clamp(self.dt),
            None => self.dt,
        }
    }
}

/// Parameters of the adaptive timestep controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Target relative change of force per step
    pub tolerance: f64,
    /// Exponent α applied to `tolerance / relError`
    pub exponent: f64,
    /// Safety factor applied to each candidate
    pub safety: f64,
    /// Blending weight β of the new candidate against the previous dt
    pub smoothing: f64,
    pub dt_min: f64,
    pub dt_max: f64,
    /// ε added to ‖F_now‖ in the relative error denominator (N)
    pub force_floor: f64,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-3,
            exponent: 0.5,
            safety: 0.9,
            smoothing: 0.5,
            dt_min: 1.0e-3,
            dt_max: 100.0,
            force_floor: 1.0e-12,
        }
    }
}

impl AdaptiveConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.tolerance) {
            return Err(Error::InvalidConfig("tolerance must be positive".into()));
        }
        if !positive(self.exponent) {
            return Err(Error::InvalidConfig("exponent must be positive".into()));
        }
        if !(positive(self.safety) && self.safety <= 1.0) {
            return Err(Error::InvalidConfig("safety must lie in (0, 1]".into()));
        }
        if !(positive(self.smoothing) && self.smoothing <= 1.0) {
            return Err(Error::InvalidConfig("smoothing must lie in (0, 1]".into()));
        }
        if !positive(self.dt_min) || !positive(self.dt_max) {
            return Err(Error::InvalidConfig("dt bounds must be positive".into()));
        }
        if self.dt_min > self.dt_max {
            return Err(Error::InvalidConfig(format!(
                "dt_min ({}) exceeds dt_max ({})",
                self.dt_min, self.dt_max
            )));
        }
        if !(self.force_floor.is_finite() && self.force_floor >= 0.0) {
            return Err(Error::InvalidConfig("force floor must be non-negative".into()));
        }
        Ok(())
    }

    pub fn clamp(&self, dt: f64) -> f64 {
        dt.clamp(self.dt_min, self.dt_max)
    }
}
