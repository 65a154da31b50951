use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Position, velocity, acceleration and force vectors in `D` dimensions
pub type Vector<const D: usize> = SVector<f64, D>;

/// Standard gravity used to convert specific impulse to exhaust velocity (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.80665;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Rocket engine and propellant tank attached to a body
///
/// The propellant is part of the body's total mass and is drained by
/// thrusting force models through `ForceModel::mass_flow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Propulsion {
    pub propellant_mass: f64, // kg
    pub thrust: f64,          // N
    pub isp: f64,             // s
}

impl Propulsion {
    pub fn new(propellant_mass: f64, thrust: f64, isp: f64) -> Self {
        Self {
            propellant_mass,
            thrust,
            isp,
        }
    }

    /// Effective exhaust velocity `Isp * g0` in m/s
    pub fn exhaust_velocity(&self) -> f64 {
        self.isp * STANDARD_GRAVITY
    }

    /// Propellant consumed per second at full thrust (kg/s)
    pub fn mass_flow_rate(&self) -> f64 {
        self.thrust / self.exhaust_velocity()
    }

    pub fn has_propellant(&self) -> bool {
        self.propellant_mass > 0.0
    }

    fn validate(&self, name: &str, total_mass: f64) -> Result<()> {
        if !(self.propellant_mass.is_finite() && self.propellant_mass >= 0.0) {
            return Err(Error::invalid_body(name, "propellant mass must be non-negative"));
        }
        if self.propellant_mass >= total_mass {
            return Err(Error::invalid_body(
                name,
                "propellant mass must be less than total mass",
            ));
        }
        if !(self.thrust.is_finite() && self.thrust > 0.0) {
            return Err(Error::invalid_body(name, "thrust must be positive"));
        }
        if !(self.isp.is_finite() && self.isp > 0.0) {
            return Err(Error::invalid_body(name, "specific impulse must be positive"));
        }
        Ok(())
    }
}

/// A point mass in `D` dimensions
///
/// `radius` only matters for collision overlap tests, never for gravity.
/// `color` is carried through to snapshots for renderers and has no
/// physical meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body<const D: usize> {
    pub id: BodyId,
    pub name: String,
    pub color: String,
    pub mass: f64,   // kg, includes propellant
    pub radius: f64, // m
    pub position: Vector<D>,
    pub velocity: Vector<D>,
    /// Acceleration at the end of the last integration step
    pub acceleration: Vector<D>,
    pub propulsion: Option<Propulsion>,
}

impl<const D: usize> Body<D> {
    /// Creates a validated body
    ///
    /// The id is a placeholder until the body is added to a `SystemState`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBody` when the mass is not strictly positive,
    /// the radius is negative, or any value is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use astrodyn::body::Body;
    /// use nalgebra::Vector2;
    ///
    /// let earth = Body::new(
    ///     "Earth",
    ///     5.972e24,
    ///     6.371e6,
    ///     Vector2::new(1.496e11, 0.0),
    ///     Vector2::new(0.0, 29_780.0),
    /// )
    /// .unwrap();
    /// assert_eq!(earth.name, "Earth");
    ///
    /// assert!(Body::new("Ghost", 0.0, 1.0, Vector2::zeros(), Vector2::zeros()).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: Vector<D>,
        velocity: Vector<D>,
    ) -> Result<Self> {
        let body = Body {
            id: BodyId(0),
            name: name.into(),
            color: String::from("#ffffff"),
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector::zeros(),
            propulsion: None,
        };
        body.validate()?;
        Ok(body)
    }

    /// Creates a body from plain coordinate arrays
    pub fn from_arrays(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        position: [f64; D],
        velocity: [f64; D],
    ) -> Result<Self> {
        Self::new(
            name,
            mass,
            radius,
            Vector::from(position),
            Vector::from(velocity),
        )
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Attaches an engine; the propellant must already be included in `mass`
    pub fn with_propulsion(mut self, propulsion: Propulsion) -> Result<Self> {
        propulsion.validate(&self.name, self.mass)?;
        self.propulsion = Some(propulsion);
        Ok(self)
    }

    /// Checks the physical invariants every participating body must hold
    pub fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(Error::invalid_body(&self.name, "mass must be positive"));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(Error::invalid_body(&self.name, "radius must be non-negative"));
        }
        let finite = |v: &Vector<D>| v.iter().all(|c| c.is_finite());
        if !finite(&self.position) || !finite(&self.velocity) {
            return Err(Error::invalid_body(
                &self.name,
                "position and velocity must be finite",
            ));
        }
        if let Some(propulsion) = &self.propulsion {
            propulsion.validate(&self.name, self.mass)?;
        }
        Ok(())
    }

    pub fn momentum(&self) -> Vector<D> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Net force implied by the stored acceleration
    pub fn force(&self) -> Vector<D> {
        self.acceleration * self.mass
    }

    pub fn distance_to(&self, other: &Body<D>) -> f64 {
        (self.position - other.position).magnitude()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Mass without any remaining propellant
    pub fn dry_mass(&self) -> f64 {
        self.mass - self.propulsion.map_or(0.0, |p| p.propellant_mass)
    }
}
