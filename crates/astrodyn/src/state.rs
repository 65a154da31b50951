use crate::body::{Body, BodyId, Vector};
use crate::error::Result;

/// Complete state of an N-body system at a given time
#[derive(Debug, Clone)]
pub struct SystemState<const D: usize> {
    /// Current simulation time in seconds
    pub time: f64,
    /// Live bodies, in insertion order
    pub bodies: Vec<Body<D>>,
    /// Next available body ID
    next_id: u32,
}

impl<const D: usize> SystemState<D> {
    /// Creates an empty system at time zero
    ///
    /// # Examples
    ///
    /// ```
    /// use astrodyn::state::SystemState;
    ///
    /// let system = SystemState::<2>::new();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self {
            time: 0.0,
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Validates a body, assigns it a fresh ID and adds it to the system
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBody` if the body violates its invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use astrodyn::body::Body;
    /// use astrodyn::state::SystemState;
    ///
    /// let mut system = SystemState::new();
    /// let sun = Body::from_arrays("Sun", 1.989e30, 6.957e8, [0.0, 0.0], [0.0, 0.0]).unwrap();
    /// let earth = Body::from_arrays("Earth", 5.972e24, 6.371e6, [1.496e11, 0.0], [0.0, 29_780.0]).unwrap();
    ///
    /// let sun_id = system.add_body(sun).unwrap();
    /// let earth_id = system.add_body(earth).unwrap();
    ///
    /// assert_ne!(sun_id, earth_id);
    /// assert_eq!(system.body_count(), 2);
    /// ```
    pub fn add_body(&mut self, mut body: Body<D>) -> Result<BodyId> {
        body.validate()?;
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        Ok(id)
    }

    /// Removes a body from the system
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body<D>> {
        self.index_of(id).map(|idx| self.bodies.remove(idx))
    }

    /// Index of a body in `bodies`, if it is still alive
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body<D>> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body<D>> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Returns the number of bodies in the system
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Invariant for an isolated system without thrust.
    pub fn total_momentum(&self) -> Vector<D> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}

impl<const D: usize> Default for SystemState<D> {
    fn default() -> Self {
        Self::new()
    }
}
