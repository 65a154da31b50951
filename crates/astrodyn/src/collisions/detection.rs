//! Collision detection
//!
//! Two bodies collide when their spheres touch or overlap:
//! `|x_a - x_b| <= r_a + r_b`. Collision eligibility does not depend on the
//! gravity mass threshold; spacecraft and debris collide like any other body.

use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyId};
use crate::state::SystemState;

/// A detected collision between two bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// First body ID
    pub body_a: BodyId,
    /// Second body ID
    pub body_b: BodyId,
    /// Current separation distance
    pub separation: f64,
    /// Sum of the two radii
    pub collision_radius: f64,
}

/// Check if a pair of bodies touches
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::collisions::detection::check_pair;
///
/// let a = Body::from_arrays("A", 10.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap();
/// let b = Body::from_arrays("B", 5.0, 1.0, [2.0, 0.0], [0.0, 0.0]).unwrap();
///
/// // Exactly touching counts as a collision
/// assert!(check_pair(&a, &b).is_some());
/// ```
pub fn check_pair<const D: usize>(a: &Body<D>, b: &Body<D>) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let collision_radius = a.radius + b.radius;

    (separation <= collision_radius).then(|| CollisionEvent {
        body_a: a.id,
        body_b: b.id,
        separation,
        collision_radius,
    })
}

/// Collision detector trait
///
/// Detectors only read the state; resolution happens separately so the
/// pairwise scan never observes a partially merged system.
pub trait CollisionDetector<const D: usize>: Send + Sync {
    /// Detect all collisions in the system
    fn detect(&self, state: &SystemState<D>) -> Vec<CollisionEvent>;
}

/// Direct O(N²) collision detector
///
/// Checks every unordered pair of bodies once.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::collisions::{CollisionDetector, DirectDetector};
/// use astrodyn::state::SystemState;
///
/// let mut system = SystemState::new();
/// system.add_body(Body::from_arrays("A", 10.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
/// system.add_body(Body::from_arrays("B", 5.0, 1.0, [1.5, 0.0], [0.0, 0.0]).unwrap()).unwrap();
/// system.add_body(Body::from_arrays("C", 5.0, 1.0, [50.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
///
/// let collisions = DirectDetector.detect(&system);
/// assert_eq!(collisions.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl<const D: usize> CollisionDetector<D> for DirectDetector {
    fn detect(&self, state: &SystemState<D>) -> Vec<CollisionEvent> {
        let bodies = &state.bodies;
        let n = bodies.len();

        (0..n)
            .flat_map(|i| ((i + 1)..n).filter_map(move |j| check_pair(&bodies[i], &bodies[j])))
            .collect()
    }
}
