//! Collision resolution through momentum-conserving mergers
//!
//! When bodies collide, the heavier one absorbs the lighter one:
//! - Total mass is conserved
//! - Total momentum is conserved exactly; the survivor's velocity is derived
//!   from the summed momentum
//! - Volume is conserved (constant density), `r = (r_a^D + r_b^D)^(1/D)`
//!
//! Resolution is two-phase. Every event is classified against the unchanged
//! state first, then all merges are applied and all absorbed bodies removed
//! in one batch.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::body::{Body, BodyId};
use crate::collisions::CollisionEvent;
use crate::state::SystemState;

/// What happened to a single collision event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// `absorbed` was merged into `survivor` and removed
    Merged { survivor: BodyId, absorbed: BodyId },
    /// Both bodies have exactly the same mass; no survivor is defined, so
    /// the pair is left untouched
    EqualMass { body_a: BodyId, body_b: BodyId },
    /// One of the bodies is already taking part in a conflicting merge this
    /// pass; the pair is re-examined on the next step
    Deferred { body_a: BodyId, body_b: BodyId },
}

/// Outcomes of one resolution pass, in processing order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub outcomes: Vec<CollisionOutcome>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn merge_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CollisionOutcome::Merged { .. }))
            .count()
    }

    /// IDs removed from the system by this pass
    pub fn absorbed(&self) -> Vec<BodyId> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CollisionOutcome::Merged { absorbed, .. } => Some(*absorbed),
                _ => None,
            })
            .collect()
    }

    /// Equal-mass pairs that could not be resolved
    pub fn equal_mass_pairs(&self) -> Vec<(BodyId, BodyId)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                CollisionOutcome::EqualMass { body_a, body_b } => Some((*body_a, *body_b)),
                _ => None,
            })
            .collect()
    }
}

/// Volume-conserving radius of two merged spheres in `D` dimensions
pub fn merged_radius<const D: usize>(a: f64, b: f64) -> f64 {
    let d = D as i32;
    (a.powi(d) + b.powi(d)).powf(1.0 / D as f64)
}

/// Merge `absorbed` into `survivor`, conserving mass and momentum
///
/// The survivor keeps its position, id, name and propulsion. Its stored
/// acceleration becomes the mass-weighted mean of both, i.e. the external
/// force on the pair divided by the combined mass.
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::collisions::merge_into;
///
/// let mut a = Body::from_arrays("A", 10.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap();
/// let b = Body::from_arrays("B", 5.0, 1.0, [1.0, 0.0], [-1.0, 0.0]).unwrap();
///
/// let p_initial = a.momentum() + b.momentum();
/// merge_into(&mut a, &b);
///
/// assert_eq!(a.mass, 15.0);
/// assert!((a.momentum() - p_initial).norm() < 1e-12);
/// assert!((a.velocity.x + 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn merge_into<const D: usize>(survivor: &mut Body<D>, absorbed: &Body<D>) {
    let total_mass = survivor.mass + absorbed.mass;
    let momentum = survivor.momentum() + absorbed.momentum();
    let net_force = survivor.force() + absorbed.force();

    survivor.radius = merged_radius::<D>(survivor.radius, absorbed.radius);
    survivor.mass = total_mass;
    survivor.velocity = momentum / total_mass;
    survivor.acceleration = net_force / total_mass;
}

/// Process all collision events and merge bodies
///
/// Handles collision cascades by:
/// 1. Sorting collisions by separation (closest first)
/// 2. Letting a survivor absorb any number of lighter bodies
/// 3. Deferring events where a body was already absorbed, or where the
///    lighter body already absorbed something this pass
///
/// # Examples
///
/// ```
/// use astrodyn::body::Body;
/// use astrodyn::collisions::{CollisionDetector, DirectDetector, resolve_collisions};
/// use astrodyn::state::SystemState;
///
/// let mut system = SystemState::new();
/// system.add_body(Body::from_arrays("A", 10.0, 1.0, [0.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
/// system.add_body(Body::from_arrays("B", 5.0, 1.0, [1.0, 0.0], [-1.0, 0.0]).unwrap()).unwrap();
///
/// let events = DirectDetector.detect(&system);
/// let report = resolve_collisions(&mut system, events);
///
/// assert_eq!(report.merge_count(), 1);
/// assert_eq!(system.body_count(), 1);
/// assert_eq!(system.bodies[0].mass, 15.0);
/// ```
pub fn resolve_collisions<const D: usize>(
    state: &mut SystemState<D>,
    mut events: Vec<CollisionEvent>,
) -> CollisionReport {
    events.sort_by(|a, b| a.separation.total_cmp(&b.separation));

    let mut report = CollisionReport::default();
    let mut absorbed: HashSet<BodyId> = HashSet::new();
    let mut survivors: HashSet<BodyId> = HashSet::new();
    let mut merges: Vec<(usize, usize)> = Vec::new();

    // Phase 1: classify every event against the unchanged state
    for event in events {
        let (Some(ia), Some(ib)) = (state.index_of(event.body_a), state.index_of(event.body_b))
        else {
            continue;
        };
        let (a, b) = (&state.bodies[ia], &state.bodies[ib]);

        if absorbed.contains(&a.id) || absorbed.contains(&b.id) {
            report.outcomes.push(CollisionOutcome::Deferred {
                body_a: a.id,
                body_b: b.id,
            });
            continue;
        }

        if a.mass == b.mass {
            warn!(
                a = %a.name,
                b = %b.name,
                mass = a.mass,
                "equal-mass collision left unresolved"
            );
            report.outcomes.push(CollisionOutcome::EqualMass {
                body_a: a.id,
                body_b: b.id,
            });
            continue;
        }

        let (survivor, loser) = if a.mass > b.mass { (ia, ib) } else { (ib, ia) };
        let (survivor_id, loser_id) = (state.bodies[survivor].id, state.bodies[loser].id);

        if survivors.contains(&loser_id) {
            debug!(?survivor_id, ?loser_id, "merge deferred, body already absorbing");
            report.outcomes.push(CollisionOutcome::Deferred {
                body_a: a.id,
                body_b: b.id,
            });
            continue;
        }

        absorbed.insert(loser_id);
        survivors.insert(survivor_id);
        merges.push((survivor, loser));
        report.outcomes.push(CollisionOutcome::Merged {
            survivor: survivor_id,
            absorbed: loser_id,
        });
    }

    // Phase 2: apply merges, then remove absorbed bodies in one batch.
    // Absorbed bodies are never survivors, so their state is still the
    // pre-collision state here.
    for (survivor, loser) in merges {
        let absorbed_body = state.bodies[loser].clone();
        let target = &mut state.bodies[survivor];
        debug!(
            survivor = %target.name,
            absorbed = %absorbed_body.name,
            "bodies merged"
        );
        merge_into(target, &absorbed_body);
    }

    state.bodies.retain(|b| !absorbed.contains(&b.id));

    report
}
