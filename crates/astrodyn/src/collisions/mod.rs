//! Collision detection and resolution for N-body systems
//!
//! This module provides overlap detection and resolution through
//! momentum-conserving mergers.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionDetector, CollisionEvent, DirectDetector, check_pair};
pub use resolution::{
    CollisionOutcome, CollisionReport, merge_into, merged_radius, resolve_collisions,
};
