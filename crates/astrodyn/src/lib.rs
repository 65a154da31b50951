//! Gravitational N-body kernel
//!
//! Advances point masses under mutual Newtonian gravity with velocity Verlet
//! (optionally with an adaptive timestep), merges bodies that collide, and
//! reports energy and momentum diagnostics. Rendering, file formats and
//! real-time pacing are left to callers, which feed bodies into a
//! [`world::World`] and read back [`world::Snapshot`]s.

pub mod body;
pub mod collisions;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod state;
pub mod timestep;
pub mod world;

pub use body::{Body, BodyId, Propulsion, Vector};
pub use config::{AdaptiveConfig, IntegratorKind, SimulationConfig};
pub use error::{Error, Result};
pub use world::{Phase, Snapshot, World};

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod timestep_test;
