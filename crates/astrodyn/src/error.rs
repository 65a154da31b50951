//! Error types for the simulation kernel

use thiserror::Error;

use crate::body::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the kernel.
///
/// Physical edge cases that have a defined outcome (coincident bodies,
/// unchanged forces, equal-mass collisions) are not errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A body failed validation at construction.
    #[error("invalid body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No body with this id is alive in the world.
    #[error("unknown body {0:?}")]
    UnknownBody(BodyId),

    /// The world reached its step budget and accepts no further steps.
    #[error("step budget of {steps} steps exhausted")]
    StepBudgetExhausted { steps: u64 },
}

impl Error {
    pub(crate) fn invalid_body(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidBody {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
