//! Error kinds for `grav_hut`, following spec.md §7.

use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// `Precondition` and `NonFinite` are recoverable: the caller's command is
/// rejected, or the offending body is quiesced, and the world keeps
/// running. `WorkerPanic` and `LockPoisoned` indicate the parallel harness
/// or the body lock are in a state the caller must react to.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid mass {0}: mass must be finite and positive")]
    InvalidMass(f64),

    #[error("non-finite coordinate in body state")]
    NonFiniteCoordinate,

    #[error("invalid body capacity {0}: must be greater than zero")]
    InvalidCapacity(i64),

    #[error("worker panicked during parallel acceleration: {0}")]
    WorkerPanic(String),

    #[error("body lock poisoned, simulation thread cannot continue")]
    LockPoisoned,
}
