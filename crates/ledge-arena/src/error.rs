//! Arena-specific error types.

use ledge_core::StepError;
use thiserror::Error;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The arena has no room for the requested allocation.
    #[error("arena capacity exceeded: requested {requested}, used {used} of {capacity}")]
    CapacityExceeded {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements already allocated.
        used: usize,
        /// Fixed capacity of the arena in elements.
        capacity: usize,
    },
    /// `publish()` was called without a preceding `begin_tick()`.
    #[error("publish() called without a preceding begin_tick()")]
    NoTickInProgress,
}

impl From<ArenaError> for StepError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::CapacityExceeded {
                requested,
                used,
                capacity,
            } => StepError::ArenaExhausted {
                requested,
                used,
                capacity,
            },
            ArenaError::NoTickInProgress => StepError::FrameSequence,
        }
    }
}
