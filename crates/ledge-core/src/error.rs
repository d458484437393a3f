//! Fatal tick errors.

use thiserror::Error;

/// A failure that aborts the current tick.
///
/// These are all programming or sizing errors: the staging frame is left
/// unpublished and the driver halts. Recoverable conditions such as a
/// malformed save file never surface as a `StepError`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// An arena allocation exceeded the arena's fixed capacity.
    #[error("arena exhausted: requested {requested}, used {used} of {capacity}")]
    ArenaExhausted {
        /// Elements requested by the failing allocation.
        requested: usize,
        /// Elements already allocated.
        used: usize,
        /// Fixed arena capacity.
        capacity: usize,
    },
    /// The entity store has no free slot and no room to grow.
    #[error("entity capacity of {capacity} exceeded")]
    EntityCapacityExceeded {
        /// Maximum number of entity slots.
        capacity: usize,
    },
    /// An entity index pointed at or past the store's high-water mark.
    #[error("entity index {index} out of range (high water {high_water})")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of slots allocated in the frame.
        high_water: usize,
    },
    /// A frame was published without a tick in progress.
    #[error("frame published without a tick in progress")]
    FrameSequence,
    /// A previous step failed; the simulation no longer advances.
    #[error("simulation halted after a fatal step error")]
    Halted,
}
