//! Fixed-capacity bump arenas and double-buffered frames for Ledge.
//!
//! Every byte the simulation touches during a tick lives in memory that was
//! reserved up front. Nothing here frees individual allocations: arenas are
//! reset wholesale.
//!
//! # Architecture
//!
//! ```text
//! FramePair<F> (orchestrator)
//! ├── F × 2 (alternating published/staging)
//! │   └── Arena<Entity>  (bump-allocated entity slots, fixed capacity)
//! └── generation counter (incremented on publish)
//!
//! Arena<u8>            persistent byte arena (save/load staging)
//! ScratchRegion<T>     tick-scoped space for the overlap graph
//! ```
//!
//! # Lifecycle per tick
//!
//! 1. `begin_tick()` resets the staging frame and hands out a
//!    [`TickGuard`] with `&mut` staging and `&` published.
//! 2. The tick writes only through the guard.
//! 3. `publish()` swaps roles: staging becomes "last frame".

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod pingpong;
pub mod scratch;

pub use arena::{Arena, ArenaSpan};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use pingpong::{FrameBuffer, FramePair, TickGuard};
pub use scratch::ScratchRegion;
