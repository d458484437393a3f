//! Core types and traits for the Ledge platformer simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary used throughout the Ledge workspace:
//! slot and tick identifiers, rectangle geometry, entity kinds, the
//! per-tick input snapshot, the fatal step error, and the injected
//! platform-services trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;
pub mod input;
pub mod kind;
pub mod traits;

pub use error::StepError;
pub use geometry::{Axis, Rect, SideFlags, Vec2};
pub use id::{EntityIndex, TickId};
pub use input::{ButtonState, InputAction, InputSnapshot, MouseState};
pub use kind::{EntityKind, Facing, KindSet};
pub use traits::PlatformServices;
