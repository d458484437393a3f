//! Simulation semantics for Ledge.
//!
//! Everything that gives a frame its meaning lives here: the entity
//! record and the slot store that holds it, the sweep-and-clamp collision
//! primitives, the overlap graph built from a kind-interest table, the
//! per-kind behaviors, and the editor operations that share the store.
//!
//! Nothing in this crate owns a frame pair or talks to the platform; the
//! engine crate drives these pieces in a fixed order once per tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod collision;
pub mod config;
pub mod editor;
pub mod entity;
pub mod frame;
pub mod overlap;
pub mod store;

pub use behavior::{
    cull_shrunk_statics, gather_live, gather_obstacles, run_behaviors, update_doors, TickContext,
};
pub use collision::{
    collided, overlap, resolve_motion, sweep_axis, CollisionInfo, Obstacle, SweepResult,
};
pub use config::{ConfigError, SimConfig};
pub use editor::{draw_obstacle, erase_at, points_to_rect, Camera, DrawKind, Drawing};
pub use entity::{DoorFlags, Entity, PlayerState};
pub use frame::FrameState;
pub use overlap::{InterestTable, OverlapEvent, OverlapGraph};
pub use store::EntityStore;
