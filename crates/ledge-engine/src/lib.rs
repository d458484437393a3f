//! Frame driver for Ledge.
//!
//! Ties the memory model, the simulation passes and the persistence codec
//! into a runnable game loop:
//!
//! - [`update_game`] is the tick entry point. It reads the published
//!   frame, writes the staging frame and mutates the persistent
//!   [`WorldInfo`].
//! - [`Simulation`] owns a [`FramePair`](ledge_arena::FramePair) and a
//!   `WorldInfo`, steps them with an input snapshot and halts on the first
//!   fatal error.
//! - [`level`] saves and loads the level through the injected
//!   [`PlatformServices`](ledge_core::PlatformServices);
//!   [`FsPlatform`] is the `std::fs` implementation.
//!
//! The engine emits `tracing` events but never installs a subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod level;
pub mod metrics;
pub mod platform;
pub mod tick;
pub mod world;

pub use config::EngineConfig;
pub use driver::{Simulation, StepResult};
pub use level::{load_level, save_level, LevelError};
pub use metrics::{StepMetrics, TickStats};
pub use platform::FsPlatform;
pub use tick::update_game;
pub use world::WorldInfo;
