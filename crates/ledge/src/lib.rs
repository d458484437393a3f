//! Ledge: a deterministic 2D platformer simulation core.
//!
//! This is the facade crate that re-exports the public API of the Ledge
//! sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use ledge::prelude::*;
//!
//! // Platform services that hold a single level file in memory.
//! struct OneFile(Vec<u8>);
//! impl PlatformServices for OneFile {
//!     fn read_entire_file(&mut self, buffer: &mut [u8], _path: &str) -> usize {
//!         if self.0.len() > buffer.len() {
//!             return 0;
//!         }
//!         buffer[..self.0.len()].copy_from_slice(&self.0);
//!         self.0.len()
//!     }
//!     fn write_entire_file(&mut self, _path: &str, bytes: &[u8]) -> bool {
//!         self.0 = bytes.to_vec();
//!         true
//!     }
//! }
//!
//! let level = "Entity: type=2 posx=0 posy=0 radiusx=5 radiusy=1 move_speed=0 facing=0\n";
//! let platform = Box::new(OneFile(level.as_bytes().to_vec()));
//! let mut sim = Simulation::new(EngineConfig::default(), platform).unwrap();
//!
//! let input = InputSnapshot::default().with_down(InputAction::Right);
//! let result = sim.step(&input).unwrap();
//! assert_eq!(result.snapshot.tick, TickId(1));
//! assert_eq!(result.snapshot.entities.count_kind(EntityKind::Player), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ledge-core` | IDs, geometry, kinds, input, `StepError`, `PlatformServices` |
//! | [`arena`] | `ledge-arena` | Bump arena, frame pair, scratch regions |
//! | [`sim`] | `ledge-sim` | Entity store, collision, overlap graph, behaviors, editor |
//! | [`persist`] | `ledge-persist` | Level text codec |
//! | [`engine`] | `ledge-engine` | Tick entry point, driver, level I/O, `FsPlatform` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, geometry and the platform trait (`ledge-core`).
pub use ledge_core as types;

/// Arena, frame pair and scratch storage (`ledge-arena`).
pub use ledge_arena as arena;

/// Simulation semantics (`ledge-sim`).
///
/// [`sim::EntityStore`] holds the entities of one frame;
/// [`sim::run_behaviors`] advances them by one tick.
pub use ledge_sim as sim;

/// Level file codec (`ledge-persist`).
pub use ledge_persist as persist;

/// Frame driver (`ledge-engine`).
///
/// [`engine::Simulation`] for stepping a world, [`engine::update_game`]
/// for driving frames by hand.
pub use ledge_engine as engine;

/// Common imports for typical Ledge usage.
///
/// ```rust
/// use ledge::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use ledge_core::{
        ButtonState, EntityIndex, EntityKind, Facing, InputAction, InputSnapshot, MouseState,
        PlatformServices, Rect, TickId, Vec2,
    };

    // Errors
    pub use ledge_core::StepError;
    pub use ledge_persist::PersistError;
    pub use ledge_sim::ConfigError;

    // Simulation
    pub use ledge_sim::{Entity, EntityStore, FrameState, SimConfig};

    // Engine
    pub use ledge_engine::{EngineConfig, FsPlatform, Simulation, StepMetrics, StepResult};
}
