//! State that outlives every frame.

use std::fmt;

use ledge_arena::{Arena, ScratchRegion};
use ledge_core::{EntityIndex, PlatformServices};
use ledge_sim::{DrawKind, Drawing, Obstacle, OverlapGraph};

use crate::config::EngineConfig;
use crate::metrics::TickStats;

/// Persistent world state shared by every tick.
///
/// Nothing in here is double-buffered: the tick mutates it in place. The
/// frame buffers hold everything that must be snapshotted.
pub struct WorldInfo {
    /// Validated configuration.
    pub config: EngineConfig,
    /// Injected file services.
    pub platform: Box<dyn PlatformServices>,
    /// Byte arena that stages level text for save and load.
    pub persistent: Arena<u8>,
    /// Overlap events for the current tick.
    pub overlaps: OverlapGraph,
    /// Living statics gathered after the cull.
    pub obstacles: ScratchRegion<Obstacle>,
    /// Slots alive when the behavior pass began.
    pub live: ScratchRegion<EntityIndex>,
    /// Editor drag in progress.
    pub drawing: Drawing,
    /// What the next completed drag places.
    pub draw_kind: DrawKind,
    /// Whether the first tick has loaded the level.
    pub initialized: bool,
    /// Stats recorded by the most recent tick.
    pub stats: TickStats,
}

impl WorldInfo {
    /// Allocate the persistent regions described by `config.arena`.
    ///
    /// `config` is assumed to be validated.
    pub fn new(config: EngineConfig, platform: Box<dyn PlatformServices>) -> Self {
        let arena = &config.arena;
        let persistent = Arena::new(arena.persistent_bytes);
        let overlaps = OverlapGraph::new(arena.scratch_capacity);
        let obstacles = ScratchRegion::new(arena.scratch_capacity);
        let live = ScratchRegion::new(arena.entity_capacity);
        Self {
            config,
            platform,
            persistent,
            overlaps,
            obstacles,
            live,
            drawing: Drawing::default(),
            draw_kind: DrawKind::default(),
            initialized: false,
            stats: TickStats::default(),
        }
    }

    /// Heap bytes held by the persistent and scratch regions.
    pub fn memory_bytes(&self) -> usize {
        self.persistent.memory_bytes() + self.obstacles.memory_bytes() + self.live.memory_bytes()
    }
}

impl fmt::Debug for WorldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldInfo")
            .field("config", &self.config)
            .field("persistent_used", &self.persistent.used())
            .field("overlap_events", &self.overlaps.event_count())
            .field("drawing", &self.drawing)
            .field("draw_kind", &self.draw_kind)
            .field("initialized", &self.initialized)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
