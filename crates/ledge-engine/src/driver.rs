//! Synchronous frame driver.
//!
//! [`Simulation`] owns the frame pair and the persistent world and runs
//! one [`update_game`] per [`step()`](Simulation::step): begin the tick,
//! run it against the published frame, publish on success.
//!
//! # Failure
//!
//! A fatal [`StepError`] abandons the tick without publishing, so the
//! last published frame stays intact and readable. The driver then
//! halts: every later `step()` returns [`StepError::Halted`] until
//! [`reset()`](Simulation::reset).
//!
//! # Ownership
//!
//! `Simulation` is [`Send`] but all mutation goes through `&mut self`,
//! and [`StepResult`] borrows the published frame, so a caller cannot
//! step while holding a snapshot.

use std::fmt;
use std::time::Instant;

use ledge_arena::FramePair;
use ledge_core::{Facing, InputSnapshot, PlatformServices, StepError, TickId};
use ledge_sim::{ConfigError, FrameState};
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::metrics::StepMetrics;
use crate::tick::update_game;
use crate::world::WorldInfo;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`Simulation::step()`] call.
#[derive(Debug)]
pub struct StepResult<'s> {
    /// The frame this step published.
    pub snapshot: &'s FrameState,
    /// `false` once the simulation asks to stop.
    pub keep_running: bool,
    /// Performance metrics for this step.
    pub metrics: StepMetrics,
}

// ── Simulation ──────────────────────────────────────────────────

/// Single-threaded, deterministic platformer simulation.
///
/// ```no_run
/// use ledge_core::InputSnapshot;
/// use ledge_engine::{EngineConfig, FsPlatform, Simulation};
///
/// let platform = Box::new(FsPlatform::new("levels"));
/// let mut sim = Simulation::new(EngineConfig::default(), platform)?;
/// for _ in 0..60 {
///     let result = sim.step(&InputSnapshot::default())?;
///     if !result.keep_running {
///         break;
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Simulation {
    frames: FramePair<FrameState>,
    world: WorldInfo,
    halted: bool,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Validate `config` and allocate both frames and the world.
    pub fn new(
        config: EngineConfig,
        platform: Box<dyn PlatformServices>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.arena.entity_capacity;
        info!(
            entity_capacity = capacity,
            persistent_bytes = config.arena.persistent_bytes,
            level_path = %config.level_path,
            "simulation created"
        );
        Ok(Self {
            frames: FramePair::new(FrameState::new(capacity), FrameState::new(capacity)),
            world: WorldInfo::new(config, platform),
            halted: false,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run one tick against `input` and publish the result.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that aborted the tick, or
    /// [`StepError::Halted`] if an earlier step already failed.
    pub fn step(&mut self, input: &InputSnapshot) -> Result<StepResult<'_>, StepError> {
        if self.halted {
            return Err(StepError::Halted);
        }
        let start = Instant::now();

        let outcome = {
            let guard = self.frames.begin_tick();
            update_game(guard.this_frame, guard.last_frame, &mut self.world, input)
        };
        let keep_running = match outcome {
            Ok(keep_running) => keep_running,
            Err(err) => {
                self.frames.abandon_tick();
                self.halted = true;
                error!(
                    error = %err,
                    tick = self.frames.last_frame().tick.0 + 1,
                    "step failed; simulation halted"
                );
                return Err(err);
            }
        };
        self.frames.publish()?;

        let published = self.frames.last_frame();
        let metrics = StepMetrics::from_tick(
            self.world.stats,
            start.elapsed().as_micros() as u64,
            published.entities.live_count(),
            published.entities.free_slots().len(),
            self.frames.generation(),
        );
        self.last_metrics = metrics;
        Ok(StepResult {
            snapshot: published,
            keep_running,
            metrics,
        })
    }

    /// Discard every frame and start over from an uninitialised world.
    ///
    /// The next step reloads the level. Clears the halted state.
    pub fn reset(&mut self) -> &FrameState {
        let capacity = self.world.config.arena.entity_capacity;
        self.frames = FramePair::new(FrameState::new(capacity), FrameState::new(capacity));
        self.world.initialized = false;
        self.world.drawing = Default::default();
        self.world.draw_kind = Default::default();
        self.world.stats = Default::default();
        self.halted = false;
        self.last_metrics = StepMetrics::default();
        self.frames.last_frame()
    }

    /// The most recently published frame.
    pub fn snapshot(&self) -> &FrameState {
        self.frames.last_frame()
    }

    /// Tick of the published frame (0 before the first step).
    pub fn current_tick(&self) -> TickId {
        self.frames.last_frame().tick
    }

    /// Whether a fatal error has stopped the simulation.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Direction of the open door the player has walked through, if any.
    pub fn level_transition(&self) -> Option<Facing> {
        self.frames.last_frame().player.pending_transition
    }

    /// Persistent world state.
    pub fn world(&self) -> &WorldInfo {
        &self.world
    }

    /// Mutable access to the persistent world, e.g. to swap the platform.
    pub fn world_mut(&mut self) -> &mut WorldInfo {
        &mut self.world
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("current_tick", &self.current_tick())
            .field("generation", &self.frames.generation())
            .field("halted", &self.halted)
            .finish()
    }
}
