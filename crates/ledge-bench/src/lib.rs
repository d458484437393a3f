//! Benchmark profiles for the Ledge simulation core.
//!
//! - [`reference_level`]: a row of platforms, each carrying a walking
//!   monster, with spikes in the gaps and a door at the far end
//! - [`reference_simulation`]: a [`Simulation`] that has loaded a level
//!   and run one tick

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use ledge_core::{Facing, InputSnapshot};
use ledge_engine::{EngineConfig, Simulation};
use ledge_test_utils::{LevelBuilder, MemoryPlatform};

/// Horizontal distance between platform centers.
pub const PLATFORM_SPACING: f32 = 6.0;

/// Build a level with `platforms` platforms: one monster per platform, a
/// spike below every gap, a ground floor and a door at the end.
///
/// Entity count is `3 * platforms + 3`.
pub fn reference_level(platforms: usize) -> String {
    let width = platforms as f32 * PLATFORM_SPACING;
    let mut level = LevelBuilder::new()
        .static_rect(width / 2.0, -2.0, width / 2.0 + 4.0, 1.0)
        .player(-2.0, 0.0);
    for i in 0..platforms {
        let x = i as f32 * PLATFORM_SPACING;
        level = level
            .static_rect(x, 2.0, 2.0, 0.25)
            .monster(x, 2.751)
            .spike(x + PLATFORM_SPACING / 2.0, -0.75, 0.5, 0.25);
    }
    level.door(width, 0.0, Facing::Right).build()
}

/// A simulation that has loaded [`reference_level`] and stepped once.
pub fn reference_simulation(platforms: usize) -> Result<Simulation, Box<dyn Error>> {
    let mut config = EngineConfig::default();
    config.arena.entity_capacity = config.arena.entity_capacity.max(3 * platforms + 64);
    let platform =
        MemoryPlatform::new().with_file(&config.level_path, reference_level(platforms));
    let mut sim = Simulation::new(config, Box::new(platform))?;
    sim.step(&InputSnapshot::default())?;
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_level_has_expected_entity_count() {
        let text = reference_level(10);
        assert_eq!(text.lines().count(), 33);
    }

    #[test]
    fn reference_simulation_loads_every_entity() {
        let sim = reference_simulation(10).unwrap();
        assert_eq!(sim.snapshot().entities.live_count(), 33);
    }
}
