//! Engine configuration.
//!
//! [`EngineConfig`] gathers the simulation tunables, the arena sizes and
//! the level file location. It loads from TOML with every table optional:
//!
//! ```toml
//! level_path = "levels/one.txt"
//!
//! [sim]
//! gravity = 0.006
//!
//! [arena]
//! entity_capacity = 512
//! ```

use ledge_arena::ArenaConfig;
use ledge_sim::config::require_nonzero;
use ledge_sim::{ConfigError, SimConfig};
use serde::Deserialize;

/// Everything needed to construct a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Physics and gameplay constants.
    pub sim: SimConfig,
    /// Fixed memory region sizes.
    pub arena: ArenaConfig,
    /// Path handed to the platform for level save and load.
    pub level_path: String,
}

impl EngineConfig {
    /// Level file used when none is configured.
    pub const DEFAULT_LEVEL_PATH: &'static str = "level.txt";

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        require_nonzero("arena.entity_capacity", self.arena.entity_capacity)?;
        if self.arena.entity_capacity > u32::MAX as usize {
            return Err(ConfigError::Invalid {
                field: "arena.entity_capacity",
                reason: format!("must fit in a u32 (got {})", self.arena.entity_capacity),
            });
        }
        require_nonzero("arena.persistent_bytes", self.arena.persistent_bytes)?;
        require_nonzero("arena.scratch_capacity", self.arena.scratch_capacity)?;
        if self.level_path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "level_path",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            arena: ArenaConfig::default(),
            level_path: Self::DEFAULT_LEVEL_PATH.to_string(),
        }
    }
}
