//! Arena configuration parameters.

use serde::Deserialize;

/// Sizes of the fixed memory regions.
///
/// All values are read once when the simulation is constructed; arenas
/// never grow afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Maximum number of entity slots in each frame.
    ///
    /// Default: 2000. Exceeding it is a fatal step error.
    pub entity_capacity: usize,

    /// Size of the persistent byte arena used to stage saves and loads.
    ///
    /// Default: 1 MiB. Bounds the largest level file that can be read.
    pub persistent_bytes: usize,

    /// Initial element capacity of each overlap scratch region.
    ///
    /// Default: 4096. Scratch grows on demand; this only avoids early
    /// reallocation.
    pub scratch_capacity: usize,
}

impl ArenaConfig {
    /// Default number of entity slots per frame.
    pub const DEFAULT_ENTITY_CAPACITY: usize = 2000;

    /// Default persistent arena size in bytes.
    pub const DEFAULT_PERSISTENT_BYTES: usize = 1024 * 1024;

    /// Default initial scratch capacity in elements.
    pub const DEFAULT_SCRATCH_CAPACITY: usize = 4096;
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            entity_capacity: Self::DEFAULT_ENTITY_CAPACITY,
            persistent_bytes: Self::DEFAULT_PERSISTENT_BYTES,
            scratch_capacity: Self::DEFAULT_SCRATCH_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_level_limits() {
        let config = ArenaConfig::default();
        assert_eq!(config.entity_capacity, 2000);
        assert_eq!(config.persistent_bytes, 1 << 20);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ArenaConfig = toml::from_str("entity_capacity = 16").unwrap();
        assert_eq!(config.entity_capacity, 16);
        assert_eq!(config.scratch_capacity, ArenaConfig::DEFAULT_SCRATCH_CAPACITY);
    }
}
