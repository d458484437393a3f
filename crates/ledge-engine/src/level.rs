//! Level save and load through the platform services.
//!
//! Both directions stage the level text in the world's persistent byte
//! arena. Save formats straight into the arena and hands the used prefix
//! to the platform. Load reads the whole file into the arena, decodes it
//! and rebuilds the frame's entity store.
//!
//! A level that cannot be used (empty, malformed, or holding more
//! entities than a frame has slots) loads as an empty world and is
//! reported at `warn`. Only arena or store exhaustion is fatal.

use ledge_core::{EntityKind, Facing, Rect, StepError};
use ledge_persist::{decode_bytes, encode_record, EntityRecord, PersistError};
use ledge_sim::{Entity, EntityStore, FrameState, PlayerState, SimConfig};
use thiserror::Error;
use tracing::{info, warn};

use crate::world::WorldInfo;

/// Why a level file was discarded.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LevelError {
    /// The platform returned no bytes.
    #[error("level file is missing or empty")]
    Empty,
    /// The file does not decode.
    #[error(transparent)]
    Decode(#[from] PersistError),
    /// The file, plus the player spawned when it has none, needs more
    /// slots than a frame has.
    #[error("level needs {count} slots but a frame has {capacity}")]
    TooManyEntities {
        /// Slots the level needs.
        count: usize,
        /// Slots per frame.
        capacity: usize,
    },
}

/// Decode `bytes` into records that fit in `capacity` slots.
pub fn parse_level(bytes: &[u8], capacity: usize) -> Result<Vec<EntityRecord>, LevelError> {
    if bytes.is_empty() {
        return Err(LevelError::Empty);
    }
    let records = decode_bytes(bytes)?;
    // A level without a player also needs a slot for the spawned one.
    let has_player = records.iter().any(|r| r.kind == EntityKind::Player);
    let needed = records.len() + usize::from(!has_player);
    if needed > capacity {
        return Err(LevelError::TooManyEntities {
            count: needed,
            capacity,
        });
    }
    Ok(records)
}

/// The persisted fields of a living entity.
pub fn record_of(entity: &Entity) -> EntityRecord {
    EntityRecord::new(entity.kind, entity.rect)
        .with_move_speed(entity.move_speed)
        .with_facing(entity.facing)
}

/// A fresh entity from a persisted record.
pub fn entity_of(record: &EntityRecord) -> Entity {
    Entity::new(record.kind, record.rect)
        .with_move_speed(record.move_speed)
        .with_facing(record.facing)
}

/// Write every living entity of `store` to the configured level path.
///
/// Returns `false` when the text does not fit in the persistent arena or
/// the platform refuses the write. Frame state is never modified.
pub fn save_level(store: &EntityStore, world: &mut WorldInfo) -> bool {
    world.persistent.reset();
    let mut written = 0usize;
    for (_, entity) in store.iter_live() {
        if encode_record(&mut world.persistent, &record_of(entity)).is_err() {
            warn!(
                capacity = world.persistent.capacity(),
                written, "level text does not fit in the persistent arena; save skipped"
            );
            world.persistent.reset();
            return false;
        }
        written += 1;
    }

    let path = world.config.level_path.as_str();
    let ok = world
        .platform
        .write_entire_file(path, world.persistent.as_slice());
    if ok {
        info!(path, entities = written, bytes = world.persistent.used(), "level saved");
    } else {
        warn!(path, "platform failed to write level");
    }
    world.persistent.reset();
    ok
}

/// Replace the frame's world with the contents of the level file.
///
/// The store is cleared first; the first Player in the file becomes the
/// controlled player, and one is spawned at the configured spawn point if
/// the file has none. Returns the number of records loaded.
pub fn load_level(frame: &mut FrameState, world: &mut WorldInfo) -> Result<usize, StepError> {
    world.persistent.reset();
    let capacity = world.persistent.capacity();
    let buffer = world.persistent.alloc_slice(capacity)?;
    let path = world.config.level_path.as_str();
    let read = world.platform.read_entire_file(buffer, path).min(capacity);

    let records = match parse_level(&buffer[..read], frame.entities.capacity()) {
        Ok(records) => records,
        Err(err) => {
            warn!(path, error = %err, "level discarded; starting with an empty world");
            Vec::new()
        }
    };
    world.persistent.reset();

    frame.entities.clear();
    frame.player = PlayerState::default();
    for record in &records {
        let index = frame.entities.spawn(entity_of(record))?;
        if record.kind == EntityKind::Player && frame.player.entity.is_none() {
            frame.player.entity = Some(index);
        }
    }
    ensure_player(frame, &world.config.sim)?;
    info!(path, entities = records.len(), "level loaded");
    Ok(records.len())
}

/// Spawn a controlled player at the spawn point if there is none.
pub fn ensure_player(frame: &mut FrameState, config: &SimConfig) -> Result<(), StepError> {
    let alive = frame
        .player
        .entity
        .and_then(|index| frame.entities.get(index))
        .is_some_and(|e| e.kind == EntityKind::Player);
    if alive {
        return Ok(());
    }
    let player = Entity::new(
        EntityKind::Player,
        Rect::from_parts(config.player_spawn, config.player_radius),
    )
    .with_move_speed(config.player_move_speed)
    .with_facing(Facing::Right);
    frame.player.entity = Some(frame.entities.spawn(player)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use ledge_core::EntityIndex;
    use ledge_test_utils::{LevelBuilder, MemoryPlatform};

    const PATH: &str = EngineConfig::DEFAULT_LEVEL_PATH;

    fn world(platform: &MemoryPlatform) -> WorldInfo {
        WorldInfo::new(EngineConfig::default(), Box::new(platform.clone()))
    }

    #[test]
    fn parse_rejects_empty_and_oversized_levels() {
        assert_eq!(parse_level(b"", 10), Err(LevelError::Empty));
        let text = LevelBuilder::new()
            .static_rect(0.0, 0.0, 1.0, 1.0)
            .static_rect(3.0, 0.0, 1.0, 1.0)
            .build();
        assert_eq!(
            parse_level(text.as_bytes(), 1),
            Err(LevelError::TooManyEntities {
                count: 3,
                capacity: 1
            })
        );
        assert_eq!(parse_level(text.as_bytes(), 3).unwrap().len(), 2);
    }

    #[test]
    fn parse_reserves_a_slot_for_the_spawned_player() {
        let statics = LevelBuilder::new()
            .static_rect(0.0, 0.0, 1.0, 1.0)
            .static_rect(3.0, 0.0, 1.0, 1.0)
            .build();
        assert_eq!(
            parse_level(statics.as_bytes(), 2),
            Err(LevelError::TooManyEntities {
                count: 3,
                capacity: 2
            })
        );
        let with_player = LevelBuilder::new()
            .static_rect(0.0, 0.0, 1.0, 1.0)
            .player(0.0, 3.0)
            .build();
        assert_eq!(parse_level(with_player.as_bytes(), 2).unwrap().len(), 2);
    }

    #[test]
    fn exactly_full_level_without_player_loads_empty() {
        let text = LevelBuilder::new()
            .static_rect(0.0, 0.0, 1.0, 1.0)
            .static_rect(3.0, 0.0, 1.0, 1.0)
            .build();
        let platform = MemoryPlatform::new().with_file(PATH, text);
        let mut world = world(&platform);
        let mut frame = FrameState::new(2);

        assert_eq!(load_level(&mut frame, &mut world).unwrap(), 0);
        assert_eq!(frame.entities.live_count(), 1);
        assert_eq!(frame.entities.count_kind(EntityKind::Player), 1);
    }

    #[test]
    fn load_picks_first_player_and_keeps_order() {
        let text = LevelBuilder::new()
            .static_rect(0.0, 0.0, 1.0, 1.0)
            .player(0.0, 3.0)
            .player(5.0, 3.0)
            .door(4.0, 2.0, Facing::Left)
            .build();
        let platform = MemoryPlatform::new().with_file(PATH, text);
        let mut world = world(&platform);
        let mut frame = FrameState::new(16);

        assert_eq!(load_level(&mut frame, &mut world).unwrap(), 4);
        assert_eq!(frame.player.entity, Some(EntityIndex(1)));
        assert_eq!(frame.entities.live_count(), 4);
        let door = frame.entities.get(EntityIndex(3)).unwrap();
        assert_eq!(door.kind, EntityKind::Door);
        assert_eq!(door.facing, Facing::Left);
        assert_eq!(world.persistent.used(), 0);
    }

    #[test]
    fn missing_file_spawns_default_player() {
        let platform = MemoryPlatform::new();
        let mut world = world(&platform);
        let mut frame = FrameState::new(16);

        assert_eq!(load_level(&mut frame, &mut world).unwrap(), 0);
        let index = frame.player.entity.unwrap();
        let player = frame.entities.get(index).unwrap();
        assert_eq!(player.kind, EntityKind::Player);
        assert_eq!(player.rect, Rect::new(0.0, 3.0, 0.5, 0.5));
        assert_eq!(frame.entities.live_count(), 1);
    }

    #[test]
    fn malformed_file_loads_empty_world() {
        let platform = MemoryPlatform::new().with_file(PATH, "Entity: type=2 posx=oops\n");
        let mut world = world(&platform);
        let mut frame = FrameState::new(16);
        frame
            .entities
            .spawn(Entity::new(EntityKind::Static, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();

        assert_eq!(load_level(&mut frame, &mut world).unwrap(), 0);
        assert_eq!(frame.entities.count_kind(EntityKind::Static), 0);
        assert_eq!(frame.entities.count_kind(EntityKind::Player), 1);
    }

    #[test]
    fn save_writes_only_living_entities() {
        let platform = MemoryPlatform::new();
        let mut world = world(&platform);
        let mut store = EntityStore::new(8);
        store
            .spawn(Entity::new(EntityKind::Static, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();
        let dead = store
            .spawn(Entity::new(EntityKind::Spike, Rect::new(2.0, 0.0, 1.0, 1.0)))
            .unwrap();
        store.delete(dead).unwrap();

        assert!(save_level(&store, &mut world));
        let text = platform.file_string(PATH).unwrap();
        assert_eq!(
            text,
            "Entity: type=2 posx=0 posy=0 radiusx=1 radiusy=1 move_speed=0 facing=0\n"
        );
        assert_eq!(world.persistent.used(), 0);
    }

    #[test]
    fn failed_write_reports_false() {
        let platform = MemoryPlatform::new().with_file(PATH, "previous");
        platform.set_fail_writes(true);
        let mut world = world(&platform);
        let store = EntityStore::new(4);

        assert!(!save_level(&store, &mut world));
        assert_eq!(platform.file_string(PATH).as_deref(), Some("previous"));
    }

    #[test]
    fn save_that_overflows_the_arena_is_skipped() {
        let platform = MemoryPlatform::new();
        let mut config = EngineConfig::default();
        config.arena.persistent_bytes = 16;
        let mut world = WorldInfo::new(config, Box::new(platform.clone()));
        let mut store = EntityStore::new(4);
        store
            .spawn(Entity::new(EntityKind::Static, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();

        assert!(!save_level(&store, &mut world));
        assert_eq!(platform.write_count(), 0);
    }
}
