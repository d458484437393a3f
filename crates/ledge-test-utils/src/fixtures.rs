//! Reusable level fixtures.
//!
//! [`LevelBuilder`] assembles a list of [`EntityRecord`]s and renders
//! them in the level file format:
//!
//! ```
//! use ledge_test_utils::LevelBuilder;
//!
//! let text = LevelBuilder::new()
//!     .static_rect(0.0, 0.0, 1.0, 1.0)
//!     .player(0.0, 3.0)
//!     .build();
//! assert_eq!(text.lines().count(), 2);
//! ```

use ledge_core::{EntityKind, Facing, Rect};
use ledge_persist::{encode_entities, EntityRecord};

/// Default monster walking speed used by the builder.
pub const MONSTER_SPEED: f32 = 0.02;

/// Default player walking speed used by the builder.
pub const PLAYER_SPEED: f32 = 0.1;

#[derive(Clone, Debug, Default)]
pub struct LevelBuilder {
    records: Vec<EntityRecord>,
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary record.
    pub fn record(mut self, record: EntityRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn static_rect(self, x: f32, y: f32, rx: f32, ry: f32) -> Self {
        self.record(EntityRecord::new(EntityKind::Static, Rect::new(x, y, rx, ry)))
    }

    pub fn player(self, x: f32, y: f32) -> Self {
        self.record(
            EntityRecord::new(EntityKind::Player, Rect::new(x, y, 0.5, 0.5))
                .with_move_speed(PLAYER_SPEED),
        )
    }

    pub fn monster(self, x: f32, y: f32) -> Self {
        self.record(
            EntityRecord::new(EntityKind::Monster, Rect::new(x, y, 0.5, 0.5))
                .with_move_speed(MONSTER_SPEED)
                .with_facing(Facing::Right),
        )
    }

    pub fn spike(self, x: f32, y: f32, rx: f32, ry: f32) -> Self {
        self.record(EntityRecord::new(EntityKind::Spike, Rect::new(x, y, rx, ry)))
    }

    pub fn door(self, x: f32, y: f32, facing: Facing) -> Self {
        self.record(
            EntityRecord::new(EntityKind::Door, Rect::new(x, y, 0.5, 1.0)).with_facing(facing),
        )
    }

    /// The records added so far.
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Render as level file text.
    pub fn build(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = encode_entities(&mut text, &self.records);
        text
    }
}
