//! Data types for level persistence.

use ledge_core::{EntityKind, Facing, Rect};

/// The persisted part of one entity.
///
/// Velocity, grounded state, support and door flags are runtime state
/// and are rebuilt by the simulation after a load.
///
/// # Examples
///
/// ```
/// use ledge_core::{EntityKind, Facing, Rect};
/// use ledge_persist::EntityRecord;
///
/// let rec = EntityRecord::new(EntityKind::Static, Rect::new(0.0, 0.0, 4.0, 0.5));
/// assert_eq!(rec.facing, Facing::None);
/// assert_eq!(rec.move_speed, 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityRecord {
    /// Entity kind. `None` records are never written.
    pub kind: EntityKind,
    /// Position and half extents.
    pub rect: Rect,
    /// Walking speed.
    pub move_speed: f32,
    /// Facing direction.
    pub facing: Facing,
}

impl EntityRecord {
    /// A record at rest with no facing.
    pub fn new(kind: EntityKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            move_speed: 0.0,
            facing: Facing::None,
        }
    }

    /// Builder: set the walking speed.
    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Builder: set the facing.
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }
}
