//! The entity record and the player bookkeeping that travels with a frame.

use bitflags::bitflags;
use ledge_core::{EntityIndex, EntityKind, Facing, Rect, Vec2};

bitflags! {
    /// Per-entity flags used only by doors.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DoorFlags: u8 {
        /// The door can be walked through.
        const OPEN = 1;
    }
}

/// One simulation object.
///
/// A flat struct shared by every kind: fields a kind has no use for stay
/// at their defaults. `kind == None` marks a deleted slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Entity {
    /// What this entity is.
    pub kind: EntityKind,
    /// Position and half extents.
    pub rect: Rect,
    /// Displacement applied per tick.
    pub velocity: Vec2,
    /// Facing direction.
    pub facing: Facing,
    /// Whether a supporting surface was hit by the last downward sweep.
    pub grounded: bool,
    /// Walking speed in world units per tick.
    pub move_speed: f32,
    /// Slot of the Static this entity rests on, in the same frame.
    pub standing_on: Option<EntityIndex>,
    /// Door state.
    pub door: DoorFlags,
}

impl Entity {
    /// An entity of `kind` occupying `rect`, with every other field at rest.
    pub fn new(kind: EntityKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            ..Self::default()
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

    /// Whether the slot holds a living entity.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.kind.is_alive()
    }

    /// Whether the entity is at rest on a support and may walk.
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.grounded && self.velocity == Vec2::ZERO
    }

    /// Put the entity into free flight with velocity `v`.
    pub fn launch(&mut self, v: Vec2) {
        self.velocity = v;
        self.grounded = false;
        self.standing_on = None;
    }
}

/// State of the player that is not part of any single entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerState {
    /// Slot of the controlled Player entity.
    pub entity: Option<EntityIndex>,
    /// Slot of the active PlayerAttack hitbox.
    pub attack: Option<EntityIndex>,
    /// Ticks left before the active attack expires.
    pub attack_ticks: u32,
    /// Set when the player touches an open door; the door's facing names
    /// the neighbouring level. Stays set until the host consumes it.
    pub pending_transition: Option<Facing>,
}
