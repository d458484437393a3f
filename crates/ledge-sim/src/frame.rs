//! The contents of one frame buffer.

use ledge_arena::FrameBuffer;
use ledge_core::TickId;

use crate::collision::CollisionInfo;
use crate::editor::Camera;
use crate::entity::PlayerState;
use crate::store::EntityStore;

/// Everything that is snapshotted per tick.
///
/// Two of these live in a [`FramePair`](ledge_arena::FramePair); the tick
/// reads one and writes the other.
#[derive(Clone, Debug)]
pub struct FrameState {
    /// Tick that produced this frame. `TickId(0)` for a never-written frame.
    pub tick: TickId,
    /// Entity slots.
    pub entities: EntityStore,
    /// Player bookkeeping.
    pub player: PlayerState,
    /// Editor camera.
    pub camera: Camera,
    /// Collision result of the controlled player's last move.
    pub collision_info: CollisionInfo,
}

impl FrameState {
    /// An empty frame with room for `entity_capacity` slots.
    pub fn new(entity_capacity: usize) -> Self {
        Self {
            tick: TickId::default(),
            entities: EntityStore::new(entity_capacity),
            player: PlayerState::default(),
            camera: Camera::default(),
            collision_info: CollisionInfo::default(),
        }
    }
}

impl FrameBuffer for FrameState {
    fn reset(&mut self) {
        self.tick = TickId::default();
        self.entities.clear();
        self.player = PlayerState::default();
        self.camera = Camera::default();
        self.collision_info = CollisionInfo::default();
    }
}
