//! Level-editor operations that share the entity store with gameplay.
//!
//! The editor works in screen space: mouse positions are mapped to the
//! world through the [`Camera`] (`world = screen * scale + camera.pos`).

use ledge_core::{
    EntityIndex, EntityKind, Facing, InputAction, InputSnapshot, MouseState, Rect, StepError, Vec2,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::config::SimConfig;
use crate::entity::Entity;
use crate::store::EntityStore;

// ── Camera ──────────────────────────────────────────────────────

/// View transform from screen to world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World position of the screen origin.
    pub pos: Vec2,
    /// World units per screen unit.
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Move the camera by `speed` along each held pan action.
    pub fn pan(&mut self, input: &InputSnapshot, speed: f32) {
        if input.down(InputAction::CamUp) {
            self.pos.y += speed;
        }
        if input.down(InputAction::CamDown) {
            self.pos.y -= speed;
        }
        if input.down(InputAction::CamRight) {
            self.pos.x += speed;
        }
        if input.down(InputAction::CamLeft) {
            self.pos.x -= speed;
        }
    }

    /// Map a screen point to the world.
    #[inline]
    pub fn screen_to_world_point(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.pos
    }

    /// Map a screen rectangle to the world.
    pub fn screen_to_world_rect(&self, r: Rect) -> Rect {
        Rect::from_parts(self.screen_to_world_point(r.pos), r.radius * self.scale)
    }
}

/// The rectangle spanned by two opposite corners.
pub fn points_to_rect(a: Vec2, b: Vec2) -> Rect {
    Rect::new(
        (a.x + b.x) / 2.0,
        (a.y + b.y) / 2.0,
        (b.x - a.x).abs() / 2.0,
        (b.y - a.y).abs() / 2.0,
    )
}

// ── Drawing ─────────────────────────────────────────────────────

/// What a finished drag places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawKind {
    /// A plain Static.
    #[default]
    Static,
    /// A Static with a Monster standing on it.
    StaticWithMonster,
    /// A Spike.
    Spike,
    /// A Door.
    Door,
}

impl DrawKind {
    /// The next kind in the editor's cycle.
    pub fn next(self) -> Self {
        match self {
            DrawKind::Static => DrawKind::StaticWithMonster,
            DrawKind::StaticWithMonster => DrawKind::Spike,
            DrawKind::Spike => DrawKind::Door,
            DrawKind::Door => DrawKind::Static,
        }
    }
}

/// An in-progress drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drawing {
    /// Whether a drag is in progress.
    pub active: bool,
    /// Screen position where the drag started.
    pub anchor: Vec2,
}

/// Advance the drag state machine and place entities when a drag ends.
///
/// A left press starts a drag at the mouse. A later left release ends
/// it: the spanned screen rectangle is mapped to the world and, unless it
/// is thinner than the cull threshold, placed as `kind`. A right press
/// cancels the drag. Returns the slots created this call.
///
/// Doors face the direction of the drag; the monster placed by
/// [`DrawKind::StaticWithMonster`] faces right and rests on top of the
/// new Static.
pub fn draw_obstacle(
    store: &mut EntityStore,
    drawing: &mut Drawing,
    kind: DrawKind,
    camera: &Camera,
    mouse: &MouseState,
    config: &SimConfig,
) -> Result<SmallVec<[EntityIndex; 2]>, StepError> {
    let mut spawned = SmallVec::new();
    if mouse.right.pressed() {
        drawing.active = false;
        return Ok(spawned);
    }
    if !drawing.active {
        if mouse.left.pressed() {
            drawing.active = true;
            drawing.anchor = mouse.pos;
        }
        return Ok(spawned);
    }
    if !mouse.left.released() {
        return Ok(spawned);
    }
    drawing.active = false;

    let rect = camera.screen_to_world_rect(points_to_rect(drawing.anchor, mouse.pos));
    if rect.radius.x < config.cull_threshold || rect.radius.y < config.cull_threshold {
        return Ok(spawned);
    }
    match kind {
        DrawKind::Static => {
            spawned.push(store.spawn(Entity::new(EntityKind::Static, rect))?);
        }
        DrawKind::StaticWithMonster => {
            let support = store.spawn(Entity::new(EntityKind::Static, rect))?;
            let radius = config.player_radius;
            let mut monster = Entity::new(
                EntityKind::Monster,
                Rect::new(
                    rect.pos.x,
                    rect.top() + radius.y + config.collision_epsilon,
                    radius.x,
                    radius.y,
                ),
            )
            .with_move_speed(config.monster_move_speed)
            .with_facing(Facing::Right);
            monster.grounded = true;
            monster.standing_on = Some(support);
            let monster = store.spawn(monster)?;
            spawned.push(support);
            spawned.push(monster);
        }
        DrawKind::Spike => {
            spawned.push(store.spawn(Entity::new(EntityKind::Spike, rect))?);
        }
        DrawKind::Door => {
            let facing = if mouse.pos.x < drawing.anchor.x {
                Facing::Left
            } else {
                Facing::Right
            };
            spawned.push(store.spawn(Entity::new(EntityKind::Door, rect).with_facing(facing))?);
        }
    }
    debug!(?kind, slots = ?spawned.as_slice(), "editor placed entities");
    Ok(spawned)
}

/// Delete the first non-Player entity containing the world point under
/// the mouse. Returns the deleted slot.
pub fn erase_at(
    store: &mut EntityStore,
    camera: &Camera,
    mouse: &MouseState,
) -> Result<Option<EntityIndex>, StepError> {
    let point = camera.screen_to_world_point(mouse.pos);
    let hit = store
        .iter_live()
        .find(|(_, e)| e.kind != EntityKind::Player && e.rect.contains(point))
        .map(|(i, _)| i);
    if let Some(index) = hit {
        store.delete(index)?;
        debug!(%index, "editor erased entity");
    }
    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledge_core::ButtonState;

    fn mouse(x: f32, y: f32, left: ButtonState, right: ButtonState) -> MouseState {
        MouseState {
            pos: Vec2::new(x, y),
            left,
            right,
        }
    }

    fn idle() -> ButtonState {
        ButtonState::default()
    }

    #[test]
    fn camera_maps_screen_to_world() {
        let camera = Camera {
            pos: Vec2::new(10.0, -2.0),
            scale: 2.0,
        };
        assert_eq!(camera.screen_to_world_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 0.0));
        let r = camera.screen_to_world_rect(Rect::new(0.0, 0.0, 1.0, 0.5));
        assert_eq!(r, Rect::new(10.0, -2.0, 2.0, 1.0));
    }

    #[test]
    fn camera_pans_with_held_actions() {
        let mut camera = Camera::default();
        let input = InputSnapshot::default()
            .with_down(InputAction::CamRight)
            .with_down(InputAction::CamUp);
        camera.pan(&input, 0.5);
        assert_eq!(camera.pos, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn points_to_rect_is_corner_order_independent() {
        let a = points_to_rect(Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0));
        let b = points_to_rect(Vec2::new(2.0, 4.0), Vec2::new(0.0, 0.0));
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(1.0, 2.0, 1.0, 2.0));
    }

    #[test]
    fn draw_kind_cycles() {
        let mut k = DrawKind::Static;
        for _ in 0..4 {
            k = k.next();
        }
        assert_eq!(k, DrawKind::Static);
        assert_eq!(DrawKind::Spike.next(), DrawKind::Door);
    }

    #[test]
    fn drag_places_static() {
        let config = SimConfig::default();
        let mut store = EntityStore::new(8);
        let mut drawing = Drawing::default();
        let camera = Camera::default();

        let start = mouse(0.0, 0.0, ButtonState::PRESSED, idle());
        let out = draw_obstacle(&mut store, &mut drawing, DrawKind::Static, &camera, &start, &config).unwrap();
        assert!(out.is_empty());
        assert!(drawing.active);

        let end = mouse(2.0, 1.0, ButtonState::RELEASED, idle());
        let out = draw_obstacle(&mut store, &mut drawing, DrawKind::Static, &camera, &end, &config).unwrap();
        assert_eq!(out.len(), 1);
        assert!(!drawing.active);
        let e = store.entity(out[0]).unwrap();
        assert_eq!(e.kind, EntityKind::Static);
        assert_eq!(e.rect, Rect::new(1.0, 0.5, 1.0, 0.5));
    }

    #[test]
    fn static_with_monster_places_resting_monster() {
        let config = SimConfig::default();
        let mut store = EntityStore::new(8);
        let mut drawing = Drawing {
            active: true,
            anchor: Vec2::new(-2.0, -1.0),
        };
        let end = mouse(2.0, 1.0, ButtonState::RELEASED, idle());
        let out = draw_obstacle(
            &mut store,
            &mut drawing,
            DrawKind::StaticWithMonster,
            &Camera::default(),
            &end,
            &config,
        )
        .unwrap();
        assert_eq!(out.len(), 2);
        let monster = store.entity(out[1]).unwrap();
        assert_eq!(monster.kind, EntityKind::Monster);
        assert_eq!(monster.standing_on, Some(out[0]));
        assert!(monster.is_resting());
        assert_eq!(monster.facing, Facing::Right);
        assert_eq!(monster.rect.pos.y, 1.0 + 0.5 + config.collision_epsilon);
    }

    #[test]
    fn thin_drag_is_discarded() {
        let config = SimConfig::default();
        let mut store = EntityStore::new(8);
        let mut drawing = Drawing {
            active: true,
            anchor: Vec2::new(0.0, 0.0),
        };
        let end = mouse(3.0, 0.05, ButtonState::RELEASED, idle());
        let out = draw_obstacle(&mut store, &mut drawing, DrawKind::Static, &Camera::default(), &end, &config).unwrap();
        assert!(out.is_empty());
        assert_eq!(store.high_water(), 0);
        assert!(!drawing.active);
    }

    #[test]
    fn right_press_cancels_drag() {
        let config = SimConfig::default();
        let mut store = EntityStore::new(8);
        let mut drawing = Drawing {
            active: true,
            anchor: Vec2::ZERO,
        };
        let cancel = mouse(2.0, 2.0, ButtonState::RELEASED, ButtonState::PRESSED);
        let out = draw_obstacle(&mut store, &mut drawing, DrawKind::Static, &Camera::default(), &cancel, &config).unwrap();
        assert!(out.is_empty());
        assert!(!drawing.active);
    }

    #[test]
    fn door_faces_drag_direction() {
        let config = SimConfig::default();
        let mut store = EntityStore::new(8);
        let mut drawing = Drawing {
            active: true,
            anchor: Vec2::new(2.0, 0.0),
        };
        let end = mouse(0.0, 2.0, ButtonState::RELEASED, idle());
        let out = draw_obstacle(&mut store, &mut drawing, DrawKind::Door, &Camera::default(), &end, &config).unwrap();
        assert_eq!(store.entity(out[0]).unwrap().facing, Facing::Left);
    }

    #[test]
    fn erase_skips_players_and_hits_first_match() {
        let mut store = EntityStore::new(8);
        store
            .spawn(Entity::new(EntityKind::Player, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();
        let a = store
            .spawn(Entity::new(EntityKind::Static, Rect::new(0.0, 0.0, 2.0, 2.0)))
            .unwrap();
        let b = store
            .spawn(Entity::new(EntityKind::Spike, Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();
        let click = mouse(0.5, 0.5, idle(), ButtonState::PRESSED);
        let hit = erase_at(&mut store, &Camera::default(), &click).unwrap();
        assert_eq!(hit, Some(a));
        assert!(!store.entity(a).unwrap().is_alive());
        assert!(store.entity(b).unwrap().is_alive());

        let miss = mouse(50.0, 50.0, idle(), ButtonState::PRESSED);
        assert_eq!(erase_at(&mut store, &Camera::default(), &miss).unwrap(), None);
    }
}
