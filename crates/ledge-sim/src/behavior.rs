//! Per-kind entity behaviors.
//!
//! [`run_behaviors`] dispatches on each entity's kind once per tick, in
//! slot order, over the slots that were alive when the pass began.
//! Entities spawned during the pass (attack hitboxes, projectiles) start
//! acting on the next tick; entities deleted during the pass are skipped
//! when their turn comes.
//!
//! The passes that bracket it are separate functions so the driver can
//! order them: [`cull_shrunk_statics`] runs before obstacles are gathered,
//! [`update_doors`] runs after every monster has had its turn.

use ledge_arena::ScratchRegion;
use ledge_core::{
    Axis, EntityIndex, EntityKind, Facing, InputAction, InputSnapshot, Rect, SideFlags, StepError,
    Vec2,
};

use crate::collision::{resolve_motion, sweep_axis, Obstacle};
use crate::config::SimConfig;
use crate::entity::{DoorFlags, Entity};
use crate::frame::FrameState;
use crate::overlap::OverlapGraph;
use crate::store::EntityStore;

/// Read-only inputs shared by every behavior in one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    /// Tunables.
    pub config: &'a SimConfig,
    /// This tick's input.
    pub input: &'a InputSnapshot,
    /// Overlap events built at the start of the pass.
    pub overlaps: &'a OverlapGraph,
    /// Living statics, gathered after the cull.
    pub obstacles: &'a [Obstacle],
}

// ── Bracketing passes ───────────────────────────────────────────

/// Delete every Static with a half extent below `threshold`. Returns the
/// number culled.
pub fn cull_shrunk_statics(store: &mut EntityStore, threshold: f32) -> usize {
    let mut culled = 0;
    for e in store.entities_mut() {
        if e.kind == EntityKind::Static
            && (e.rect.radius.x < threshold || e.rect.radius.y < threshold)
        {
            e.kind = EntityKind::None;
            culled += 1;
        }
    }
    culled
}

/// Collect the living statics into `out` (which is reset first).
pub fn gather_obstacles(store: &EntityStore, out: &mut ScratchRegion<Obstacle>) {
    out.reset();
    for (index, e) in store.iter_live() {
        if e.kind == EntityKind::Static {
            out.push(Obstacle {
                index,
                rect: e.rect,
            });
        }
    }
}

/// Collect the slots of every living entity into `out` (which is reset
/// first).
pub fn gather_live(store: &EntityStore, out: &mut ScratchRegion<EntityIndex>) {
    out.reset();
    for (index, _) in store.iter_live() {
        out.push(index);
    }
}

/// Open every door iff no monster is alive. Returns the live monster count.
pub fn update_doors(store: &mut EntityStore) -> usize {
    let monsters = store.count_kind(EntityKind::Monster);
    let open = monsters == 0;
    for e in store.entities_mut() {
        if e.kind == EntityKind::Door {
            e.door.set(DoorFlags::OPEN, open);
        }
    }
    monsters
}

// ── Dispatcher ──────────────────────────────────────────────────

/// Run one tick of behavior for each slot in `live`.
pub fn run_behaviors(
    frame: &mut FrameState,
    live: &[EntityIndex],
    ctx: &TickContext<'_>,
) -> Result<(), StepError> {
    for &index in live {
        match frame.entities.entity(index)?.kind {
            EntityKind::Player => update_player(frame, index, ctx)?,
            EntityKind::PlayerAttack => update_player_attack(frame, index)?,
            EntityKind::Monster => update_monster(&mut frame.entities, index, ctx)?,
            EntityKind::Projectile => update_projectile(&mut frame.entities, index, ctx)?,
            EntityKind::Static | EntityKind::Spike | EntityKind::Door | EntityKind::None => {}
        }
    }
    Ok(())
}

/// `-1` when facing left, `1` otherwise.
fn forward_sign(facing: Facing) -> f32 {
    if facing == Facing::Left {
        -1.0
    } else {
        1.0
    }
}

/// Vertical velocity after one tick of gravity.
fn fall(vy: f32, config: &SimConfig) -> f32 {
    (vy - config.gravity).max(-config.terminal_velocity)
}

/// Hitbox directly in front of `owner`.
fn attack_rect(owner: &Rect, facing: Facing, radius: Vec2) -> Rect {
    let offset = forward_sign(facing) * (owner.radius.x + radius.x);
    Rect::from_parts(owner.pos + Vec2::new(offset, 0.0), radius)
}

// ── Player ──────────────────────────────────────────────────────

fn update_player(
    frame: &mut FrameState,
    index: EntityIndex,
    ctx: &TickContext<'_>,
) -> Result<(), StepError> {
    let config = ctx.config;
    let input = ctx.input;
    let controlled = frame.player.entity == Some(index);
    let mut e = *frame.entities.entity(index)?;

    let mut intent = 0.0;
    if controlled {
        if input.down(InputAction::Left) {
            intent -= 1.0;
        }
        if input.down(InputAction::Right) {
            intent += 1.0;
        }
        if intent > 0.0 {
            e.facing = Facing::Right;
        } else if intent < 0.0 {
            e.facing = Facing::Left;
        }
    }
    e.velocity.x = intent * e.move_speed;
    if e.grounded {
        e.velocity.y = 0.0;
        if controlled && input.down(InputAction::Up) {
            e.velocity.y = config.jump_velocity;
        }
    }
    e.velocity.y = fall(e.velocity.y, config);

    let (rect, info) = resolve_motion(e.rect, e.velocity, ctx.obstacles, config.collision_epsilon);
    e.rect = rect;
    if info.sides.contains(SideFlags::UP) && e.velocity.y > 0.0 {
        e.velocity.y = 0.0;
    }
    e.grounded = info.landed();
    e.standing_on = if e.grounded { info.y_other } else { None };
    *frame.entities.entity_mut(index)? = e;

    if !controlled {
        return Ok(());
    }
    frame.collision_info = info;

    for event in ctx.overlaps.events_for(index) {
        if event.other_kind != EntityKind::Door {
            continue;
        }
        let door = frame.entities.entity(event.other)?;
        if door.door.contains(DoorFlags::OPEN) {
            frame.player.pending_transition = Some(door.facing);
        }
    }

    // Forget an attack whose slot was taken over (e.g. by a level load).
    if let Some(attack) = frame.player.attack {
        let still_ours = frame
            .entities
            .get(attack)
            .is_some_and(|a| a.kind == EntityKind::PlayerAttack);
        if !still_ours {
            frame.player.attack = None;
            frame.player.attack_ticks = 0;
        }
    }

    if input.pressed(InputAction::Attack) && frame.player.attack.is_none() {
        let hitbox = Entity::new(
            EntityKind::PlayerAttack,
            attack_rect(&e.rect, e.facing, config.attack_radius),
        )
        .with_facing(e.facing);
        frame.player.attack = Some(frame.entities.spawn(hitbox)?);
        frame.player.attack_ticks = config.attack_duration;
    }

    if input.pressed(InputAction::Throw) {
        let sign = forward_sign(e.facing);
        let facing = if sign < 0.0 { Facing::Left } else { Facing::Right };
        let mut projectile = Entity::new(
            EntityKind::Projectile,
            Rect::from_parts(e.rect.pos, config.projectile_radius),
        )
        .with_facing(facing);
        projectile.velocity = Vec2::new(sign * config.projectile_speed.x, config.projectile_speed.y);
        frame.entities.spawn(projectile)?;
    }
    Ok(())
}

// ── PlayerAttack ────────────────────────────────────────────────

fn update_player_attack(frame: &mut FrameState, index: EntityIndex) -> Result<(), StepError> {
    let owner = frame
        .player
        .entity
        .and_then(|p| frame.entities.get(p))
        .filter(|p| p.kind == EntityKind::Player)
        .copied();
    let Some(owner) = owner.filter(|_| frame.player.attack == Some(index)) else {
        // Orphaned hitbox: nobody will ever expire it.
        return frame.entities.delete(index);
    };

    frame.player.attack_ticks = frame.player.attack_ticks.saturating_sub(1);
    if frame.player.attack_ticks == 0 {
        frame.player.attack = None;
        return frame.entities.delete(index);
    }
    let hitbox = frame.entities.entity_mut(index)?;
    hitbox.rect = attack_rect(&owner.rect, hitbox.facing, hitbox.rect.radius);
    Ok(())
}

// ── Monster / Projectile ────────────────────────────────────────

fn update_monster(
    store: &mut EntityStore,
    index: EntityIndex,
    ctx: &TickContext<'_>,
) -> Result<(), StepError> {
    let config = ctx.config;
    let mut e = *store.entity(index)?;

    for event in ctx.overlaps.events_for(index) {
        match event.other_kind {
            EntityKind::Spike => return store.delete(index),
            EntityKind::PlayerAttack => {
                let sign = forward_sign(store.entity(event.other)?.facing);
                e.launch(Vec2::new(sign * config.knockback, config.knockback_lift));
            }
            EntityKind::Projectile => {
                let vx = store.entity(event.other)?.velocity.x;
                let sign = if vx < 0.0 { -1.0 } else { 1.0 };
                e.launch(Vec2::new(sign * config.knockback, config.knockback_lift));
            }
            _ => {}
        }
    }

    let walked = e.is_resting() && walk(&mut e, store, ctx)?;
    if !walked {
        fly(&mut e, ctx);
    }
    if e.rect.pos.y < config.kill_plane_y {
        return store.delete(index);
    }
    *store.entity_mut(index)? = e;
    Ok(())
}

fn update_projectile(
    store: &mut EntityStore,
    index: EntityIndex,
    ctx: &TickContext<'_>,
) -> Result<(), StepError> {
    let mut e = *store.entity(index)?;
    fly(&mut e, ctx);
    if e.rect.pos.y < ctx.config.kill_plane_y {
        return store.delete(index);
    }
    *store.entity_mut(index)? = e;
    Ok(())
}

/// Walk along the support. Returns `false` (and clears `grounded`) if the
/// support is gone.
fn walk(e: &mut Entity, store: &EntityStore, ctx: &TickContext<'_>) -> Result<bool, StepError> {
    let epsilon = ctx.config.collision_epsilon;
    let support = match e.standing_on.and_then(|i| store.get(i)) {
        Some(s) if s.kind == EntityKind::Static => s.rect,
        _ => {
            e.grounded = false;
            e.standing_on = None;
            return Ok(false);
        }
    };

    let sign = e.facing.horizontal_sign();
    if sign != 0.0 {
        let sweep = sweep_axis(e.rect, sign * e.move_speed, Axis::X, ctx.obstacles, epsilon);
        e.rect = sweep.rect;
        if sweep.touched.touched_side() {
            e.facing = e.facing.reversed();
        }
    }

    // bit 0: hangs past the left edge, bit 1: past the right edge
    let mut clipped = 0u8;
    if e.rect.left() < support.left() {
        clipped |= 0b01;
    }
    if e.rect.right() > support.right() {
        clipped |= 0b10;
    }
    match clipped {
        0b11 => {
            e.rect.pos.x = support.pos.x;
            e.facing = Facing::Down;
        }
        0b10 => {
            e.rect.pos.x = support.right() - e.rect.radius.x;
            e.facing = Facing::Left;
        }
        0b01 => {
            e.rect.pos.x = support.left() + e.rect.radius.x;
            e.facing = Facing::Right;
        }
        _ => {}
    }
    e.rect.pos.y = support.top() + e.rect.radius.y + epsilon;
    Ok(true)
}

/// Free flight: gravity, sweep both axes, bounce off walls, settle on
/// landing.
fn fly(e: &mut Entity, ctx: &TickContext<'_>) {
    let config = ctx.config;
    e.velocity.y = fall(e.velocity.y, config);
    let (rect, info) = resolve_motion(e.rect, e.velocity, ctx.obstacles, config.collision_epsilon);
    e.rect = rect;
    if info.sides.touched_side() {
        e.velocity.x = -e.velocity.x;
    }
    if info.sides.contains(SideFlags::UP) && e.velocity.y > 0.0 {
        e.velocity.y = 0.0;
    }
    if info.landed() {
        e.grounded = true;
        e.standing_on = info.y_other;
        e.velocity.y = 0.0;
        e.velocity.x *= config.ground_friction;
        if e.velocity.x.abs() < config.stop_velocity {
            e.velocity.x = 0.0;
        }
    } else {
        e.grounded = false;
        e.standing_on = None;
    }
}
