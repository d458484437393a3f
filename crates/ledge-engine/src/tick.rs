//! The tick entry point.
//!
//! [`update_game`] produces "this frame" from "last frame" and one input
//! snapshot. The phase order is fixed:
//!
//! 1. copy living entities and player bookkeeping forward
//! 2. first tick only: load the level and place the camera
//! 3. pan the camera
//! 4. cull shrunk statics
//! 5. gather obstacles and the live slot list
//! 6. build the overlap graph
//! 7. run behaviors
//! 8. open or close doors
//! 9. editor actions (draw, erase, cycle, save, load)
//! 10. reclaim deleted slots onto the free list
//!
//! Last frame is only ever read. Any error aborts the tick with this
//! frame half-written; the caller must not publish it.

use std::time::Instant;

use ledge_core::{InputAction, InputSnapshot, StepError};
use ledge_sim::{
    cull_shrunk_statics, draw_obstacle, erase_at, gather_live, gather_obstacles, run_behaviors,
    update_doors, FrameState, TickContext,
};
use tracing::{debug, debug_span, info};

use crate::level::{load_level, save_level};
use crate::metrics::TickStats;
use crate::world::WorldInfo;

/// Run one tick. Returns `Ok(true)` while the simulation should keep
/// running.
pub fn update_game(
    this_frame: &mut FrameState,
    last_frame: &FrameState,
    world: &mut WorldInfo,
    input: &InputSnapshot,
) -> Result<bool, StepError> {
    let tick = last_frame.tick.next();
    let span = debug_span!("tick", tick = tick.0);
    let _enter = span.enter();

    this_frame.tick = tick;
    this_frame.player = last_frame.player;
    this_frame.camera = last_frame.camera;
    this_frame.collision_info = last_frame.collision_info;
    this_frame.entities.copy_forward(&last_frame.entities)?;

    if !world.initialized {
        initialize(this_frame, world)?;
    }

    let mut stats = TickStats::default();
    let sim = &world.config.sim;
    this_frame.camera.pan(input, sim.camera_pan_speed);

    stats.culled = cull_shrunk_statics(&mut this_frame.entities, sim.cull_threshold);
    gather_obstacles(&this_frame.entities, &mut world.obstacles);
    gather_live(&this_frame.entities, &mut world.live);

    let overlap_start = Instant::now();
    world.overlaps.build(&this_frame.entities, &sim.interest);
    stats.overlap_us = overlap_start.elapsed().as_micros() as u64;
    stats.overlap_events = world.overlaps.event_count();

    let behavior_start = Instant::now();
    let ctx = TickContext {
        config: sim,
        input,
        overlaps: &world.overlaps,
        obstacles: world.obstacles.as_slice(),
    };
    run_behaviors(this_frame, world.live.as_slice(), &ctx)?;
    let monsters = update_doors(&mut this_frame.entities);
    stats.behavior_us = behavior_start.elapsed().as_micros() as u64;

    run_editor(this_frame, world, input)?;

    stats.reclaimed = this_frame.entities.reclaim_deleted();
    debug!(
        live = this_frame.entities.live_count(),
        monsters,
        overlap_events = stats.overlap_events,
        culled = stats.culled,
        reclaimed = stats.reclaimed,
        "tick complete"
    );
    world.stats = stats;
    Ok(true)
}

/// Load the level and place the camera. Runs once per world.
fn initialize(frame: &mut FrameState, world: &mut WorldInfo) -> Result<(), StepError> {
    load_level(frame, world)?;
    frame.camera.scale = world.config.sim.camera_scale;
    world.initialized = true;
    info!(
        entities = frame.entities.live_count(),
        capacity = frame.entities.capacity(),
        "world initialized"
    );
    Ok(())
}

fn run_editor(
    frame: &mut FrameState,
    world: &mut WorldInfo,
    input: &InputSnapshot,
) -> Result<(), StepError> {
    let mouse = &input.mouse;
    let was_drawing = world.drawing.active;
    draw_obstacle(
        &mut frame.entities,
        &mut world.drawing,
        world.draw_kind,
        &frame.camera,
        mouse,
        &world.config.sim,
    )?;
    // A right press that cancels a drag does not also erase.
    if mouse.right.pressed() && !was_drawing {
        erase_at(&mut frame.entities, &frame.camera, mouse)?;
    }

    if input.pressed(InputAction::EditorCycleDrawType) {
        world.draw_kind = world.draw_kind.next();
        debug!(draw_kind = ?world.draw_kind, "draw kind changed");
    }
    if input.pressed(InputAction::EditorSave) {
        save_level(&frame.entities, world);
    }
    if input.pressed(InputAction::EditorLoad) {
        load_level(frame, world)?;
    }
    Ok(())
}
