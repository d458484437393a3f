//! Headless run: load a level from disk and step it with scripted input.
//!
//! Writes a small level into a temporary directory, walks the player
//! right, throws a few projectiles, saves, and prints per-tick metrics.
//!
//! Run with:
//!   cargo run -p ledge-engine --example headless
//!
//! Set `RUST_LOG=debug` for per-tick trace output.

use ledge_core::{EntityKind, Facing, InputAction, InputSnapshot, Rect};
use ledge_engine::{EngineConfig, FsPlatform, Simulation};
use ledge_persist::{encode_entities, EntityRecord};
use tracing_subscriber::EnvFilter;

fn level_text() -> String {
    let records = [
        EntityRecord::new(EntityKind::Static, Rect::new(0.0, 0.0, 12.0, 1.0)),
        EntityRecord::new(EntityKind::Player, Rect::new(-8.0, 3.0, 0.5, 0.5)).with_move_speed(0.1),
        EntityRecord::new(EntityKind::Static, Rect::new(4.0, 2.0, 1.5, 0.25)),
        EntityRecord::new(EntityKind::Monster, Rect::new(4.0, 2.751, 0.5, 0.5))
            .with_move_speed(0.02)
            .with_facing(Facing::Right),
        EntityRecord::new(EntityKind::Door, Rect::new(10.0, 2.0, 0.5, 1.0)).with_facing(Facing::Right),
    ];
    let mut text = String::new();
    // Formatting into a String cannot fail.
    let _ = encode_entities(&mut text, &records);
    text
}

fn script(tick: u64) -> InputSnapshot {
    let input = InputSnapshot::default();
    match tick {
        0..=40 => input.with_down(InputAction::Right),
        41 | 61 | 81 => input.with_press(InputAction::Throw),
        100 => input.with_press(InputAction::EditorSave),
        _ => input,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::temp_dir().join("ledge-headless");
    std::fs::create_dir_all(&dir)?;
    let config = EngineConfig::default();
    std::fs::write(dir.join(&config.level_path), level_text())?;

    let mut sim = Simulation::new(config, Box::new(FsPlatform::new(&dir)))?;
    for tick in 0..120 {
        let result = sim.step(&script(tick))?;
        let m = result.metrics;
        if tick % 20 == 0 {
            println!(
                "tick {:>3}: live={:<3} free={:<3} overlaps={:<3} total={}us",
                result.snapshot.tick.0, m.live_entities, m.free_slots, m.overlap_events, m.total_us
            );
        }
        if !result.keep_running {
            break;
        }
    }

    let frame = sim.snapshot();
    println!(
        "monsters left: {}, transition: {:?}",
        frame.entities.count_kind(EntityKind::Monster),
        sim.level_transition()
    );
    println!("saved level at {}", dir.join(&sim.world().config.level_path).display());
    Ok(())
}
