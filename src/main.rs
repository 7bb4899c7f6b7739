//! Asteroid Arena headless runner
//!
//! Plays a scripted session against the simulation core: an autopilot turns
//! toward the nearest asteroid and fires whenever it is lined up.

use std::path::PathBuf;
use std::process::ExitCode;

use asteroid_arena::render::Frame;
use asteroid_arena::sim::{Arena, Control, GameEvent, InputState, tick};
use asteroid_arena::{GameConfig, Result, consts, heading_toward};
use clap::Parser;
use glam::Vec2;

/// Ticks between autopilot shots
const FIRE_COOLDOWN: u64 = 6;

/// Asteroid Arena simulation runner
#[derive(Parser)]
#[command(version, about = "Runs a scripted asteroid shooter session without a window")]
struct Cli {
    /// JSON config file (missing fields take their defaults)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = consts::ARENA_WIDTH)]
    width: f32,

    #[arg(long, default_value_t = consts::ARENA_HEIGHT)]
    height: f32,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final frame as JSON
    #[arg(long, value_name = "PATH")]
    dump_frame: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Summary {
    fired: u32,
    hits: u32,
    destroyed: u32,
    shape_tests: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let rotation_step = config.craft_rotation_step;

    let mut arena = Arena::new(config, Vec2::new(cli.width, cli.height))?;
    let mut input = InputState::default();
    let mut summary = Summary::default();
    let mut last_shot = 0;

    for _ in 0..cli.ticks {
        if autopilot(&arena, &mut input, rotation_step) && arena.time_ticks >= last_shot + FIRE_COOLDOWN {
            input.press(Control::Fire);
            input.release(Control::Fire);
            last_shot = arena.time_ticks;
        }

        tick(&mut arena, &input.take_tick_input());

        summary.shape_tests += arena.stats.shape_tests;
        for event in &arena.events {
            match event {
                GameEvent::ProjectileFired { .. } => summary.fired += 1,
                GameEvent::AsteroidHit { .. } => summary.hits += 1,
                GameEvent::AsteroidDestroyed { id, position } => {
                    summary.destroyed += 1;
                    log::info!("Tick {}: asteroid {} destroyed at {}", arena.time_ticks, id, position);
                }
            }
        }
    }

    log::info!(
        "Ran {} ticks: {} shots, {} hits, {} asteroids destroyed, {} shape tests, {} asteroids left",
        arena.time_ticks,
        summary.fired,
        summary.hits,
        summary.destroyed,
        summary.shape_tests,
        arena.asteroids.len()
    );

    if let Some(path) = &cli.dump_frame {
        let frame = Frame::capture(&arena);
        std::fs::write(path, serde_json::to_string_pretty(&frame)?)?;
        log::info!(
            "Frame with {} items ({} vertices) written to {}",
            frame.items.len(),
            frame.vertices().len(),
            path.display()
        );
    }
    Ok(())
}

/// Steer toward the nearest asteroid. Returns true when lined up to fire.
fn autopilot(arena: &Arena, input: &mut InputState, rotation_step: f32) -> bool {
    input.release_held();

    let Some(craft) = arena.craft.as_ref().filter(|c| c.is_alive()) else {
        return false;
    };
    let nearest = arena
        .asteroids
        .iter()
        .filter(|a| a.is_alive())
        .min_by(|a, b| {
            let da = a.position().distance_squared(craft.position());
            let db = b.position().distance_squared(craft.position());
            da.total_cmp(&db)
        });
    let Some(target) = nearest else {
        return false;
    };

    // Signed difference in (-180, 180], positive means clockwise
    let wanted = heading_toward(craft.position(), target.position());
    let diff = (wanted - craft.sprite.rotation + 540.0).rem_euclid(360.0) - 180.0;
    if diff.abs() <= rotation_step / 2.0 {
        return true;
    }
    input.press(if diff > 0.0 { Control::TurnRight } else { Control::TurnLeft });
    false
}
