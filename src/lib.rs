//! Asteroid Arena - simulation core for a 2D asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sprites, collisions, tick pipeline)
//! - `render`: Render sink (world-space shapes and vertex lists)
//! - `config`: Named tunables loaded at startup
//! - `error`: Startup and resize errors

pub mod color;
pub mod config;
pub mod error;
pub mod render;
pub mod sim;

pub use color::Rgba;
pub use config::GameConfig;
pub use error::{ArenaError, Result};

use glam::Vec2;

/// Default tunables (overridable through [`GameConfig`])
pub mod consts {
    /// Base size of every shape, in arena units
    pub const SIZE_UNIT: f32 = 25.0;

    /// Default arena extent
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Craft steering
    pub const CRAFT_SPEED_LIMIT: f32 = 10.0;
    pub const CRAFT_SPEED_STEP: f32 = 1.0;
    pub const CRAFT_ROTATION_STEP: f32 = 20.0;
    pub const CRAFT_HEALTH: i32 = 100;

    /// Asteroids
    pub const ASTEROID_SPEED: f32 = 3.0;
    pub const ASTEROID_HEALTH: i32 = 100;
    pub const ASTEROID_MIN_SIDES: u32 = 4;
    pub const ASTEROID_MAX_SIDES: u32 = 12;

    /// Basic projectile
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_DAMAGE: i32 = 10;

    /// Initial expansion/fade step of a projectile burst
    pub const EFFECT_SPEED: f32 = 2.0;
    /// Asteroid bursts start huge and vanish after a single frame
    pub const ASTEROID_EFFECT_SPEED: f32 = 500.0;

    /// Center distance below which the shape test runs
    pub const HIT_PROXIMITY: f32 = SIZE_UNIT;

    /// Background detail
    pub const STAR_COUNT: u32 = 1200;
    pub const STAR_SIZE: f32 = 2.0;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit forward vector for a heading in degrees.
///
/// 0° points up the screen (negative Y) and angles grow clockwise, so
/// 90° points along +X.
#[inline]
pub fn forward_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Heading in degrees, within [0, 360), that points `from` toward `to`
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    let x_diff = to.x - from.x;
    let y_diff = from.y - to.y;
    wrap_degrees(x_diff.atan2(y_diff).to_degrees())
}
