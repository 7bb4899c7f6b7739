//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - No rendering or platform dependencies

pub mod background;
pub mod entity;
pub mod geometry;
pub mod input;
pub mod sprite;
pub mod state;
pub mod tick;

pub use background::{StarLayer, Starfield};
pub use entity::{Entity, EntityKind, Templates};
pub use geometry::{Outline, Shape, transform};
pub use input::{Control, InputState, TickInput};
pub use sprite::Sprite;
pub use state::{Arena, GameEvent, TickStats};
pub use tick::tick;
