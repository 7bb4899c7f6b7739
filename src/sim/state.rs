//! Arena state and entity bookkeeping
//!
//! The arena exclusively owns every entity. Entities are only created and
//! destroyed through the spawn helpers here and the tick pipeline.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::background::Starfield;
use super::entity::{Entity, Templates};
use crate::color::Rgba;
use crate::config::GameConfig;
use crate::error::{ArenaError, Result};

/// Something worth reacting to outside the simulation (audio, score)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    AsteroidHit { asteroid_id: u32, projectile_id: u32, remaining_health: i32 },
    AsteroidDestroyed { id: u32, position: Vec2 },
}

/// Collision-pass counters for the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Asteroid/projectile pairs considered
    pub proximity_checks: u32,
    /// Pairs close enough for the shape test
    pub shape_tests: u32,
    pub hits: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Arena {
    pub config: GameConfig,
    pub templates: Templates,
    /// Current playing-area extent (origin at the top-left corner)
    pub size: Vec2,
    /// Extent at creation; the shared scale is relative to it
    initial_size: Vec2,
    /// Scale applied to every entity's motion and outline
    pub scale: Vec2,
    pub craft: Option<Entity>,
    pub projectiles: Vec<Entity>,
    pub asteroids: Vec<Entity>,
    pub effects: Vec<Entity>,
    pub background: Starfield,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub stats: TickStats,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Arena {
    /// Validate the config, place the craft in the middle and (optionally)
    /// the opening asteroid near the top-left corner.
    pub fn new(config: GameConfig, size: Vec2) -> Result<Self> {
        config.validate()?;
        validate_size(size)?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let background = Starfield::generate(&mut rng, size, config.star_count, config.star_size);
        let templates = Templates::new(config.size_unit);

        let mut arena = Self {
            config,
            templates,
            size,
            initial_size: size,
            scale: Vec2::ONE,
            craft: None,
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            effects: Vec::new(),
            background,
            time_ticks: 0,
            stats: TickStats::default(),
            events: Vec::new(),
            rng,
            next_id: 1,
        };

        arena.spawn_craft(size / 2.0);
        if arena.config.opening_asteroid {
            let corner = Vec2::splat(arena.config.size_unit * 2.0);
            arena.spawn_asteroid(corner);
        }

        log::info!(
            "Arena {}x{} ready (seed {}, {} asteroids)",
            size.x,
            size.y,
            arena.config.seed,
            arena.asteroids.len()
        );
        Ok(arena)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the craft with a fresh one at `position`
    pub fn spawn_craft(&mut self, position: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.craft = Some(Entity::craft(id, position, &self.config, &self.templates, self.scale));
        id
    }

    /// Spawn an asteroid aimed at the craft (or the arena center without one)
    pub fn spawn_asteroid(&mut self, position: Vec2) -> u32 {
        let target = self.craft.as_ref().map_or(self.size / 2.0, Entity::position);
        self.spawn_asteroid_toward(position, target)
    }

    pub fn spawn_asteroid_toward(&mut self, position: Vec2, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        let asteroid = Entity::asteroid(id, position, target, &self.config, &mut self.rng, self.scale);
        log::debug!("Asteroid {} spawned at {} heading {:.1}", id, position, asteroid.sprite.rotation);
        self.asteroids.push(asteroid);
        id
    }

    /// Spawn an asteroid at a random point on the arena edge
    pub fn spawn_asteroid_on_edge(&mut self) -> u32 {
        let position = match self.rng.random_range(0..4u8) {
            0 => Vec2::new(self.rng.random_range(0.0..self.size.x), 0.0),
            1 => Vec2::new(self.size.x, self.rng.random_range(0.0..self.size.y)),
            2 => Vec2::new(self.rng.random_range(0.0..self.size.x), self.size.y),
            _ => Vec2::new(0.0, self.rng.random_range(0.0..self.size.y)),
        };
        self.spawn_asteroid(position)
    }

    /// Fire from the craft's turret along its heading
    pub fn spawn_projectile(&mut self, position: Vec2, rotation: f32) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Entity::projectile(
            id,
            position,
            rotation,
            &self.config,
            &self.templates,
            self.scale,
        ));
        id
    }

    /// Burst at a dead entity's last position
    pub fn spawn_effect(&mut self, position: Vec2, color: Rgba, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.effects.push(Entity::death_effect(
            id,
            position,
            color,
            speed,
            &self.templates,
            self.scale,
        ));
        id
    }

    /// Every entity, in draw order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.asteroids
            .iter()
            .chain(self.effects.iter())
            .chain(self.projectiles.iter())
            .chain(self.craft.iter())
    }

    fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.asteroids
            .iter_mut()
            .chain(self.effects.iter_mut())
            .chain(self.projectiles.iter_mut())
            .chain(self.craft.iter_mut())
    }

    /// Resize the playing area.
    ///
    /// Every position (stars included) is stretched by new/old per axis and
    /// the shared scale becomes new/initial, so all outlines change together.
    pub fn resize(&mut self, new_size: Vec2) -> Result<()> {
        if let Err(err) = validate_size(new_size) {
            log::warn!("Ignoring resize: {err}");
            return Err(err);
        }

        let ratio = new_size / self.size;
        self.size = new_size;
        self.scale = new_size / self.initial_size;
        self.background.rescale(ratio);

        let templates = self.templates.clone();
        let scale = self.scale;
        for entity in self.entities_mut() {
            entity.sprite.position *= ratio;
            entity.update_outline(&templates, scale);
        }

        log::info!(
            "Arena resized to {}x{} (ratio {:.3}x{:.3})",
            new_size.x,
            new_size.y,
            ratio.x,
            ratio.y
        );
        Ok(())
    }
}

fn validate_size(size: Vec2) -> Result<()> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(ArenaError::InvalidArenaSize {
            width: size.x,
            height: size.y,
        })
    }
}
