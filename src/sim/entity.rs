//! Entity kinds and their per-kind behaviour
//!
//! Every entity is a [`Sprite`] plus an [`EntityKind`] tag. Movement,
//! outline refresh, damage and death dispatch on the tag, so the set of
//! kinds is closed and every `match` is exhaustive.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::geometry::{Outline, Shape, transform};
use super::input::TickInput;
use super::sprite::Sprite;
use crate::color::Rgba;
use crate::config::GameConfig;
use crate::{forward_vector, heading_toward};

/// Shared silhouettes, built once from the size unit
#[derive(Debug, Clone)]
pub struct Templates {
    pub size_unit: f32,
    pub craft: Shape,
    pub projectile: Shape,
    /// Outer ring of a death burst
    pub burst_outer: Shape,
    /// Inner accent of a death burst
    pub burst_inner: Shape,
}

impl Templates {
    pub fn new(size_unit: f32) -> Self {
        let s = size_unit;
        Self {
            size_unit,
            // Arrowhead pointing up with a notched tail
            craft: Shape::Polygon(vec![
                Vec2::new(0.0, -s / 2.0),
                Vec2::new(s / 4.0, -s / 4.0),
                Vec2::new(s / 2.0, s / 2.0),
                Vec2::new(0.0, s / 3.0),
                Vec2::new(-s / 2.0, s / 2.0),
                Vec2::new(-s / 4.0, -s / 4.0),
            ]),
            // 1:2 ellipse, long axis along the heading
            projectile: Shape::Ellipse {
                radii: Vec2::new(s / 16.0, s / 8.0),
            },
            burst_outer: Shape::Ellipse {
                radii: Vec2::splat(s / 4.0),
            },
            burst_inner: Shape::Ellipse {
                radii: Vec2::splat(s / 6.0),
            },
        }
    }
}

/// Per-kind state
#[derive(Debug, Clone)]
pub enum EntityKind {
    /// Player-controlled ship
    Craft { health: i32 },
    /// Straight-line shot, dies off the arena
    Projectile { damage: i32 },
    /// Irregular polygon drifting toward where the craft was at spawn
    Asteroid { health: i32, template: Shape },
    /// Expanding, fading burst left behind by a destroyed entity
    DeathEffect {
        alpha: u8,
        accent: Rgba,
        /// Outline of the inner accent shape
        inner: Outline,
    },
}

/// One simulated entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub sprite: Sprite,
    pub kind: EntityKind,
}

impl Entity {
    /// Craft at rest, facing up
    pub fn craft(id: u32, position: Vec2, config: &GameConfig, templates: &Templates, scale: Vec2) -> Self {
        let mut craft = Self {
            id,
            sprite: Sprite::new(position, 0.0, 0.0, config.craft_color),
            kind: EntityKind::Craft {
                health: config.craft_health,
            },
        };
        craft.update_outline(templates, scale);
        craft
    }

    /// Basic projectile travelling along `rotation`
    pub fn projectile(
        id: u32,
        position: Vec2,
        rotation: f32,
        config: &GameConfig,
        templates: &Templates,
        scale: Vec2,
    ) -> Self {
        let mut projectile = Self {
            id,
            sprite: Sprite::new(position, rotation, config.projectile_speed, config.projectile_color),
            kind: EntityKind::Projectile {
                damage: config.projectile_damage,
            },
        };
        projectile.update_outline(templates, scale);
        projectile
    }

    /// Asteroid with a freshly rolled silhouette, heading for `target`.
    ///
    /// `config` must already be validated: an empty side range or a
    /// non-positive size unit has no silhouette to roll.
    pub(crate) fn asteroid<R: Rng + ?Sized>(
        id: u32,
        position: Vec2,
        target: Vec2,
        config: &GameConfig,
        rng: &mut R,
        scale: Vec2,
    ) -> Self {
        let template = asteroid_template(config, rng);
        let mut sprite = Sprite::new(
            position,
            heading_toward(position, target),
            config.asteroid_speed,
            config.asteroid_color,
        );
        sprite.refresh_outline(&template, scale);
        Self {
            id,
            sprite,
            kind: EntityKind::Asteroid {
                health: config.asteroid_health,
                template,
            },
        }
    }

    /// Burst at a dead entity's last position, in its colour
    pub fn death_effect(
        id: u32,
        position: Vec2,
        color: Rgba,
        speed: f32,
        templates: &Templates,
        scale: Vec2,
    ) -> Self {
        let mut effect = Self {
            id,
            sprite: Sprite::new(position, 0.0, speed, color),
            kind: EntityKind::DeathEffect {
                alpha: u8::MAX,
                accent: color.accent(),
                inner: Outline::default(),
            },
        };
        effect.update_outline(templates, scale);
        effect
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.sprite.alive
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    /// Remaining health for health-bearing kinds
    pub fn health(&self) -> Option<i32> {
        match self.kind {
            EntityKind::Craft { health } | EntityKind::Asteroid { health, .. } => Some(health),
            EntityKind::Projectile { .. } | EntityKind::DeathEffect { .. } => None,
        }
    }

    /// Damage dealt on a hit (zero for non-projectiles)
    pub fn damage(&self) -> i32 {
        match self.kind {
            EntityKind::Projectile { damage } => damage,
            _ => 0,
        }
    }

    /// Current fade level of a death effect
    pub fn alpha(&self) -> Option<u8> {
        match self.kind {
            EntityKind::DeathEffect { alpha, .. } => Some(alpha),
            _ => None,
        }
    }

    /// Subtract health; dies at zero or below. No-op for kinds without health.
    pub fn damage_health(&mut self, amount: i32) {
        let Self { sprite, kind, .. } = self;
        match kind {
            EntityKind::Craft { health } | EntityKind::Asteroid { health, .. } => {
                *health = health.saturating_sub(amount);
                if *health <= 0 {
                    sprite.die();
                }
            }
            EntityKind::Projectile { .. } | EntityKind::DeathEffect { .. } => {}
        }
    }

    pub fn die(&mut self) {
        self.sprite.die();
    }

    /// Rebuild the world-space outline from the kind's template
    pub fn update_outline(&mut self, templates: &Templates, scale: Vec2) {
        let Self { sprite, kind, .. } = self;
        match kind {
            EntityKind::Craft { .. } => sprite.refresh_outline(&templates.craft, scale),
            EntityKind::Projectile { .. } => sprite.refresh_outline(&templates.projectile, scale),
            EntityKind::Asteroid { template, .. } => sprite.refresh_outline(template, scale),
            EntityKind::DeathEffect { inner, .. } => {
                // Bursts never rotate; their speed is an expansion factor
                let spread = scale * sprite.speed;
                sprite.outline = transform(&templates.burst_outer, sprite.position, 0.0, spread);
                *inner = transform(&templates.burst_inner, sprite.position, 0.0, spread);
            }
        }
    }

    /// Advance one tick. Dead entities stay put.
    pub fn move_step(&mut self, bounds: Vec2, templates: &Templates, scale: Vec2) {
        if !self.sprite.alive {
            return;
        }
        let Self { sprite, kind, .. } = self;
        match kind {
            EntityKind::Craft { .. } | EntityKind::Asteroid { .. } => sprite.advance(scale),
            EntityKind::Projectile { .. } => {
                sprite.advance(scale);
                if !sprite.in_bounds(bounds) {
                    sprite.die();
                }
            }
            EntityKind::DeathEffect { alpha, accent, .. } => {
                fade(sprite, alpha, accent);
                if !sprite.alive {
                    return;
                }
            }
        }
        self.update_outline(templates, scale);
    }

    /// Refresh this entity's outline and test it against `candidate`.
    ///
    /// Death effects never collide.
    pub fn check_hit(&mut self, candidate: &Outline, templates: &Templates, scale: Vec2) -> bool {
        if matches!(self.kind, EntityKind::DeathEffect { .. }) {
            return false;
        }
        self.update_outline(templates, scale);
        self.sprite.outline.intersects(candidate)
    }

    /// Apply one tick of steering input (craft only)
    pub fn apply_input(&mut self, input: &TickInput, config: &GameConfig) {
        if let EntityKind::Craft { .. } = self.kind {
            steer(&mut self.sprite, input, config);
        }
    }

    /// Muzzle point half a size unit ahead of the center
    pub fn turret_position(&self, size_unit: f32) -> Vec2 {
        self.sprite.position + forward_vector(self.sprite.rotation) * (size_unit / 2.0)
    }
}

/// Roll an asteroid silhouette: one vertex per angular slice, each with
/// its own x and y radius between a quarter and half a size unit.
fn asteroid_template<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Shape {
    let sides = rng.random_range(config.asteroid_min_sides..=config.asteroid_max_sides) as usize;
    let min_radius = config.size_unit / 4.0;
    let max_radius = config.size_unit / 2.0;
    let division = TAU / sides as f32;

    Shape::Polygon(
        (0..sides)
            .map(|i| {
                let angle = division * i as f32;
                Vec2::new(
                    rng.random_range(min_radius..max_radius) * angle.cos(),
                    rng.random_range(min_radius..max_radius) * angle.sin(),
                )
            })
            .collect(),
    )
}

/// Discrete turn and thrust with wraparound, clamping and coasting
fn steer(sprite: &mut Sprite, input: &TickInput, config: &GameConfig) {
    let turn = config.craft_rotation_step;
    if input.turn_right {
        sprite.rotation = if sprite.rotation >= 360.0 - turn {
            // Land on the far side of 0 instead of stepping past 360
            turn - (360.0 - sprite.rotation)
        } else {
            sprite.rotation + turn
        };
    } else if input.turn_left {
        sprite.rotation = if sprite.rotation < turn {
            360.0 - (turn - sprite.rotation)
        } else {
            sprite.rotation - turn
        };
    }

    let limit = config.craft_speed_limit;
    let change = config.craft_speed_step;
    if input.thrust_forward {
        sprite.speed = if sprite.speed > limit - change {
            limit
        } else {
            sprite.speed + change
        };
    } else if input.thrust_backward {
        sprite.speed = if sprite.speed - change < -limit {
            -limit
        } else {
            sprite.speed - change
        };
    } else {
        // Coast toward a stop without crossing zero
        let decay = change / 2.0;
        sprite.speed = if sprite.speed.abs() <= decay {
            0.0
        } else {
            sprite.speed - sprite.speed.signum() * decay
        };
    }
}

/// Double the step and spend it from alpha. Dies once the remaining alpha
/// no longer exceeds the step.
fn fade(sprite: &mut Sprite, alpha: &mut u8, accent: &mut Rgba) {
    sprite.speed *= 2.0;
    if sprite.speed < f32::from(*alpha) {
        *alpha -= sprite.speed as u8;
    }
    if f32::from(*alpha) <= sprite.speed {
        *alpha = 0;
        sprite.die();
    }
    sprite.color = sprite.color.with_alpha(*alpha);
    *accent = accent.with_alpha(*alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const RIGHT: TickInput = TickInput {
        turn_right: true,
        turn_left: false,
        thrust_forward: false,
        thrust_backward: false,
        fire: false,
    };
    const LEFT: TickInput = TickInput {
        turn_left: true,
        turn_right: false,
        thrust_forward: false,
        thrust_backward: false,
        fire: false,
    };
    const FORWARD: TickInput = TickInput {
        thrust_forward: true,
        turn_right: false,
        turn_left: false,
        thrust_backward: false,
        fire: false,
    };
    const BACKWARD: TickInput = TickInput {
        thrust_backward: true,
        turn_right: false,
        turn_left: false,
        thrust_forward: false,
        fire: false,
    };

    fn craft_at(rotation: f32, speed: f32) -> (Entity, GameConfig) {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut craft = Entity::craft(1, Vec2::new(400.0, 300.0), &config, &templates, Vec2::ONE);
        craft.sprite.rotation = rotation;
        craft.sprite.speed = speed;
        (craft, config)
    }

    #[test]
    fn test_right_turn_wraps_from_359() {
        let (mut craft, config) = craft_at(359.0, 0.0);
        craft.apply_input(&RIGHT, &config);
        assert_eq!(craft.sprite.rotation, 19.0);

        for k in 1..=40u32 {
            craft.apply_input(&RIGHT, &config);
            let expected = (19 + 20 * k) % 360;
            assert_eq!(craft.sprite.rotation, expected as f32);
        }
    }

    #[test]
    fn test_left_turn_wraps_from_zero() {
        let (mut craft, config) = craft_at(0.0, 0.0);
        craft.apply_input(&LEFT, &config);
        assert_eq!(craft.sprite.rotation, 340.0);

        let (mut craft, config) = craft_at(5.0, 0.0);
        craft.apply_input(&LEFT, &config);
        assert_eq!(craft.sprite.rotation, 345.0);
    }

    #[test]
    fn test_right_beats_left() {
        let (mut craft, config) = craft_at(100.0, 0.0);
        let both = TickInput {
            turn_right: true,
            turn_left: true,
            ..Default::default()
        };
        craft.apply_input(&both, &config);
        assert_eq!(craft.sprite.rotation, 120.0);
    }

    #[test]
    fn test_forward_thrust_reaches_limit_exactly() {
        let (mut craft, config) = craft_at(0.0, 9.5);
        craft.apply_input(&FORWARD, &config);
        assert_eq!(craft.sprite.speed, config.craft_speed_limit);
        craft.apply_input(&FORWARD, &config);
        assert_eq!(craft.sprite.speed, config.craft_speed_limit);
    }

    #[test]
    fn test_backward_thrust_clamps() {
        let (mut craft, config) = craft_at(0.0, -9.25);
        craft.apply_input(&BACKWARD, &config);
        assert_eq!(craft.sprite.speed, -config.craft_speed_limit);
    }

    #[test]
    fn test_coasting_halves_the_step() {
        let (mut craft, config) = craft_at(0.0, 3.0);
        craft.apply_input(&TickInput::default(), &config);
        assert_eq!(craft.sprite.speed, 2.5);

        let (mut craft, config) = craft_at(0.0, -3.0);
        craft.apply_input(&TickInput::default(), &config);
        assert_eq!(craft.sprite.speed, -2.5);

        let (mut craft, config) = craft_at(0.0, 0.0);
        craft.apply_input(&TickInput::default(), &config);
        assert_eq!(craft.sprite.speed, 0.0);
    }

    proptest! {
        #[test]
        fn prop_rotation_stays_in_range(start in 0.0f32..360.0, turns in prop::collection::vec(any::<bool>(), 1..80)) {
            let (mut craft, config) = craft_at(start, 0.0);
            for right in turns {
                craft.apply_input(if right { &RIGHT } else { &LEFT }, &config);
                prop_assert!(craft.sprite.rotation >= 0.0);
                prop_assert!(craft.sprite.rotation < 360.0);
            }
        }

        #[test]
        fn prop_thrust_never_overshoots(start in -10.0f32..=10.0, ticks in 1usize..40) {
            let (mut craft, config) = craft_at(0.0, start);
            for _ in 0..ticks {
                craft.apply_input(&FORWARD, &config);
                prop_assert!(craft.sprite.speed <= config.craft_speed_limit);
            }
            for _ in 0..30 {
                craft.apply_input(&FORWARD, &config);
            }
            prop_assert_eq!(craft.sprite.speed, config.craft_speed_limit);
        }

        #[test]
        fn prop_coasting_is_monotonic(start in -10.0f32..=10.0) {
            let (mut craft, config) = craft_at(0.0, start);
            let mut previous = craft.sprite.speed;
            for _ in 0..30 {
                craft.apply_input(&TickInput::default(), &config);
                let speed = craft.sprite.speed;
                prop_assert!(speed.abs() <= previous.abs());
                // Never flips direction
                prop_assert!(speed == 0.0 || speed.signum() == start.signum());
                previous = speed;
            }
        }
    }

    #[test]
    fn test_turret_is_ahead_of_craft() {
        let (mut craft, config) = craft_at(90.0, 0.0);
        let turret = craft.turret_position(config.size_unit);
        assert!((turret - Vec2::new(412.5, 300.0)).length() < 1e-3);

        craft.sprite.rotation = 0.0;
        let turret = craft.turret_position(config.size_unit);
        assert!((turret - Vec2::new(400.0, 287.5)).length() < 1e-3);
    }

    #[test]
    fn test_asteroid_aims_at_target() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for (spawn, target) in [
            (Vec2::new(50.0, 50.0), Vec2::new(400.0, 300.0)),
            (Vec2::new(790.0, 20.0), Vec2::new(100.0, 580.0)),
            (Vec2::new(400.0, 590.0), Vec2::new(400.0, 10.0)),
            (Vec2::new(0.0, 300.0), Vec2::new(800.0, 300.0)),
        ] {
            let asteroid = Entity::asteroid(1, spawn, target, &config, &mut rng, Vec2::ONE);
            let heading = forward_vector(asteroid.sprite.rotation);
            let wanted = (target - spawn).normalize();
            assert!((heading - wanted).length() < 1e-4, "{spawn} -> {target}");
            assert!((0.0..360.0).contains(&asteroid.sprite.rotation));
        }
    }

    #[test]
    fn test_asteroid_shape_is_fixed_and_bounded() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let templates = Templates::new(config.size_unit);

        for _ in 0..50 {
            let mut asteroid =
                Entity::asteroid(1, Vec2::new(100.0, 100.0), Vec2::new(0.0, 0.0), &config, &mut rng, Vec2::ONE);
            let EntityKind::Asteroid { template, .. } = &asteroid.kind else {
                panic!("not an asteroid");
            };
            let template = template.clone();
            let sides = template.vertices().len() as u32;
            assert!((config.asteroid_min_sides..=config.asteroid_max_sides).contains(&sides));
            for p in template.vertices() {
                assert!(p.length() <= config.size_unit / 2.0 * std::f32::consts::SQRT_2);
            }

            asteroid.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
            let EntityKind::Asteroid { template: after, .. } = &asteroid.kind else {
                panic!("not an asteroid");
            };
            assert_eq!(after, &template);
            // Star-shaped around its center
            assert!(asteroid.sprite.outline.contains_point(asteroid.position()));
        }
    }

    #[test]
    fn test_projectile_dies_out_of_bounds() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut projectile = Entity::projectile(1, Vec2::new(400.0, 5.0), 0.0, &config, &templates, Vec2::ONE);
        projectile.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
        assert!(!projectile.is_alive());
        assert!(projectile.position().y < 0.0);

        // Dead entities no longer move
        let frozen = projectile.position();
        projectile.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
        assert_eq!(projectile.position(), frozen);
    }

    #[test]
    fn test_projectile_burst_fades_in_six_moves() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut effect = Entity::death_effect(
            1,
            Vec2::new(10.0, 10.0),
            palette::STEEL_BLUE,
            config.effect_speed,
            &templates,
            Vec2::ONE,
        );

        let mut alphas = Vec::new();
        while effect.is_alive() {
            effect.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
            alphas.push(effect.alpha().unwrap());
            assert!(alphas.len() <= 8, "fade did not terminate");
        }
        // The last visible frame is 131; there is no near-transparent tail
        assert_eq!(alphas, vec![251, 243, 227, 195, 131, 0]);
        assert_eq!(effect.alpha(), Some(0));
        // Bursts expand in place
        assert_eq!(effect.position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_asteroid_burst_is_a_single_frame() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut effect = Entity::death_effect(
            1,
            Vec2::ZERO,
            palette::SLATE_BLUE,
            config.asteroid_effect_speed,
            &templates,
            Vec2::ONE,
        );
        assert!(effect.is_alive());
        effect.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
        assert!(!effect.is_alive());
    }

    #[test]
    fn test_burst_expands_each_move() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut effect = Entity::death_effect(1, Vec2::ZERO, palette::STEEL_BLUE, 2.0, &templates, Vec2::ONE);
        let width = |e: &Entity| e.sprite.outline.points.iter().map(|p| p.x).fold(f32::MIN, f32::max);

        let before = width(&effect);
        effect.move_step(Vec2::new(800.0, 600.0), &templates, Vec2::ONE);
        assert!((width(&effect) - before * 2.0).abs() < 1e-3);
        let EntityKind::DeathEffect { accent, inner, .. } = &effect.kind else {
            panic!("not an effect");
        };
        assert_eq!(accent.a, effect.sprite.color.a);
        assert!(!inner.is_empty());
    }

    #[test]
    fn test_damage_health_kills_at_zero() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut asteroid = Entity::asteroid(1, Vec2::ZERO, Vec2::ONE, &config, &mut rng, Vec2::ONE);
        asteroid.damage_health(90);
        assert_eq!(asteroid.health(), Some(10));
        assert!(asteroid.is_alive());
        asteroid.damage_health(10);
        assert_eq!(asteroid.health(), Some(0));
        assert!(!asteroid.is_alive());
    }

    #[test]
    fn test_effects_never_collide() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut effect = Entity::death_effect(1, Vec2::ZERO, palette::STEEL_BLUE, 2.0, &templates, Vec2::ONE);
        let outline = effect.sprite.outline.clone();
        assert!(!effect.check_hit(&outline, &templates, Vec2::ONE));
    }

    #[test]
    fn test_overlapping_projectile_hits_asteroid() {
        let config = GameConfig::default();
        let templates = Templates::new(config.size_unit);
        let mut rng = Pcg32::seed_from_u64(5);
        let asteroid = Entity::asteroid(1, Vec2::new(200.0, 200.0), Vec2::ZERO, &config, &mut rng, Vec2::ONE);
        let mut projectile =
            Entity::projectile(2, Vec2::new(202.0, 199.0), 45.0, &config, &templates, Vec2::ONE);
        assert!(projectile.check_hit(&asteroid.sprite.outline, &templates, Vec2::ONE));

        projectile.sprite.position = Vec2::new(260.0, 200.0);
        assert!(!projectile.check_hit(&asteroid.sprite.outline, &templates, Vec2::ONE));
    }
}
