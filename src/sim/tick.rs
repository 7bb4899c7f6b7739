//! Fixed timestep simulation tick
//!
//! Advances the arena by one step: collisions, cleanup, movement, death
//! conversion, purge, then the optional spawner.

use glam::Vec2;

use super::entity::Entity;
use super::input::TickInput;
use super::state::{Arena, GameEvent, TickStats};
use crate::color::Rgba;

/// Advance the arena by one tick
pub fn tick(arena: &mut Arena, input: &TickInput) {
    arena.time_ticks += 1;
    arena.stats = TickStats::default();
    arena.events.clear();

    // Bursts are spawned after the pass to avoid borrow issues
    let bursts = collide(arena);
    let effect_speed = arena.config.effect_speed;
    for (position, color) in bursts {
        arena.spawn_effect(position, color, effect_speed);
    }

    arena.projectiles.retain(Entity::is_alive);
    arena.effects.retain(Entity::is_alive);

    move_entities(arena, input);

    // Destroyed asteroids leave one burst where they died
    let destroyed: Vec<(u32, Vec2, Rgba)> = arena
        .asteroids
        .iter()
        .filter(|a| !a.is_alive())
        .map(|a| (a.id, a.position(), a.sprite.color))
        .collect();
    let asteroid_effect_speed = arena.config.asteroid_effect_speed;
    for (id, position, color) in destroyed {
        log::debug!("Asteroid {} destroyed at {}", id, position);
        arena.spawn_effect(position, color, asteroid_effect_speed);
        arena.events.push(GameEvent::AsteroidDestroyed { id, position });
    }

    arena.asteroids.retain(Entity::is_alive);
    arena.projectiles.retain(Entity::is_alive);
    arena.effects.retain(Entity::is_alive);

    let interval = u64::from(arena.config.asteroid_spawn_interval);
    if interval > 0 && arena.time_ticks % interval == 0 {
        arena.spawn_asteroid_on_edge();
    }
}

/// Test every live asteroid against every projectile left after cleanup.
///
/// Returns the projectile bursts to spawn (position, colour).
fn collide(arena: &mut Arena) -> Vec<(Vec2, Rgba)> {
    let Arena {
        asteroids,
        projectiles,
        templates,
        config,
        stats,
        events,
        scale,
        ..
    } = arena;

    let mut bursts = Vec::new();
    for asteroid in asteroids.iter_mut().filter(|a| a.is_alive()) {
        asteroid.update_outline(templates, *scale);

        // A projectile that already hit keeps testing; every overlap counts
        for projectile in projectiles.iter_mut() {
            stats.proximity_checks += 1;
            if asteroid.sprite.distance_to(&projectile.sprite) > config.hit_proximity {
                continue;
            }
            stats.shape_tests += 1;
            if !asteroid.check_hit(&projectile.sprite.outline, templates, *scale) {
                continue;
            }

            stats.hits += 1;
            asteroid.damage_health(projectile.damage());
            projectile.die();
            bursts.push((projectile.position(), projectile.sprite.color));

            let remaining_health = asteroid.health().unwrap_or(0);
            log::debug!(
                "Projectile {} hit asteroid {} ({} health left)",
                projectile.id,
                asteroid.id,
                remaining_health
            );
            events.push(GameEvent::AsteroidHit {
                asteroid_id: asteroid.id,
                projectile_id: projectile.id,
                remaining_health,
            });
        }
    }
    bursts
}

fn move_entities(arena: &mut Arena, input: &TickInput) {
    let bounds = arena.size;
    let scale = arena.scale;

    for effect in &mut arena.effects {
        effect.move_step(bounds, &arena.templates, scale);
    }

    if input.fire {
        fire(arena);
    }

    for projectile in &mut arena.projectiles {
        projectile.move_step(bounds, &arena.templates, scale);
    }

    if let Some(craft) = arena.craft.as_mut() {
        if craft.is_alive() {
            craft.apply_input(input, &arena.config);
        }
        craft.move_step(bounds, &arena.templates, scale);
    }

    for asteroid in &mut arena.asteroids {
        asteroid.move_step(bounds, &arena.templates, scale);
    }
}

fn fire(arena: &mut Arena) {
    let Some(craft) = arena.craft.as_ref().filter(|c| c.is_alive()) else {
        return;
    };
    let turret = craft.turret_position(arena.config.size_unit);
    let rotation = craft.sprite.rotation;

    let id = arena.spawn_projectile(turret, rotation);
    log::debug!("Projectile {} fired from {} heading {:.0}", id, turret, rotation);
    arena.events.push(GameEvent::ProjectileFired { id });
}
