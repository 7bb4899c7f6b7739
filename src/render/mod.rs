//! Render sink
//!
//! [`Frame::capture`] reads a settled arena and lists world-space shapes in
//! draw order. [`Frame::vertices`] turns them into a triangle list any
//! backend can upload as-is.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::Serialize;

pub use vertex::Vertex;

use crate::color::Rgba;
use crate::sim::{Arena, Entity, EntityKind};

/// Width of the craft's outline stroke
pub const STROKE_WIDTH: f32 = 1.5;

/// One filled outline, optionally stroked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub points: Vec<Vec2>,
    /// Fan origin for filling (the owning entity's position)
    pub anchor: Vec2,
    pub fill: Rgba,
    pub stroke: Option<Rgba>,
}

/// Stars sharing one colour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarBatch {
    pub color: Rgba,
    pub size: f32,
    pub points: Vec<Vec2>,
}

/// Snapshot of everything visible after a tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub size: Vec2,
    pub tick: u64,
    pub stars: Vec<StarBatch>,
    pub items: Vec<RenderItem>,
}

impl Frame {
    /// Stars first, then asteroids, effects, projectiles and the craft
    pub fn capture(arena: &Arena) -> Self {
        let stars = arena
            .background
            .layers
            .iter()
            .map(|layer| StarBatch {
                color: layer.color,
                size: arena.background.star_size,
                points: layer.points.clone(),
            })
            .collect();

        let mut items = Vec::new();
        for entity in arena.entities().filter(|e| e.is_alive()) {
            push_entity(&mut items, entity, arena.config.craft_stroke_color);
        }

        Self {
            size: arena.size,
            tick: arena.time_ticks,
            stars,
            items,
        }
    }

    /// Tessellate into a single triangle list
    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for batch in &self.stars {
            for &point in &batch.points {
                vertices.extend(shapes::square(point, batch.size, batch.color));
            }
        }
        for item in &self.items {
            vertices.extend(shapes::polygon_fill(&item.points, item.anchor, item.fill));
            if let Some(stroke) = item.stroke {
                vertices.extend(shapes::polygon_stroke(&item.points, STROKE_WIDTH, stroke));
            }
        }
        vertices
    }
}

fn push_entity(items: &mut Vec<RenderItem>, entity: &Entity, craft_stroke: Rgba) {
    let sprite = &entity.sprite;
    if sprite.outline.is_empty() {
        return;
    }

    let item = |points: &[Vec2], fill: Rgba, stroke: Option<Rgba>| RenderItem {
        points: points.to_vec(),
        anchor: sprite.position,
        fill,
        stroke,
    };

    match &entity.kind {
        EntityKind::Craft { .. } => items.push(item(&sprite.outline.points, sprite.color, Some(craft_stroke))),
        EntityKind::Projectile { .. } | EntityKind::Asteroid { .. } => {
            items.push(item(&sprite.outline.points, sprite.color, None));
        }
        EntityKind::DeathEffect { accent, inner, .. } => {
            items.push(item(&sprite.outline.points, sprite.color, None));
            items.push(item(&inner.points, *accent, None));
        }
    }
}
