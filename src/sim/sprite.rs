//! Base state shared by every renderable entity

use glam::Vec2;

use super::geometry::{Outline, Shape, transform};
use crate::color::Rgba;
use crate::forward_vector;

/// Position, heading and lifecycle of one entity
#[derive(Debug, Clone)]
pub struct Sprite {
    pub position: Vec2,
    /// Heading in degrees, 0 = up, clockwise, kept in [0, 360)
    pub rotation: f32,
    /// Signed units per tick along the heading
    pub speed: f32,
    pub color: Rgba,
    pub alive: bool,
    /// World-space shape from the last refresh
    pub outline: Outline,
}

impl Sprite {
    pub fn new(position: Vec2, rotation: f32, speed: f32, color: Rgba) -> Self {
        Self {
            position,
            rotation,
            speed,
            color,
            alive: true,
            outline: Outline::default(),
        }
    }

    /// Step along the heading, stretched by the arena scale
    pub fn advance(&mut self, scale: Vec2) {
        self.position += forward_vector(self.rotation) * self.speed * scale;
    }

    /// Rebuild the outline from a template at the current pose
    pub fn refresh_outline(&mut self, template: &Shape, scale: Vec2) {
        self.outline = transform(template, self.position, self.rotation, scale);
    }

    pub fn die(&mut self) {
        self.alive = false;
    }

    pub fn distance_to(&self, other: &Sprite) -> f32 {
        self.position.distance(other.position)
    }

    /// Inside the closed rectangle [0, size.x] × [0, size.y]
    pub fn in_bounds(&self, size: Vec2) -> bool {
        self.position.x >= 0.0
            && self.position.x <= size.x
            && self.position.y >= 0.0
            && self.position.y <= size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    #[test]
    fn test_advance_uses_screen_axes() {
        let mut sprite = Sprite::new(Vec2::new(100.0, 100.0), 0.0, 5.0, palette::SLATE_BLUE);
        sprite.advance(Vec2::ONE);
        assert!((sprite.position - Vec2::new(100.0, 95.0)).length() < 1e-4);

        sprite.rotation = 90.0;
        sprite.advance(Vec2::new(2.0, 1.0));
        assert!((sprite.position - Vec2::new(110.0, 95.0)).length() < 1e-4);
    }

    #[test]
    fn test_negative_speed_backs_up() {
        let mut sprite = Sprite::new(Vec2::new(0.0, 0.0), 180.0, -3.0, palette::SLATE_BLUE);
        sprite.advance(Vec2::ONE);
        assert!((sprite.position - Vec2::new(0.0, -3.0)).length() < 1e-4);
    }

    #[test]
    fn test_die_is_idempotent() {
        let mut sprite = Sprite::new(Vec2::ZERO, 0.0, 0.0, palette::SLATE_BLUE);
        sprite.die();
        sprite.die();
        assert!(!sprite.alive);
    }

    #[test]
    fn test_in_bounds_edges() {
        let size = Vec2::new(800.0, 600.0);
        let mut sprite = Sprite::new(Vec2::new(800.0, 0.0), 0.0, 0.0, palette::SLATE_BLUE);
        assert!(sprite.in_bounds(size));
        sprite.position.y = -0.1;
        assert!(!sprite.in_bounds(size));
    }
}
