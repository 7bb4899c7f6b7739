//! Triangle generation for outlines and stars

use glam::Vec2;

use super::vertex::Vertex;
use crate::color::Rgba;

/// Fill a star-shaped outline as a fan around `anchor`.
///
/// Asteroid outlines are not convex but are star-shaped around their
/// center, so a fan from the center covers them exactly.
pub fn polygon_fill(points: &[Vec2], anchor: Vec2, color: Rgba) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(anchor, color));
        vertices.push(Vertex::at(a, color));
        vertices.push(Vertex::at(b, color));
    }
    vertices
}

/// Closed outline drawn as one quad per edge
pub fn polygon_stroke(points: &[Vec2], width: f32, color: Rgba) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let dir = (b - a).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        // Two triangles
        vertices.push(Vertex::at(a + perp, color));
        vertices.push(Vertex::at(a - perp, color));
        vertices.push(Vertex::at(b + perp, color));

        vertices.push(Vertex::at(b + perp, color));
        vertices.push(Vertex::at(a - perp, color));
        vertices.push(Vertex::at(b - perp, color));
    }
    vertices
}

/// Axis-aligned square with its top-left corner at `corner`
pub fn square(corner: Vec2, size: f32, color: Rgba) -> Vec<Vertex> {
    let far = corner + Vec2::splat(size);
    vec![
        Vertex::at(corner, color),
        Vertex::at(Vec2::new(far.x, corner.y), color),
        Vertex::at(far, color),
        Vertex::at(corner, color),
        Vertex::at(far, color),
        Vertex::at(Vec2::new(corner.x, far.y), color),
    ]
}
