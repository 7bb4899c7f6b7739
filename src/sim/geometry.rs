//! Shape templates and world-space outlines
//!
//! A template is a local-space silhouette centered on the origin. Every
//! frame it is pushed through one affine transform (translate · scale ·
//! rotate) to produce the outline used for both drawing and hit testing.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Vertices used to flatten an ellipse
pub const ELLIPSE_SEGMENTS: usize = 24;

/// Immutable local-space silhouette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon, vertices in order
    Polygon(Vec<Vec2>),
    /// Axis-aligned ellipse centered on the origin
    Ellipse { radii: Vec2 },
}

impl Shape {
    /// Local-space vertices (ellipses are flattened)
    pub fn vertices(&self) -> Vec<Vec2> {
        match self {
            Shape::Polygon(points) => points.clone(),
            Shape::Ellipse { radii } => (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let theta = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
                    Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
                })
                .collect(),
        }
    }
}

/// Combined affine: translate by `position`, scale, then rotate (degrees).
///
/// Applied to a point this rotates first, then scales along the world
/// axes, then translates.
pub fn transform_matrix(position: Vec2, rotation_degrees: f32, scale: Vec2) -> Affine2 {
    Affine2::from_translation(position)
        * Affine2::from_scale(scale)
        * Affine2::from_angle(rotation_degrees.to_radians())
}

/// Build the world-space outline of a template
pub fn transform(template: &Shape, position: Vec2, rotation_degrees: f32, scale: Vec2) -> Outline {
    let matrix = transform_matrix(position, rotation_degrees, scale);
    Outline {
        points: template
            .vertices()
            .into_iter()
            .map(|p| matrix.transform_point2(p))
            .collect(),
    }
}

/// World-space closed polygon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub points: Vec<Vec2>,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.points.len() < 3
    }

    /// Closed edge list (last vertex joins the first)
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points
            .iter()
            .copied()
            .zip(self.points.iter().copied().cycle().skip(1))
    }

    /// Even-odd point containment
    pub fn contains_point(&self, p: Vec2) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Whether the two filled outlines share any area.
    ///
    /// Either some pair of edges crosses, or one outline lies entirely
    /// inside the other (then any of its vertices is contained).
    pub fn intersects(&self, other: &Outline) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        for (a1, a2) in self.edges() {
            for (b1, b2) in other.edges() {
                if segments_intersect(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        other.contains_point(self.points[0]) || self.contains_point(other.points[0])
    }
}

#[inline]
fn orientation(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

#[inline]
fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Segment intersection including touching/collinear overlap
fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}
