//! Decorative star field
//!
//! Only positions live in the simulation so they can follow arena resizes.

use glam::Vec2;
use rand::Rng;

use crate::color::{Rgba, palette};

/// Stars sharing one colour
#[derive(Debug, Clone)]
pub struct StarLayer {
    pub color: Rgba,
    pub points: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub layers: Vec<StarLayer>,
    /// Diameter of each star
    pub star_size: f32,
}

impl Starfield {
    /// Scatter `count` stars evenly over three colour layers
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, size: Vec2, count: u32, star_size: f32) -> Self {
        let colors = [palette::INDIGO, palette::DARK_BLUE, palette::DARK_RED];
        let per_layer = (count / colors.len() as u32) as usize;

        let layers = colors
            .into_iter()
            .map(|color| StarLayer {
                color,
                points: (0..per_layer)
                    .map(|_| {
                        Vec2::new(
                            rng.random_range(0..size.x.max(1.0) as u32) as f32,
                            rng.random_range(0..size.y.max(1.0) as u32) as f32,
                        )
                    })
                    .collect(),
            })
            .collect();

        Self { layers, star_size }
    }

    /// Stretch every star by the resize ratio
    pub fn rescale(&mut self, ratio: Vec2) {
        for layer in &mut self.layers {
            for point in &mut layer.points {
                *point *= ratio;
            }
        }
    }

    pub fn star_count(&self) -> usize {
        self.layers.iter().map(|l| l.points.len()).sum()
    }
}
