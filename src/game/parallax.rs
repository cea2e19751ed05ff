//! Parallax background scrolling
//!
//! Each layer scrolls against the player's horizontal velocity scaled by a
//! per-layer factor; smaller factors read as further away.

use super::assets::TextureMetrics;
use super::entity::TextureId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub texture: TextureId,
    /// Texture width, the wrap distance
    pub width: f32,
    pub factor: f32,
    pub offset: f32,
}

impl ParallaxLayer {
    pub fn new(texture: TextureId, width: f32, factor: f32) -> Self {
        Self {
            texture,
            width,
            factor,
            offset: 0.0,
        }
    }

    pub fn update(&mut self, player_velocity_x: f32, dt: f32) {
        self.offset -= player_velocity_x * self.factor * dt;
        if self.offset <= -self.width {
            self.offset = 0.0;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParallaxScroller {
    layers: Vec<ParallaxLayer>,
}

impl ParallaxScroller {
    /// Pair textures with factors, back to front. Extra entries on either
    /// side are ignored.
    pub fn new(textures: &[TextureId], factors: &[f32], metrics: &TextureMetrics) -> Self {
        let layers = textures
            .iter()
            .zip(factors)
            .map(|(&texture, &factor)| ParallaxLayer::new(texture, metrics.width(texture), factor))
            .collect();
        Self { layers }
    }

    pub fn update(&mut self, player_velocity_x: f32, dt: f32) {
        for layer in &mut self.layers {
            layer.update(player_velocity_x, dt);
        }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }
}
