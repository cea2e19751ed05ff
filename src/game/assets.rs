//! Texture roles and animation templates used by the simulation
//!
//! The texture cache owns the GPU textures; the simulation only needs to
//! know which handle plays which role and how big each texture is.

use macroquad::math::Vec2;

use super::animation::Animation;
use super::entity::TextureId;
use super::error::ConfigError;
use crate::settings::AnimationSettings;

/// Pixel size of every cached texture, indexed by `TextureId`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureMetrics {
    sizes: Vec<Vec2>,
}

impl TextureMetrics {
    pub fn new(sizes: Vec<Vec2>) -> Self {
        Self { sizes }
    }

    pub fn size(&self, id: TextureId) -> Vec2 {
        self.sizes.get(id.0).copied().unwrap_or(Vec2::ZERO)
    }

    pub fn width(&self, id: TextureId) -> f32 {
        self.size(id).x
    }

    pub fn height(&self, id: TextureId) -> f32 {
        self.size(id).y
    }

    /// Side of one square frame in a horizontal sprite strip.
    pub fn cell_size(&self, id: TextureId) -> f32 {
        self.height(id)
    }
}

/// Which texture fills each role in the game
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTextures {
    pub player_idle: TextureId,
    pub player_run: TextureId,
    pub player_slide: TextureId,
    pub bullet: TextureId,
    pub ground: TextureId,
    pub panel: TextureId,
    pub grass: TextureId,
    pub brick: TextureId,
    /// Static backdrop behind the parallax layers
    pub background: TextureId,
    /// Scrolling layers, back to front
    pub parallax: Vec<TextureId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub textures: SpriteTextures,
    pub metrics: TextureMetrics,
    /// Indexed by `player_anim::*`
    pub player_animations: Vec<Animation>,
    /// Indexed by `bullet_anim::*`
    pub bullet_animations: Vec<Animation>,
}

impl Assets {
    pub fn new(
        textures: SpriteTextures,
        metrics: TextureMetrics,
        animations: &AnimationSettings,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            textures,
            metrics,
            player_animations: vec![
                animations.player_idle.build()?,
                animations.player_run.build()?,
                animations.player_slide.build()?,
            ],
            bullet_animations: vec![
                animations.bullet_moving.build()?,
                animations.bullet_hit.build()?,
            ],
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animation::{bullet_anim, player_anim};
    use crate::settings::AnimationSpec;

    #[test]
    fn test_animation_tables_follow_settings() {
        let assets = fixtures::assets();
        assert_eq!(assets.player_animations[player_anim::IDLE].frame_count(), 8);
        assert_eq!(assets.player_animations[player_anim::RUN].frame_count(), 4);
        assert_eq!(assets.player_animations[player_anim::SLIDE].frame_count(), 1);
        assert_eq!(assets.bullet_animations[bullet_anim::MOVING].length(), 0.05);
        assert_eq!(assets.bullet_animations[bullet_anim::HIT].length(), 0.15);
    }

    #[test]
    fn test_bad_animation_settings_rejected() {
        let base = fixtures::assets();
        let mut anims = AnimationSettings::default();
        anims.player_run = AnimationSpec::new(4, 0.0);
        assert!(Assets::new(base.textures, base.metrics, &anims).is_err());
    }

    #[test]
    fn test_metrics_lookup() {
        let assets = fixtures::assets();
        assert_eq!(assets.metrics.cell_size(fixtures::BULLET), 8.0);
        assert_eq!(assets.metrics.width(fixtures::PLAYER_IDLE), 256.0);
        assert_eq!(assets.metrics.size(TextureId(999)), Vec2::ZERO);
    }
}
