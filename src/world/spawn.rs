//! Tile-grid scan
//!
//! Turns a validated `TileMap` into a ready-to-tick `Scene`. Grid row 0 is
//! the top of the level; the bottom row sits flush with the bottom of the
//! logical view.

use macroquad::math::Vec2;

use super::level::{LevelError, TileCode, TileMap};
use crate::game::{
    player_anim, Assets, Collider, ConfigError, Entity, EntityKind, ParallaxScroller, Scene,
    TextureId,
};
use crate::game::entity::PlayerData;
use crate::settings::{PlayerSettings, Settings};

/// World position of the top-left corner of a cell.
pub fn cell_position(row: usize, col: usize, rows: usize, tile_size: f32, view_height: f32) -> Vec2 {
    Vec2::new(
        col as f32 * tile_size,
        view_height - (rows - row) as f32 * tile_size,
    )
}

/// Solid level tile with a full-tile collider.
pub fn tile_at(position: Vec2, tile_size: f32, texture: TextureId) -> Entity {
    let mut tile = Entity::new(EntityKind::Level, position);
    tile.collider = Collider {
        offset: Vec2::ZERO,
        size: Vec2::splat(tile_size),
    };
    tile.texture = Some(texture);
    tile
}

/// Drawn-only tile.
pub fn decoration(position: Vec2, texture: TextureId) -> Entity {
    let mut tile = Entity::new(EntityKind::Level, position);
    tile.texture = Some(texture);
    tile
}

pub fn player_at(position: Vec2, assets: &Assets, settings: &PlayerSettings) -> Result<Entity, ConfigError> {
    let mut player = Entity::new(
        EntityKind::Player(PlayerData::new(settings.weapon_cooldown)?),
        position,
    );
    player.dynamic = true;
    player.acceleration = Vec2::new(settings.acceleration, 0.0);
    player.max_speed_x = settings.max_speed_x;
    player.collider = settings.collider.build()?;
    player.animations = assets.player_animations.clone();
    player.current_animation = Some(player_anim::IDLE);
    player.texture = Some(assets.textures.player_idle);
    Ok(player)
}

/// Build the scene for `map`.
pub fn build_scene(map: &TileMap, assets: &Assets, settings: &Settings) -> Result<Scene, LevelError> {
    let ts = map.tile_size;
    let view_height = settings.display.logical_height;
    let textures = &assets.textures;

    let mut level = Vec::new();
    let mut characters = Vec::new();
    let mut background = Vec::new();
    let mut foreground = Vec::new();
    let mut player_index = None;

    for cell in map.cells() {
        let pos = cell_position(cell.at.row, cell.at.col, map.rows, ts, view_height);
        match cell.code {
            TileCode::Ground => level.push(tile_at(pos, ts, textures.ground)),
            TileCode::Panel => level.push(tile_at(pos, ts, textures.panel)),
            TileCode::PlayerSpawn => {
                player_index = Some(characters.len());
                characters.push(player_at(pos, assets, &settings.player)?);
            }
            TileCode::Grass => foreground.push(decoration(pos, textures.grass)),
            TileCode::Brick => background.push(decoration(pos, textures.brick)),
            TileCode::Empty => {}
        }
    }

    log::info!(
        "level {}x{}: {} solid tiles, {} characters, {} background, {} foreground",
        map.cols,
        map.rows,
        level.len(),
        characters.len(),
        background.len(),
        foreground.len()
    );

    let parallax = ParallaxScroller::new(
        &textures.parallax,
        &settings.parallax.factors,
        &assets.metrics,
    );
    let player_index = player_index.ok_or(LevelError::MissingPlayerSpawn)?;
    let scene = Scene::new(ts, level, characters, player_index, parallax)
        .ok_or(LevelError::MissingPlayerSpawn)?;
    Ok(scene.with_decorations(background, foreground))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::assets::fixtures;
    use crate::game::entity::PlayerState;
    use crate::game::scene::LAYER_LEVEL;
    use crate::world::LevelData;

    #[test]
    fn test_cell_position_bottom_anchored() {
        // Five rows of 32px in a 320px view: row 4 is the bottom row
        assert_eq!(cell_position(4, 0, 5, 32.0, 320.0), Vec2::new(0.0, 288.0));
        assert_eq!(cell_position(0, 3, 5, 32.0, 320.0), Vec2::new(96.0, 160.0));
    }

    #[test]
    fn test_reference_scene() {
        let assets = fixtures::assets();
        let settings = Settings::default();
        let map = LevelData::reference().validate().unwrap();
        let scene = build_scene(&map, &assets, &settings).unwrap();

        let player = scene.player();
        assert_eq!(player.position, Vec2::new(0.0, 160.0));
        assert_eq!(player.player_state(), Some(PlayerState::Idle));
        assert_eq!(player.direction, 1.0);
        assert!(player.dynamic);
        assert_eq!(player.acceleration, Vec2::new(300.0, 0.0));
        assert_eq!(player.max_speed_x, 100.0);
        assert_eq!(player.aabb(), macroquad::math::Rect::new(11.0, 166.0, 10.0, 26.0));
        assert_eq!(player.texture, Some(fixtures::PLAYER_IDLE));
        assert_eq!(player.current_animation, Some(player_anim::IDLE));

        assert_eq!(scene.layer(LAYER_LEVEL).len(), 11);
        assert_eq!(scene.foreground_tiles.len(), 3);
        assert_eq!(scene.background_tiles.len(), 12);
        assert_eq!(scene.parallax.layers().len(), 3);

        let ground = &scene.layer(LAYER_LEVEL)[3];
        assert_eq!(ground.texture, Some(fixtures::GROUND));
        assert_eq!(ground.position, Vec2::new(0.0, 288.0));
        assert_eq!(ground.aabb().size(), Vec2::splat(32.0));
        assert!(!ground.dynamic);

        // Decorations have no collider
        assert_eq!(scene.foreground_tiles[0].collider, Collider::default());
        assert_eq!(scene.foreground_tiles[0].texture, Some(fixtures::GRASS));
        assert_eq!(scene.background_tiles[0].texture, Some(fixtures::BRICK));
    }

    #[test]
    fn test_invalid_player_settings_fail_the_build() {
        let assets = fixtures::assets();
        let mut settings = Settings::default();
        settings.player.weapon_cooldown = 0.0;
        let map = LevelData::reference().validate().unwrap();
        assert!(matches!(
            build_scene(&map, &assets, &settings),
            Err(LevelError::Config(ConfigError::InvalidTimer { .. }))
        ));
    }
}
