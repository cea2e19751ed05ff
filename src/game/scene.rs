//! Scene and per-frame tick
//!
//! The scene owns two ordered layers (level geometry, then characters), an
//! append-only bullet list, decoration tiles and the parallax scroller.
//! `tick` is the whole simulation step: every system runs over every entity
//! in fixed order, single-threaded, with one `dt` for the frame.

use super::assets::Assets;
use super::bullet;
use super::collision::{self, GroundChange};
use super::entity::Entity;
use super::input::InputSnapshot;
use super::parallax::ParallaxScroller;
use super::physics;
use super::player;
use crate::settings::Settings;

pub const LAYER_LEVEL: usize = 0;
pub const LAYER_CHARACTERS: usize = 1;

/// Everything a system may read during a tick
pub struct SimContext<'a> {
    pub settings: &'a Settings,
    pub assets: &'a Assets,
    pub input: &'a InputSnapshot,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bullets_spawned: usize,
    /// The player regained ground contact
    pub landed: bool,
    /// Collision corrections applied across all entities
    pub corrections: usize,
}

pub struct Scene {
    layers: [Vec<Entity>; 2],
    bullets: Vec<Entity>,
    /// Drawn behind the layers; never simulated
    pub background_tiles: Vec<Entity>,
    /// Drawn over the layers; never simulated
    pub foreground_tiles: Vec<Entity>,
    player_index: usize,
    tile_size: f32,
    pub parallax: ParallaxScroller,
}

impl Scene {
    /// Assemble a scene. Returns `None` unless `characters[player_index]`
    /// is a player.
    pub fn new(
        tile_size: f32,
        level: Vec<Entity>,
        characters: Vec<Entity>,
        player_index: usize,
        parallax: ParallaxScroller,
    ) -> Option<Self> {
        if !characters.get(player_index)?.is_player() {
            return None;
        }
        Some(Self {
            layers: [level, characters],
            bullets: Vec::new(),
            background_tiles: Vec::new(),
            foreground_tiles: Vec::new(),
            player_index,
            tile_size,
            parallax,
        })
    }

    pub fn with_decorations(mut self, background: Vec<Entity>, foreground: Vec<Entity>) -> Self {
        self.background_tiles = background;
        self.foreground_tiles = foreground;
        self
    }

    pub fn player(&self) -> &Entity {
        &self.layers[LAYER_CHARACTERS][self.player_index]
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.layers[LAYER_CHARACTERS][self.player_index]
    }

    pub fn layer(&self, layer: usize) -> &[Entity] {
        &self.layers[layer]
    }

    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Advance the simulation by `ctx.dt`.
    pub fn tick(&mut self, ctx: &SimContext) -> TickReport {
        let mut report = TickReport::default();
        let tile_size = self.tile_size;

        for layer in [LAYER_LEVEL, LAYER_CHARACTERS] {
            for index in 0..self.layers[layer].len() {
                update_entity(
                    &mut self.layers,
                    layer,
                    index,
                    &mut self.bullets,
                    ctx,
                    tile_size,
                    &mut report,
                );
            }
        }

        // Bullets, including this tick's, move and animate but don't collide
        for bullet in &mut self.bullets {
            physics::apply_gravity(bullet, &ctx.settings.physics, ctx.dt);
            physics::integrate_position(bullet, ctx.dt);
            bullet.step_animation(ctx.dt);
        }

        let player_velocity_x = self.player().velocity.x;
        self.parallax.update(player_velocity_x, ctx.dt);

        report
    }
}

fn update_entity(
    layers: &mut [Vec<Entity>; 2],
    layer: usize,
    index: usize,
    bullets: &mut Vec<Entity>,
    ctx: &SimContext,
    tile_size: f32,
    report: &mut TickReport,
) {
    let physics_settings = &ctx.settings.physics;

    {
        let entity = &mut layers[layer][index];
        physics::apply_gravity(entity, physics_settings, ctx.dt);
        if entity.is_player() {
            let intent = player::react_to_input(entity, ctx.input, physics_settings);
            physics::drive(entity, intent, physics_settings, ctx.dt);
        }
        physics::integrate_position(entity, ctx.dt);
    }

    report.corrections += collision::resolve(layers, layer, index);

    if layers[layer][index].dynamic {
        let change = collision::probe_ground(layers, layer, index, physics_settings.sensor_height);
        let entity = &mut layers[layer][index];
        if change == GroundChange::Landed && entity.is_player() {
            player::land(entity);
            report.landed = true;
        }
    }

    let entity = &mut layers[layer][index];
    if entity.is_player() {
        player::select_sprite(entity, &ctx.assets.textures);
        if player::try_fire(entity, ctx.input, ctx.dt) {
            bullets.push(bullet::spawn(entity, ctx.assets, &ctx.settings.bullet, tile_size));
            report.bullets_spawned += 1;
        }
    }
    entity.step_animation(ctx.dt);
}
