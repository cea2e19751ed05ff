//! Scene Renderer
//!
//! Draws the scene in logical coordinates, scaled into the window with
//! aspect-preserving letterboxing. Pixel art stays crisp because every
//! texture is loaded with nearest filtering.
//!
//! Draw order: static background, parallax layers, background tiles, level
//! layer, characters, bullets, foreground tiles, then the letterbox bars and
//! the optional debug overlay.

use macroquad::prelude::*;

use super::assets::TextureMetrics;
use super::camera::Camera;
use super::entity::{BulletState, Entity, TextureId};
use super::parallax::ParallaxLayer;
use super::scene::{Scene, LAYER_CHARACTERS, LAYER_LEVEL};
use crate::texture::TextureCache;

/// Window clear colour, a deep violet behind every layer
const BACKDROP: Color = Color::new(20.0 / 255.0, 10.0 / 255.0, 30.0 / 255.0, 1.0);

/// One sprite blit, in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    /// Frame cell inside the texture
    pub source: Rect,
    /// Destination, camera already applied
    pub dest: Rect,
    pub flip_x: bool,
}

/// Where the current animation frame of `entity` lands on screen.
///
/// Sprites are horizontal strips of square cells whose side is the texture
/// height. Entities without a texture draw nothing.
pub fn sprite_draw(entity: &Entity, camera_offset: Vec2, metrics: &TextureMetrics) -> Option<SpriteDraw> {
    let texture = entity.texture?;
    let cell = metrics.cell_size(texture);
    let frame = entity.animation().map_or(0, |a| a.current_frame());
    let screen = entity.position - camera_offset;
    Some(SpriteDraw {
        texture,
        source: Rect::new(frame as f32 * cell, 0.0, cell, cell),
        dest: Rect::new(screen.x, screen.y, cell, cell),
        flip_x: entity.direction < 0.0,
    })
}

/// Aspect-preserving fit of the logical view into the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    /// Top-left of the logical view in window pixels
    pub offset: Vec2,
    logical: Vec2,
}

impl Letterbox {
    pub fn fit(screen: Vec2, logical: Vec2) -> Self {
        let scale = (screen.x / logical.x).min(screen.y / logical.y);
        let offset = (screen - logical * scale) / 2.0;
        Self { scale, offset, logical }
    }

    /// Window-space area covered by the logical view.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.logical.x * self.scale,
            self.logical.y * self.scale,
        )
    }

    /// Map a logical rectangle to window pixels.
    pub fn to_screen(&self, r: Rect) -> Rect {
        Rect::new(
            self.offset.x + r.x * self.scale,
            self.offset.y + r.y * self.scale,
            r.w * self.scale,
            r.h * self.scale,
        )
    }
}

/// Starting x positions of the copies that tile a parallax layer across the
/// view. Three copies cover any offset within one texture width.
pub fn parallax_copies(layer: &ParallaxLayer) -> [f32; 3] {
    let w = layer.width;
    if w <= 0.0 {
        return [0.0; 3];
    }
    let start = layer.offset.rem_euclid(w) - w;
    [start, start + w, start + 2.0 * w]
}

fn blit(textures: &TextureCache, letterbox: &Letterbox, draw: &SpriteDraw) {
    let Some(texture) = textures.get(draw.texture) else {
        return;
    };
    let dest = letterbox.to_screen(draw.dest);
    draw_texture_ex(
        texture,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(dest.w, dest.h)),
            source: Some(draw.source),
            flip_x: draw.flip_x,
            ..Default::default()
        },
    );
}

fn draw_entities(entities: &[Entity], camera: &Camera, textures: &TextureCache, letterbox: &Letterbox) {
    let metrics = textures.metrics();
    for entity in entities {
        if let Some(draw) = sprite_draw(entity, camera.offset(), metrics) {
            blit(textures, letterbox, &draw);
        }
    }
}

/// Draw a whole texture stretched over a logical rectangle.
fn draw_full(textures: &TextureCache, letterbox: &Letterbox, id: TextureId, logical: Rect) {
    let Some(texture) = textures.get(id) else {
        return;
    };
    let dest = letterbox.to_screen(logical);
    draw_texture_ex(
        texture,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(Vec2::new(dest.w, dest.h)),
            ..Default::default()
        },
    );
}

pub fn draw_scene(
    scene: &Scene,
    camera: &Camera,
    textures: &TextureCache,
    background: TextureId,
    debug: bool,
) {
    let view = camera.viewport;
    let letterbox = Letterbox::fit(
        Vec2::new(screen_width(), screen_height()),
        Vec2::new(view.w, view.h),
    );

    clear_background(BACKDROP);
    draw_full(textures, &letterbox, background, Rect::new(0.0, 0.0, view.w, view.h));

    let metrics = textures.metrics();
    for layer in scene.parallax.layers() {
        let h = metrics.height(layer.texture);
        for x in parallax_copies(layer) {
            // Anchored to the bottom of the view
            draw_full(
                textures,
                &letterbox,
                layer.texture,
                Rect::new(x, view.h - h, layer.width, h),
            );
        }
    }

    draw_entities(&scene.background_tiles, camera, textures, &letterbox);
    draw_entities(scene.layer(LAYER_LEVEL), camera, textures, &letterbox);
    draw_entities(scene.layer(LAYER_CHARACTERS), camera, textures, &letterbox);
    draw_entities(scene.bullets(), camera, textures, &letterbox);
    draw_entities(&scene.foreground_tiles, camera, textures, &letterbox);

    draw_letterbox_bars(&letterbox);

    if debug {
        draw_debug_overlay(scene, camera, &letterbox);
    }
}

fn draw_letterbox_bars(letterbox: &Letterbox) {
    let area = letterbox.rect();
    let (sw, sh) = (screen_width(), screen_height());
    if area.x > 0.0 {
        draw_rectangle(0.0, 0.0, area.x, sh, BLACK);
        draw_rectangle(area.x + area.w, 0.0, sw - area.x - area.w, sh, BLACK);
    }
    if area.y > 0.0 {
        draw_rectangle(0.0, 0.0, sw, area.y, BLACK);
        draw_rectangle(0.0, area.y + area.h, sw, sh - area.y - area.h, BLACK);
    }
}

/// Collider outlines and a line of player state.
fn draw_debug_overlay(scene: &Scene, camera: &Camera, letterbox: &Letterbox) {
    let offset = camera.offset();
    let outline = |entity: &Entity, color: Color| {
        let mut r = entity.aabb();
        r.x -= offset.x;
        r.y -= offset.y;
        let r = letterbox.to_screen(r);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, color);
    };

    for entity in scene.layer(LAYER_LEVEL) {
        outline(entity, Color::from_rgba(80, 160, 255, 200));
    }
    for entity in scene.layer(LAYER_CHARACTERS) {
        let color = if entity.grounded { GREEN } else { YELLOW };
        outline(entity, color);
    }
    for entity in scene.bullets() {
        let color = match entity.bullet_state() {
            Some(BulletState::Moving) => RED,
            _ => GRAY,
        };
        outline(entity, color);
    }

    let player = scene.player();
    let area = letterbox.rect();
    draw_text(
        &format!(
            "{:?} pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) grounded {} bullets {}",
            player.player_state(),
            player.position.x,
            player.position.y,
            player.velocity.x,
            player.velocity.y,
            player.grounded,
            scene.bullets().len(),
        ),
        area.x + 5.0,
        area.y + 14.0,
        14.0,
        Color::from_rgba(200, 200, 200, 255),
    );
}
