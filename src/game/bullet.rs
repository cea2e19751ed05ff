//! Bullet spawning
//!
//! Bullets leave the muzzle with the shooter's horizontal speed plus a fixed
//! muzzle speed, fly straight, and are never removed. They take part in
//! physics and animation but not in collision.

use macroquad::math::Vec2;

use super::animation::bullet_anim;
use super::assets::Assets;
use super::entity::{BulletData, Collider, Entity, EntityKind};
use crate::settings::BulletSettings;

/// Build a bullet fired by `shooter`.
pub fn spawn(shooter: &Entity, assets: &Assets, settings: &BulletSettings, tile_size: f32) -> Entity {
    // Blend between the two muzzle offsets: 0 facing left, 1 facing right
    let t = (shooter.direction + 1.0) / 2.0;
    let x_offset = settings.offset_left + settings.offset_right * t;
    let side = assets.metrics.cell_size(assets.textures.bullet).max(0.0);

    let mut bullet = Entity::new(
        EntityKind::Bullet(BulletData::default()),
        shooter.position + Vec2::new(x_offset, tile_size / 2.0 + 1.0),
    );
    bullet.velocity = Vec2::new(shooter.velocity.x + settings.speed * shooter.direction, 0.0);
    bullet.direction = shooter.direction;
    bullet.max_speed_x = settings.max_speed_x;
    bullet.collider = Collider {
        offset: Vec2::ZERO,
        size: Vec2::splat(side),
    };
    bullet.animations = assets.bullet_animations.clone();
    bullet.current_animation = Some(bullet_anim::MOVING);
    bullet.texture = Some(assets.textures.bullet);

    log::debug!(
        "bullet spawned at ({:.1}, {:.1}) vx={:.1}",
        bullet.position.x,
        bullet.position.y,
        bullet.velocity.x
    );
    bullet
}
