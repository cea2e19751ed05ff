//! Player state machine
//!
//! States are idle, running and jumping. Input moves the player between
//! idle and running, a jump edge from either enters jumping, and landing
//! always lands in running. Sliding is not a state: it is the sprite
//! chosen while running against the facing direction.
//!
//! This module writes the player state, facing, sprite selection and the
//! jump impulse; everything else about motion belongs to `physics`.

use super::animation::player_anim;
use super::assets::SpriteTextures;
use super::entity::{Entity, EntityKind, PlayerState};
use super::input::InputSnapshot;
use super::physics::DriveIntent;
use crate::settings::PhysicsSettings;

/// Read this tick's input: latch facing, take the jump edge, switch between
/// idle and running. Returns the drive the integrator should apply.
pub fn react_to_input(
    entity: &mut Entity,
    input: &InputSnapshot,
    physics: &PhysicsSettings,
) -> DriveIntent {
    let input_direction = input.direction();
    if input_direction != 0.0 {
        entity.direction = input_direction;
    }

    let EntityKind::Player(data) = &mut entity.kind else {
        return DriveIntent::NONE;
    };

    if input.jump_pressed && matches!(data.state, PlayerState::Idle | PlayerState::Running) {
        data.state = PlayerState::Jumping;
        entity.velocity.y += physics.jump_force;
        log::debug!("jump at ({:.1}, {:.1})", entity.position.x, entity.position.y);
    }

    let brake = match data.state {
        PlayerState::Idle => {
            if input_direction != 0.0 {
                data.state = PlayerState::Running;
                false
            } else {
                true
            }
        }
        PlayerState::Running => {
            if input_direction == 0.0 {
                data.state = PlayerState::Idle;
            }
            false
        }
        PlayerState::Jumping => false,
    };

    DriveIntent { input_direction, brake }
}

/// Ground contact was just regained.
pub fn land(entity: &mut Entity) {
    if let EntityKind::Player(data) = &mut entity.kind {
        // No landing-to-idle path: the next input tick settles it
        data.state = PlayerState::Running;
        log::debug!("landed at ({:.1}, {:.1})", entity.position.x, entity.position.y);
    }
}

/// Pick texture and animation for the current state.
pub fn select_sprite(entity: &mut Entity, textures: &SpriteTextures) {
    let Some(state) = entity.player_state() else {
        return;
    };
    let sliding = entity.grounded && entity.velocity.x * entity.direction < 0.0;
    let (texture, animation) = match state {
        PlayerState::Idle => (textures.player_idle, player_anim::IDLE),
        PlayerState::Running if sliding => (textures.player_slide, player_anim::SLIDE),
        PlayerState::Running | PlayerState::Jumping => (textures.player_run, player_anim::RUN),
    };
    entity.texture = Some(texture);
    entity.current_animation = Some(animation);
}

/// Tick the weapon cooldown and report whether a shot goes off.
///
/// Fires when fire is held and the cooldown has timed out; firing resets
/// the cooldown. Works in every state, mid-air included.
pub fn try_fire(entity: &mut Entity, input: &InputSnapshot, dt: f32) -> bool {
    let EntityKind::Player(data) = &mut entity.kind else {
        return false;
    };
    data.weapon_timer.step(dt);
    if input.fire_held && data.weapon_timer.is_timeout() {
        data.weapon_timer.reset();
        return true;
    }
    false
}
