//! Physics integrator
//!
//! Gravity, the player's horizontal drive (braking, acceleration, speed
//! clamp) and explicit Euler position integration. This module only writes
//! velocity and position.

use macroquad::math::Vec2;

use super::entity::Entity;
use crate::settings::PhysicsSettings;

/// Horizontal drive requested by the player's input this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveIntent {
    /// -1, 0 or +1
    pub input_direction: f32,
    /// Idle with no input: brake toward zero
    pub brake: bool,
}

impl DriveIntent {
    pub const NONE: DriveIntent = DriveIntent {
        input_direction: 0.0,
        brake: false,
    };
}

pub fn apply_gravity(entity: &mut Entity, physics: &PhysicsSettings, dt: f32) {
    if entity.dynamic {
        entity.velocity += Vec2::new(0.0, physics.gravity) * dt;
    }
}

/// Apply braking, acceleration and the horizontal speed clamp.
///
/// The clamp snaps to `input_direction * max_speed_x`, so an entity moving
/// faster than the cap against fresh input flips direction on the spot, and
/// with no input it stops dead.
pub fn drive(entity: &mut Entity, intent: DriveIntent, physics: &PhysicsSettings, dt: f32) {
    if intent.brake && entity.velocity.x != 0.0 {
        let amount = entity.velocity.x.signum()
            * physics.deceleration_factor
            * entity.acceleration.x
            * dt;
        if entity.velocity.x.abs() < amount.abs() {
            entity.velocity.x = 0.0;
        } else {
            entity.velocity.x -= amount;
        }
    }

    entity.velocity += intent.input_direction * entity.acceleration * dt;

    if entity.velocity.x.abs() > entity.max_speed_x {
        entity.velocity.x = intent.input_direction * entity.max_speed_x;
    }
}

pub fn integrate_position(entity: &mut Entity, dt: f32) {
    entity.position += entity.velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::EntityKind;

    fn mover() -> Entity {
        let mut e = Entity::new(EntityKind::Enemy, Vec2::ZERO);
        e.acceleration = Vec2::new(300.0, 0.0);
        e.max_speed_x = 100.0;
        e.dynamic = true;
        e
    }

    fn drive_right() -> DriveIntent {
        DriveIntent { input_direction: 1.0, brake: false }
    }

    #[test]
    fn test_gravity_only_for_dynamic() {
        let physics = PhysicsSettings::default();
        let mut falling = mover();
        apply_gravity(&mut falling, &physics, 0.1);
        assert!((falling.velocity.y - 50.0).abs() < 1e-4);

        let mut fixed = Entity::new(EntityKind::Level, Vec2::ZERO);
        apply_gravity(&mut fixed, &physics, 0.1);
        assert_eq!(fixed.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_speed_never_exceeds_cap() {
        let physics = PhysicsSettings::default();
        let mut e = mover();
        e.acceleration = Vec2::new(50_000.0, 0.0);
        for _ in 0..20 {
            drive(&mut e, drive_right(), &physics, 0.5);
            assert!(e.velocity.x.abs() <= e.max_speed_x);
        }
        assert_eq!(e.velocity.x, 100.0);

        for _ in 0..20 {
            drive(&mut e, DriveIntent { input_direction: -1.0, brake: false }, &physics, 0.5);
            assert!(e.velocity.x.abs() <= e.max_speed_x);
        }
        assert_eq!(e.velocity.x, -100.0);
    }

    #[test]
    fn test_clamp_uses_input_direction() {
        let physics = PhysicsSettings::default();
        let mut e = mover();
        e.velocity.x = 150.0;
        // Over the cap while steering left: snaps to -max, not +max
        drive(&mut e, DriveIntent { input_direction: -1.0, brake: false }, &physics, 0.01);
        assert_eq!(e.velocity.x, -100.0);

        // Over the cap with no input at all stops dead
        e.velocity.x = 150.0;
        drive(&mut e, DriveIntent::NONE, &physics, 0.01);
        assert_eq!(e.velocity.x, 0.0);
    }

    #[test]
    fn test_brake_reduces_then_snaps_to_zero() {
        let physics = PhysicsSettings::default();
        let mut e = mover();
        e.velocity.x = 50.0;
        let brake = DriveIntent { input_direction: 0.0, brake: true };

        // 1.5 * 300 * 0.1 = 45
        drive(&mut e, brake, &physics, 0.1);
        assert!((e.velocity.x - 5.0).abs() < 1e-4);

        // Remaining speed is below one braking step
        drive(&mut e, brake, &physics, 0.1);
        assert_eq!(e.velocity.x, 0.0);

        e.velocity.x = -50.0;
        drive(&mut e, brake, &physics, 0.1);
        assert!((e.velocity.x + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_position() {
        let mut e = mover();
        e.velocity = Vec2::new(10.0, -20.0);
        integrate_position(&mut e, 0.5);
        assert_eq!(e.position, Vec2::new(5.0, -10.0));
    }
}
