//! Collision System
//!
//! Axis-aligned rectangle tests between entity colliders, resolved along the
//! axis of least penetration, plus the grounded probe under each dynamic
//! entity.
//!
//! Only a player overlapping level geometry is pushed out. Every other kind
//! pairing still reports the contact but leaves both entities alone.
//!
//! The pair scan mutates the moving entity while it walks the rest of the
//! scene, so one entity overlapping several others is corrected once per
//! overlap, in container order. Later checks see the already-corrected
//! position.

use macroquad::math::Rect;

use super::entity::{Entity, KindTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One detected overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub other: KindTag,
    pub overlap: Rect,
    pub axis: Axis,
    /// Whether a response moved the entity
    pub resolved: bool,
}

/// Change in ground contact reported by `probe_ground`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundChange {
    Landed,
    LeftGround,
    Unchanged,
}

/// Overlap of two rectangles with positive area; touching edges don't count.
pub fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
    a.intersect(*b).filter(|r| r.w > 0.0 && r.h > 0.0)
}

/// Test `entity` against an obstacle and apply the response for the pair.
pub fn respond(entity: &mut Entity, other: KindTag, other_rect: Rect) -> Option<Contact> {
    let overlap = intersection(&entity.aabb(), &other_rect)?;
    let axis = if overlap.w < overlap.h {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };

    let resolved = match (entity.tag(), other) {
        (KindTag::Player, KindTag::Level) => {
            push_out(entity, axis, overlap);
            true
        }
        // Contacts between other kinds have no response yet
        _ => false,
    };

    Some(Contact {
        other,
        overlap,
        axis,
        resolved,
    })
}

/// Move back against the velocity along `axis` and stop on that axis.
fn push_out(entity: &mut Entity, axis: Axis, overlap: Rect) {
    match axis {
        Axis::Horizontal => {
            if entity.velocity.x > 0.0 {
                entity.position.x -= overlap.w;
            } else if entity.velocity.x < 0.0 {
                entity.position.x += overlap.w;
            }
            entity.velocity.x = 0.0;
        }
        Axis::Vertical => {
            if entity.velocity.y > 0.0 {
                entity.position.y -= overlap.h;
            } else if entity.velocity.y < 0.0 {
                entity.position.y += overlap.h;
            }
            entity.velocity.y = 0.0;
        }
    }
}

/// Run `layers[layer][index]` against every other entity in `layers`.
/// Returns the number of corrections applied.
pub fn resolve(layers: &mut [Vec<Entity>], layer: usize, index: usize) -> usize {
    let mut corrections = 0;
    for other_layer in 0..layers.len() {
        for other_index in 0..layers[other_layer].len() {
            if (other_layer, other_index) == (layer, index) {
                continue;
            }
            let (tag, rect) = {
                let other = &layers[other_layer][other_index];
                (other.tag(), other.aabb())
            };
            if let Some(contact) = respond(&mut layers[layer][index], tag, rect) {
                log::trace!(
                    "{:?} contact, {:?} overlap {}x{}, resolved {}",
                    contact.other,
                    contact.axis,
                    contact.overlap.w,
                    contact.overlap.h,
                    contact.resolved
                );
                if contact.resolved {
                    corrections += 1;
                }
            }
        }
    }
    corrections
}

/// Thin strip directly under an entity's collider.
pub fn ground_probe(entity: &Entity, sensor_height: f32) -> Rect {
    let rect = entity.aabb();
    Rect::new(rect.x, rect.y + rect.h, rect.w, sensor_height)
}

/// Probe for ground under `layers[layer][index]` and update `grounded`.
pub fn probe_ground(
    layers: &mut [Vec<Entity>],
    layer: usize,
    index: usize,
    sensor_height: f32,
) -> GroundChange {
    let probe = ground_probe(&layers[layer][index], sensor_height);
    let found_ground = layers.iter().enumerate().any(|(l, entities)| {
        entities
            .iter()
            .enumerate()
            .any(|(i, other)| (l, i) != (layer, index) && intersection(&probe, &other.aabb()).is_some())
    });

    let entity = &mut layers[layer][index];
    match (entity.grounded, found_ground) {
        (false, true) => {
            entity.grounded = true;
            GroundChange::Landed
        }
        (true, false) => {
            entity.grounded = false;
            GroundChange::LeftGround
        }
        _ => GroundChange::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{Collider, EntityKind, PlayerData};
    use macroquad::math::Vec2;

    fn player_at(x: f32, y: f32, size: f32) -> Entity {
        let mut e = Entity::new(EntityKind::Player(PlayerData::new(0.1).unwrap()), Vec2::new(x, y));
        e.collider = Collider::square(size).unwrap();
        e.dynamic = true;
        e
    }

    fn tile_at(x: f32, y: f32) -> Entity {
        let mut e = Entity::new(EntityKind::Level, Vec2::new(x, y));
        e.collider = Collider::square(32.0).unwrap();
        e
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(intersection(&a, &b), None);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(intersection(&a, &c), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_horizontal_push_clears_overlap() {
        // Player running right into a wall: overlap 3 wide, 10 tall
        let wall = tile_at(100.0, 0.0);
        let mut p = player_at(93.0, 5.0, 10.0);
        p.velocity = Vec2::new(80.0, 0.0);

        let contact = respond(&mut p, wall.tag(), wall.aabb()).unwrap();
        assert_eq!(contact.axis, Axis::Horizontal);
        assert!(contact.resolved);
        assert!((p.position.x - 90.0).abs() < 1e-4);
        assert_eq!(p.velocity.x, 0.0);
        assert_eq!(intersection(&p.aabb(), &wall.aabb()), None);
        assert_eq!(wall.position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_horizontal_push_moving_left() {
        let wall = tile_at(0.0, 0.0);
        let mut p = player_at(30.0, 5.0, 10.0);
        p.velocity = Vec2::new(-80.0, 0.0);
        respond(&mut p, wall.tag(), wall.aabb()).unwrap();
        assert!((p.position.x - 32.0).abs() < 1e-4);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn test_vertical_push_lands_on_floor() {
        let floor = tile_at(0.0, 100.0);
        let mut p = player_at(5.0, 92.0, 10.0);
        p.velocity = Vec2::new(0.0, 120.0);

        let contact = respond(&mut p, floor.tag(), floor.aabb()).unwrap();
        assert_eq!(contact.axis, Axis::Vertical);
        assert!((p.position.y - 90.0).abs() < 1e-4);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn test_zero_velocity_only_stops() {
        let floor = tile_at(0.0, 100.0);
        let mut p = player_at(5.0, 92.0, 10.0);
        respond(&mut p, floor.tag(), floor.aabb()).unwrap();
        assert_eq!(p.position, Vec2::new(5.0, 92.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_other_kind_pairs_detect_without_response() {
        let floor = tile_at(0.0, 100.0);
        let mut enemy = Entity::new(EntityKind::Enemy, Vec2::new(5.0, 92.0));
        enemy.collider = Collider::square(10.0).unwrap();
        enemy.velocity = Vec2::new(0.0, 50.0);

        let contact = respond(&mut enemy, floor.tag(), floor.aabb()).unwrap();
        assert!(!contact.resolved);
        assert_eq!(contact.other, KindTag::Level);
        assert_eq!(enemy.position, Vec2::new(5.0, 92.0));
        assert_eq!(enemy.velocity, Vec2::new(0.0, 50.0));

        // Level tile against the player is not resolved either
        let mut tile = tile_at(0.0, 0.0);
        let p = player_at(5.0, 5.0, 10.0);
        let contact = respond(&mut tile, p.tag(), p.aabb()).unwrap();
        assert!(!contact.resolved);
        assert_eq!(tile.position, Vec2::ZERO);
    }

    #[test]
    fn test_multiple_corrections_depend_on_order() {
        let wall = tile_at(8.0, 5.0);
        let floor = tile_at(-20.0, 7.0);
        let mut p = player_at(0.0, 0.0, 10.0);
        p.velocity = Vec2::new(50.0, 50.0);

        // Wall first: pushed left out of the wall, then up out of the floor
        let mut layers = vec![vec![wall.clone(), floor.clone()], vec![p.clone()]];
        assert_eq!(resolve(&mut layers, 1, 0), 2);
        assert!((layers[1][0].position - Vec2::new(-2.0, -3.0)).length() < 1e-4);

        // Floor first: after the upward push the wall overlap is as tall as
        // it is wide, so it resolves vertically and x is never corrected
        let mut layers = vec![vec![floor, wall], vec![p]];
        assert_eq!(resolve(&mut layers, 1, 0), 2);
        assert!((layers[1][0].position - Vec2::new(0.0, -3.0)).length() < 1e-4);
        assert_eq!(layers[1][0].velocity, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_probe_reports_transitions() {
        let floor = tile_at(0.0, 10.0);
        let p = player_at(0.0, 0.0, 10.0);
        let mut layers = vec![vec![floor], vec![p]];

        assert_eq!(probe_ground(&mut layers, 1, 0, 1.0), GroundChange::Landed);
        assert!(layers[1][0].grounded);
        assert_eq!(probe_ground(&mut layers, 1, 0, 1.0), GroundChange::Unchanged);

        layers[1][0].position.y = -5.0;
        assert_eq!(probe_ground(&mut layers, 1, 0, 1.0), GroundChange::LeftGround);
        assert!(!layers[1][0].grounded);
    }

    #[test]
    fn test_probe_ignores_self() {
        let mut layers = vec![vec![], vec![player_at(0.0, 0.0, 10.0)]];
        assert_eq!(probe_ground(&mut layers, 1, 0, 1.0), GroundChange::Unchanged);
        assert!(!layers[1][0].grounded);
    }
}
