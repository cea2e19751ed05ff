//! Entity model
//!
//! Every simulated object is one `Entity`: shared kinematic state plus a
//! tagged `EntityKind` payload. Kind-specific data (the player's state
//! machine and weapon timer, a bullet's state) is only reachable through the
//! matching variant.

use macroquad::math::{Rect, Vec2};

use super::animation::Animation;
use super::error::ConfigError;
use super::timer::Timer;

/// Non-owning handle into the texture cache.
///
/// The cache outlives the scene; entities only carry the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletState {
    Moving,
    // Bullets don't collide yet, so nothing leaves Moving
    #[allow(dead_code)]
    Colliding,
    #[allow(dead_code)]
    Inactive,
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    pub state: PlayerState,
    /// Weapon cooldown; a shot is allowed once it has timed out
    pub weapon_timer: Timer,
}

impl PlayerData {
    pub fn new(weapon_cooldown: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            state: PlayerState::Idle,
            weapon_timer: Timer::new(weapon_cooldown)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletData {
    pub state: BulletState,
}

impl Default for BulletData {
    fn default() -> Self {
        Self { state: BulletState::Moving }
    }
}

/// Kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Player(PlayerData),
    Level,
    // No tile code spawns enemies
    #[allow(dead_code)]
    Enemy,
    Bullet(BulletData),
}

/// Payload-free discriminant of `EntityKind`, cheap to copy out of a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    Player,
    Level,
    Enemy,
    Bullet,
}

impl EntityKind {
    pub fn tag(&self) -> KindTag {
        match self {
            EntityKind::Player(_) => KindTag::Player,
            EntityKind::Level => KindTag::Level,
            EntityKind::Enemy => KindTag::Enemy,
            EntityKind::Bullet(_) => KindTag::Bullet,
        }
    }
}

/// Collision rectangle relative to the entity position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Collider {
    pub offset: Vec2,
    pub size: Vec2,
}

impl Collider {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, ConfigError> {
        if w < 0.0 || h < 0.0 {
            return Err(ConfigError::NegativeCollider { w, h });
        }
        Ok(Self {
            offset: Vec2::new(x, y),
            size: Vec2::new(w, h),
        })
    }

    /// Square collider anchored at the entity origin.
    #[cfg(test)]
    pub fn square(side: f32) -> Result<Self, ConfigError> {
        Self::new(0.0, 0.0, side, side)
    }

    /// World-space rectangle for an entity at `position`.
    pub fn world_rect(&self, position: Vec2) -> Rect {
        Rect::new(
            position.x + self.offset.x,
            position.y + self.offset.y,
            self.size.x,
            self.size.y,
        )
    }
}

/// A simulated game object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Facing, always -1.0 or +1.0
    pub direction: f32,
    pub max_speed_x: f32,
    pub collider: Collider,
    /// Gravity applies to dynamic entities only
    pub dynamic: bool,
    /// Result of the most recent ground probe
    pub grounded: bool,
    pub animations: Vec<Animation>,
    pub current_animation: Option<usize>,
    pub texture: Option<TextureId>,
}

impl Entity {
    /// A motionless entity of the given kind at `position`.
    pub fn new(kind: EntityKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            direction: 1.0,
            max_speed_x: 0.0,
            collider: Collider::default(),
            dynamic: false,
            grounded: false,
            animations: Vec::new(),
            current_animation: None,
            texture: None,
        }
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    /// Collider in world space.
    pub fn aabb(&self) -> Rect {
        self.collider.world_rect(self.position)
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        match &self.kind {
            EntityKind::Player(data) => Some(data.state),
            _ => None,
        }
    }

    pub fn bullet_state(&self) -> Option<BulletState> {
        match &self.kind {
            EntityKind::Bullet(data) => Some(data.state),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.current_animation.and_then(|i| self.animations.get(i))
    }

    /// Advance the active animation, if any.
    pub fn step_animation(&mut self, dt: f32) {
        if let Some(anim) = self
            .current_animation
            .and_then(|i| self.animations.get_mut(i))
        {
            anim.step(dt);
        }
    }
}
