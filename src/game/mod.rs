//! Game Simulation Module
//!
//! The side-scrolling platformer core: timers and animations, the entity
//! model, physics, AABB collision, the player state machine, bullets,
//! parallax and the follow camera. Everything here except `renderer` is
//! pure data and runs without a window.
//!
//! Key concepts:
//! - Entity: one struct for every object, with a tagged kind
//! - Scene: two ordered layers plus bullets, advanced by `Scene::tick`
//! - Assets: texture handles and sizes; the GPU side lives in `texture`

pub mod animation;
pub mod assets;
pub mod bullet;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod error;
pub mod input;
pub mod parallax;
pub mod physics;
pub mod player;
pub mod renderer;
pub mod scene;
pub mod timer;

// Re-export main types
pub use animation::{player_anim, Animation};
pub use assets::{Assets, SpriteTextures, TextureMetrics};
pub use camera::Camera;
pub use entity::{Collider, Entity, EntityKind, TextureId};
pub use error::ConfigError;
pub use input::InputSnapshot;
pub use parallax::ParallaxScroller;
pub use renderer::draw_scene;
pub use scene::{Scene, SimContext};
