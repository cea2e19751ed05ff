//! Texture resource cache
//!
//! GPU textures are loaded here and referred to everywhere else by
//! `TextureId`. Filtering is nearest-neighbour for pixel art.

mod cache;

pub use cache::*;
