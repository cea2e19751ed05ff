//! Texture cache - loading and handle assignment
//!
//! Owns every `Texture2D` the game draws. Each distinct path is loaded once
//! and gets a stable `TextureId`; the simulation only ever sees ids and
//! sizes.

use std::collections::HashMap;

use macroquad::prelude::*;

use crate::game::{SpriteTextures, TextureId, TextureMetrics};

#[derive(Debug)]
pub enum TextureError {
    Load { path: String, message: String },
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Load { path, message } => {
                write!(f, "failed to load texture {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// Path-to-id bookkeeping, separate from the GPU side
#[derive(Debug, Default)]
pub struct TextureRegistry {
    by_path: HashMap<String, TextureId>,
    sizes: Vec<Vec2>,
}

impl TextureRegistry {
    pub fn lookup(&self, path: &str) -> Option<TextureId> {
        self.by_path.get(path).copied()
    }

    /// Record a newly loaded texture and hand out the next id.
    pub fn register(&mut self, path: &str, size: Vec2) -> TextureId {
        let id = TextureId(self.sizes.len());
        self.sizes.push(size);
        self.by_path.insert(path.to_string(), id);
        id
    }

    pub fn metrics(&self) -> TextureMetrics {
        TextureMetrics::new(self.sizes.clone())
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }
}

/// A texture the game expects on disk, plus the stand-in drawn when the file
/// can't be loaded. The stand-in has the size the role needs so sprite cells
/// and parallax wrapping still line up.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureFile {
    pub path: String,
    pub width: u16,
    pub height: u16,
    pub fill: [u8; 4],
}

impl TextureFile {
    fn new(path: String, width: u16, height: u16, fill: [u8; 4]) -> Self {
        Self { path, width, height, fill }
    }
}

/// Tightly packed RGBA8 pixels of one colour.
pub fn solid_rgba(width: u16, height: u16, fill: [u8; 4]) -> Vec<u8> {
    let pixels = width as usize * height as usize;
    let mut bytes = Vec::with_capacity(pixels * 4);
    for _ in 0..pixels {
        bytes.extend_from_slice(&fill);
    }
    bytes
}

#[derive(Default)]
pub struct TextureCache {
    textures: Vec<Texture2D>,
    registry: TextureRegistry,
    metrics: TextureMetrics,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `file` once; later calls return the same id. A file that fails
    /// to load is replaced by its solid-colour stand-in.
    pub async fn load(&mut self, file: &TextureFile) -> TextureId {
        if let Some(id) = self.registry.lookup(&file.path) {
            return id;
        }
        let texture = match read_texture(&file.path).await {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("{}, using a {}x{} placeholder", e, file.width, file.height);
                Texture2D::from_rgba8(
                    file.width,
                    file.height,
                    &solid_rgba(file.width, file.height, file.fill),
                )
            }
        };
        texture.set_filter(FilterMode::Nearest);

        let id = self.registry.register(&file.path, texture.size());
        self.textures.push(texture);
        self.metrics = self.registry.metrics();
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture2D> {
        self.textures.get(id.0)
    }

    pub fn metrics(&self) -> &TextureMetrics {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }
}

async fn read_texture(path: &str) -> Result<Texture2D, TextureError> {
    load_texture(path).await.map_err(|e| TextureError::Load {
        path: path.to_string(),
        message: format!("{:?}", e),
    })
}

const SPRITES: &str = "sprites";
const TILES: &str = "tiles";
const BACKGROUND: &str = "background";

/// Number of `bg_layerN.png` files; layer 1 is the static backdrop.
const BACKGROUND_LAYERS: usize = 4;

const TILE: u16 = 32;
const BACKDROP_SIZE: (u16, u16) = (640, 320);

/// Every file `load_sprite_textures` reads, by role
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFiles {
    pub player_idle: TextureFile,
    pub player_run: TextureFile,
    pub player_slide: TextureFile,
    pub bullet: TextureFile,
    pub ground: TextureFile,
    pub panel: TextureFile,
    pub grass: TextureFile,
    pub brick: TextureFile,
    pub background: TextureFile,
    /// Layers 2 and up, back to front
    pub parallax: Vec<TextureFile>,
}

impl SpriteFiles {
    /// The texture tree rooted at `root`.
    pub fn under(root: &str) -> Self {
        let sprite = |name: &str, width: u16, height: u16, fill: [u8; 4]| {
            TextureFile::new(format!("{}/{}/{}.png", root, SPRITES, name), width, height, fill)
        };
        let tile = |name: &str, fill: [u8; 4]| {
            TextureFile::new(format!("{}/{}/{}.png", root, TILES, name), TILE, TILE, fill)
        };
        let layer = |n: usize, fill: [u8; 4]| {
            TextureFile::new(
                format!("{}/{}/bg_layer{}.png", root, BACKGROUND, n),
                BACKDROP_SIZE.0,
                BACKDROP_SIZE.1,
                fill,
            )
        };
        // Player strips: 8 idle frames, 4 run frames, 1 slide frame
        Self {
            player_idle: sprite("idle", 8 * TILE, TILE, [90, 160, 220, 255]),
            player_run: sprite("run", 4 * TILE, TILE, [90, 160, 220, 255]),
            player_slide: sprite("slide", TILE, TILE, [60, 120, 200, 255]),
            bullet: sprite("bullet", 32, 8, [250, 220, 90, 255]),
            ground: tile("ground", [110, 80, 50, 255]),
            panel: tile("panel", [120, 120, 140, 255]),
            grass: tile("grass", [70, 150, 60, 255]),
            brick: tile("brick", [90, 50, 50, 255]),
            background: layer(1, [30, 20, 50, 255]),
            // Clear, so a missing layer doesn't hide the backdrop
            parallax: (2..=BACKGROUND_LAYERS)
                .map(|n| layer(n, [40, 30, 70, 0]))
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn all(&self) -> impl Iterator<Item = &TextureFile> {
        [
            &self.player_idle,
            &self.player_run,
            &self.player_slide,
            &self.bullet,
            &self.ground,
            &self.panel,
            &self.grass,
            &self.brick,
            &self.background,
        ]
        .into_iter()
        .chain(self.parallax.iter())
    }
}

/// Load every texture the game assigns a role to, rooted at `root`.
pub async fn load_sprite_textures(cache: &mut TextureCache, root: &str) -> SpriteTextures {
    let files = SpriteFiles::under(root);

    let mut parallax = Vec::new();
    for file in &files.parallax {
        parallax.push(cache.load(file).await);
    }

    let textures = SpriteTextures {
        player_idle: cache.load(&files.player_idle).await,
        player_run: cache.load(&files.player_run).await,
        player_slide: cache.load(&files.player_slide).await,
        bullet: cache.load(&files.bullet).await,
        ground: cache.load(&files.ground).await,
        panel: cache.load(&files.panel).await,
        grass: cache.load(&files.grass).await,
        brick: cache.load(&files.brick).await,
        background: cache.load(&files.background).await,
        parallax,
    };
    log::info!("loaded {} textures from {}", cache.len(), root);
    textures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_assigns_sequential_ids() {
        let mut registry = TextureRegistry::default();
        let a = registry.register("assets/sprites/idle.png", Vec2::new(256.0, 32.0));
        let b = registry.register("assets/sprites/bullet.png", Vec2::new(32.0, 8.0));
        assert_eq!(a, TextureId(0));
        assert_eq!(b, TextureId(1));
        assert_eq!(registry.lookup("assets/sprites/bullet.png"), Some(b));
        assert_eq!(registry.lookup("assets/sprites/run.png"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_metrics_follow_ids() {
        let mut registry = TextureRegistry::default();
        registry.register("a.png", Vec2::new(256.0, 32.0));
        let bullet = registry.register("b.png", Vec2::new(32.0, 8.0));
        let metrics = registry.metrics();
        assert_eq!(metrics.cell_size(bullet), 8.0);
        assert_eq!(metrics.width(TextureId(0)), 256.0);
    }

    #[test]
    fn test_sprite_files_ship_with_the_repo() {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
        let files = SpriteFiles::under(root);
        let missing: Vec<&str> = files
            .all()
            .filter(|f| !std::path::Path::new(&f.path).is_file())
            .map(|f| f.path.as_str())
            .collect();
        assert!(missing.is_empty(), "missing: {:?}", missing);
        assert_eq!(files.all().count(), 12);
        assert_eq!(files.parallax.len(), 3);
        assert!(files.background.path.ends_with("/background/bg_layer1.png"));
        assert!(files.parallax[0].path.ends_with("/background/bg_layer2.png"));
    }

    #[test]
    fn test_placeholder_sizes_match_roles() {
        let files = SpriteFiles::under("assets");
        assert_eq!(files.player_idle.path, "assets/sprites/idle.png");
        assert_eq!((files.player_idle.width, files.player_idle.height), (256, 32));
        assert_eq!((files.player_run.width, files.player_run.height), (128, 32));
        assert_eq!((files.bullet.width, files.bullet.height), (32, 8));
        assert_eq!((files.ground.width, files.ground.height), (32, 32));
        for layer in &files.parallax {
            assert_eq!((layer.width, layer.height), (640, 320));
        }
    }

    #[test]
    fn test_solid_rgba_fills_every_pixel() {
        let bytes = solid_rgba(3, 2, [1, 2, 3, 4]);
        assert_eq!(bytes.len(), 3 * 2 * 4);
        assert!(bytes.chunks(4).all(|px| px == [1, 2, 3, 4]));
        assert!(solid_rgba(0, 5, [9; 4]).is_empty());
    }
}
