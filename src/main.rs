//! Platform Shooter: a 2D side-scrolling run-and-gun
//!
//! A small platformer built on a fixed-order simulation core:
//! - Timers and frame animations
//! - Gravity, acceleration and Euler integration
//! - AABB collision with minimum-penetration push-out
//! - Idle/running/jumping player with a held-fire weapon
//! - Parallax backdrop and a follow camera, letterboxed to the window
//!
//! Usage: `platform-shooter [LEVEL.ron]`. Without a level the built-in one
//! is played.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod game;
mod input;
mod settings;
mod texture;
mod world;

use std::path::Path;

use macroquad::prelude::*;

use game::{draw_scene, Assets, Camera, SimContext};
use input::{Action, InputState};
use settings::{DisplaySettings, Settings, SETTINGS_PATH};
use texture::{load_sprite_textures, TextureCache};
use world::{build_scene, LevelData};

/// Root of the texture tree
const ASSETS_DIR: &str = "assets";

// Runs before logging is up, so the window opens at the default size and
// `run` resizes it once settings are loaded.
fn window_conf() -> Conf {
    let display = DisplaySettings::default();
    Conf {
        window_title: format!("Platform Shooter v{}", VERSION),
        window_width: display.window_width,
        window_height: display.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_secs()
            .try_init();
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first, before anything can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_logging();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default(Path::new(SETTINGS_PATH))?;
    if let Some((w, h)) = settings.display.window_resize() {
        request_new_screen_size(w, h);
    }

    let level = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading level {}", path);
            LevelData::load(&path)?
        }
        None => {
            log::info!("no level given, playing the built-in level");
            LevelData::reference()
        }
    };
    let map = level.validate()?;

    let mut cache = TextureCache::new();
    let textures = load_sprite_textures(&mut cache, ASSETS_DIR).await;
    let background = textures.background;
    let assets = Assets::new(textures, cache.metrics().clone(), &settings.animations)?;

    let mut scene = build_scene(&map, &assets, &settings)?;
    let mut camera = Camera::new(
        settings.display.logical_width,
        settings.display.logical_height,
    );
    let input = InputState::new();
    let mut debug = false;

    loop {
        if input.action_pressed(Action::Quit) {
            break;
        }
        if input.action_pressed(Action::ToggleDebug) {
            debug = !debug;
        }

        let snapshot = input.snapshot();
        let ctx = SimContext {
            settings: &settings,
            assets: &assets,
            input: &snapshot,
            dt: get_frame_time(),
        };
        let report = scene.tick(&ctx);
        log::trace!(
            "tick: {} bullets spawned, landed {}, {} corrections",
            report.bullets_spawned,
            report.landed,
            report.corrections
        );

        camera.follow(scene.player().position, scene.tile_size());
        draw_scene(&scene, &camera, &cache, background, debug);

        next_frame().await
    }

    log::info!("quit");
    Ok(())
}
