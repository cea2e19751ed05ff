//! Game settings
//!
//! Tunables for display, physics, the player, bullets, parallax and
//! animation timing. Stored as RON; every struct uses `#[serde(default)]`
//! so a settings file only needs the fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{Animation, Collider, ConfigError};

/// Default location of the settings file
pub const SETTINGS_PATH: &str = "assets/settings.ron";

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub physics: PhysicsSettings,
    pub player: PlayerSettings,
    pub bullet: BulletSettings,
    pub parallax: ParallaxSettings,
    pub animations: AnimationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display: DisplaySettings::default(),
            physics: PhysicsSettings::default(),
            player: PlayerSettings::default(),
            bullet: BulletSettings::default(),
            parallax: ParallaxSettings::default(),
            animations: AnimationSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a RON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings = ron::from_str(&contents)?;
        log::info!("settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }
}

/// Window and logical render resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub window_width: i32,
    pub window_height: i32,
    /// Simulation/render resolution, letterboxed into the window
    pub logical_width: f32,
    pub logical_height: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            window_width: 1600,
            window_height: 900,
            logical_width: 640.0,
            logical_height: 320.0,
        }
    }
}

impl DisplaySettings {
    /// Window size to switch to once settings are loaded, if it differs
    /// from the size the window opened at.
    pub fn window_resize(&self) -> Option<(f32, f32)> {
        let opened = Self::default();
        if (self.window_width, self.window_height) == (opened.window_width, opened.window_height) {
            return None;
        }
        Some((self.window_width as f32, self.window_height as f32))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Downward acceleration on dynamic entities (px/s²)
    pub gravity: f32,
    /// Vertical impulse applied on jump (negative is up)
    pub jump_force: f32,
    /// Idle braking strength as a multiple of the run acceleration
    pub deceleration_factor: f32,
    /// Height of the ground probe below the collider
    pub sensor_height: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 500.0,
            jump_force: -200.0,
            deceleration_factor: 1.5,
            sensor_height: 1.0,
        }
    }
}

/// Rectangle relative to an entity position, as stored in settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderSettings {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ColliderSettings {
    pub fn build(&self) -> Result<Collider, ConfigError> {
        Collider::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub acceleration: f32,
    pub max_speed_x: f32,
    /// Seconds between shots while fire is held
    pub weapon_cooldown: f32,
    pub collider: ColliderSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            acceleration: 300.0,
            max_speed_x: 100.0,
            weapon_cooldown: 0.1,
            collider: ColliderSettings { x: 11.0, y: 6.0, w: 10.0, h: 26.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    /// Muzzle speed added to the player's horizontal velocity
    pub speed: f32,
    pub max_speed_x: f32,
    /// Spawn x offset when facing left
    pub offset_left: f32,
    /// Extra x offset blended in when facing right
    pub offset_right: f32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            speed: 600.0,
            max_speed_x: 1000.0,
            offset_left: 4.0,
            offset_right: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxSettings {
    /// Scroll factor per layer, back to front
    pub factors: Vec<f32>,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self { factors: vec![0.075, 0.15, 0.3] }
    }
}

/// Frame count and loop length of one animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub frames: usize,
    pub length: f32,
}

impl AnimationSpec {
    pub const fn new(frames: usize, length: f32) -> Self {
        Self { frames, length }
    }

    pub fn build(&self) -> Result<Animation, ConfigError> {
        Animation::new(self.frames, self.length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub player_idle: AnimationSpec,
    pub player_run: AnimationSpec,
    pub player_slide: AnimationSpec,
    pub bullet_moving: AnimationSpec,
    pub bullet_hit: AnimationSpec,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            player_idle: AnimationSpec::new(8, 1.6),
            player_run: AnimationSpec::new(4, 0.5),
            player_slide: AnimationSpec::new(1, 1.0),
            bullet_moving: AnimationSpec::new(4, 0.05),
            bullet_hit: AnimationSpec::new(4, 0.15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(physics: (gravity: 800.0), parallax: (factors: [0.5]))").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.physics.gravity, 800.0);
        assert_eq!(settings.physics.jump_force, -200.0);
        assert_eq!(settings.parallax.factors, vec![0.5]);
        assert_eq!(settings.player, PlayerSettings::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("nope.ron")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(physics: (gravity: \"heavy\"))").unwrap();
        assert!(matches!(
            Settings::load_or_default(file.path()),
            Err(SettingsError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_values_surface_as_config_errors() {
        let spec = AnimationSpec::new(0, 1.0);
        assert!(spec.build().is_err());
        let collider = ColliderSettings { x: 0.0, y: 0.0, w: -2.0, h: 1.0 };
        assert!(collider.build().is_err());
    }

    #[test]
    fn test_window_resizes_only_for_a_custom_size() {
        assert_eq!(DisplaySettings::default().window_resize(), None);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(display: (window_width: 1280, window_height: 720))").unwrap();
        let settings = Settings::load_or_default(file.path()).unwrap();
        assert_eq!(settings.display.window_resize(), Some((1280.0, 720.0)));
        // Unset fields keep their defaults
        assert_eq!(settings.display.logical_width, 640.0);
    }
}
