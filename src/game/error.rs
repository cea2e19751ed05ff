//! Configuration errors raised while building simulation objects.
//!
//! The per-frame simulation has no error paths; everything that can go
//! wrong does so while timers, animations and colliders are constructed.

/// Invalid parameters for a timer, animation or collider.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Timer period must be positive and finite
    InvalidTimer { length: f32 },
    /// Animation needs at least one frame and a positive period
    InvalidAnimation { frame_count: usize, length: f32 },
    /// Collider extents must not be negative
    NegativeCollider { w: f32, h: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTimer { length } => {
                write!(f, "invalid configuration: timer length must be > 0 (got {})", length)
            }
            ConfigError::InvalidAnimation { frame_count, length } => write!(
                f,
                "invalid configuration: animation needs frame_count >= 1 and length > 0 (got {} frames, {}s)",
                frame_count, length
            ),
            ConfigError::NegativeCollider { w, h } => {
                write!(f, "invalid configuration: collider size {}x{} is negative", w, h)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
