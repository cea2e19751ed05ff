//! Frame animation driven by a Timer
//!
//! The current frame is the fraction of the timer period that has elapsed,
//! scaled to the frame count. Animations loop because the timer wraps.

use super::error::ConfigError;
use super::timer::Timer;

/// Animation slots on the player entity
pub mod player_anim {
    pub const IDLE: usize = 0;
    pub const RUN: usize = 1;
    pub const SLIDE: usize = 2;
}

/// Animation slots on bullet entities
pub mod bullet_anim {
    pub const MOVING: usize = 0;
    #[allow(dead_code)]
    pub const HIT: usize = 1;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    timer: Timer,
    frame_count: usize,
}

impl Animation {
    /// Create an animation of `frame_count` frames spread over `length` seconds.
    pub fn new(frame_count: usize, length: f32) -> Result<Self, ConfigError> {
        if frame_count == 0 || !(length > 0.0) || !length.is_finite() {
            return Err(ConfigError::InvalidAnimation { frame_count, length });
        }
        Ok(Self {
            timer: Timer::new(length)?,
            frame_count,
        })
    }

    pub fn current_frame(&self) -> usize {
        let t = self.timer.elapsed() / self.timer.length();
        // Clamp guards float rounding when elapsed sits just under the period
        ((t * self.frame_count as f32) as usize).min(self.frame_count - 1)
    }

    pub fn step(&mut self, dt: f32) {
        self.timer.step(dt);
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[cfg(test)]
    pub fn length(&self) -> f32 {
        self.timer.length()
    }
}
