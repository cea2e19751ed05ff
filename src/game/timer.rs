//! Latched periodic timer
//!
//! Counts elapsed time against a fixed period. When a step crosses the
//! period exactly one period is consumed and the timeout flag latches; the
//! flag stays set until `reset()`. A step longer than several periods still
//! only consumes one, so callers that need every period must step finely.

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    length: f32,
    elapsed: f32,
    timeout: bool,
}

impl Timer {
    /// Create a timer with the given period in seconds.
    pub fn new(length: f32) -> Result<Self, ConfigError> {
        if !(length > 0.0) || !length.is_finite() {
            return Err(ConfigError::InvalidTimer { length });
        }
        Ok(Self {
            length,
            elapsed: 0.0,
            timeout: false,
        })
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.length {
            self.elapsed -= self.length;
            self.timeout = true;
        }
    }

    /// Has the timer crossed its period since the last reset?
    pub fn is_timeout(&self) -> bool {
        self.timeout
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.timeout = false;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn length(&self) -> f32 {
        self.length
    }
}
