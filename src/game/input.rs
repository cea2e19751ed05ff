//! Per-tick input snapshot consumed by the simulation.
//!
//! Filled in by `crate::input::InputState` from the keyboard; tests build
//! it directly.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Fire held
    pub fire_held: bool,
}

impl InputSnapshot {
    /// Horizontal intent: -1, 0 or +1. Both keys held cancel out.
    pub fn direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }

    #[cfg(test)]
    pub fn right() -> Self {
        Self { right: true, ..Self::default() }
    }

    #[cfg(test)]
    pub fn left() -> Self {
        Self { left: true, ..Self::default() }
    }
}
