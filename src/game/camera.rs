//! 2D follow camera: a viewport of the logical resolution centred on the
//! player horizontally, fixed vertically.

use macroquad::math::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub viewport: Rect,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn follow(&mut self, player_position: Vec2, tile_size: f32) {
        self.viewport.x = player_position.x + tile_size / 2.0 - self.viewport.w / 2.0;
        self.viewport.y = 0.0;
    }

    /// World-to-view translation
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.viewport.x, self.viewport.y)
    }
}
