use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::physics::Rect;

/// Side-scrolling camera that advances on its own, regardless of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scroll_x: f32,
    pub speed: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub bounds: Rect,
}

impl Camera {
    pub fn new(config: &CameraConfig, bounds: Rect) -> Self {
        Self {
            scroll_x: 0.0,
            speed: config.speed,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            bounds,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.scroll_x + self.viewport_width
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Scroll forward by one tick's worth. Never moves backward, and never
    /// past the right edge of the bounds.
    pub fn advance(&mut self) {
        let limit = (self.bounds.right - self.viewport_width).max(self.scroll_x);
        self.scroll_x = (self.scroll_x + self.speed).min(limit);
    }

    /// True once `x` has dropped more than `margin` behind the left edge.
    pub fn left_behind(&self, x: f32, margin: f32) -> bool {
        x < self.scroll_x - margin
    }
}
