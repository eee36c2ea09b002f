//! # Viewport System
//!
//! The canvas has a fixed backing store (**Canvas Space**, e.g. 800x800) but is
//! usually shown scaled to fit its container (**Display Space**). This module
//! converts pointer positions between the two.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Rect;

/// Where, and how large, the canvas is currently displayed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Size of the backing store in canvas pixels.
    pub canvas_size: Vec2,
    /// Top-left corner of the displayed canvas, in display pixels.
    pub display_origin: Vec2,
    /// Size of the displayed canvas, in display pixels.
    pub display_size: Vec2,
}

impl View {
    /// A view displaying the canvas 1:1 at the origin.
    pub fn new(canvas_size: Vec2) -> Self {
        Self {
            canvas_size,
            display_origin: Vec2::ZERO,
            display_size: canvas_size,
        }
    }

    /// Backing-store pixels per display pixel, per axis.
    ///
    /// A degenerate display size maps 1:1 rather than dividing by zero.
    pub fn scale(&self) -> Vec2 {
        let axis = |canvas: f32, display: f32| {
            if display > 0.0 { canvas / display } else { 1.0 }
        };
        Vec2::new(
            axis(self.canvas_size.x, self.display_size.x),
            axis(self.canvas_size.y, self.display_size.y),
        )
    }

    /// Converts a point from **Display Space** to **Canvas Space**.
    ///
    /// Formula: `Canvas = (Display - Origin) * (CanvasSize / DisplaySize)`
    pub fn display_to_canvas(&self, display_pos: Vec2) -> Vec2 {
        (display_pos - self.display_origin) * self.scale()
    }

    /// Converts a point from **Canvas Space** to **Display Space**.
    pub fn canvas_to_display(&self, canvas_pos: Vec2) -> Vec2 {
        canvas_pos / self.scale() + self.display_origin
    }

    /// Whether a display-space point lies over the displayed canvas.
    pub fn contains_display(&self, display_pos: Vec2) -> bool {
        Rect::new(self.display_origin, self.display_size).contains(display_pos)
    }
}
