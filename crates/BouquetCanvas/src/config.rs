//! # Configuration
//!
//! This module defines the configuration struct for the Canvas.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::color::{ColorToken, rgb, rgba};

/// Configuration parameters for the Canvas.
///
/// All distances are in canvas (backing-store) pixels. The defaults reproduce
/// the classic 800x800 bouquet card.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Logical width of the canvas. Default: 800.
    pub width: f32,
    /// Logical height of the canvas. Default: 800.
    pub height: f32,
    /// Dragged flowers are clamped this far inside every edge. Default: 50.
    pub boundary_margin: f32,
    /// Hit radius per unit of flower scale. Default: 25.
    pub hit_radius: f32,
    /// Selection halo radius per unit of flower scale. Default: 25.
    pub halo_radius: f32,
    /// Offset of the stem convergence anchor from the canvas center. Default: (0, 200).
    pub convergence_offset: Vec2,
    /// Stems start this far below a flower's center. Default: 10.
    pub stem_base_offset: f32,
    /// Stroke width of stems. Default: 4.
    pub stem_width: f32,
    /// Phyllotaxis spacing constant `k` in `radius = k * sqrt(i)`. Default: 30.
    pub spiral_spacing: f32,
    /// Upward lift applied per spiral index. Default: 5.
    pub spiral_lift: f32,
    /// Full width of the uniform jitter applied to spiral positions. Default: 20.
    pub layout_jitter: f32,
    /// How far above the canvas center new flowers are placed. Default: 100.
    pub layout_lift: f32,
    /// Full width of the jitter box for manually added flowers. Default: (100, 50).
    pub add_jitter: Vec2,
    /// Upper bound on the flowers a generated recipe may place. Default: 100.
    pub max_recipe_flowers: usize,
    /// Text painted in the bottom-right corner.
    pub watermark: String,
    /// Visual styling configuration.
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            boundary_margin: 50.0,
            hit_radius: 25.0,
            halo_radius: 25.0,
            convergence_offset: Vec2::new(0.0, 200.0),
            stem_base_offset: 10.0,
            stem_width: 4.0,
            spiral_spacing: 30.0,
            spiral_lift: 5.0,
            layout_jitter: 20.0,
            layout_lift: 100.0,
            add_jitter: Vec2::new(100.0, 50.0),
            max_recipe_flowers: 100,
            watermark: "flower for you".to_string(),
            style: CanvasStyle::default(),
        }
    }
}

impl CanvasConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// The single point where every stem meets; also the ribbon and wrapper anchor.
    pub fn convergence_anchor(&self) -> Vec2 {
        self.center() + self.convergence_offset
    }

    /// Center used by automatic placement (manual add and recipe layout).
    pub fn layout_center(&self) -> Vec2 {
        self.center() - Vec2::new(0.0, self.layout_lift)
    }
}

/// Visual styling configuration for the Canvas.
///
/// Fixed colors use `glam::Vec4` like the display list; defaults that seed
/// user-editable values are kept as [`ColorToken`]s.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    /// Stem color given to every new flower.
    pub default_stem_color: ColorToken,
    /// Ribbon color of a fresh scene. Twine keeps its rope color while the
    /// ribbon color still equals this value.
    pub default_ribbon_color: ColorToken,
    /// Rope color used by the twine ribbon.
    pub rope_color: Vec4,
    /// Fill of the selection halo.
    pub halo_color: Vec4,
    /// Shadow color of the selection halo.
    pub halo_shadow: Vec4,
    /// Shadow blur of the selection halo, in pixels.
    pub halo_blur: f32,
    /// Watermark text color.
    pub watermark_color: Vec4,
    /// Watermark font size in pixels.
    pub watermark_size: f32,
    /// Distance of the watermark from the bottom-right corner.
    pub watermark_inset: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            default_stem_color: ColorToken::new("#4d7c0f"),
            default_ribbon_color: ColorToken::new("#db2777"),
            rope_color: rgb(0xa16207),
            halo_color: rgba(0xffffff, 0.3),
            halo_shadow: rgba(0x000000, 0.2),
            halo_blur: 15.0,
            watermark_color: rgb(0xf9a8d4),
            watermark_size: 24.0,
            watermark_inset: 20.0,
        }
    }
}
