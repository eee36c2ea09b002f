//! # BouquetCanvas
//!
//! `bouquet_canvas` is a headless compositor for hand-arranged flower bouquets.
//! It owns the scene model, the mathematics of stem convergence and spiral
//! layout, and the pointer logic, while delegating pixels to a backend.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: The scene, a flat list of flowers kept sorted by depth.
//! - **Flowers (`src/flowers/`)**: One deterministic drawer per species.
//! - **Painter (`src/painter.rs`)**: Composes the layered frame as `DrawCommand`s.
//! - **Interaction (`src/interaction.rs`)**: Hit-testing and the select/drag state machine.
//! - **Raster (`src/raster.rs`)**: A tiny-skia backend for the display list.

pub mod color;
pub mod config;
pub mod error;
pub mod flowers;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod math;
pub mod model;
pub mod painter;
pub mod primitives;
pub mod raster;
pub mod recipe;
pub mod render;
pub mod ribbon;
pub mod species;
pub mod view;

use glam::Vec2;
use input::PointerEvent;
use model::{BouquetScene, Uuid};
use painter::{Layers, Painter};
use render::Frame;
use view::View;

// Re-exports for convenience
pub use color::ColorToken;
pub use config::{CanvasConfig, CanvasStyle};
pub use error::CanvasError;
pub use interaction::{InteractionMode, LogicEvent};
pub use model::{Flower, FlowerUpdate, SceneStyle, StyleUpdate};
pub use recipe::{RawRecipe, Recipe};
pub use ribbon::RibbonStyle;
pub use species::Species;

/// The main entry point for the library.
///
/// The `Canvas` holds the transient state of the editor (how the canvas is
/// displayed and what the pointer is doing) next to the configuration. The
/// scene itself is owned by the host and passed in on every call.
pub struct Canvas {
    /// Configuration settings.
    pub config: CanvasConfig,
    /// Maps display pixels to canvas pixels.
    pub view: View,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
}

impl Canvas {
    /// Creates a new Canvas displayed 1:1 at the origin.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            view: View::new(config.size()),
            config,
            interaction_mode: InteractionMode::Idle,
        }
    }

    /// Updates where, and how large, the canvas is shown (e.g. on window resize).
    pub fn set_display(&mut self, origin: Vec2, size: Vec2) {
        self.view.display_origin = origin;
        self.view.display_size = size;
    }

    /// Feeds one pointer event through the interaction state machine.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        scene: &mut BouquetScene,
    ) -> Vec<LogicEvent> {
        let mut logic_events = Vec::new();
        interaction::handle_pointer(
            &mut self.interaction_mode,
            &self.view,
            &self.config,
            event,
            scene,
            &mut logic_events,
        );
        logic_events
    }

    /// The selected flower, if it still exists in `scene`.
    pub fn selection(&self, scene: &BouquetScene) -> Option<Uuid> {
        self.interaction_mode
            .selection()
            .filter(|id| scene.contains(*id))
    }

    /// Selects a flower programmatically, or clears the selection with `None`.
    ///
    /// Unknown ids clear the selection. An ongoing drag is ended.
    pub fn select(&mut self, id: Option<Uuid>, scene: &BouquetScene) {
        self.interaction_mode = match id.filter(|id| scene.contains(*id)) {
            Some(id) => InteractionMode::Selected { id },
            None => InteractionMode::Idle,
        };
    }

    /// Drops the selection if it points at `id`.
    pub fn forget(&mut self, id: Uuid) {
        if self.interaction_mode.selection() == Some(id) {
            self.interaction_mode = InteractionMode::Idle;
        }
    }

    /// Resets the mode when its flower has left the scene.
    pub fn reconcile(&mut self, scene: &BouquetScene) {
        if let Some(id) = self.interaction_mode.selection()
            && !scene.contains(id)
        {
            self.interaction_mode = InteractionMode::Idle;
        }
    }

    /// Composes the interactive frame, including the selection halo.
    pub fn render(&self, scene: &BouquetScene) -> Frame {
        Painter::draw_scene(&self.config, scene, self.selection(scene), Layers::all())
    }

    /// Composes the frame used for export: the bouquet without UI state.
    pub fn export_frame(&self, scene: &BouquetScene) -> Frame {
        Painter::draw_scene(
            &self.config,
            scene,
            None,
            Layers::all() - Layers::HIGHLIGHT,
        )
    }
}
