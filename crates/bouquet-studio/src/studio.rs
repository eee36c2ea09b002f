use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bouquet_canvas::{
    Canvas, CanvasConfig, ColorToken, Flower, FlowerUpdate, LogicEvent, RawRecipe, Recipe,
    Species, StyleUpdate,
    input::PointerEvent,
    layout, math,
    model::BouquetScene,
    raster::{self, Rasterizer},
    recipe::expand_recipe,
    render::Frame,
};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tiny_skia::Pixmap;
use uuid::Uuid;

use crate::settings::StudioSettings;
use crate::source::RecipeSource;

/// A pending request to the recipe source, handed out by
/// [`BouquetStudio::begin_generation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
}

/// What [`BouquetStudio::finish_generation`] did with a reply.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutcome {
    /// The scene was replaced.
    Applied { flowers: usize, theme: String },
    /// The reply named no drawable flower; the scene is unchanged.
    Empty,
    /// The request failed; the scene is unchanged.
    Failed(String),
}

/// A bouquet editing session.
///
/// Owns the scene together with the canvas state, the rasterizer and the
/// generation flag. All mutation goes through here so the selection never
/// points at a removed flower.
pub struct BouquetStudio {
    scene: BouquetScene,
    canvas: Canvas,
    rasterizer: Rasterizer,
    rng: StdRng,
    generating: bool,
}

impl BouquetStudio {
    pub fn new(config: CanvasConfig, rasterizer: Rasterizer) -> Self {
        Self {
            scene: BouquetScene::new(),
            canvas: Canvas::new(config),
            rasterizer,
            rng: StdRng::from_entropy(),
            generating: false,
        }
    }

    /// Builds a session from settings, loading the watermark font.
    pub fn from_settings(settings: &StudioSettings) -> Self {
        let rasterizer = match &settings.font_path {
            Some(path) => match std::fs::read(path)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| Ok(Rasterizer::with_font_bytes(bytes)?))
            {
                Ok(rasterizer) => rasterizer,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Falling back to system font");
                    Rasterizer::with_system_font(&settings.font_family)
                }
            },
            None => Rasterizer::with_system_font(&settings.font_family),
        };
        Self::new(settings.canvas.clone(), rasterizer)
    }

    /// Replaces the random source, for reproducible placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn scene(&self) -> &BouquetScene {
        &self.scene
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.canvas.config
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn selection(&self) -> Option<Uuid> {
        self.canvas.selection(&self.scene)
    }

    /// Adds a flower at the jittered drop point above the canvas center.
    pub fn add_flower(&mut self, species: Species, color: impl Into<ColorToken>) -> Uuid {
        let center = layout::manual_position(&self.canvas.config, &mut self.rng);
        self.add_flower_at(species, color, center)
    }

    /// Adds a flower at `center`, clamped inside the canvas margin.
    pub fn add_flower_at(
        &mut self,
        species: Species,
        color: impl Into<ColorToken>,
        center: Vec2,
    ) -> Uuid {
        let config = &self.canvas.config;
        let center = math::clamp_to_bounds(center, config.size(), config.boundary_margin);
        let mut flower = Flower::new(
            species,
            color,
            center,
            config.style.default_stem_color.clone(),
        );
        flower.rotation = layout::rotation_jitter(layout::MANUAL_ROTATION_JITTER, &mut self.rng);

        let id = self.scene.add(flower);
        tracing::info!(flower = %id, species = %species, "Added flower");
        id
    }

    /// Removes a flower. Returns whether it existed.
    pub fn remove_flower(&mut self, id: Uuid) -> bool {
        let removed = self.scene.remove(id).is_some();
        if removed {
            self.canvas.forget(id);
            tracing::info!(flower = %id, "Removed flower");
        }
        removed
    }

    /// Removes the selected flower, if any.
    pub fn remove_selected(&mut self) -> Option<Flower> {
        let id = self.selection()?;
        let flower = self.scene.remove(id)?;
        self.canvas.forget(id);
        tracing::info!(flower = %id, "Removed selected flower");
        Some(flower)
    }

    pub fn update_flower(&mut self, id: Uuid, update: FlowerUpdate) -> Result<()> {
        self.scene
            .update_flower(id, update)
            .with_context(|| format!("Failed to update flower {id}"))?;
        tracing::info!(flower = %id, "Updated flower");
        Ok(())
    }

    pub fn update_style(&mut self, update: StyleUpdate) {
        self.scene.style.apply(update);
        tracing::info!(style = ?self.scene.style, "Updated scene style");
    }

    /// Feeds a pointer event (display coordinates) to the canvas.
    pub fn pointer(&mut self, event: PointerEvent) -> Vec<LogicEvent> {
        self.canvas.handle_pointer(&event, &mut self.scene)
    }

    pub fn select(&mut self, id: Option<Uuid>) {
        self.canvas.select(id, &self.scene);
    }

    /// Tells the canvas where it is shown, so pointer positions map correctly.
    pub fn set_display(&mut self, origin: Vec2, size: Vec2) {
        self.canvas.set_display(origin, size);
    }

    /// The interactive frame, selection halo included.
    pub fn frame(&self) -> Frame {
        self.canvas.render(&self.scene)
    }

    fn surface_size(&self) -> (u32, u32) {
        let config = &self.canvas.config;
        let px = |v: f32| v.max(0.0).round() as u32;
        (px(config.width), px(config.height))
    }

    /// Rasterizes the interactive frame. A failed frame is logged and skipped.
    pub fn render_pixmap(&self) -> Option<Pixmap> {
        let (width, height) = self.surface_size();
        match self.rasterizer.render(&self.frame().commands, width, height) {
            Ok(pixmap) => Some(pixmap),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping frame");
                None
            }
        }
    }

    /// Renders the bouquet without UI state and writes it to
    /// `dir/my-bouquet-<unix-millis>.png`.
    pub fn export_png(&self, dir: &Path) -> Result<PathBuf> {
        let (width, height) = self.surface_size();
        let frame = self.canvas.export_frame(&self.scene);
        let pixmap = self
            .rasterizer
            .render(&frame.commands, width, height)
            .context("Failed to render bouquet for export")?;
        let png = raster::encode_png(&pixmap)?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let file_name = format!("my-bouquet-{}.png", chrono::Utc::now().timestamp_millis());
        let path = dir.join(file_name);
        std::fs::write(&path, png)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), flowers = self.scene.len(), "Exported bouquet");
        Ok(path)
    }

    /// Starts a generation. Returns `None` while another is in flight or when
    /// the prompt is blank.
    pub fn begin_generation(&mut self, prompt: &str) -> Option<GenerationRequest> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            tracing::debug!("Ignoring blank prompt");
            return None;
        }
        if self.generating {
            tracing::debug!("Generation already in flight");
            return None;
        }
        self.generating = true;
        tracing::info!(prompt, "Generation started");
        Some(GenerationRequest {
            prompt: prompt.to_string(),
        })
    }

    /// Completes a generation. The scene is replaced only when the reply
    /// contains at least one drawable flower.
    pub fn finish_generation(&mut self, result: Result<RawRecipe>) -> GenerationOutcome {
        self.generating = false;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = ?e, "Generation failed");
                return GenerationOutcome::Failed(format!("{e:#}"));
            }
        };

        let recipe = Recipe::validate(raw, self.canvas.config.max_recipe_flowers);
        if recipe.is_empty() {
            tracing::warn!("Recipe contained no drawable flowers");
            return GenerationOutcome::Empty;
        }

        let flowers = expand_recipe(&recipe, &self.canvas.config, &mut self.rng);
        let count = flowers.len();
        self.scene.apply_recipe(&recipe, flowers);
        self.canvas.select(None, &self.scene);

        tracing::info!(flowers = count, theme = %recipe.theme, "Applied generated bouquet");
        GenerationOutcome::Applied {
            flowers: count,
            theme: recipe.theme,
        }
    }

    /// Runs a whole generation against `source`. Returns `None` when the
    /// request was not started.
    pub async fn generate(
        &mut self,
        source: &dyn RecipeSource,
        prompt: &str,
    ) -> Option<GenerationOutcome> {
        let request = self.begin_generation(prompt)?;
        let result = source.fetch_recipe(&request.prompt).await;
        Some(self.finish_generation(result))
    }
}
