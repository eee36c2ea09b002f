//! # Core Data Models
//!
//! This module defines the bouquet scene: the placed flowers and the global
//! composition style.
//!
//! The scene keeps its flowers sorted by ascending `center.y` after every
//! mutation. The compositor paints heads in list order and the hit test walks
//! the list in reverse, so both rely on this ordering instead of sorting on
//! their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use uuid::Uuid;

use crate::color::ColorToken;
use crate::error::CanvasError;
use crate::ribbon::RibbonStyle;
use crate::species::Species;

/// One placed flower.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    /// Stable identity for the lifetime of the flower.
    pub id: Uuid,
    pub species: Species,
    /// Head color.
    pub color: ColorToken,
    /// Head center in canvas space.
    pub center: Vec2,
    /// Size multiplier applied to the species' base size. Always `> 0`.
    pub scale: f32,
    /// Cosmetic offset assigned at creation. Carried with the flower but not
    /// consumed by any drawer.
    pub rotation: f32,
    pub stem_color: ColorToken,
}

impl Flower {
    /// A new flower with a fresh id, unit scale and no rotation.
    pub fn new(
        species: Species,
        color: impl Into<ColorToken>,
        center: Vec2,
        stem_color: ColorToken,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            species,
            color: color.into(),
            center,
            scale: 1.0,
            rotation: 0.0,
            stem_color,
        }
    }

    /// Radius of the drawn head: `scale * species base size`.
    pub fn head_size(&self) -> f32 {
        self.scale * self.species.base_size()
    }
}

/// Partial edit of a flower. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowerUpdate {
    pub color: Option<ColorToken>,
    pub scale: Option<f32>,
    pub stem_color: Option<ColorToken>,
}

/// Global composition settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub ribbon_color: ColorToken,
    pub ribbon_style: RibbonStyle,
    /// Kept while the wrapper is hidden so re-enabling restores it.
    pub wrapper_color: ColorToken,
    pub has_wrapper: bool,
    pub background_color: ColorToken,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            ribbon_color: ColorToken::new("#db2777"),
            ribbon_style: RibbonStyle::Bow,
            wrapper_color: ColorToken::new("#fce7f3"),
            has_wrapper: true,
            background_color: ColorToken::new("#ffffff"),
        }
    }
}

/// Partial edit of the [`SceneStyle`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleUpdate {
    pub ribbon_color: Option<ColorToken>,
    pub ribbon_style: Option<RibbonStyle>,
    pub wrapper_color: Option<ColorToken>,
    pub has_wrapper: Option<bool>,
    pub background_color: Option<ColorToken>,
}

impl SceneStyle {
    pub fn apply(&mut self, update: StyleUpdate) {
        if let Some(color) = update.ribbon_color {
            self.ribbon_color = color;
        }
        if let Some(style) = update.ribbon_style {
            self.ribbon_style = style;
        }
        if let Some(color) = update.wrapper_color {
            self.wrapper_color = color;
        }
        if let Some(has_wrapper) = update.has_wrapper {
            self.has_wrapper = has_wrapper;
        }
        if let Some(color) = update.background_color {
            self.background_color = color;
        }
    }
}

/// The aggregate root: every flower plus the scene style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BouquetScene {
    flowers: Vec<Flower>,
    pub style: SceneStyle,
}

impl BouquetScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flowers in ascending `center.y` order.
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Flower> {
        self.flowers.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a flower and returns its id.
    ///
    /// A flower whose id is already present gets a fresh one so ids stay unique.
    pub fn add(&mut self, mut flower: Flower) -> Uuid {
        if self.contains(flower.id) {
            flower.id = Uuid::new_v4();
        }
        let id = flower.id;
        self.flowers.push(flower);
        self.sort();
        id
    }

    /// Removes a flower by id.
    pub fn remove(&mut self, id: Uuid) -> Option<Flower> {
        let index = self.flowers.iter().position(|f| f.id == id)?;
        Some(self.flowers.remove(index))
    }

    /// Moves a flower's center. No clamping is applied here.
    pub fn move_flower(&mut self, id: Uuid, center: Vec2) -> Result<(), CanvasError> {
        let flower = self
            .flowers
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CanvasError::FlowerNotFound(id))?;
        flower.center = center;
        self.sort();
        Ok(())
    }

    /// Applies a partial edit. The scale is validated before anything changes.
    pub fn update_flower(&mut self, id: Uuid, update: FlowerUpdate) -> Result<(), CanvasError> {
        if let Some(scale) = update.scale
            && !(scale.is_finite() && scale > 0.0)
        {
            return Err(CanvasError::InvalidScale(scale));
        }

        let flower = self
            .flowers
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CanvasError::FlowerNotFound(id))?;

        if let Some(color) = update.color {
            flower.color = color;
        }
        if let Some(scale) = update.scale {
            flower.scale = scale;
        }
        if let Some(stem_color) = update.stem_color {
            flower.stem_color = stem_color;
        }
        Ok(())
    }

    /// Replaces the whole flower list in one step.
    pub fn replace_flowers(&mut self, flowers: Vec<Flower>) {
        self.flowers = flowers;
        self.dedup_ids();
        self.sort();
    }

    pub fn clear(&mut self) {
        self.flowers.clear();
    }

    fn dedup_ids(&mut self) {
        let mut seen = std::collections::HashSet::new();
        for flower in &mut self.flowers {
            while !seen.insert(flower.id) {
                flower.id = Uuid::new_v4();
            }
        }
    }

    /// Stable sort by `center.y`; ties keep insertion order.
    fn sort(&mut self) {
        self.flowers.sort_by(|a, b| a.center.y.total_cmp(&b.center.y));
    }
}
