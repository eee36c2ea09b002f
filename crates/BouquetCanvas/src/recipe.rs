//! # Recipe Boundary
//!
//! A recipe is the structured output of the external bouquet generator: a
//! list of `(species, color, count)` groups plus ribbon and wrapper colors.
//! [`RawRecipe`] mirrors the wire JSON exactly; [`Recipe::validate`] turns it
//! into typed groups, dropping anything the canvas cannot draw.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::ColorToken;
use crate::config::CanvasConfig;
use crate::layout;
use crate::model::{BouquetScene, Flower};
use crate::species::Species;

/// One flower group as sent over the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    #[serde(rename = "type")]
    pub species: String,
    pub color: String,
    pub count: u32,
}

/// The generator's reply, unvalidated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    #[serde(default)]
    pub flowers: Vec<RawGroup>,
    #[serde(default)]
    pub ribbon_color: String,
    #[serde(default)]
    pub wrapper_color: String,
    #[serde(default)]
    pub theme_description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecipeGroup {
    pub species: Species,
    pub color: ColorToken,
    pub count: u32,
}

/// A recipe whose groups all name known species with a non-zero count.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub groups: Vec<RecipeGroup>,
    pub ribbon_color: ColorToken,
    pub wrapper_color: ColorToken,
    pub theme: String,
}

impl Recipe {
    /// Validates a raw recipe. Unknown species and empty groups are dropped
    /// with a warning; colors are kept verbatim.
    ///
    /// At most `max_flowers` flowers survive. Groups are filled in order and
    /// a group that would overflow the budget is cut down to what is left.
    pub fn validate(raw: RawRecipe, max_flowers: usize) -> Self {
        let mut remaining = max_flowers;
        let mut groups = Vec::new();

        for group in raw.flowers {
            let species = match group.species.parse::<Species>() {
                Ok(species) => species,
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping recipe group");
                    continue;
                }
            };
            if group.count == 0 {
                tracing::warn!(species = %species, "Dropping empty recipe group");
                continue;
            }
            if remaining == 0 {
                tracing::warn!(
                    species = %species,
                    count = group.count,
                    "Recipe is full, dropping group"
                );
                continue;
            }

            let requested = group.count as usize;
            let count = requested.min(remaining);
            if count < requested {
                tracing::warn!(
                    species = %species,
                    requested,
                    kept = count,
                    "Clamping oversized recipe group"
                );
            }
            remaining -= count;

            groups.push(RecipeGroup {
                species,
                color: ColorToken::new(group.color),
                count: count as u32,
            });
        }

        Self {
            groups,
            ribbon_color: ColorToken::new(raw.ribbon_color),
            wrapper_color: ColorToken::new(raw.wrapper_color),
            theme: raw.theme_description,
        }
    }

    /// Total number of flowers across all groups.
    pub fn flower_count(&self) -> usize {
        self.groups.iter().map(|g| g.count as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Expands a recipe into placed flowers.
///
/// The spiral index runs across all groups, so the first flower of the second
/// group continues where the first group stopped.
pub fn expand_recipe<R: Rng + ?Sized>(
    recipe: &Recipe,
    config: &CanvasConfig,
    rng: &mut R,
) -> Vec<Flower> {
    let mut flowers = Vec::new();
    let slots = recipe
        .groups
        .iter()
        .flat_map(|group| (0..group.count).map(move |_| group));

    for (index, group) in slots.enumerate() {
        let center = layout::spiral_position(index, config, rng);
        let mut flower = Flower::new(
            group.species,
            group.color.clone(),
            center,
            config.style.default_stem_color.clone(),
        );
        flower.rotation = layout::rotation_jitter(layout::RECIPE_ROTATION_JITTER, rng);
        flowers.push(flower);
    }

    flowers.sort_by(|a, b| a.center.y.total_cmp(&b.center.y));
    flowers
}

impl BouquetScene {
    /// Swaps in a generated bouquet: flowers, ribbon color and wrapper color
    /// change together. Ribbon style, wrapper visibility and background stay.
    pub fn apply_recipe(&mut self, recipe: &Recipe, flowers: Vec<Flower>) {
        let mut next = self.clone();
        next.replace_flowers(flowers);
        next.style.ribbon_color = recipe.ribbon_color.clone();
        next.style.wrapper_color = recipe.wrapper_color.clone();
        *self = next;
    }
}
