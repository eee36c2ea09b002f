//! # Flower Drawers
//!
//! One pure drawing recipe per [`Species`]. Every drawer takes the head center,
//! the head size (`scale * base_size`) and the user color, and records shapes
//! into a [`DrawList`]. Drawers never consult a random source: anything that
//! looks scattered is derived from the loop index, so identical inputs always
//! produce identical display lists.
//!
//! The recipes are grouped by construction:
//! - [`radial`]: petals arranged around the center (daisy, lily, iris, ...).
//! - [`layered`]: stacked discs, arcs and ruffles (rose, carnation, dahlia, ...).
//! - [`compound`]: heads built from many small units (lavender, hydrangea, baby's breath).

pub mod compound;
pub mod layered;
pub mod radial;

use glam::{Vec2, Vec4};

use crate::render::DrawList;
use crate::species::Species;

/// Signature shared by every flower recipe: `(surface, center, size, color)`.
pub type FlowerDrawer = fn(&mut DrawList, Vec2, f32, Vec4);

/// Looks up the recipe for `species`.
pub fn drawer(species: Species) -> FlowerDrawer {
    match species {
        Species::Rose => layered::rose,
        Species::Tulip => layered::tulip,
        Species::Daisy => radial::daisy,
        Species::Sunflower => radial::sunflower,
        Species::Lavender => compound::lavender,
        Species::Lily => radial::lily,
        Species::Orchid => radial::orchid,
        Species::Carnation => layered::carnation,
        Species::Hydrangea => compound::hydrangea,
        Species::Peony => layered::peony,
        Species::Poppy => radial::poppy,
        Species::Anemone => radial::anemone,
        Species::CherryBlossom => radial::cherry_blossom,
        Species::Ranunculus => layered::ranunculus,
        Species::Dahlia => layered::dahlia,
        Species::Iris => radial::iris,
        Species::Gerbera => radial::gerbera,
        Species::BabysBreath => compound::babys_breath,
        Species::Marigold => layered::marigold,
        Species::Hibiscus => radial::hibiscus,
        Species::Jasmine => radial::jasmine,
    }
}

/// Draws one flower head of `species` at `center`.
pub fn draw_flower(list: &mut DrawList, species: Species, center: Vec2, size: f32, color: Vec4) {
    drawer(species)(list, center, size, color);
}
