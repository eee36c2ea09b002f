//! # Species
//!
//! The closed set of flower recipes. Names coming from outside the crate are
//! parsed once at the boundary ([`Species::from_str`]); everything past that
//! point is an exhaustive `match`, so adding a species is a compile error
//! until every table below handles it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Rose,
    Tulip,
    Daisy,
    Sunflower,
    Lavender,
    Lily,
    Orchid,
    Carnation,
    Hydrangea,
    Peony,
    Poppy,
    Anemone,
    CherryBlossom,
    Ranunculus,
    Dahlia,
    Iris,
    Gerbera,
    BabysBreath,
    Marigold,
    Hibiscus,
    Jasmine,
}

impl Species {
    /// Every species, in picker order.
    pub const ALL: [Species; 21] = [
        Species::Rose,
        Species::Tulip,
        Species::Daisy,
        Species::Sunflower,
        Species::Lavender,
        Species::Lily,
        Species::Orchid,
        Species::Carnation,
        Species::Hydrangea,
        Species::Peony,
        Species::Poppy,
        Species::Anemone,
        Species::CherryBlossom,
        Species::Ranunculus,
        Species::Dahlia,
        Species::Iris,
        Species::Gerbera,
        Species::BabysBreath,
        Species::Marigold,
        Species::Hibiscus,
        Species::Jasmine,
    ];

    /// Wire name, as used by the recipe service.
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Rose => "ROSE",
            Species::Tulip => "TULIP",
            Species::Daisy => "DAISY",
            Species::Sunflower => "SUNFLOWER",
            Species::Lavender => "LAVENDER",
            Species::Lily => "LILY",
            Species::Orchid => "ORCHID",
            Species::Carnation => "CARNATION",
            Species::Hydrangea => "HYDRANGEA",
            Species::Peony => "PEONY",
            Species::Poppy => "POPPY",
            Species::Anemone => "ANEMONE",
            Species::CherryBlossom => "CHERRY_BLOSSOM",
            Species::Ranunculus => "RANUNCULUS",
            Species::Dahlia => "DAHLIA",
            Species::Iris => "IRIS",
            Species::Gerbera => "GERBERA",
            Species::BabysBreath => "BABYS_BREATH",
            Species::Marigold => "MARIGOLD",
            Species::Hibiscus => "HIBISCUS",
            Species::Jasmine => "JASMINE",
        }
    }

    /// Human readable name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Species::Rose => "Rose",
            Species::Tulip => "Tulip",
            Species::Daisy => "Daisy",
            Species::Sunflower => "Sunflower",
            Species::Lavender => "Lavender",
            Species::Lily => "Lily",
            Species::Orchid => "Orchid",
            Species::Carnation => "Carnation",
            Species::Hydrangea => "Hydrangea",
            Species::Peony => "Peony",
            Species::Poppy => "Poppy",
            Species::Anemone => "Anemone",
            Species::CherryBlossom => "Cherry Blossom",
            Species::Ranunculus => "Ranunculus",
            Species::Dahlia => "Dahlia",
            Species::Iris => "Iris",
            Species::Gerbera => "Gerbera",
            Species::BabysBreath => "Baby's Breath",
            Species::Marigold => "Marigold",
            Species::Hibiscus => "Hibiscus",
            Species::Jasmine => "Jasmine",
        }
    }

    /// Suggested head color when the user has not picked one.
    pub fn default_color(self) -> &'static str {
        match self {
            Species::Rose => "#e11d48",
            Species::Tulip => "#db2777",
            Species::Daisy => "#ffffff",
            Species::Sunflower => "#f59e0b",
            Species::Lavender => "#7c3aed",
            Species::Lily => "#fce7f3",
            Species::Orchid => "#d946ef",
            Species::Carnation => "#f43f5e",
            Species::Hydrangea => "#60a5fa",
            Species::Peony => "#f9a8d4",
            Species::Poppy => "#ef4444",
            Species::Anemone => "#6366f1",
            Species::CherryBlossom => "#fbcfe8",
            Species::Ranunculus => "#fcd34d",
            Species::Dahlia => "#9f1239",
            Species::Iris => "#4f46e5",
            Species::Gerbera => "#fb923c",
            Species::BabysBreath => "#f9fafb",
            Species::Marigold => "#ea580c",
            Species::Hibiscus => "#dc2626",
            Species::Jasmine => "#fefce8",
        }
    }

    /// Head radius at scale 1.0, in canvas pixels.
    pub fn base_size(self) -> f32 {
        match self {
            Species::Sunflower | Species::Hydrangea => 25.0,
            Species::Peony | Species::Poppy | Species::Anemone | Species::Iris | Species::Marigold => {
                22.0
            }
            Species::CherryBlossom => 18.0,
            Species::Ranunculus => 21.0,
            Species::Dahlia | Species::Gerbera | Species::Hibiscus => 24.0,
            Species::Rose
            | Species::Tulip
            | Species::Daisy
            | Species::Lavender
            | Species::Lily
            | Species::Orchid
            | Species::Carnation
            | Species::BabysBreath
            | Species::Jasmine => 20.0,
        }
    }

    /// The species after this one in picker order, wrapping around.
    pub fn next(self) -> Species {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = CanvasError;

    /// Accepts wire names in any case, with `_`, `-`, space or no separator,
    /// plus the apostrophe in "Baby's Breath".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' ' | '\''))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Species::ALL
            .into_iter()
            .find(|species| species.as_str().replace('_', "") == key)
            .ok_or_else(|| CanvasError::UnknownSpecies(s.to_string()))
    }
}
