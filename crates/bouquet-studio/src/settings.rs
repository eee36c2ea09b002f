use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bouquet_canvas::CanvasConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Settings for the recipe service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Never written back out; normally supplied through the environment.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Everything a studio session needs at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    pub canvas: CanvasConfig,
    /// Directory exported PNGs are written to.
    pub export_dir: PathBuf,
    /// Font family for the watermark, looked up among system fonts.
    pub font_family: String,
    /// Explicit font file; takes precedence over `font_family`.
    pub font_path: Option<PathBuf>,
    pub gemini: GeminiSettings,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            export_dir: PathBuf::from("."),
            font_family: bouquet_canvas::raster::WATERMARK_FAMILY.to_string(),
            font_path: None,
            gemini: GeminiSettings::default(),
        }
    }
}

impl StudioSettings {
    /// Loads `.env`, then the optional YAML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut settings = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))?;
                Self::from_yaml(&content)
                    .with_context(|| format!("Invalid settings in {}", path.display()))?
            }
            None => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());
        tracing::debug!(
            model = %settings.gemini.model,
            has_key = settings.gemini.api_key.is_some(),
            "Loaded studio settings"
        );
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Applies `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_MODEL`,
    /// `GEMINI_ENDPOINT` and `BOUQUET_EXPORT_DIR` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = non_empty("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(endpoint) = non_empty("GEMINI_ENDPOINT") {
            self.gemini.endpoint = endpoint;
        }
        if let Some(dir) = non_empty("BOUQUET_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
    }
}
