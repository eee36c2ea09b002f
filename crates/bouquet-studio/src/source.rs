//! The generative collaborator that turns a free-text prompt into a recipe.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use bouquet_canvas::{RawRecipe, Species};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::settings::GeminiSettings;

/// Trait for producing bouquet recipes, abstracting the service behind it.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Returns the unvalidated recipe for `prompt`.
    async fn fetch_recipe(&self, prompt: &str) -> Result<RawRecipe>;
}

/// Recipe source backed by the Gemini `generateContent` REST endpoint.
///
/// The request pins a JSON response schema whose species enum lists every
/// drawable flower, so the reply text can be parsed straight into a
/// [`RawRecipe`].
#[derive(Clone)]
pub struct GeminiRecipeClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiRecipeClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .context("GEMINI_API_KEY is not set")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    /// The `generateContent` request body for `prompt`.
    pub fn request_body(prompt: &str) -> Value {
        let species: Vec<&str> = Species::ALL.iter().map(|s| s.as_str()).collect();
        let text = format!(
            "Generate a flower bouquet recipe based on this request: \"{prompt}\".\n\
             Return a JSON object describing the flowers, colors, and ribbon.\n\
             Be creative with colors.\n\
             Valid flower types are: {}.\n\
             Ensure the counts are reasonable (total 5-15 flowers).",
            species.join(", ")
        );

        json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "flowers": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "type": { "type": "STRING", "enum": species },
                                    "color": { "type": "STRING", "description": "Hex color code" },
                                    "count": { "type": "INTEGER" }
                                },
                                "required": ["type", "color", "count"]
                            }
                        },
                        "ribbonColor": { "type": "STRING", "description": "Hex color code" },
                        "wrapperColor": { "type": "STRING", "description": "Hex color code" },
                        "themeDescription": {
                            "type": "STRING",
                            "description": "A short, poetic description of the bouquet's vibe."
                        }
                    },
                    "required": ["flowers", "ribbonColor", "wrapperColor", "themeDescription"]
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl RecipeSource for GeminiRecipeClient {
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    async fn fetch_recipe(&self, prompt: &str) -> Result<RawRecipe> {
        tracing::debug!(url = %self.url(), "Sending recipe request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .context("Recipe request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Recipe service returned {}: {}", status, body);
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .context("Invalid response from recipe service")?;
        let text = reply
            .text()
            .ok_or_else(|| anyhow!("Recipe service returned no text"))?;

        serde_json::from_str(&text).context("Recipe text is not valid JSON")
    }
}
