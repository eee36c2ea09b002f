//! # Bouquet Studio
//!
//! Session layer on top of `bouquet_canvas`. A [`BouquetStudio`] owns the
//! scene, the canvas state and the rasterizer, and mediates between them and
//! the outside world: settings files, the recipe service and PNG export.
//!
//! Generation is split in two so a UI can keep running while the request is
//! in flight:
//!
//! ```ignore
//! if let Some(request) = studio.begin_generation("a calm spring morning") {
//!     let result = source.fetch_recipe(&request.prompt).await;
//!     studio.finish_generation(result);
//! }
//! ```

pub mod settings;
pub mod source;
pub mod studio;

pub use settings::{GeminiSettings, StudioSettings};
pub use source::{GeminiRecipeClient, RecipeSource};
pub use studio::{BouquetStudio, GenerationOutcome, GenerationRequest};
