use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bouquet_canvas::{
    CanvasConfig, CanvasError, ColorToken, FlowerUpdate, RawRecipe, RibbonStyle, Species,
    StyleUpdate,
    input::PointerEvent,
    raster::Rasterizer,
};
use bouquet_studio::{BouquetStudio, GenerationOutcome, RecipeSource, StudioSettings};
use glam::Vec2;

fn studio() -> BouquetStudio {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    BouquetStudio::new(CanvasConfig::default(), Rasterizer::new()).with_seed(7)
}

fn recipe_json(species: &str, count: u32) -> RawRecipe {
    serde_json::from_value(serde_json::json!({
        "flowers": [{ "type": species, "color": "#a855f7", "count": count }],
        "ribbonColor": "#0f766e",
        "wrapperColor": "#ecfccb",
        "themeDescription": "Lavender fields at dusk"
    }))
    .unwrap()
}

struct StaticSource(Result<RawRecipe, String>);

#[async_trait]
impl RecipeSource for StaticSource {
    async fn fetch_recipe(&self, _prompt: &str) -> Result<RawRecipe> {
        self.0.clone().map_err(|e| anyhow!(e))
    }
}

#[test]
fn test_add_flower_uses_defaults() {
    let mut studio = studio();
    let id = studio.add_flower(Species::Rose, Species::Rose.default_color());

    let flower = studio.scene().get(id).unwrap();
    assert_eq!(flower.scale, 1.0);
    assert_eq!(flower.stem_color.as_str(), "#4d7c0f");
    assert!(flower.rotation.abs() <= 0.25);

    let offset = flower.center - Vec2::new(400.0, 300.0);
    assert!(offset.x.abs() <= 50.0 && offset.y.abs() <= 25.0);
}

#[test]
fn test_add_flower_at_is_clamped() {
    let mut studio = studio();
    let id = studio.add_flower_at(Species::Tulip, "#db2777", Vec2::new(900.0, -10.0));
    assert_eq!(studio.scene().get(id).unwrap().center, Vec2::new(750.0, 50.0));
}

#[test]
fn test_remove_selected() {
    let mut studio = studio();
    let id = studio.add_flower_at(Species::Poppy, "#ef4444", Vec2::new(400.0, 300.0));

    assert!(studio.remove_selected().is_none());

    studio.pointer(PointerEvent::down(Vec2::new(400.0, 300.0)));
    studio.pointer(PointerEvent::up(Vec2::new(400.0, 300.0)));
    assert_eq!(studio.selection(), Some(id));

    let removed = studio.remove_selected().unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(studio.selection(), None);
    assert!(studio.scene().is_empty());
}

#[test]
fn test_remove_flower_clears_its_selection() {
    let mut studio = studio();
    let id = studio.add_flower_at(Species::Iris, "#4f46e5", Vec2::new(300.0, 300.0));
    studio.select(Some(id));

    assert!(studio.remove_flower(id));
    assert!(!studio.remove_flower(id));
    assert_eq!(studio.selection(), None);
}

#[test]
fn test_update_flower_rejects_bad_scale() {
    let mut studio = studio();
    let id = studio.add_flower(Species::Dahlia, "#9f1239");

    let err = studio
        .update_flower(
            id,
            FlowerUpdate {
                scale: Some(0.0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CanvasError>(),
        Some(CanvasError::InvalidScale(_))
    ));

    studio
        .update_flower(
            id,
            FlowerUpdate {
                scale: Some(1.4),
                color: Some(ColorToken::new("#fb7185")),
                ..Default::default()
            },
        )
        .unwrap();
    let flower = studio.scene().get(id).unwrap();
    assert_eq!(flower.scale, 1.4);
    assert_eq!(flower.color.as_str(), "#fb7185");
}

#[test]
fn test_update_style() {
    let mut studio = studio();
    studio.update_style(StyleUpdate {
        ribbon_style: Some(RibbonStyle::DoubleBow),
        background_color: Some(ColorToken::new("#fdf2f8")),
        ..Default::default()
    });

    let style = &studio.scene().style;
    assert_eq!(style.ribbon_style, RibbonStyle::DoubleBow);
    assert_eq!(style.background_color.as_str(), "#fdf2f8");
    assert!(style.has_wrapper);
}

#[test]
fn test_generation_is_single_flight() {
    let mut studio = studio();

    assert!(studio.begin_generation("   ").is_none());
    assert!(!studio.is_generating());

    let request = studio.begin_generation("  spring  ").unwrap();
    assert_eq!(request.prompt, "spring");
    assert!(studio.is_generating());
    assert!(studio.begin_generation("another").is_none());

    studio.finish_generation(Err(anyhow!("offline")));
    assert!(!studio.is_generating());
    assert!(studio.begin_generation("again").is_some());
}

#[test]
fn test_generation_replaces_scene_and_clears_selection() {
    let mut studio = studio();
    let old = studio.add_flower_at(Species::Sunflower, "#f59e0b", Vec2::new(400.0, 300.0));
    studio.select(Some(old));

    studio.begin_generation("lavender").unwrap();
    let outcome = studio.finish_generation(Ok(recipe_json("LAVENDER", 6)));

    assert_eq!(
        outcome,
        GenerationOutcome::Applied {
            flowers: 6,
            theme: "Lavender fields at dusk".to_string()
        }
    );
    assert_eq!(studio.scene().len(), 6);
    assert!(studio.scene().get(old).is_none());
    assert_eq!(studio.selection(), None);
    assert_eq!(studio.scene().style.ribbon_color.as_str(), "#0f766e");
    assert_eq!(studio.scene().style.wrapper_color.as_str(), "#ecfccb");
}

#[test]
fn test_generation_without_valid_flowers_keeps_scene() {
    let mut studio = studio();
    studio.add_flower(Species::Rose, "#e11d48");
    let before = studio.scene().clone();

    studio.begin_generation("cacti").unwrap();
    let outcome = studio.finish_generation(Ok(recipe_json("CACTUS", 4)));

    assert_eq!(outcome, GenerationOutcome::Empty);
    assert_eq!(studio.scene(), &before);
    assert!(!studio.is_generating());
}

#[test]
fn test_generation_with_oversized_count_stays_bounded() {
    let mut studio = studio();

    studio.begin_generation("a field of roses").unwrap();
    let outcome = studio.finish_generation(Ok(recipe_json("ROSE", u32::MAX)));

    assert!(matches!(outcome, GenerationOutcome::Applied { flowers: 100, .. }));
    assert_eq!(studio.scene().len(), 100);
    assert!(!studio.is_generating());
}

#[tokio::test]
async fn test_generate_with_source() {
    let mut studio = studio();

    let ok = StaticSource(Ok(recipe_json("cherry blossom", 5)));
    let outcome = studio.generate(&ok, "sakura").await;
    assert!(matches!(outcome, Some(GenerationOutcome::Applied { flowers: 5, .. })));
    assert!(
        studio
            .scene()
            .flowers()
            .iter()
            .all(|f| f.species == Species::CherryBlossom)
    );

    let failing = StaticSource(Err("quota exceeded".to_string()));
    let before = studio.scene().clone();
    let outcome = studio.generate(&failing, "sakura").await;
    assert!(matches!(outcome, Some(GenerationOutcome::Failed(ref msg)) if msg.contains("quota")));
    assert_eq!(studio.scene(), &before);

    assert_eq!(studio.generate(&failing, "").await, None);
}

#[test]
fn test_render_pixmap_skips_empty_surface() {
    let config = CanvasConfig {
        width: 0.0,
        ..Default::default()
    };
    let empty = BouquetStudio::new(config, Rasterizer::new());
    assert!(empty.render_pixmap().is_none());

    let pixmap = studio().render_pixmap().unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (800, 800));
}

#[test]
fn test_export_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut studio = studio();
    let id = studio.add_flower(Species::Hydrangea, "#60a5fa");
    studio.select(Some(id));

    let path = studio.export_png(&dir.path().join("exports")).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("my-bouquet-") && name.ends_with(".png"));
    let millis = &name["my-bouquet-".len()..name.len() - ".png".len()];
    assert!(millis.parse::<i64>().is_ok());

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    // Export does not disturb the selection.
    assert_eq!(studio.selection(), Some(id));
}

#[test]
fn test_settings_from_yaml_and_env() {
    let mut settings = StudioSettings::from_yaml(
        r#"
export_dir: out/bouquets
canvas:
  width: 600
  height: 600
gemini:
  model: gemini-test
"#,
    )
    .unwrap();

    assert_eq!(settings.canvas.width, 600.0);
    // Unspecified fields keep their defaults.
    assert_eq!(settings.canvas.boundary_margin, 50.0);
    assert_eq!(settings.gemini.model, "gemini-test");
    assert!(settings.gemini.api_key.is_none());

    settings.apply_env(|key| match key {
        "API_KEY" => Some("legacy-key".to_string()),
        "GEMINI_ENDPOINT" => Some("http://localhost:9000".to_string()),
        "GEMINI_MODEL" => Some("  ".to_string()),
        _ => None,
    });

    assert_eq!(settings.gemini.api_key.as_deref(), Some("legacy-key"));
    assert_eq!(settings.gemini.endpoint, "http://localhost:9000");
    assert_eq!(settings.gemini.model, "gemini-test");
}
