use std::path::PathBuf;
use std::sync::Arc;

use bouquet_canvas::input::PointerEvent;
use bouquet_canvas::raster;
use bouquet_canvas::{FlowerUpdate, Species, StyleUpdate};
use bouquet_studio::{BouquetStudio, GeminiRecipeClient, RecipeSource, StudioSettings};
use macroquad::prelude as mq;
use tokio::sync::oneshot;

const SCALE_STEP: f32 = 0.1;
const MIN_SCALE: f32 = 0.2;

struct Args {
    config: Option<PathBuf>,
    prompt: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: None,
        prompt: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--prompt" if i + 1 < args.len() => {
                parsed.prompt = Some(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Ignoring argument {other}"),
        }
        i += 1;
    }
    parsed
}

/// Where the canvas is drawn inside the window: letterboxed and centered.
fn fit_canvas(canvas_size: glam::Vec2) -> (glam::Vec2, glam::Vec2) {
    let window = glam::Vec2::new(mq::screen_width(), mq::screen_height());
    let scale = (window / canvas_size).min_element().max(0.01);
    let size = canvas_size * scale;
    ((window - size) * 0.5, size)
}

#[macroquad::main("Bouquet Playground")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bouquet_studio=info,bouquet_canvas=info".into()),
        )
        .init();

    // 1. Settings and session
    let args = parse_args();
    let settings = match StudioSettings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {e:#}");
            return;
        }
    };
    let mut studio = BouquetStudio::from_settings(&settings);

    // 2. Recipe service on its own runtime; macroquad owns the main loop.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start tokio runtime: {e}");
            return;
        }
    };
    let source: Option<Arc<dyn RecipeSource>> = match GeminiRecipeClient::new(&settings.gemini) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("Generation disabled: {e:#}");
            None
        }
    };
    let mut pending: Option<oneshot::Receiver<anyhow::Result<bouquet_canvas::RawRecipe>>> = None;

    let mut species = Species::Rose;
    let mut texture: Option<mq::Texture2D> = None;
    let mut dirty = true;
    let mut was_inside = false;
    let mut last_mouse = glam::Vec2::ZERO;

    loop {
        let canvas_size = studio.config().size();
        let (origin, size) = fit_canvas(canvas_size);
        studio.set_display(origin, size);

        // 3. Pointer
        let (mx, my) = mq::mouse_position();
        let mouse = glam::Vec2::new(mx, my);
        let inside = studio.canvas().view.contains_display(mouse);
        let mut events = Vec::new();

        if mq::is_mouse_button_pressed(mq::MouseButton::Left) && inside {
            events.extend(studio.pointer(PointerEvent::down(mouse)));
        }
        if mouse != last_mouse {
            events.extend(studio.pointer(PointerEvent::moved(mouse)));
        }
        if mq::is_mouse_button_released(mq::MouseButton::Left) {
            events.extend(studio.pointer(PointerEvent::up(mouse)));
        }
        if was_inside && !inside {
            events.extend(studio.pointer(PointerEvent::leave(mouse)));
        }
        was_inside = inside;
        last_mouse = mouse;

        for event in &events {
            tracing::debug!(?event, "Logic event");
        }
        dirty |= !events.is_empty();

        // 4. Keyboard
        if mq::is_key_pressed(mq::KeyCode::Tab) {
            species = species.next();
            tracing::info!("Next flower: {}", species.label());
        }
        if mq::is_key_pressed(mq::KeyCode::A) {
            studio.add_flower(species, species.default_color());
            dirty = true;
        }
        if mq::is_key_pressed(mq::KeyCode::Delete) || mq::is_key_pressed(mq::KeyCode::Backspace) {
            dirty |= studio.remove_selected().is_some();
        }
        for (key, delta) in [
            (mq::KeyCode::LeftBracket, -SCALE_STEP),
            (mq::KeyCode::RightBracket, SCALE_STEP),
        ] {
            if mq::is_key_pressed(key)
                && let Some(id) = studio.selection()
                && let Some(flower) = studio.scene().get(id)
            {
                let update = FlowerUpdate {
                    scale: Some((flower.scale + delta).max(MIN_SCALE)),
                    ..Default::default()
                };
                if let Err(e) = studio.update_flower(id, update) {
                    tracing::warn!("{e:#}");
                }
                dirty = true;
            }
        }
        if mq::is_key_pressed(mq::KeyCode::R) {
            let next = studio.scene().style.ribbon_style.next();
            studio.update_style(StyleUpdate {
                ribbon_style: Some(next),
                ..Default::default()
            });
            dirty = true;
        }
        if mq::is_key_pressed(mq::KeyCode::W) {
            let has_wrapper = !studio.scene().style.has_wrapper;
            studio.update_style(StyleUpdate {
                has_wrapper: Some(has_wrapper),
                ..Default::default()
            });
            dirty = true;
        }
        if mq::is_key_pressed(mq::KeyCode::S) {
            match studio.export_png(&settings.export_dir) {
                Ok(path) => tracing::info!("Saved {}", path.display()),
                Err(e) => tracing::error!("Export failed: {e:#}"),
            }
        }
        if mq::is_key_pressed(mq::KeyCode::G) {
            match (&source, args.prompt.as_deref()) {
                (Some(source), Some(prompt)) => {
                    if let Some(request) = studio.begin_generation(prompt) {
                        let (tx, rx) = oneshot::channel();
                        let source = Arc::clone(source);
                        runtime.spawn(async move {
                            let result = source.fetch_recipe(&request.prompt).await;
                            let _ = tx.send(result);
                        });
                        pending = Some(rx);
                    }
                }
                (None, _) => tracing::warn!("No recipe service configured"),
                (_, None) => tracing::warn!("Start with --prompt \"...\" to generate"),
            }
        }

        // 5. Generation results
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    let outcome = studio.finish_generation(result);
                    tracing::info!(?outcome, "Generation finished");
                    pending = None;
                    dirty = true;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    studio.finish_generation(Err(anyhow::anyhow!("generation task dropped")));
                    pending = None;
                }
            }
        }

        // 6. Rasterize only when something changed
        if dirty && let Some(pixmap) = studio.render_pixmap() {
            let image = mq::Image {
                bytes: raster::to_straight_rgba(&pixmap),
                width: pixmap.width() as u16,
                height: pixmap.height() as u16,
            };
            match &texture {
                Some(texture) if texture.width() as u32 == pixmap.width() => texture.update(&image),
                _ => texture = Some(mq::Texture2D::from_image(&image)),
            }
            dirty = false;
        }

        // 7. Draw
        mq::clear_background(mq::DARKGRAY);
        if let Some(texture) = &texture {
            mq::draw_texture_ex(
                texture,
                origin.x,
                origin.y,
                mq::WHITE,
                mq::DrawTextureParams {
                    dest_size: Some(mq::vec2(size.x, size.y)),
                    ..Default::default()
                },
            );
        }

        let status = format!(
            "[Tab] {}  [R] {}  {}",
            species.label(),
            studio.scene().style.ribbon_style.label(),
            if studio.is_generating() { "Generating..." } else { "" }
        );
        mq::draw_text(&status, 12.0, 24.0, 22.0, mq::WHITE);

        mq::next_frame().await
    }
}
