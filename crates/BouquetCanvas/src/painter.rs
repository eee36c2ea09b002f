use bitflags::bitflags;
use glam::Vec2;
use uuid::Uuid;

use crate::config::CanvasConfig;
use crate::flowers;
use crate::model::BouquetScene;
use crate::primitives;
use crate::render::{DrawList, Frame, Layer, Span, TextAlign};
use crate::ribbon;

bitflags! {
    /// Which layers a frame should contain.
    ///
    /// Interactive rendering uses [`Layers::all`]; export drops
    /// [`Layers::HIGHLIGHT`] because selection is not part of the bouquet.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Layers: u8 {
        const BACKGROUND = 1 << 0;
        const WRAPPER = 1 << 1;
        const STEMS = 1 << 2;
        const HIGHLIGHT = 1 << 3;
        const HEADS = 1 << 4;
        const RIBBON = 1 << 5;
        const WATERMARK = 1 << 6;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::all()
    }
}

/// High-level compositor for a bouquet.
///
/// The `Painter` converts the scene into concrete drawing commands. Every call
/// recomputes the whole frame; there is no retained or incremental state.
/// Layers are emitted in a fixed order, back to front:
/// - Background fill
/// - Wrapper cone (only when enabled)
/// - Stems, in scene order
/// - Flower heads, in ascending `center.y`, with the selection halo right
///   before the selected head
/// - Ribbon
/// - Watermark
pub struct Painter;

impl Painter {
    /// Generates the full frame for `scene`.
    ///
    /// # Arguments
    /// * `config` - Canvas geometry and fixed styling.
    /// * `scene` - The bouquet to render.
    /// * `selected` - Flower to highlight, if any. Ids not in the scene are ignored.
    /// * `layers` - Layers to include.
    pub fn draw_scene(
        config: &CanvasConfig,
        scene: &BouquetScene,
        selected: Option<Uuid>,
        layers: Layers,
    ) -> Frame {
        let mut frame = FrameRecorder::default();
        let style = &scene.style;
        let anchor = config.convergence_anchor();

        // 1. Background
        if layers.contains(Layers::BACKGROUND) {
            frame.record(Layer::Background, None, |list| {
                list.fill_surface(style.background_color.to_vec4());
            });
        }

        // 2. Wrapper (behind everything drawn from here on)
        if layers.contains(Layers::WRAPPER) && style.has_wrapper {
            frame.record(Layer::Wrapper, None, |list| {
                ribbon::draw_wrapper(list, anchor, style.wrapper_color.to_vec4());
            });
        }

        // 3. Stems, all before any head
        if layers.contains(Layers::STEMS) {
            for flower in scene.flowers() {
                frame.record(Layer::Stem, Some(flower.id), |list| {
                    let base = flower.center + Vec2::new(0.0, config.stem_base_offset);
                    primitives::stem(
                        list,
                        base,
                        anchor,
                        flower.stem_color.to_vec4(),
                        config.stem_width,
                    );
                });
            }
        }

        // 4. Heads. The scene is kept sorted by `center.y`, so list order is
        //    back-to-front.
        debug_assert!(
            scene
                .flowers()
                .windows(2)
                .all(|w| w[0].center.y <= w[1].center.y)
        );
        for flower in scene.flowers() {
            if layers.contains(Layers::HIGHLIGHT) && selected == Some(flower.id) {
                frame.record(Layer::Highlight, Some(flower.id), |list| {
                    list.halo(
                        flower.center,
                        flower.scale * config.halo_radius,
                        config.style.halo_color,
                        config.style.halo_shadow,
                        config.style.halo_blur,
                    );
                });
            }
            if layers.contains(Layers::HEADS) {
                frame.record(Layer::Head, Some(flower.id), |list| {
                    flowers::draw_flower(
                        list,
                        flower.species,
                        flower.center,
                        flower.head_size(),
                        flower.color.to_vec4(),
                    );
                });
            }
        }

        // 5. Ribbon
        if layers.contains(Layers::RIBBON) {
            frame.record(Layer::Ribbon, None, |list| {
                ribbon::draw_ribbon(list, anchor, style.ribbon_style, &style.ribbon_color, config);
            });
        }

        // 6. Watermark
        if layers.contains(Layers::WATERMARK) && !config.watermark.is_empty() {
            frame.record(Layer::Watermark, None, |list| {
                let inset = config.style.watermark_inset;
                list.text(
                    config.size() - Vec2::splat(inset),
                    config.watermark.clone(),
                    config.style.watermark_color,
                    config.style.watermark_size,
                    TextAlign::Right,
                );
            });
        }

        tracing::debug!(
            flowers = scene.len(),
            commands = frame.list.len(),
            "Composed frame"
        );

        frame.finish()
    }
}

/// Records which command range each drawing step produced.
#[derive(Default)]
struct FrameRecorder {
    list: DrawList,
    spans: Vec<Span>,
}

impl FrameRecorder {
    fn record(&mut self, layer: Layer, flower: Option<Uuid>, draw: impl FnOnce(&mut DrawList)) {
        let start = self.list.len();
        draw(&mut self.list);
        debug_assert_eq!(self.list.depth(), 0, "drawer leaked a placement");
        if self.list.len() > start {
            self.spans.push(Span {
                layer,
                flower,
                range: start..self.list.len(),
            });
        }
    }

    fn finish(self) -> Frame {
        Frame {
            commands: self.list.into_commands(),
            spans: self.spans,
        }
    }
}
