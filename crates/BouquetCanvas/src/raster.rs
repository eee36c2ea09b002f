//! # Raster Backend
//!
//! Interprets a [`RenderList`](crate::render::RenderList) onto a tiny-skia
//! [`Pixmap`]. Shapes are anti-aliased; text is rasterized with rusttype and
//! blended into the pixmap by hand, since tiny-skia has no text support.
//!
//! Any paint whose color is fully transparent (including malformed user
//! colors, which resolve to transparent) is skipped.

use std::f32::consts::{FRAC_PI_2, TAU};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use glam::{Vec2, Vec4};
use rusttype::{Font, Scale, point as rt_point};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Transform,
};

use crate::error::CanvasError;
use crate::render::{DrawCommand, PathEl, ShapeStyle, TextAlign};

/// Font family tried first for the watermark.
pub const WATERMARK_FAMILY: &str = "Pacifico";

/// Number of rings used to fake the halo's blurred shadow.
const HALO_SHADOW_STEPS: usize = 6;

/// Turns display lists into pixels.
pub struct Rasterizer {
    font: Option<Font<'static>>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// A rasterizer without a font. Text commands are skipped.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Looks up `family` among the system fonts, falling back to any cursive
    /// face and then any sans-serif face.
    pub fn with_system_font(family: &str) -> Self {
        let font = load_system_font(family);
        match &font {
            Some(_) => tracing::debug!(family, "Loaded watermark font"),
            None => tracing::warn!(family, "No system font found, text will be skipped"),
        }
        Self { font }
    }

    /// Uses the given TrueType/OpenType bytes for text.
    pub fn with_font_bytes(bytes: Vec<u8>) -> Result<Self, CanvasError> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| CanvasError::FontUnavailable("invalid font data".to_string()))?;
        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Renders `commands` onto a fresh transparent pixmap.
    pub fn render(
        &self,
        commands: &[DrawCommand],
        width: u32,
        height: u32,
    ) -> Result<Pixmap, CanvasError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::SurfaceUnavailable { width, height })?;
        self.render_into(&mut pixmap, commands);
        Ok(pixmap)
    }

    /// Renders `commands` on top of whatever `pixmap` already holds.
    pub fn render_into(&self, pixmap: &mut Pixmap, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Fill { color } => {
                    if let (Some(paint), Some(rect)) = (
                        paint_for(*color),
                        Rect::from_xywh(0.0, 0.0, pixmap.width() as f32, pixmap.height() as f32),
                    ) {
                        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                    }
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    style,
                } => {
                    if let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) {
                        paint_path(pixmap, &path, style, Transform::identity());
                    }
                }
                DrawCommand::Ellipse {
                    center,
                    radii,
                    rotation,
                    style,
                } => {
                    let oval = Rect::from_xywh(
                        center.x - radii.x,
                        center.y - radii.y,
                        radii.x * 2.0,
                        radii.y * 2.0,
                    );
                    if let Some(path) = oval.and_then(PathBuilder::from_oval) {
                        let transform =
                            Transform::from_rotate_at(rotation.to_degrees(), center.x, center.y);
                        paint_path(pixmap, &path, style, transform);
                    }
                }
                DrawCommand::Path { elements, style } => {
                    if let Some(path) = build_path(elements) {
                        paint_path(pixmap, &path, style, Transform::identity());
                    }
                }
                DrawCommand::Halo {
                    center,
                    radius,
                    color,
                    shadow,
                    blur,
                } => draw_halo(pixmap, *center, *radius, *color, *shadow, *blur),
                DrawCommand::Text {
                    anchor,
                    text,
                    color,
                    size,
                    align,
                } => match &self.font {
                    Some(font) => draw_text(pixmap, font, *anchor, text, *color, *size, *align),
                    None => tracing::debug!(text = %text, "Skipping text without a font"),
                },
            }
        }
    }
}

/// Encodes a pixmap as PNG.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, CanvasError> {
    pixmap
        .encode_png()
        .map_err(|e| CanvasError::Encode(e.to_string()))
}

/// Straight (non-premultiplied) RGBA8 bytes, as expected by most texture APIs.
pub fn to_straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

fn load_system_font(family: &str) -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::Name(family), Family::Cursive, Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db.query(&query)?;
    db.with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })
    .flatten()
}

fn color_for(color: Vec4) -> Option<Color> {
    if !(color.w > 0.0) {
        return None;
    }
    Color::from_rgba(color.x, color.y, color.z, color.w)
}

fn paint_for(color: Vec4) -> Option<Paint<'static>> {
    let mut paint = Paint::default();
    paint.set_color(color_for(color)?);
    paint.anti_alias = true;
    Some(paint)
}

fn paint_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: &ShapeStyle, transform: Transform) {
    if let Some(paint) = style.fill.and_then(paint_for) {
        pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
    }
    if let Some(stroke) = style.stroke
        && stroke.width > 0.0
        && let Some(paint) = paint_for(stroke.color)
    {
        let line = tiny_skia::Stroke {
            width: stroke.width,
            ..Default::default()
        };
        pixmap.stroke_path(path, &paint, &line, transform, None);
    }
}

fn build_path(elements: &[PathEl]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let mut has_point = false;

    for el in elements {
        match *el {
            PathEl::MoveTo(p) => {
                pb.move_to(p.x, p.y);
                has_point = true;
            }
            PathEl::LineTo(p) => {
                connect(&mut pb, &mut has_point, p);
            }
            PathEl::QuadTo(c, p) => {
                if !has_point {
                    pb.move_to(c.x, c.y);
                    has_point = true;
                }
                pb.quad_to(c.x, c.y, p.x, p.y);
            }
            PathEl::CubicTo(c1, c2, p) => {
                if !has_point {
                    pb.move_to(c1.x, c1.y);
                    has_point = true;
                }
                pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
            }
            PathEl::Arc {
                center,
                radius,
                start,
                end,
            } => append_arc(&mut pb, &mut has_point, center, radius, start, end),
            PathEl::Close => pb.close(),
        }
    }

    pb.finish()
}

/// Line to `p`, or start a subpath there when there is no current point.
fn connect(pb: &mut PathBuilder, has_point: &mut bool, p: Vec2) {
    if *has_point {
        pb.line_to(p.x, p.y);
    } else {
        pb.move_to(p.x, p.y);
        *has_point = true;
    }
}

/// Appends a clockwise (y-down) arc as cubic segments of at most a quarter turn.
fn append_arc(
    pb: &mut PathBuilder,
    has_point: &mut bool,
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
) {
    let sweep = if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    };

    let on_circle = |angle: f32| center + Vec2::from_angle(angle) * radius;
    connect(pb, has_point, on_circle(start));
    if sweep <= 0.0 || radius <= 0.0 {
        return;
    }

    let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

    for i in 0..segments {
        let a0 = start + step * i as f32;
        let a1 = a0 + step;
        let p0 = on_circle(a0);
        let p3 = on_circle(a1);
        let t0 = Vec2::new(-a0.sin(), a0.cos());
        let t1 = Vec2::new(-a1.sin(), a1.cos());
        let c1 = p0 + t0 * k;
        let c2 = p3 - t1 * k;
        pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p3.x, p3.y);
    }
}

fn draw_halo(pixmap: &mut Pixmap, center: Vec2, radius: f32, color: Vec4, shadow: Vec4, blur: f32) {
    // Stacked translucent discs grow darker towards the rim of the fill.
    if blur > 0.0 {
        let step_alpha = shadow.w / HALO_SHADOW_STEPS as f32;
        for step in (1..=HALO_SHADOW_STEPS).rev() {
            let t = step as f32 / HALO_SHADOW_STEPS as f32;
            let ring = Vec4::new(shadow.x, shadow.y, shadow.z, step_alpha);
            if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius + blur * t) {
                paint_path(pixmap, &path, &ShapeStyle::fill(ring), Transform::identity());
            }
        }
    }
    if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
        paint_path(pixmap, &path, &ShapeStyle::fill(color), Transform::identity());
    }
}

fn draw_text(
    pixmap: &mut Pixmap,
    font: &Font<'static>,
    anchor: Vec2,
    text: &str,
    color: Vec4,
    size: f32,
    align: TextAlign,
) {
    if !(color.w > 0.0) || text.is_empty() {
        return;
    }

    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    // The anchor is the bottom of the line box; descent is negative.
    let baseline = anchor.y + v_metrics.descent;

    let width = font
        .layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    let x = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width / 2.0,
        TextAlign::Right => anchor.x - width,
    };

    let (w, h) = (pixmap.width() as i32, pixmap.height() as i32);
    let pixels = pixmap.pixels_mut();
    let src = color.clamp(Vec4::ZERO, Vec4::ONE);

    for glyph in font.layout(text, scale, rt_point(x, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= w || py >= h {
                return;
            }
            let alpha = src.w * coverage.clamp(0.0, 1.0);
            if alpha <= 0.0 {
                return;
            }
            let idx = (py * w + px) as usize;
            pixels[idx] = blend_over(pixels[idx], src, alpha);
        });
    }
}

/// Source-over blend of a straight color with `alpha` onto a premultiplied pixel.
fn blend_over(dst: PremultipliedColorU8, src: Vec4, alpha: f32) -> PremultipliedColorU8 {
    let inv = 1.0 - alpha;
    let channel = |s: f32, d: u8| s * alpha * 255.0 + d as f32 * inv;
    let a = (alpha * 255.0 + dst.alpha() as f32 * inv).round().clamp(0.0, 255.0) as u8;
    let r = (channel(src.x, dst.red()).round() as u8).min(a);
    let g = (channel(src.y, dst.green()).round() as u8).min(a);
    let b = (channel(src.z, dst.blue()).round() as u8).min(a);
    PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(dst)
}
