use std::f32::consts::{PI, TAU};

use bouquet_canvas::{
    Canvas, CanvasConfig, CanvasError, ColorToken, Flower, Species,
    model::BouquetScene,
    raster::{self, Rasterizer},
    render::{DrawCommand, Path, ShapeStyle},
};
use glam::{Vec2, Vec4};

fn red() -> Vec4 {
    Vec4::new(1.0, 0.0, 0.0, 1.0)
}

fn alpha_at(pixmap: &tiny_skia::Pixmap, x: u32, y: u32) -> u8 {
    pixmap.pixel(x, y).unwrap().alpha()
}

#[test]
fn test_background_and_flower_pixels() {
    // 1. Setup
    let canvas = Canvas::new(CanvasConfig::default());
    let mut scene = BouquetScene::new();
    scene.add(Flower::new(
        Species::Sunflower,
        "#f59e0b",
        Vec2::new(400.0, 300.0),
        ColorToken::new("#4d7c0f"),
    ));

    // 2. Rasterize
    let frame = canvas.export_frame(&scene);
    let pixmap = Rasterizer::new().render(&frame.commands, 800, 800).unwrap();

    // 3. Verify: white corner, brown sunflower disc at the flower center
    let corner = pixmap.pixel(5, 5).unwrap();
    assert_eq!(
        (corner.red(), corner.green(), corner.blue(), corner.alpha()),
        (255, 255, 255, 255)
    );

    let center = pixmap.pixel(400, 300).unwrap();
    assert!(center.red().abs_diff(0x78) <= 1);
    assert!(center.green().abs_diff(0x35) <= 1);
    assert!(center.blue().abs_diff(0x0f) <= 1);
}

#[test]
fn test_zero_sized_surface_is_an_error() {
    let result = Rasterizer::new().render(&[], 0, 800);
    assert!(matches!(
        result,
        Err(CanvasError::SurfaceUnavailable { width: 0, height: 800 })
    ));
}

#[test]
fn test_rasterizing_twice_is_identical() {
    let canvas = Canvas::new(CanvasConfig::default());
    let mut scene = BouquetScene::new();
    for (i, species) in Species::ALL.into_iter().enumerate() {
        scene.add(Flower::new(
            species,
            species.default_color(),
            Vec2::new(120.0 + (i % 7) as f32 * 90.0, 150.0 + (i / 7) as f32 * 100.0),
            ColorToken::new("#4d7c0f"),
        ));
    }

    let rasterizer = Rasterizer::new();
    let frame = canvas.render(&scene);
    let a = rasterizer.render(&frame.commands, 800, 800).unwrap();
    let b = rasterizer.render(&frame.commands, 800, 800).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_text_without_font_is_skipped() {
    let with_text = vec![DrawCommand::Text {
        anchor: Vec2::new(90.0, 90.0),
        text: "flower for you".to_string(),
        color: red(),
        size: 24.0,
        align: bouquet_canvas::render::TextAlign::Right,
    }];

    let rasterizer = Rasterizer::new();
    assert!(!rasterizer.has_font());
    let pixmap = rasterizer.render(&with_text, 100, 100).unwrap();
    assert!(pixmap.data().iter().all(|b| *b == 0));
}

#[test]
fn test_rotated_ellipse() {
    let commands = vec![DrawCommand::Ellipse {
        center: Vec2::new(50.0, 50.0),
        radii: Vec2::new(40.0, 5.0),
        rotation: PI / 2.0,
        style: ShapeStyle::fill(red()),
    }];

    let pixmap = Rasterizer::new().render(&commands, 100, 100).unwrap();

    // The long axis now runs vertically.
    assert_eq!(alpha_at(&pixmap, 50, 80), 255);
    assert_eq!(alpha_at(&pixmap, 80, 50), 0);
}

#[test]
fn test_arc_sweeps_clockwise() {
    let center = Vec2::new(50.0, 50.0);
    let half = Path::new().arc(center, 30.0, 0.0, PI).close();
    let full = Path::new().arc(center, 30.0, 0.0, TAU);

    let half_list = vec![DrawCommand::Path {
        elements: half.elements,
        style: ShapeStyle::fill(red()),
    }];
    let full_list = vec![DrawCommand::Path {
        elements: full.elements,
        style: ShapeStyle::fill(red()),
    }];

    let rasterizer = Rasterizer::new();
    let pixmap = rasterizer.render(&half_list, 100, 100).unwrap();
    // 0 -> PI passes through +y, which is down.
    assert_eq!(alpha_at(&pixmap, 50, 70), 255);
    assert_eq!(alpha_at(&pixmap, 50, 30), 0);

    let pixmap = rasterizer.render(&full_list, 100, 100).unwrap();
    assert_eq!(alpha_at(&pixmap, 50, 30), 255);
    assert_eq!(alpha_at(&pixmap, 50, 70), 255);
}

#[test]
fn test_transparent_paint_is_a_no_op() {
    let commands = vec![DrawCommand::Circle {
        center: Vec2::new(50.0, 50.0),
        radius: 20.0,
        style: ShapeStyle::fill(ColorToken::new("nope").to_vec4()).with_stroke(Vec4::ZERO, 3.0),
    }];

    let pixmap = Rasterizer::new().render(&commands, 100, 100).unwrap();
    assert!(pixmap.data().iter().all(|b| *b == 0));
}

#[test]
fn test_halo_paints_soft_disc() {
    let commands = vec![DrawCommand::Halo {
        center: Vec2::new(50.0, 50.0),
        radius: 25.0,
        color: Vec4::new(1.0, 1.0, 1.0, 0.3),
        shadow: Vec4::new(0.0, 0.0, 0.0, 0.2),
        blur: 15.0,
    }];

    let pixmap = Rasterizer::new().render(&commands, 100, 100).unwrap();
    assert!(alpha_at(&pixmap, 50, 50) > 0);
    // The shadow reaches past the disc.
    assert!(alpha_at(&pixmap, 50, 85) > 0);
    assert_eq!(alpha_at(&pixmap, 0, 0), 0);
}

#[test]
fn test_png_encoding() {
    let pixmap = Rasterizer::new()
        .render(&[DrawCommand::Fill { color: red() }], 16, 16)
        .unwrap();
    let png = raster::encode_png(&pixmap).unwrap();
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);

    let rgba = raster::to_straight_rgba(&pixmap);
    assert_eq!(rgba.len(), 16 * 16 * 4);
    assert_eq!(&rgba[..4], &[255, 0, 0, 255]);
}

#[test]
fn test_invalid_font_bytes() {
    let result = Rasterizer::with_font_bytes(vec![0, 1, 2, 3]);
    assert!(matches!(result, Err(CanvasError::FontUnavailable(_))));
}
