//! Petal-ring species.
//!
//! Local petal frames point "down" (positive y) for the hand-built outlines
//! and "up" for [`primitives::petal`] ellipses; both are rotated about the
//! head center so the difference only shifts the starting phase.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_6, PI, TAU};

use glam::{Vec2, Vec4};

use crate::color::rgb;
use crate::primitives::{self, INK, disc, petal, petal_ring};
use crate::render::{DrawList, Path, ShapeStyle};

pub fn daisy(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    petal_ring(list, c, 8, s * 0.6, s * 0.8 * 2.5, 0.0, color);
    disc(list, c, s * 0.5, rgb(0xfcd34d));
}

pub fn sunflower(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    petal_ring(list, c, 12, s * 0.6, s * 2.5, 0.0, color);
    disc(list, c, s * 0.8, rgb(0x78350f));
}

pub fn lily(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    let ps = s * 1.2;
    for i in 0..6 {
        list.with_placement(c, i as f32 * FRAC_PI_3, |list| {
            let outline = Path::new()
                .move_to(Vec2::ZERO)
                .quad_to(Vec2::new(ps * 0.4, ps * 0.5), Vec2::new(0.0, ps))
                .quad_to(Vec2::new(-ps * 0.4, ps * 0.5), Vec2::ZERO);
            list.path(outline, ShapeStyle::fill(color));
            primitives::line(list, Vec2::ZERO, Vec2::new(0.0, ps * 0.7), INK, 1.0);
        });
    }

    // Stamens sit between the petals.
    for i in 0..6 {
        let angle = i as f32 * FRAC_PI_3 + FRAC_PI_6;
        disc(list, c + Vec2::from_angle(angle) * s * 0.4, 2.0, rgb(0x713f12));
    }
}

pub fn orchid(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    for i in 0..3 {
        let angle = i as f32 * TAU / 3.0 - PI / 2.0;
        petal(list, c, s * 0.5, s * 2.0, angle, color);
    }
    petal(list, c, s * 0.8, s * 1.8, -FRAC_PI_3, color);
    petal(list, c, s * 0.8, s * 1.8, FRAC_PI_3, color);

    list.ellipse(
        c + Vec2::new(0.0, s * 0.2),
        Vec2::new(s * 0.4, s * 0.5),
        0.0,
        ShapeStyle::fill(rgb(0xfce7f3)),
    );
}

pub fn poppy(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    for i in 0..4 {
        list.with_placement(c, i as f32 * PI / 2.0, |list| {
            list.ellipse(
                Vec2::new(s * 0.4, 0.0),
                Vec2::new(s * 0.8, s * 0.6),
                0.0,
                ShapeStyle::fill(color),
            );
        });
    }
    disc(list, c, s * 0.3, rgb(0x1f2937));
    for i in 0..8 {
        let angle = i as f32 * TAU / 8.0;
        disc(list, c + Vec2::from_angle(angle) * s * 0.35, 3.0, rgb(0xfef08a));
    }
}

pub fn anemone(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    petal_ring(list, c, 7, s * 0.7, s * 2.2, 0.0, color);
    disc(list, c, s * 0.35, rgb(0x111827));
    disc(list, c, s * 0.15, rgb(0x000000));
}

pub fn cherry_blossom(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    for i in 0..5 {
        list.with_placement(c, i as f32 * TAU / 5.0, |list| {
            // Notched tip: two points with a dip between them.
            let outline = Path::new()
                .move_to(Vec2::ZERO)
                .quad_to(Vec2::new(s * 0.5, s * 0.2), Vec2::new(s * 0.8, s * 0.8))
                .line_to(Vec2::new(s * 0.6, s))
                .line_to(Vec2::new(s * 0.4, s * 0.8))
                .line_to(Vec2::new(s * 0.2, s))
                .quad_to(Vec2::new(-s * 0.5, s * 0.2), Vec2::ZERO);
            list.path(outline, ShapeStyle::fill(color));
        });
    }
    disc(list, c, s * 0.15, rgb(0xb91c1c));
}

pub fn iris(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    // Standards
    let standards_origin = c - Vec2::new(0.0, s * 0.2);
    for i in 0..3 {
        let angle = i as f32 * TAU / 3.0 - PI / 2.0;
        petal(list, standards_origin, s * 0.6, s * 1.5, angle, color);
    }

    // Falls, each with a signal mark
    for i in 0..3 {
        let angle = i as f32 * TAU / 3.0 + FRAC_PI_6;
        petal(list, c, s * 0.8, s * 1.8, angle, color);
        disc(list, c + Vec2::from_angle(angle) * s * 0.8, s * 0.15, rgb(0xfacc15));
    }
}

pub fn gerbera(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const PETALS: usize = 20;
    petal_ring(list, c, PETALS, s * 0.3, s * 2.5, 0.0, color);
    petal_ring(list, c, PETALS, s * 0.25, s * 1.8, PI / PETALS as f32, color);
    disc(list, c, s * 0.5, rgb(0x451a03));
    disc(list, c, s * 0.2, rgb(0x000000));
}

pub fn hibiscus(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    let pollen = rgb(0xfef08a);

    petal_ring(list, c, 5, s * 0.9, s * 2.5, 0.0, color);
    disc(list, c, s * 0.3, rgb(0x7f1d1d));

    let tip = c + Vec2::new(s, -s);
    primitives::line(list, c, tip, pollen, 3.0);
    disc(list, tip, 4.0, pollen);
    disc(list, c + Vec2::new(s * 0.8, -s * 0.8), 3.0, pollen);
}

pub fn jasmine(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    for i in 0..5 {
        list.with_placement(c, i as f32 * TAU / 5.0, |list| {
            let outline = Path::new()
                .move_to(Vec2::ZERO)
                .quad_to(Vec2::new(s * 0.3, s * 0.5), Vec2::new(0.0, s * 1.5))
                .quad_to(Vec2::new(-s * 0.3, s * 0.5), Vec2::ZERO);
            list.path(outline, ShapeStyle::fill(color));
        });
    }
    disc(list, c, s * 0.2, rgb(0xfefce8));
}
