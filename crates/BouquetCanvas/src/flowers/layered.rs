//! Species built from stacked layers.
//!
//! Layered heads always paint from the largest radius to the smallest so the
//! inner layers sit on top.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec4};

use crate::color::{rgb, rgba};
use crate::primitives::{self, INK, disc, ring, ruffled_ring};
use crate::render::{DrawList, Path, ShapeStyle};

pub fn rose(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    disc(list, c, s, color);

    // Swirls
    for i in 0..3 {
        let start = i as f32;
        list.path(
            Path::new().arc(c, s * (0.8 - start * 0.2), start, PI + start + 2.0),
            ShapeStyle::stroke(INK, 2.0),
        );
    }

    disc(list, c - Vec2::splat(s * 0.2), s * 0.3, rgba(0xffffff, 0.2));
}

pub fn tulip(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    // Round cup below the center, three points above it.
    let cup = Path::new()
        .arc(c, s, 0.0, PI)
        .line_to(c + Vec2::new(-s, -s))
        .line_to(c + Vec2::new(-s / 3.0, -s / 2.0))
        .line_to(c + Vec2::new(0.0, -s))
        .line_to(c + Vec2::new(s / 3.0, -s / 2.0))
        .line_to(c + Vec2::new(s, -s))
        .close();
    list.path(cup, ShapeStyle::fill(color));
}

pub fn carnation(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const LAYERS: usize = 4;
    for i in (1..=LAYERS).rev() {
        let radius = s * i as f32 / LAYERS as f32;
        ruffled_ring(list, c, radius, 12, 5.0, color);
    }
}

pub fn peony(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    disc(list, c, s, color);

    for i in 0..5 {
        let angle = i as f32 * TAU / 5.0;
        let cup = c + Vec2::from_angle(angle) * s * 0.3;
        list.circle(
            cup,
            s * 0.6,
            ShapeStyle::fill(color).with_stroke(rgba(0x000000, 0.05), 1.0),
        );
    }

    disc(list, c, s * 0.2, rgb(0xfef08a));
}

pub fn ranunculus(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    disc(list, c, s, color);
    for i in 1..8 {
        ring(list, c, s * (1.0 - i as f32 * 0.12), INK, 1.0);
    }
    disc(list, c - Vec2::splat(s * 0.2), s * 0.4, rgba(0xffffff, 0.15));
}

pub fn dahlia(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const LAYERS: usize = 3;
    const PETALS: usize = 12;

    for l in 0..LAYERS {
        let ls = s * (1.0 - l as f32 * 0.25);
        // Each layer is offset by half a petal step.
        let phase = l as f32 * PI / PETALS as f32;
        for i in 0..PETALS {
            let angle = i as f32 * TAU / PETALS as f32 + phase;
            list.with_placement(c, angle, |list| {
                let diamond = Path::polygon([
                    Vec2::ZERO,
                    Vec2::new(ls * 0.3, ls * 0.6),
                    Vec2::new(0.0, ls),
                    Vec2::new(-ls * 0.3, ls * 0.6),
                ]);
                list.path(diamond, ShapeStyle::fill(color));
                primitives::line(list, Vec2::ZERO, Vec2::new(0.0, ls), INK, 1.0);
            });
        }
    }

    disc(list, c, s * 0.1, rgb(0xfef9c3));
}

pub fn marigold(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const LAYERS: usize = 5;
    for i in (1..=LAYERS).rev() {
        let radius = s * i as f32 / LAYERS as f32;
        // Outer layers ruffle harder.
        let wobble = 3.0 * (i as f32 / 3.0);
        ruffled_ring(list, c, radius, 20, wobble, color);
    }
}
