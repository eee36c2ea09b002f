//! Heads assembled from many small units.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec4};

use crate::color::rgb;
use crate::primitives::{self, disc, petal};
use crate::render::DrawList;

/// Angular step between consecutive units; close to the golden angle in radians.
const SCATTER_STEP: f32 = 2.4;

pub fn lavender(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    for i in 0..5 {
        let y = c.y - i as f32 * s * 0.8;
        disc(list, Vec2::new(c.x, y), s * 0.4, color);
        disc(list, Vec2::new(c.x + s * 0.4, y + s * 0.4), s * 0.4, color);
        disc(list, Vec2::new(c.x - s * 0.4, y + s * 0.4), s * 0.4, color);
    }
}

pub fn hydrangea(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const FLORETS: usize = 12;
    let radius = s * 0.8;

    for i in 0..FLORETS {
        let angle = i as f32 * SCATTER_STEP;
        let dist = radius.min(i as f32 * radius / FLORETS as f32 + 5.0);
        let floret = c + Vec2::from_angle(angle) * dist;

        for j in 0..4 {
            petal(list, floret, s * 0.3, s * 0.3, j as f32 * FRAC_PI_2, color);
        }
        disc(list, floret, 2.0, rgb(0xffffff));
    }
}

pub fn babys_breath(list: &mut DrawList, c: Vec2, s: f32, color: Vec4) {
    const COUNT: usize = 15;
    let spread = s * 1.5;
    let base = c + Vec2::new(0.0, s);

    let buds: Vec<Vec2> = (0..COUNT)
        .map(|i| {
            let angle = i as f32 * SCATTER_STEP;
            let dist = ((i % 3) + 1) as f32 * spread * 0.3;
            c + Vec2::from_angle(angle) * dist - Vec2::new(0.0, s * 0.5)
        })
        .collect();

    // All sprigs first so no bud is crossed by a later sprig.
    for bud in &buds {
        primitives::line(list, base, *bud, rgb(0xa3e635), 1.0);
    }
    for bud in &buds {
        disc(list, *bud, s * 0.15, color);
    }
}
