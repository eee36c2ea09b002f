//! # Geometry Primitives
//!
//! Stateless shape emitters shared by every flower, ribbon and wrapper drawer.
//! They record into a [`DrawList`] and never look at scene state.

use glam::{Vec2, Vec4};

use crate::color::rgba;
use crate::math;
use crate::render::{DrawList, Path, ShapeStyle};

/// Outline used for the subtle ink lines on ruffles and petal veins.
pub const INK: Vec4 = rgba(0x000000, 0.1);

/// A filled circle.
pub fn disc(list: &mut DrawList, center: Vec2, radius: f32, color: Vec4) {
    list.circle(center, radius, ShapeStyle::fill(color));
}

/// A stroked circle outline.
pub fn ring(list: &mut DrawList, center: Vec2, radius: f32, color: Vec4, width: f32) {
    list.circle(center, radius, ShapeStyle::stroke(color, width));
}

/// A petal: an ellipse of `width` x `height` whose base is pinned at `origin`
/// and which extends "up" (negative y) before being rotated by `angle`.
pub fn petal(list: &mut DrawList, origin: Vec2, width: f32, height: f32, angle: f32, color: Vec4) {
    list.with_placement(origin, angle, |list| {
        list.ellipse(
            Vec2::new(0.0, -height / 2.0),
            Vec2::new(width / 2.0, height / 2.0),
            0.0,
            ShapeStyle::fill(color),
        );
    });
}

/// `count` petals spread evenly around `origin`, starting at `phase`.
pub fn petal_ring(
    list: &mut DrawList,
    origin: Vec2,
    count: usize,
    width: f32,
    height: f32,
    phase: f32,
    color: Vec4,
) {
    let step = std::f32::consts::TAU / count as f32;
    for i in 0..count {
        petal(list, origin, width, height, phase + i as f32 * step, color);
    }
}

/// A quadratic stem from `base` to the shared `anchor`.
pub fn stem(list: &mut DrawList, base: Vec2, anchor: Vec2, color: Vec4, width: f32) {
    let ctrl = math::stem_control_point(base, anchor);
    list.path(
        Path::new().move_to(base).quad_to(ctrl, anchor),
        ShapeStyle::stroke(color, width),
    );
}

/// A straight stroked segment.
pub fn line(list: &mut DrawList, from: Vec2, to: Vec2, color: Vec4, width: f32) {
    list.path(
        Path::new().move_to(from).line_to(to),
        ShapeStyle::stroke(color, width),
    );
}

/// A closed frilled ring sampled at `points + 1` angular steps, alternating
/// between `radius + wobble` and `radius - wobble`.
pub fn ruffled_ring(
    list: &mut DrawList,
    center: Vec2,
    radius: f32,
    points: usize,
    wobble: f32,
    fill: Vec4,
) {
    let step = std::f32::consts::TAU / points as f32;
    let vertices = (0..=points).map(|j| {
        let r = if j % 2 == 0 { radius + wobble } else { radius - wobble };
        math::polar(center, r, j as f32 * step)
    });
    list.path(
        Path::polygon(vertices),
        ShapeStyle::fill(fill).with_stroke(INK, 1.0),
    );
}
