use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The golden angle in degrees, used by the phyllotaxis layout.
pub const GOLDEN_ANGLE_DEG: f32 = 137.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrinks (or grows, for negative `amount`) the rect on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    /// Clamps each axis of `p` into the rect.
    ///
    /// Degenerate rects (min > max on an axis) collapse that axis to the midpoint.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let axis = |v: f32, lo: f32, hi: f32| {
            if lo > hi { (lo + hi) * 0.5 } else { v.clamp(lo, hi) }
        };
        Vec2::new(
            axis(p.x, self.min.x, self.max.x),
            axis(p.y, self.min.y, self.max.y),
        )
    }
}

/// Clamps a flower center into `[margin, dimension - margin]` on each axis.
pub fn clamp_to_bounds(point: Vec2, size: Vec2, margin: f32) -> Vec2 {
    Rect::new(Vec2::ZERO, size).inset(margin).clamp(point)
}

/// Control point for a stem running from `start` (below a flower) to `end`
/// (the convergence anchor).
///
/// Keeping the control point above the anchor and in line with the flower
/// makes every stem leave its flower vertically and fan into the anchor.
pub fn stem_control_point(start: Vec2, end: Vec2) -> Vec2 {
    Vec2::new(start.x, end.y - (end.y - start.y) * 0.5)
}

/// Point at `radius` along `angle` (radians, y-down) from `center`.
pub fn polar(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle) * radius
}
