//! # Layout
//!
//! Automatic placement of new flowers. Manual adds land in a small jittered
//! box above the canvas center; bulk adds follow a phyllotaxis spiral
//! (`angle = i * 137.5°`, `radius = k * sqrt(i)`), which packs flowers into a
//! dome without grid artifacts.
//!
//! The jitter here is cosmetic and drawn from the caller's RNG; flower
//! drawers themselves stay deterministic.

use glam::Vec2;
use rand::Rng;

use crate::config::CanvasConfig;
use crate::math::GOLDEN_ANGLE_DEG;

/// Maximum absolute rotation offset given to manually added flowers.
pub const MANUAL_ROTATION_JITTER: f32 = 0.25;
/// Maximum absolute rotation offset given to recipe flowers.
pub const RECIPE_ROTATION_JITTER: f32 = 0.5;

/// Pure spiral offset of the `index`-th flower for spacing constant `k`.
pub fn spiral_offset(index: usize, k: f32) -> Vec2 {
    let i = index as f32;
    let angle = (i * GOLDEN_ANGLE_DEG).to_radians();
    Vec2::from_angle(angle) * (k * i.sqrt())
}

/// Uniform sample in `[-width / 2, width / 2)`; zero width yields zero.
fn centered_jitter<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    (rng.gen_range(0.0..1.0f32) - 0.5) * width
}

/// Position of the `index`-th flower of a bulk layout.
pub fn spiral_position<R: Rng + ?Sized>(index: usize, config: &CanvasConfig, rng: &mut R) -> Vec2 {
    let lift = Vec2::new(0.0, index as f32 * config.spiral_lift);
    let jitter = Vec2::new(
        centered_jitter(rng, config.layout_jitter),
        centered_jitter(rng, config.layout_jitter),
    );
    config.layout_center() + spiral_offset(index, config.spiral_spacing) - lift + jitter
}

/// Positions for `count` flowers laid out on the spiral.
pub fn phyllotaxis<R: Rng + ?Sized>(count: usize, config: &CanvasConfig, rng: &mut R) -> Vec<Vec2> {
    (0..count)
        .map(|index| spiral_position(index, config, rng))
        .collect()
}

/// Drop point for a manually added flower.
pub fn manual_position<R: Rng + ?Sized>(config: &CanvasConfig, rng: &mut R) -> Vec2 {
    config.layout_center()
        + Vec2::new(
            centered_jitter(rng, config.add_jitter.x),
            centered_jitter(rng, config.add_jitter.y),
        )
}

/// Cosmetic rotation in `[-max, max)`.
pub fn rotation_jitter<R: Rng + ?Sized>(max: f32, rng: &mut R) -> f32 {
    centered_jitter(rng, max * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spiral_radius_grows_with_sqrt_index() {
        assert_eq!(spiral_offset(0, 30.0), Vec2::ZERO);
        assert!((spiral_offset(4, 30.0).length() - 60.0).abs() < 1e-3);
        assert!((spiral_offset(9, 30.0).length() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn manual_position_stays_in_jitter_box() {
        let config = CanvasConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let p = manual_position(&config, &mut rng);
            let d = p - config.layout_center();
            assert!(d.x.abs() <= 50.0 && d.y.abs() <= 25.0);
        }
    }
}
