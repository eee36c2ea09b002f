//! # Ribbon & Wrapper
//!
//! Both are anchored at the stem convergence point. The wrapper cone is drawn
//! behind the stems; the ribbon is drawn over everything but the watermark.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::color::ColorToken;
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::primitives::{INK, disc};
use crate::render::{DrawList, Path, ShapeStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RibbonStyle {
    /// The knot alone.
    Simple,
    /// Two side loops.
    #[default]
    Bow,
    /// Bow with streamers twice as long.
    Long,
    /// Bow plus two smaller loops on top.
    DoubleBow,
    /// Knot with streamers drawn as doubled S-curves, no loops.
    Curly,
    /// Stacked rope strands, a small knot and two thin hanging ends.
    Twine,
}

impl RibbonStyle {
    pub const ALL: [RibbonStyle; 6] = [
        RibbonStyle::Simple,
        RibbonStyle::Bow,
        RibbonStyle::Long,
        RibbonStyle::DoubleBow,
        RibbonStyle::Curly,
        RibbonStyle::Twine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RibbonStyle::Simple => "SIMPLE",
            RibbonStyle::Bow => "BOW",
            RibbonStyle::Long => "LONG",
            RibbonStyle::DoubleBow => "DOUBLE_BOW",
            RibbonStyle::Curly => "CURLY",
            RibbonStyle::Twine => "TWINE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RibbonStyle::Simple => "Simple Knot",
            RibbonStyle::Bow => "Classic Bow",
            RibbonStyle::Long => "Long Streamers",
            RibbonStyle::DoubleBow => "Double Bow",
            RibbonStyle::Curly => "Curly Ribbon",
            RibbonStyle::Twine => "Rustic Twine",
        }
    }

    pub fn next(self) -> RibbonStyle {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn streamer_length(self) -> f32 {
        match self {
            RibbonStyle::Long => 200.0,
            _ => 100.0,
        }
    }
}

impl fmt::Display for RibbonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RibbonStyle {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        RibbonStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == key)
            .ok_or_else(|| CanvasError::UnknownRibbonStyle(s.to_string()))
    }
}

const STREAMER_WIDTH: f32 = 10.0;
const TWINE_WIDTH: f32 = 3.0;

/// Draws the ribbon centered on `anchor`.
///
/// Twine keeps the configured rope color unless `color` differs from the
/// default ribbon color, in which case the user's choice wins. The comparison
/// is on the exact token text, so `#DB2777` counts as a user choice.
pub fn draw_ribbon(
    list: &mut DrawList,
    anchor: Vec2,
    style: RibbonStyle,
    color: &ColorToken,
    config: &CanvasConfig,
) {
    if style == RibbonStyle::Twine {
        let rope = if color.as_str() == config.style.default_ribbon_color.as_str() {
            config.style.rope_color
        } else {
            color.to_vec4()
        };
        draw_twine(list, anchor, rope);
        return;
    }

    let color = color.to_vec4();
    let fill = ShapeStyle::fill(color);
    let (x, y) = (anchor.x, anchor.y);

    disc(list, anchor, 15.0, color);
    if style == RibbonStyle::Simple {
        return;
    }

    if style != RibbonStyle::Curly {
        list.ellipse(Vec2::new(x - 30.0, y - 10.0), Vec2::new(30.0, 15.0), -0.2, fill);
        list.ellipse(Vec2::new(x + 30.0, y - 10.0), Vec2::new(30.0, 15.0), 0.2, fill);
    }

    if style == RibbonStyle::DoubleBow {
        list.ellipse(Vec2::new(x - 20.0, y - 25.0), Vec2::new(20.0, 10.0), -0.4, fill);
        list.ellipse(Vec2::new(x + 20.0, y - 25.0), Vec2::new(20.0, 10.0), 0.4, fill);
    }

    let streamer = ShapeStyle::stroke(color, STREAMER_WIDTH);
    if style == RibbonStyle::Curly {
        for side in [-1.0f32, 1.0] {
            let p = |dx: f32, dy: f32| Vec2::new(x + side * dx, y + dy);
            let curl = Path::new()
                .move_to(anchor)
                .cubic_to(p(40.0, 30.0), p(-10.0, 60.0), p(30.0, 90.0))
                .cubic_to(p(50.0, 110.0), p(10.0, 130.0), p(35.0, 150.0));
            list.path(curl, streamer);
        }
    } else {
        let length = style.streamer_length();
        for side in [-1.0f32, 1.0] {
            let droop = Path::new().move_to(anchor).quad_to(
                Vec2::new(x + side * 30.0, y + length / 2.0),
                Vec2::new(x + side * 20.0, y + length),
            );
            list.path(droop, streamer);
        }
    }
}

fn draw_twine(list: &mut DrawList, anchor: Vec2, rope: Vec4) {
    let (x, y) = (anchor.x, anchor.y);
    let strand = ShapeStyle::stroke(rope, TWINE_WIDTH);

    for i in 0..5 {
        let dy = i as f32 * 4.0;
        let arc = Path::new()
            .move_to(Vec2::new(x - 20.0, y - 10.0 + dy))
            .quad_to(Vec2::new(x, y - 5.0 + dy), Vec2::new(x + 20.0, y - 10.0 + dy));
        list.path(arc, strand);
    }

    disc(list, anchor, 8.0, rope);

    let ends = Path::new()
        .move_to(anchor)
        .line_to(Vec2::new(x - 10.0, y + 60.0))
        .move_to(anchor)
        .line_to(Vec2::new(x + 15.0, y + 50.0));
    list.path(ends, strand);
}

/// Draws the wrapper cone whose tip hangs below `anchor`.
pub fn draw_wrapper(list: &mut DrawList, anchor: Vec2, color: Vec4) {
    let top_left = anchor + Vec2::new(-100.0, -200.0);
    let top_right = anchor + Vec2::new(100.0, -200.0);
    let tip = anchor + Vec2::new(0.0, 50.0);

    list.path(
        Path::polygon([top_left, top_right, tip]),
        ShapeStyle::fill(color),
    );
    // Front fold
    list.path(
        Path::new().move_to(top_left).line_to(tip),
        ShapeStyle::stroke(INK, 1.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_style_names() {
        assert_eq!(
            "double-bow".parse::<RibbonStyle>().unwrap(),
            RibbonStyle::DoubleBow
        );
        assert_eq!("twine".parse::<RibbonStyle>().unwrap(), RibbonStyle::Twine);
        assert!("SASH".parse::<RibbonStyle>().is_err());
    }

    #[test]
    fn twine_uses_rope_color_for_default_ribbon() {
        let config = CanvasConfig::default();
        let mut list = DrawList::new();
        draw_ribbon(
            &mut list,
            config.convergence_anchor(),
            RibbonStyle::Twine,
            &ColorToken::new("#db2777"),
            &config,
        );
        // Five strands, the knot, the hanging ends.
        assert_eq!(list.len(), 7);
        match &list.commands()[5] {
            crate::render::DrawCommand::Circle { style, .. } => {
                assert_eq!(style.fill, Some(config.style.rope_color));
            }
            other => panic!("expected knot, got {other:?}"),
        }
    }

    #[test]
    fn twine_keeps_user_color_that_differs_in_case() {
        let config = CanvasConfig::default();
        let mut list = DrawList::new();
        draw_ribbon(
            &mut list,
            config.convergence_anchor(),
            RibbonStyle::Twine,
            &ColorToken::new("#DB2777"),
            &config,
        );
        match &list.commands()[5] {
            crate::render::DrawCommand::Circle { style, .. } => {
                assert_eq!(style.fill, Some(crate::color::rgb(0xdb2777)));
                assert_ne!(style.fill, Some(config.style.rope_color));
            }
            other => panic!("expected knot, got {other:?}"),
        }
    }
}
