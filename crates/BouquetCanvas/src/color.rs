//! # Colors
//!
//! Display-list colors are straight RGBA `glam::Vec4` values in `0.0..=1.0`.
//! Colors that come from users or from the recipe service travel as
//! [`ColorToken`]s: the raw string is preserved, and anything that does not
//! parse resolves to fully transparent so backends paint nothing with it.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Vec4 {
    rgba(hex, 1.0)
}

/// Color from a `0xRRGGBB` literal with an explicit alpha.
pub const fn rgba(hex: u32, alpha: f32) -> Vec4 {
    Vec4::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    )
}

/// Fully transparent. Backends skip any paint whose alpha is zero.
pub const TRANSPARENT: Vec4 = Vec4::ZERO;

/// A user-facing color value.
///
/// Serializes as the original string, so a malformed value from an external
/// collaborator survives a round trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ColorToken {
    raw: String,
    resolved: Option<Vec4>,
}

impl ColorToken {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let resolved = parse_css_color(&raw);
        Self { raw, resolved }
    }

    /// The string this token was created from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed color, if the token is well formed.
    pub fn resolved(&self) -> Option<Vec4> {
        self.resolved
    }

    /// The parsed color, or [`TRANSPARENT`] for malformed tokens.
    pub fn to_vec4(&self) -> Vec4 {
        self.resolved.unwrap_or(TRANSPARENT)
    }

    pub fn is_valid(&self) -> bool {
        self.resolved.is_some()
    }
}

impl From<String> for ColorToken {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ColorToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.raw
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
pub fn parse_css_color(input: &str) -> Option<Vec4> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let mut channels = [0.0f32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let value: f32 = part.parse().ok()?;
        if !(0.0..=255.0).contains(&value) {
            return None;
        }
        *slot = value / 255.0;
    }
    let alpha = if has_alpha {
        let a: f32 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        a
    } else {
        1.0
    };

    Some(Vec4::new(channels[0], channels[1], channels[2], alpha))
}

fn parse_hex(hex: &str) -> Option<Vec4> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };

    Some(Vec4::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_css_color("#fff"), Some(Vec4::ONE));
        assert_eq!(parse_css_color("#e11d48"), Some(rgb(0xe11d48)));
        assert_eq!(parse_css_color("#00000000"), Some(Vec4::ZERO));
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(
            parse_css_color("rgba(0,0,0,0.1)"),
            Some(Vec4::new(0.0, 0.0, 0.0, 0.1))
        );
        assert_eq!(parse_css_color("RGB(255, 255, 255)"), Some(Vec4::ONE));
    }

    #[test]
    fn malformed_tokens_resolve_transparent() {
        let token = ColorToken::new("sunset-ish");
        assert!(!token.is_valid());
        assert_eq!(token.to_vec4(), TRANSPARENT);
        assert_eq!(token.as_str(), "sunset-ish");
        assert!(parse_css_color("#12345").is_none());
        assert!(parse_css_color("rgb(300, 0, 0)").is_none());
    }
}
