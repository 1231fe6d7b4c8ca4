//! Color type and literal normalization.
//!
//! Terminal emulators spell colors in different notations: hex strings with
//! or without alpha, `rgb()`/`rgba()` functional text, 0.0-1.0 float
//! triplets, and named constants. [`normalize`] canonicalizes any of them to
//! a fixed 8-bit RGB triplet; the rendering helpers on [`Color`] produce
//! each native notation back from the triplet.

use serde::{Deserialize, Serialize};

use crate::error::InvalidColorFormat;

/// A color in RGB format, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Render as a lowercase hex string, e.g. `#ff8000`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Render in functional notation, e.g. `rgb(255, 128, 0)`.
    pub fn to_rgb_functional(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Render as a 0.0-1.0 float triplet with fixed precision, e.g.
    /// `1.0000, 0.5020, 0.0000`. Precision is chosen so re-parsing yields
    /// the identical 8-bit triplet.
    pub fn to_float_triplet(&self) -> String {
        format!(
            "{:.4}, {:.4}, {:.4}",
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0
        )
    }
}

/// Result of normalizing a color literal.
///
/// The canonical model has no alpha channel; when the source literal carried
/// one it is surfaced here so the caller can diagnose the loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedColor {
    pub color: Color,
    /// Alpha from the source literal, if it had one (0.0-1.0).
    pub alpha: Option<f64>,
}

impl ParsedColor {
    fn opaque(color: Color) -> Self {
        Self { color, alpha: None }
    }

    /// True when the literal carried an alpha channel below 1.0, i.e.
    /// normalization discarded transparency information.
    pub fn dropped_alpha(&self) -> bool {
        matches!(self.alpha, Some(a) if a < 1.0)
    }
}

/// Canonicalize a color literal in any supported notation.
///
/// Pure function: no state, no I/O. Fails with [`InvalidColorFormat`] when
/// the literal matches none of the known grammars.
pub fn normalize(literal: &str) -> Result<ParsedColor, InvalidColorFormat> {
    let text = literal.trim();
    if text.is_empty() {
        return Err(InvalidColorFormat(literal.to_string()));
    }

    if let Some(color) = lookup_named(text) {
        return Ok(ParsedColor::opaque(color));
    }
    if let Some(parsed) = parse_hex(text) {
        return Ok(parsed);
    }
    if let Some(parsed) = parse_functional(text) {
        return Ok(parsed);
    }
    if let Some(parsed) = parse_triplet(text) {
        return Ok(parsed);
    }

    Err(InvalidColorFormat(literal.to_string()))
}

fn hex_pair(bytes: &[u8]) -> Option<u8> {
    let s = std::str::from_utf8(bytes).ok()?;
    u8::from_str_radix(s, 16).ok()
}

/// `#rgb`, `#rrggbb`, `#rrggbbaa`, each also without the leading `#`.
fn parse_hex(text: &str) -> Option<ParsedColor> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let expand = |b: u8| {
                let v = hex_pair(&[b, b])?;
                Some(v)
            };
            let bytes = digits.as_bytes();
            Some(ParsedColor::opaque(Color::new(
                expand(bytes[0])?,
                expand(bytes[1])?,
                expand(bytes[2])?,
            )))
        }
        6 | 8 => {
            let bytes = digits.as_bytes();
            let color = Color::new(
                hex_pair(&bytes[0..2])?,
                hex_pair(&bytes[2..4])?,
                hex_pair(&bytes[4..6])?,
            );
            let alpha = if digits.len() == 8 {
                Some(f64::from(hex_pair(&bytes[6..8])?) / 255.0)
            } else {
                None
            };
            Some(ParsedColor { color, alpha })
        }
        _ => None,
    }
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)`. Channels are 0-255 integers or
/// 0.0-1.0 floats; alpha is a 0.0-1.0 float.
fn parse_functional(text: &str) -> Option<ParsedColor> {
    let lower = text.to_ascii_lowercase();
    let (body, expects_alpha) = if let Some(rest) = lower.strip_prefix("rgba") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb") {
        (rest, false)
    } else {
        return None;
    };
    let body = body.trim().strip_prefix('(')?.strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != if expects_alpha { 4 } else { 3 } {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let alpha = if expects_alpha {
        let a: f64 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        Some(a)
    } else {
        None
    };
    Some(ParsedColor {
        color: Color::new(r, g, b),
        alpha,
    })
}

/// A single channel: `255`-style integer or `1.0`-style unit float.
fn parse_channel(text: &str) -> Option<u8> {
    if text.contains('.') {
        let v: f64 = text.parse().ok()?;
        if !(0.0..=1.0).contains(&v) {
            return None;
        }
        Some((v * 255.0).round() as u8)
    } else {
        let v: i64 = text.parse().ok()?;
        if !(0..=255).contains(&v) {
            return None;
        }
        Some(v as u8)
    }
}

/// Bare triplet, comma- or space-separated: `0.77, 0.78, 0.78` (unit
/// floats) or `197 200 198` (0-255 integers). An optional fourth unit
/// float is treated as alpha.
fn parse_triplet(text: &str) -> Option<ParsedColor> {
    let parts: Vec<&str> = if text.contains(',') {
        text.split(',').map(str::trim).collect()
    } else {
        text.split_whitespace().collect()
    };
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let alpha = if parts.len() == 4 {
        let a: f64 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&a) {
            return None;
        }
        Some(a)
    } else {
        None
    };
    Some(ParsedColor {
        color: Color::new(r, g, b),
        alpha,
    })
}

/// Named constants: the sixteen base terminal colors plus common aliases.
fn lookup_named(text: &str) -> Option<Color> {
    let name = text.to_ascii_lowercase();
    let rgb = match name.as_str() {
        "black" => (0x00, 0x00, 0x00),
        "red" => (0x80, 0x00, 0x00),
        "green" => (0x00, 0x80, 0x00),
        "yellow" => (0x80, 0x80, 0x00),
        "blue" => (0x00, 0x00, 0x80),
        "magenta" => (0x80, 0x00, 0x80),
        "cyan" => (0x00, 0x80, 0x80),
        "white" | "lightgray" | "lightgrey" => (0xc0, 0xc0, 0xc0),
        "brightblack" | "gray" | "grey" => (0x80, 0x80, 0x80),
        "brightred" => (0xff, 0x00, 0x00),
        "brightgreen" | "lime" => (0x00, 0xff, 0x00),
        "brightyellow" => (0xff, 0xff, 0x00),
        "brightblue" => (0x00, 0x00, 0xff),
        "brightmagenta" | "fuchsia" => (0xff, 0x00, 0xff),
        "brightcyan" | "aqua" => (0x00, 0xff, 0xff),
        "brightwhite" => (0xff, 0xff, 0xff),
        "orange" => (0xff, 0xa5, 0x00),
        "purple" => (0x80, 0x00, 0x80),
        "navy" => (0x00, 0x00, 0x80),
        "teal" => (0x00, 0x80, 0x80),
        "olive" => (0x80, 0x80, 0x00),
        "maroon" => (0x80, 0x00, 0x00),
        "silver" => (0xc0, 0xc0, 0xc0),
        "pink" => (0xff, 0xc0, 0xcb),
        "brown" => (0xa5, 0x2a, 0x2a),
        _ => return None,
    };
    Some(Color::new(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_six_digits() {
        let parsed = normalize("#c5c8c6").unwrap();
        assert_eq!(parsed.color, Color::new(197, 200, 198));
        assert_eq!(parsed.alpha, None);
    }

    #[test]
    fn test_hex_without_hash() {
        let parsed = normalize("c5c8c6").unwrap();
        assert_eq!(parsed.color, Color::new(197, 200, 198));
    }

    #[test]
    fn test_hex_short_form() {
        let parsed = normalize("#f80").unwrap();
        assert_eq!(parsed.color, Color::new(0xff, 0x88, 0x00));
    }

    #[test]
    fn test_hex_with_alpha() {
        let parsed = normalize("#ff000080").unwrap();
        assert_eq!(parsed.color, Color::new(255, 0, 0));
        assert!(parsed.dropped_alpha());
    }

    #[test]
    fn test_hex_with_opaque_alpha() {
        let parsed = normalize("#ff0000ff").unwrap();
        assert!(!parsed.dropped_alpha());
    }

    #[test]
    fn test_functional_rgb() {
        let parsed = normalize("rgb(255, 128, 0)").unwrap();
        assert_eq!(parsed.color, Color::new(255, 128, 0));
    }

    #[test]
    fn test_functional_rgba_drops_alpha() {
        let parsed = normalize("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(parsed.color, Color::new(255, 0, 0));
        assert_eq!(parsed.alpha, Some(0.5));
        assert!(parsed.dropped_alpha());
    }

    #[test]
    fn test_float_triplet() {
        let parsed = normalize("1.0, 0.5, 0.0").unwrap();
        assert_eq!(parsed.color, Color::new(255, 128, 0));
    }

    #[test]
    fn test_space_separated_triplet() {
        let parsed = normalize("0.0 0.0 1.0").unwrap();
        assert_eq!(parsed.color, Color::new(0, 0, 255));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(normalize("red").unwrap().color, Color::new(0x80, 0, 0));
        assert_eq!(
            normalize("BrightWhite").unwrap().color,
            Color::new(255, 255, 255)
        );
    }

    #[test]
    fn test_invalid_literal() {
        assert!(normalize("not-a-color").is_err());
        assert!(normalize("#12345").is_err());
        assert!(normalize("").is_err());
        assert!(normalize("rgb(300, 0, 0)").is_err());
    }

    #[test]
    fn test_rendering_fixed_point() {
        // Re-rendering a normalized triplet in each notation and
        // re-normalizing must yield the identical triplet.
        let color = Color::new(197, 200, 198);
        assert_eq!(normalize(&color.to_hex()).unwrap().color, color);
        assert_eq!(normalize(&color.to_rgb_functional()).unwrap().color, color);
        assert_eq!(normalize(&color.to_float_triplet()).unwrap().color, color);
    }

    #[test]
    fn test_fixed_point_exhaustive_channel() {
        for v in 0..=255u8 {
            let color = Color::new(v, 0, 255 - v);
            assert_eq!(normalize(&color.to_float_triplet()).unwrap().color, color);
        }
    }
}
