//! RGBA colors with CSS-style names and hex notation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TintError;

/// An RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Named colors, matched by name when parsing and by distance when naming
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("gray", 0x808080),
    ("silver", 0xc0c0c0),
    ("red", 0xff0000),
    ("darkred", 0x8b0000),
    ("crimson", 0xdc143c),
    ("salmon", 0xfa8072),
    ("pink", 0xffc0cb),
    ("hotpink", 0xff69b4),
    ("orange", 0xffa500),
    ("darkorange", 0xff8c00),
    ("coral", 0xff7f50),
    ("tomato", 0xff6347),
    ("gold", 0xffd700),
    ("yellow", 0xffff00),
    ("khaki", 0xf0e68c),
    ("olive", 0x808000),
    ("lime", 0x00ff00),
    ("green", 0x008000),
    ("darkgreen", 0x006400),
    ("seagreen", 0x2e8b57),
    ("yellowgreen", 0x9acd32),
    ("teal", 0x008080),
    ("cyan", 0x00ffff),
    ("turquoise", 0x40e0d0),
    ("skyblue", 0x87ceeb),
    ("steelblue", 0x4682b4),
    ("blue", 0x0000ff),
    ("navy", 0x000080),
    ("royalblue", 0x4169e1),
    ("indigo", 0x4b0082),
    ("purple", 0x800080),
    ("violet", 0xee82ee),
    ("magenta", 0xff00ff),
    ("orchid", 0xda70d6),
    ("brown", 0xa52a2a),
    ("chocolate", 0xd2691e),
    ("tan", 0xd2b48c),
    ("beige", 0xf5f5dc),
];

impl Color {
    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a `0xRRGGBB` integer
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgba8([r, g, b, 255])
    }

    /// Create a color from 8-bit components
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Look up a named color
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let name = if name == "grey" { "gray" } else { name.as_str() };
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| Self::from_hex(*hex))
    }

    /// The same color with another alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Components as an RGBA array
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Components quantized to 8 bits
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Whether two colors are indistinguishable at 8-bit depth
    pub fn same_as(&self, other: &Self) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }

    /// Hex notation, `#rrggbb` for opaque colors and `#rrggbbaa` otherwise
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Name of the closest named color
    pub fn name(self) -> &'static str {
        let [r, g, b, _] = self.to_rgba8();
        NAMED_COLORS
            .iter()
            .min_by_key(|(_, hex)| {
                let [_, nr, ng, nb] = hex.to_be_bytes();
                let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2);
                d(r, nr) + d(g, ng) + d(b, nb)
            })
            .map_or("black", |(name, _)| *name)
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = TintError;

    /// Parse a color name, `#rgb`, `#rrggbb`, `#rrggbbaa` or `0xrrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(color) = Self::named(s) {
            return Ok(color);
        }

        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .ok_or_else(|| TintError::InvalidColor(s.to_string()))?;
        let invalid = || TintError::InvalidColor(s.to_string());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            3 => {
                let value = u16::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let expand = |n: u16| (n & 0xf) as u8 * 17;
                Ok(Self::from_rgba8([
                    expand(value >> 8),
                    expand(value >> 4),
                    expand(value),
                    255,
                ]))
            }
            6 => Ok(Self::from_rgba8([byte(0)?, byte(2)?, byte(4)?, 255])),
            8 => Ok(Self::from_rgba8([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = TintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<(u32, u8)> for Color {
    fn from((hex, alpha): (u32, u8)) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgba8([r, g, b, alpha])
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from((r, g, b, a): (f32, f32, f32, f32)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_names() {
        let orange: Color = "orange".parse().unwrap();
        assert_eq!(orange.to_hex(), "#ffa500");
        assert_eq!("Grey".parse::<Color>().unwrap().to_hex(), "#808080");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff0000".parse::<Color>().unwrap().to_hex(), "#ff0000");
        assert_eq!("0x00ff00".parse::<Color>().unwrap().name(), "lime");
        assert_eq!("#00f".parse::<Color>().unwrap().to_hex(), "#0000ff");
        assert_eq!("#ff000080".parse::<Color>().unwrap().to_rgba8()[3], 128);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "chartreuse-ish".parse::<Color>(),
            Err(TintError::InvalidColor(_))
        ));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
        assert!("#+f+f+f".parse::<Color>().is_err());
        assert!("#+ff".parse::<Color>().is_err());
        assert!("0x-12345".parse::<Color>().is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Color::from(0x0000ffu32).name(), "blue");
        assert_eq!(Color::from((0xff0000u32, 0x80u8)).to_hex(), "#ff000080");
        assert_eq!(Color::from([1.0, 0.0, 0.0]).to_hex(), "#ff0000");
        assert_relative_eq!(Color::from((0.0, 0.0, 1.0, 0.5)).a, 0.5);
    }

    #[test]
    fn test_nearest_name() {
        assert_eq!(Color::rgb(0.98, 0.02, 0.01).name(), "red");
        assert_eq!(Color::from_hex(0xfea400).name(), "orange");
    }

    #[test]
    fn test_alpha_is_part_of_identity() {
        let red = Color::from_hex(0xff0000);
        assert!(red.same_as(&Color::rgb(1.0, 0.0, 0.0)));
        assert!(!red.same_as(&red.with_alpha(0.2)));
    }
}
