//! Color token resolution and the gray dither decision.
//!
//! Widgets store colors as tokens (`theme_auto`, `black`, `#a0a0a0`, ...).
//! Every backend resolves the same token through [`resolve_color`] and then
//! renders the concrete [`Color`] in its own notation.

#![allow(missing_docs)]

use crate::registry::DrawHelper;

/// Token that follows the page's dark-mode setting.
pub const THEME_AUTO: &str = "theme_auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Gray,
    Rgb(u8, u8, u8),
    /// Nothing drawn; backgrounds fall back to the page color.
    Transparent,
}

/// Resolves a color token for a page.
///
/// `theme_auto` is white on dark pages and black otherwise. Unknown tokens
/// resolve as black.
#[must_use]
pub fn resolve_color(token: &str, dark: bool) -> Color {
    let token = token.trim().to_ascii_lowercase();
    match token.as_str() {
        THEME_AUTO | "" => {
            if dark {
                Color::White
            } else {
                Color::Black
            }
        }
        "transparent" | "none" => Color::Transparent,
        "white" => Color::White,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "orange" => Color::Orange,
        "gray" | "grey" => Color::Gray,
        hex => parse_hex(hex).unwrap_or(Color::Black),
    }
}

fn parse_hex(token: &str) -> Option<Color> {
    let digits = token.strip_prefix('#').or_else(|| token.strip_prefix("0x"))?;
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Color {
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (255, 255, 255),
            Self::Black | Self::Transparent => (0, 0, 0),
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
            Self::Yellow => (255, 255, 0),
            Self::Orange => (255, 165, 0),
            Self::Gray => (160, 160, 160),
            Self::Rgb(r, g, b) => (r, g, b),
        }
    }

    /// Gray sentinel: the named gray or a near-neutral mid tone.
    #[must_use]
    pub fn is_gray(self) -> bool {
        match self {
            Self::Gray => true,
            Self::Rgb(r, g, b) => {
                let (r, g, b) = (i16::from(r), i16::from(g), i16::from(b));
                (r - g).abs() < 15 && (g - b).abs() < 15 && r > 40 && r < 210
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self == Self::Transparent
    }

    /// Transparent becomes the page background.
    #[must_use]
    pub fn or_background(self, dark: bool) -> Self {
        match self {
            Self::Transparent if dark => Self::Black,
            Self::Transparent => Self::White,
            other => other,
        }
    }

    /// Display lambda constant. `inverted` swaps white and black for panels
    /// that draw with inverted polarity.
    #[must_use]
    pub fn direct(self, inverted: bool) -> String {
        let name = match self {
            Self::White | Self::Transparent if inverted => "COLOR_BLACK",
            Self::White | Self::Transparent => "COLOR_WHITE",
            Self::Black if inverted => "COLOR_WHITE",
            Self::Black => "COLOR_BLACK",
            Self::Red => "COLOR_RED",
            Self::Green => "COLOR_GREEN",
            Self::Blue => "COLOR_BLUE",
            Self::Yellow => "COLOR_YELLOW",
            Self::Orange => "COLOR_ORANGE",
            Self::Gray => "COLOR_GRAY",
            Self::Rgb(r, g, b) => return format!("Color({r}, {g}, {b})"),
        };
        name.to_string()
    }

    /// LVGL hex literal, `0xRRGGBB`.
    #[must_use]
    pub fn retained(self) -> String {
        let (r, g, b) = self.rgb();
        format!("0x{r:02X}{g:02X}{b:02X}")
    }

    /// Drawing-protocol color: a palette name or `#rrggbb`.
    #[must_use]
    pub fn protocol(self) -> String {
        let name = match self {
            Self::White | Self::Transparent => "white",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Gray => "gray",
            Self::Rgb(r, g, b) => return format!("#{r:02x}{g:02x}{b:02x}"),
        };
        name.to_string()
    }
}

/// Color constants declared at the top of every display lambda.
#[must_use]
pub fn direct_constants() -> Vec<String> {
    [
        ("COLOR_WHITE", Color::White),
        ("COLOR_BLACK", Color::Black),
        ("COLOR_RED", Color::Red),
        ("COLOR_GREEN", Color::Green),
        ("COLOR_BLUE", Color::Blue),
        ("COLOR_YELLOW", Color::Yellow),
        ("COLOR_ORANGE", Color::Orange),
        ("COLOR_GRAY", Color::Gray),
    ]
    .iter()
    .map(|(name, color)| {
        let (r, g, b) = color.rgb();
        format!("const auto {name} = Color({r}, {g}, {b});")
    })
    .collect()
}

/// A gray fill on a palette-limited target is dithered instead of drawn.
#[must_use]
pub fn needs_dither(color: Color, palette_limited: bool) -> bool {
    palette_limited && color.is_gray()
}

/// How one fill or border region is painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Solid primitive in this display-lambda color.
    Solid(String),
    /// Halftone mask in place of the solid primitive.
    Dither,
}

/// Footprint of a dither mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherShape {
    Rect { x: i32, y: i32, w: i32, h: i32 },
    /// Outer band of a rectangle, masked as four edge strips.
    RectBand { x: i32, y: i32, w: i32, h: i32, band: i32 },
    /// `band = 0` covers the whole rounded rectangle.
    RoundedRect { x: i32, y: i32, w: i32, h: i32, r: i32, band: i32 },
    /// `band = 0` covers the whole disc.
    Circle { cx: i32, cy: i32, r: i32, band: i32 },
}

impl DitherShape {
    #[must_use]
    pub fn helper(self) -> DrawHelper {
        match self {
            Self::Rect { .. } | Self::RectBand { .. } => DrawHelper::DitherRect,
            Self::RoundedRect { .. } => DrawHelper::DitherRoundedRect,
            Self::Circle { .. } => DrawHelper::DitherCircle,
        }
    }

    /// Display-lambda statements covering the footprint.
    #[must_use]
    pub fn statements(self) -> Vec<String> {
        match self {
            Self::Rect { x, y, w, h } => vec![format!("apply_grey_dither_mask({x}, {y}, {w}, {h});")],
            Self::RectBand { x, y, w, h, band } => {
                let band = band.clamp(1, (w.min(h) / 2).max(1));
                let inner_h = (h - 2 * band).max(0);
                let mut out = vec![
                    format!("apply_grey_dither_mask({x}, {y}, {w}, {band});"),
                    format!("apply_grey_dither_mask({x}, {}, {w}, {band});", y + h - band),
                ];
                if inner_h > 0 {
                    out.push(format!("apply_grey_dither_mask({x}, {}, {band}, {inner_h});", y + band));
                    out.push(format!(
                        "apply_grey_dither_mask({}, {}, {band}, {inner_h});",
                        x + w - band,
                        y + band
                    ));
                }
                out
            }
            Self::RoundedRect { x, y, w, h, r, band } => {
                vec![format!("apply_grey_dither_rrect({x}, {y}, {w}, {h}, {r}, {band});")]
            }
            Self::Circle { cx, cy, r, band } => {
                vec![format!("apply_grey_dither_circle({cx}, {cy}, {r}, {band});")]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_auto_follows_dark_mode() {
        assert_eq!(resolve_color("theme_auto", true), Color::White);
        assert_eq!(resolve_color("theme_auto", false), Color::Black);
        assert_eq!(resolve_color("nonsense", true), Color::Black);
    }

    #[test]
    fn near_neutral_hex_is_gray() {
        assert!(resolve_color("#808080", false).is_gray());
        assert!(resolve_color("#7a8085", false).is_gray());
        assert!(!resolve_color("#202020", false).is_gray());
        assert!(!resolve_color("#ff8080", false).is_gray());
    }

    #[test]
    fn backend_notations() {
        let color = resolve_color("#0A0b0C", false);
        assert_eq!(color.direct(false), "Color(10, 11, 12)");
        assert_eq!(color.retained(), "0x0A0B0C");
        assert_eq!(color.protocol(), "#0a0b0c");
        assert_eq!(Color::White.direct(true), "COLOR_BLACK");
    }

    #[test]
    fn rect_band_covers_four_edges() {
        let shape = DitherShape::RectBand { x: 0, y: 0, w: 40, h: 20, band: 2 };
        assert_eq!(
            shape.statements(),
            vec![
                "apply_grey_dither_mask(0, 0, 40, 2);",
                "apply_grey_dither_mask(0, 18, 40, 2);",
                "apply_grey_dither_mask(0, 2, 2, 16);",
                "apply_grey_dither_mask(38, 2, 2, 16);",
            ]
        );
    }
}
