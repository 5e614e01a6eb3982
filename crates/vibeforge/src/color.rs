//! Hex and HSL color types plus WCAG luminance math.
//!
//! Everything downstream (palette generation, contrast repair, typography
//! compensation) is built on the handful of functions in this module:
//!
//! - [`hex_to_hsl`] / [`hsl_to_hex`] - conversions between `#rrggbb` and HSL
//! - [`relative_luminance`] - WCAG 2.1 relative luminance in `[0, 1]`
//! - [`contrast_ratio`] - WCAG contrast ratio in `[1, 21]`
//!
//! # Example
//!
//! ```rust
//! use vibeforge::color::{Hex, contrast_ratio};
//!
//! let black: Hex = "#000".parse().unwrap();
//! let white = Hex::WHITE;
//! assert!((contrast_ratio(black, white) - 21.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorParseError;

/// Ratio at which ink counts as legible for [`best_text_on`].
const LEGIBLE_RATIO: f64 = 4.5;

/// A validated sRGB color, always rendered as lowercase `#rrggbb`.
///
/// Parsing accepts `#rgb`, `#rrggbb`, and both forms without the leading
/// `#`. Anything else is rejected, so a `Hex` in hand is always usable by
/// the math below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex {
    r: u8,
    g: u8,
    b: u8,
}

impl Hex {
    /// Pure white.
    pub const WHITE: Hex = Hex::from_rgb(0xff, 0xff, 0xff);

    /// Near-black used for text on light backgrounds.
    pub const INK: Hex = Hex::from_rgb(0x0a, 0x0a, 0x0a);

    /// Pure black.
    pub const BLACK: Hex = Hex::from_rgb(0, 0, 0);

    /// Creates a color from its channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color, expanding the three-digit short form.
    ///
    /// # Errors
    /// Returns [`ColorParseError`] for empty input, a length other than 3 or
    /// 6 digits, or a non-hex digit.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let raw = input.trim();
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit {
                input: input.to_string(),
                digit: bad,
            });
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidDigit {
                input: input.to_string(),
                digit: s.chars().next().unwrap_or('?'),
            })
        };

        match digits.len() {
            6 => Ok(Self::from_rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => Ok(Self::from_rgb(
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            )),
            len => Err(ColorParseError::InvalidLength {
                input: input.to_string(),
                len,
            }),
        }
    }

    /// Returns the `(r, g, b)` channels.
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Converts to HSL.
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    /// WCAG relative luminance of this color.
    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }

    /// Returns true when the color reads as a light background
    /// (relative luminance above 0.5).
    pub fn is_light(self) -> bool {
        self.luminance() > 0.5
    }

    /// Returns this color with its HSL lightness replaced.
    pub fn with_lightness(self, lightness: f64) -> Hex {
        let hsl = self.to_hsl();
        hsl_to_hex(hsl.h, hsl.s, lightness)
    }

    /// Returns this color with its HSL lightness shifted by `delta`.
    pub fn shift_lightness(self, delta: f64) -> Hex {
        let hsl = self.to_hsl();
        hsl_to_hex(hsl.h, hsl.s, hsl.l + delta)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Hex {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(HexVisitor)
    }
}

struct HexVisitor;

impl Visitor<'_> for HexVisitor {
    type Value = Hex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex color string like \"#1a2b3c\" or \"#abc\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Hex::parse(v).map_err(E::custom)
    }
}

/// A color in HSL space: hue in degrees `[0, 360)`, saturation and
/// lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL triple, wrapping the hue and clamping the rest.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Converts to a hex color.
    pub fn to_hex(self) -> Hex {
        hsl_to_hex(self.h, self.s, self.l)
    }
}

/// Wraps any hue (including negative ones) into `[0, 360)`.
pub fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Parses a hex string and converts it to HSL.
///
/// # Errors
/// Returns [`ColorParseError`] if `hex` is not a valid hex color.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorParseError> {
    Ok(Hex::parse(hex)?.to_hsl())
}

/// Converts HSL (degrees, percent, percent) to a hex color.
///
/// Out-of-range inputs are wrapped (hue) or clamped (saturation, lightness).
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> Hex {
    let h = wrap_hue(h) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Hex::from_rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        s.mul_add(-l, l + s)
    };
    let p = 2.0f64.mul_add(l, -q);

    Hex::from_rgb(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return ((q - p) * 6.0).mul_add(t, p);
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p);
    }
    p
}

fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = f64::midpoint(max, min);

    let d = max - min;
    if d.abs() < f64::EPSILON {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: wrap_hue(h * 60.0),
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Linearizes one 8-bit sRGB channel (the WCAG piecewise gamma curve).
fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Computes WCAG 2.1 relative luminance.
///
/// `L = 0.2126 R + 0.7152 G + 0.0722 B` over linearized channels; black is
/// 0.0 and white is 1.0.
pub fn relative_luminance(color: Hex) -> f64 {
    let (r, g, b) = color.rgb();
    0.2126f64.mul_add(
        srgb_to_linear(r),
        0.7152f64.mul_add(srgb_to_linear(g), 0.0722 * srgb_to_linear(b)),
    )
}

/// Computes the WCAG contrast ratio `(L1 + 0.05) / (L2 + 0.05)`.
///
/// Symmetric in its arguments and always within `[1.0, 21.0]`.
pub fn contrast_ratio(a: Hex, b: Hex) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

/// Picks near-black ink or white, whichever reads better on `bg`.
///
/// Ink is preferred while it stays legible. On mid-tone backgrounds where
/// ink falls below 4.5:1, the stronger of black and white is used.
pub fn best_text_on(bg: Hex) -> Hex {
    let ink = contrast_ratio(Hex::INK, bg);
    let white = contrast_ratio(Hex::WHITE, bg);
    if ink >= white && ink >= LEGIBLE_RATIO {
        Hex::INK
    } else if white >= contrast_ratio(Hex::BLACK, bg) {
        Hex::WHITE
    } else {
        Hex::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Hex {
        Hex::parse(s).expect("valid hex")
    }

    #[test]
    fn parse_long_and_short_forms() {
        assert_eq!(hex("#ff8040").rgb(), (0xff, 0x80, 0x40));
        assert_eq!(hex("FF8040").rgb(), (0xff, 0x80, 0x40));
        assert_eq!(hex("#abc"), hex("#aabbcc"));
        assert_eq!(hex("  #000  "), Hex::BLACK);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Hex::parse(""), Err(ColorParseError::Empty));
        assert_eq!(Hex::parse("#"), Err(ColorParseError::Empty));
        assert!(matches!(
            Hex::parse("#12345"),
            Err(ColorParseError::InvalidLength { len: 5, .. })
        ));
        assert!(matches!(
            Hex::parse("#zzzzzz"),
            Err(ColorParseError::InvalidDigit { digit: 'z', .. })
        ));
    }

    #[test]
    fn display_is_lowercase_long_form() {
        assert_eq!(hex("#ABC").to_string(), "#aabbcc");
    }

    #[test]
    fn reference_luminance() {
        assert!(relative_luminance(Hex::BLACK).abs() < 1e-12);
        assert!((relative_luminance(Hex::WHITE) - 1.0).abs() < 1e-12);
        // #777777 sits just under AA against white.
        let gray = relative_luminance(hex("#777777"));
        assert!((gray - 0.184).abs() < 0.001, "gray luminance {gray}");
    }

    #[test]
    fn reference_contrast() {
        assert!((contrast_ratio(Hex::BLACK, Hex::WHITE) - 21.0).abs() < 1e-9);
        assert!((contrast_ratio(Hex::WHITE, Hex::WHITE) - 1.0).abs() < 1e-12);
        let r = contrast_ratio(hex("#777777"), Hex::WHITE);
        assert!((r - 4.48).abs() < 0.01, "ratio {r}");
    }

    #[test]
    fn hsl_reference_points() {
        let red = hex("#ff0000").to_hsl();
        assert!((red.h - 0.0).abs() < 1e-9);
        assert!((red.s - 100.0).abs() < 1e-9);
        assert!((red.l - 50.0).abs() < 1e-9);

        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), hex("#00ff00"));
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), hex("#0000ff"));
        assert_eq!(hsl_to_hex(0.0, 0.0, 50.0), hex("#808080"));
    }

    #[test]
    fn hsl_to_hex_wraps_and_clamps() {
        assert_eq!(hsl_to_hex(-240.0, 100.0, 50.0), hsl_to_hex(120.0, 100.0, 50.0));
        assert_eq!(hsl_to_hex(480.0, 100.0, 50.0), hsl_to_hex(120.0, 100.0, 50.0));
        assert_eq!(hsl_to_hex(10.0, 50.0, 150.0), Hex::WHITE);
        assert_eq!(hsl_to_hex(10.0, 50.0, -5.0), Hex::BLACK);
    }

    #[test]
    fn wrap_hue_never_negative() {
        assert!((wrap_hue(-30.0) - 330.0).abs() < 1e-9);
        assert!((wrap_hue(720.0)).abs() < 1e-9);
        assert!(wrap_hue(-1e-18) < 360.0);
        assert!(wrap_hue(f64::NAN).abs() < 1e-12);
    }

    #[test]
    fn with_lightness_keeps_hue_family() {
        let base = hex("#3366cc");
        let darker = base.with_lightness(20.0);
        let hsl = darker.to_hsl();
        assert!((hsl.l - 20.0).abs() < 0.5);
        assert!((hsl.h - base.to_hsl().h).abs() < 2.0);
    }

    #[test]
    fn best_text_prefers_ink_on_light() {
        assert_eq!(best_text_on(Hex::WHITE), Hex::INK);
        assert_eq!(best_text_on(hex("#111111")), Hex::WHITE);
        // Mid-tone where ink drops under 4.5:1 but black does not.
        let mid = hex("#777777");
        assert!(contrast_ratio(best_text_on(mid), mid) >= 4.5);
    }

    #[test]
    fn serde_uses_strings() {
        let json = serde_json::to_string(&hex("#ABC")).expect("serialize");
        assert_eq!(json, "\"#aabbcc\"");
        let back: Hex = serde_json::from_str("\"#123456\"").expect("deserialize");
        assert_eq!(back, hex("#123456"));
        assert!(serde_json::from_str::<Hex>("\"nope\"").is_err());
    }
}
