//! Base palette generation and full palette derivation.
//!
//! [`generate_base_palette`] turns a [`VibePreset`] and a seed into the five
//! base colors. [`derive_full_palette`] extends those into the semantic
//! roles the rendering layer consumes (on-colors, surfaces, borders).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Hex, best_text_on, contrast_ratio, hsl_to_hex, wrap_hue};
use crate::seed::random_in_range;
use crate::vibe::VibePreset;

/// Minimum contrast the text color should reach against the background.
const TEXT_FLOOR: f64 = 4.0;

/// How far muted text moves from the text lightness toward the background.
const MUTED_BLEND: f64 = 0.35;

/// The five base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSet {
    pub primary: Hex,
    pub secondary: Hex,
    pub accent: Hex,
    pub background: Hex,
    pub text: Hex,
}

/// Identifies one of the base colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl ColorKey {
    /// All keys in palette order.
    pub const ALL: [ColorKey; 5] = [
        ColorKey::Primary,
        ColorKey::Secondary,
        ColorKey::Accent,
        ColorKey::Background,
        ColorKey::Text,
    ];

    /// Lowercase name of the key.
    pub const fn name(self) -> &'static str {
        match self {
            ColorKey::Primary => "primary",
            ColorKey::Secondary => "secondary",
            ColorKey::Accent => "accent",
            ColorKey::Background => "background",
            ColorKey::Text => "text",
        }
    }

    /// Parses a key name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ColorSet {
    /// Returns the color stored under `key`.
    pub const fn get(&self, key: ColorKey) -> Hex {
        match key {
            ColorKey::Primary => self.primary,
            ColorKey::Secondary => self.secondary,
            ColorKey::Accent => self.accent,
            ColorKey::Background => self.background,
            ColorKey::Text => self.text,
        }
    }

    /// Replaces the color stored under `key`.
    pub fn set(&mut self, key: ColorKey, value: Hex) {
        match key {
            ColorKey::Primary => self.primary = value,
            ColorKey::Secondary => self.secondary = value,
            ColorKey::Accent => self.accent = value,
            ColorKey::Background => self.background = value,
            ColorKey::Text => self.text = value,
        }
    }
}

/// Per-key locks: a locked key reuses the previous palette's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorLocks {
    pub primary: bool,
    pub secondary: bool,
    pub accent: bool,
    pub background: bool,
    pub text: bool,
}

impl ColorLocks {
    /// No keys locked.
    pub const NONE: ColorLocks = ColorLocks {
        primary: false,
        secondary: false,
        accent: false,
        background: false,
        text: false,
    };

    /// Returns whether `key` is locked.
    pub const fn is_locked(&self, key: ColorKey) -> bool {
        match key {
            ColorKey::Primary => self.primary,
            ColorKey::Secondary => self.secondary,
            ColorKey::Accent => self.accent,
            ColorKey::Background => self.background,
            ColorKey::Text => self.text,
        }
    }

    /// Returns a copy with `key` locked.
    pub fn lock(mut self, key: ColorKey) -> Self {
        match key {
            ColorKey::Primary => self.primary = true,
            ColorKey::Secondary => self.secondary = true,
            ColorKey::Accent => self.accent = true,
            ColorKey::Background => self.background = true,
            ColorKey::Text => self.text = true,
        }
        self
    }

    /// Copies every locked key from `prev` into `colors`.
    pub fn apply(&self, colors: &mut ColorSet, prev: &ColorSet) {
        for key in ColorKey::ALL {
            if self.is_locked(key) {
                colors.set(key, prev.get(key));
            }
        }
    }
}

/// The base colors plus every derived role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPalette {
    pub primary: Hex,
    pub secondary: Hex,
    pub accent: Hex,
    pub background: Hex,
    pub text: Hex,
    pub on_primary: Hex,
    pub on_secondary: Hex,
    pub on_accent: Hex,
    pub surface: Hex,
    pub surface_alt: Hex,
    pub text_muted: Hex,
    pub border_subtle: Hex,
    pub border_strong: Hex,
}

impl FullPalette {
    /// Returns the five base colors.
    pub const fn base(&self) -> ColorSet {
        ColorSet {
            primary: self.primary,
            secondary: self.secondary,
            accent: self.accent,
            background: self.background,
            text: self.text,
        }
    }
}

impl From<ColorSet> for FullPalette {
    fn from(colors: ColorSet) -> Self {
        derive_full_palette(&colors)
    }
}

/// Generates the five base colors for a vibe.
///
/// Each component is drawn from its own seed derivative so that draws from
/// one base seed stay decorrelated. When `prev` is given, every key locked in
/// `locks` is copied from it verbatim; without `prev` the locks are ignored.
pub fn generate_base_palette(
    vibe: &VibePreset,
    seed: f64,
    prev: Option<&ColorSet>,
    locks: &ColorLocks,
) -> ColorSet {
    let (hue_min, hue_max) = vibe.hue_range();
    let hue = wrap_hue(random_in_range(hue_min, hue_max, seed * 0.9));
    let (sat_min, sat_max) = vibe.primary_sat_range;
    let saturation = random_in_range(sat_min, sat_max, seed * 1.1);
    let (light_min, light_max) = vibe.primary_light_range;
    let lightness = random_in_range(light_min, light_max, seed * 1.3);

    let primary = hsl_to_hex(hue, saturation, lightness);

    // Secondary and accent hang off the configured hue, not the drawn one.
    let secondary = hsl_to_hex(
        vibe.primary_hue + 180.0 + random_in_range(-20.0, 20.0, seed * 1.7),
        (saturation + random_in_range(-10.0, 10.0, seed * 1.9)).clamp(0.0, 100.0),
        (lightness + random_in_range(-10.0, 10.0, seed * 2.3)).clamp(0.0, 100.0),
    );

    let accent = hsl_to_hex(
        vibe.primary_hue + random_in_range(40.0, 120.0, seed * 2.9),
        (saturation + 10.0).min(100.0),
        (lightness + 10.0).clamp(30.0, 80.0),
    );

    let background = background_for(vibe);
    let text = pick_text_color(background);

    debug!(
        vibe.id = %vibe.id,
        palette.seed = seed,
        palette.hue = hue,
        palette.saturation = saturation,
        palette.lightness = lightness,
        palette.text = %text,
        "Generated base palette"
    );

    let mut colors = ColorSet {
        primary,
        secondary,
        accent,
        background,
        text,
    };
    if let Some(prev) = prev {
        locks.apply(&mut colors, prev);
    }
    colors
}

/// The background for a vibe: the configured hue at a fixed low saturation,
/// independent of the seed.
pub fn background_for(vibe: &VibePreset) -> Hex {
    let saturation = if vibe.is_dark_ui { 15.0 } else { 8.0 };
    hsl_to_hex(vibe.primary_hue, saturation, vibe.bg_lightness)
}

/// Chooses near-black or white text for `background`.
///
/// Ink wins when it clears the floor and is at least as strong as white;
/// otherwise white wins if it clears the floor; otherwise the stronger one.
pub fn pick_text_color(background: Hex) -> Hex {
    let ink = contrast_ratio(Hex::INK, background);
    let white = contrast_ratio(Hex::WHITE, background);
    if ink >= TEXT_FLOOR && ink >= white {
        Hex::INK
    } else if white >= TEXT_FLOOR {
        Hex::WHITE
    } else {
        best_text_on(background)
    }
}

/// Derives the full semantic palette from the base colors.
pub fn derive_full_palette(colors: &ColorSet) -> FullPalette {
    let bg = colors.background;
    // Surfaces and borders step away from the background toward the text.
    let toward_text = if bg.is_light() { -1.0 } else { 1.0 };

    let text_hsl = colors.text.to_hsl();
    let bg_l = bg.to_hsl().l;
    let text_muted = hsl_to_hex(
        text_hsl.h,
        text_hsl.s,
        (bg_l - text_hsl.l).mul_add(MUTED_BLEND, text_hsl.l),
    );

    FullPalette {
        primary: colors.primary,
        secondary: colors.secondary,
        accent: colors.accent,
        background: bg,
        text: colors.text,
        on_primary: best_text_on(colors.primary),
        on_secondary: best_text_on(colors.secondary),
        on_accent: best_text_on(colors.accent),
        surface: bg.shift_lightness(toward_text * 4.0),
        surface_alt: bg.shift_lightness(toward_text * 8.0),
        text_muted,
        border_subtle: bg.shift_lightness(toward_text * 12.0),
        border_strong: bg.shift_lightness(toward_text * 24.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn vibe(id: &str) -> VibePreset {
        builtin::preset(id).expect("builtin vibe")
    }

    #[test]
    fn same_seed_same_palette() {
        let v = vibe("corporate");
        let a = generate_base_palette(&v, 0.4217, None, &ColorLocks::NONE);
        let b = generate_base_palette(&v, 0.4217, None, &ColorLocks::NONE);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let v = vibe("playful");
        let a = generate_base_palette(&v, 0.1, None, &ColorLocks::NONE);
        let b = generate_base_palette(&v, 0.7, None, &ColorLocks::NONE);
        assert_ne!(a.primary, b.primary);
    }

    #[test]
    fn primary_respects_vibe_ranges() {
        let v = vibe("corporate");
        for i in 0..200 {
            let colors = generate_base_palette(&v, f64::from(i) * 0.173, None, &ColorLocks::NONE);
            let hsl = colors.primary.to_hsl();
            let hue_dist = (hsl.h - v.primary_hue).abs().min(360.0 - (hsl.h - v.primary_hue).abs());
            assert!(hue_dist <= 31.0, "hue {} too far", hsl.h);
            assert!(hsl.l >= v.primary_light_range.0 - 1.0);
            assert!(hsl.l <= v.primary_light_range.1 + 1.0);
        }
    }

    #[test]
    fn background_ignores_seed() {
        let v = vibe("luxury");
        let a = generate_base_palette(&v, 0.2, None, &ColorLocks::NONE);
        let b = generate_base_palette(&v, 9.9, None, &ColorLocks::NONE);
        assert_eq!(a.background, b.background);
        assert_eq!(a.background, background_for(&v));
    }

    #[test]
    fn text_follows_background_brightness() {
        let light = generate_base_palette(&vibe("minimal"), 0.3, None, &ColorLocks::NONE);
        assert_eq!(light.text, Hex::INK);
        let dark = generate_base_palette(&vibe("cyberpunk"), 0.3, None, &ColorLocks::NONE);
        assert_eq!(dark.text, Hex::WHITE);
    }

    #[test]
    fn locks_copy_previous_values() {
        let v = vibe("retro");
        let prev = generate_base_palette(&v, 0.11, None, &ColorLocks::NONE);
        let locks = ColorLocks::NONE.lock(ColorKey::Primary).lock(ColorKey::Accent);
        let next = generate_base_palette(&v, 0.93, Some(&prev), &locks);
        assert_eq!(next.primary, prev.primary);
        assert_eq!(next.accent, prev.accent);
        assert_ne!(next.secondary, prev.secondary);
    }

    #[test]
    fn locks_ignored_without_previous() {
        let v = vibe("retro");
        let all = ColorKey::ALL
            .into_iter()
            .fold(ColorLocks::NONE, ColorLocks::lock);
        let locked = generate_base_palette(&v, 0.5, None, &all);
        let unlocked = generate_base_palette(&v, 0.5, None, &ColorLocks::NONE);
        assert_eq!(locked, unlocked);
    }

    #[test]
    fn accent_lightness_is_clamped() {
        let v = vibe("playful");
        for i in 0..100 {
            let colors = generate_base_palette(&v, f64::from(i) * 0.41, None, &ColorLocks::NONE);
            let l = colors.accent.to_hsl().l;
            assert!((29.5..=80.5).contains(&l), "accent lightness {l}");
        }
    }

    #[test]
    fn full_palette_on_colors_are_legible() {
        let colors = generate_base_palette(&vibe("brutalist"), 0.1, None, &ColorLocks::NONE);
        let full = derive_full_palette(&colors);
        for (fg, bg) in [
            (full.on_primary, full.primary),
            (full.on_secondary, full.secondary),
            (full.on_accent, full.accent),
        ] {
            assert!(contrast_ratio(fg, bg) >= 3.0, "{fg} on {bg}");
        }
        assert_eq!(full.base(), colors);
    }

    #[test]
    fn surfaces_step_toward_text() {
        let light = derive_full_palette(&generate_base_palette(
            &vibe("minimal"),
            0.3,
            None,
            &ColorLocks::NONE,
        ));
        assert!(light.surface.to_hsl().l < light.background.to_hsl().l);
        assert!(light.border_strong.to_hsl().l < light.border_subtle.to_hsl().l);

        let dark = derive_full_palette(&generate_base_palette(
            &vibe("luxury"),
            0.3,
            None,
            &ColorLocks::NONE,
        ));
        assert!(dark.surface.to_hsl().l > dark.background.to_hsl().l);
    }

    #[test]
    fn muted_text_sits_between_text_and_background() {
        let full = derive_full_palette(&generate_base_palette(
            &vibe("corporate"),
            0.6,
            None,
            &ColorLocks::NONE,
        ));
        let text_bg = contrast_ratio(full.text, full.background);
        let muted_bg = contrast_ratio(full.text_muted, full.background);
        assert!(muted_bg < text_bg);
        assert!(muted_bg > 3.0);
    }

    #[test]
    fn color_key_names_roundtrip() {
        for key in ColorKey::ALL {
            assert_eq!(ColorKey::from_name(key.name()), Some(key));
        }
        assert_eq!(ColorKey::from_name(" TEXT "), Some(ColorKey::Text));
        assert_eq!(ColorKey::from_name("shadow"), None);
    }

    #[test]
    fn serde_uses_camel_case() {
        let full = derive_full_palette(&generate_base_palette(
            &vibe("organic"),
            0.2,
            None,
            &ColorLocks::NONE,
        ));
        let json = serde_json::to_string(&full).expect("serialize");
        assert!(json.contains("\"onPrimary\""));
        assert!(json.contains("\"borderStrong\""));
    }
}
