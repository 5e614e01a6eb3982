//! Harmony-based palette generation.
//!
//! An alternate entry point to palette creation: primary, secondary and
//! accent are placed at fixed angular relationships around one base hue,
//! then each gets seeded saturation/lightness variation clamped to a safe
//! band so a harmony never degenerates into near-black, near-white, or gray.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Hex, hsl_to_hex, wrap_hue};
use crate::seed::{jitter, random_in_range};

/// Safe saturation band for harmony colors.
const SAT_BAND: (f64, f64) = (15.0, 95.0);
/// Safe lightness band for harmony colors.
const LIGHT_BAND: (f64, f64) = (8.0, 92.0);

/// Angular relationship between the harmony hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyType {
    /// Neighbouring hues, about 20-25 degrees apart.
    #[default]
    Analogous,
    /// Two hues flanking the complement at about ±150 degrees.
    SplitComplementary,
    /// Three hues 120 degrees apart.
    Triadic,
    /// Hues at +90 and +180 degrees.
    Tetradic,
    /// The complement plus a near neighbour.
    Complementary,
}

impl HarmonyType {
    /// Every harmony type.
    pub const ALL: [HarmonyType; 5] = [
        HarmonyType::Analogous,
        HarmonyType::SplitComplementary,
        HarmonyType::Triadic,
        HarmonyType::Tetradic,
        HarmonyType::Complementary,
    ];

    /// Kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            HarmonyType::Analogous => "analogous",
            HarmonyType::SplitComplementary => "split-complementary",
            HarmonyType::Triadic => "triadic",
            HarmonyType::Tetradic => "tetradic",
            HarmonyType::Complementary => "complementary",
        }
    }

    /// Hue offsets (secondary, accent) relative to the base hue.
    fn offsets(self, seed: f64) -> (f64, f64) {
        match self {
            HarmonyType::Analogous => (
                20.0 + jitter(5.0, seed * 3.1),
                -25.0 + jitter(5.0, seed * 3.3),
            ),
            HarmonyType::SplitComplementary => (
                150.0 + jitter(6.0, seed * 3.7),
                -150.0 + jitter(6.0, seed * 4.1),
            ),
            HarmonyType::Triadic => (120.0, -120.0),
            HarmonyType::Tetradic => (90.0, 180.0),
            HarmonyType::Complementary => (180.0, 30.0 + jitter(10.0, seed * 4.3)),
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|h| h.name() == normalized)
            .ok_or_else(|| format!("unknown harmony type: {s}"))
    }
}

/// Variation spans applied to each harmony color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HarmonyOptions {
    /// Saturation jitter span (±).
    pub saturation_variation: f64,
    /// Lightness jitter span (±).
    pub lightness_variation: f64,
}

impl Default for HarmonyOptions {
    fn default() -> Self {
        Self {
            saturation_variation: 10.0,
            lightness_variation: 8.0,
        }
    }
}

/// The three colors of a harmony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HarmonyColors {
    pub primary: Hex,
    pub secondary: Hex,
    pub accent: Hex,
}

/// Generates primary, secondary and accent from one base color.
///
/// The result is a pure function of its arguments.
pub fn generate_harmony(
    hue: f64,
    saturation: f64,
    lightness: f64,
    harmony: HarmonyType,
    seed: f64,
    options: &HarmonyOptions,
) -> HarmonyColors {
    let (second, third) = harmony.offsets(seed);

    let vary = |h: f64, salt: f64| {
        let s = saturation + random_in_range(
            -options.saturation_variation,
            options.saturation_variation,
            seed * salt,
        );
        let l = lightness + random_in_range(
            -options.lightness_variation,
            options.lightness_variation,
            seed * (salt + 0.5),
        );
        hsl_to_hex(
            wrap_hue(h),
            s.clamp(SAT_BAND.0, SAT_BAND.1),
            l.clamp(LIGHT_BAND.0, LIGHT_BAND.1),
        )
    };

    let colors = HarmonyColors {
        primary: vary(hue, 5.3),
        secondary: vary(hue + second, 6.1),
        accent: vary(hue + third, 7.7),
    };
    debug!(
        harmony = %harmony,
        harmony.hue = hue,
        harmony.seed = seed,
        "Generated harmony palette"
    );
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(hex: Hex) -> f64 {
        hex.to_hsl().h
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn deterministic() {
        let opts = HarmonyOptions::default();
        for harmony in HarmonyType::ALL {
            let a = generate_harmony(200.0, 60.0, 50.0, harmony, 0.37, &opts);
            let b = generate_harmony(200.0, 60.0, 50.0, harmony, 0.37, &opts);
            assert_eq!(a, b, "{harmony}");
        }
    }

    #[test]
    fn triadic_is_exact() {
        let colors = generate_harmony(
            30.0,
            70.0,
            50.0,
            HarmonyType::Triadic,
            0.8,
            &HarmonyOptions::default(),
        );
        assert!(hue_distance(hue_of(colors.secondary), 150.0) < 2.0);
        assert!(hue_distance(hue_of(colors.accent), 270.0) < 2.0);
    }

    #[test]
    fn tetradic_offsets() {
        let colors = generate_harmony(
            10.0,
            70.0,
            50.0,
            HarmonyType::Tetradic,
            0.2,
            &HarmonyOptions::default(),
        );
        assert!(hue_distance(hue_of(colors.secondary), 100.0) < 2.0);
        assert!(hue_distance(hue_of(colors.accent), 190.0) < 2.0);
    }

    #[test]
    fn analogous_stays_close() {
        for i in 0..50 {
            let colors = generate_harmony(
                120.0,
                70.0,
                50.0,
                HarmonyType::Analogous,
                f64::from(i) * 0.31,
                &HarmonyOptions::default(),
            );
            assert!(hue_distance(hue_of(colors.secondary), 120.0) <= 27.0);
            assert!(hue_distance(hue_of(colors.accent), 120.0) <= 32.0);
        }
    }

    #[test]
    fn split_complementary_flanks_complement() {
        let colors = generate_harmony(
            0.0,
            70.0,
            50.0,
            HarmonyType::SplitComplementary,
            0.9,
            &HarmonyOptions::default(),
        );
        let d = hue_distance(hue_of(colors.secondary), 0.0);
        assert!((142.0..=158.0).contains(&d), "distance {d}");
    }

    #[test]
    fn extreme_inputs_are_clamped() {
        for harmony in HarmonyType::ALL {
            for (s, l) in [(0.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
                let colors =
                    generate_harmony(300.0, s, l, harmony, 0.5, &HarmonyOptions::default());
                for hex in [colors.primary, colors.secondary, colors.accent] {
                    let hsl = hex.to_hsl();
                    assert!((7.5..=92.5).contains(&hsl.l), "{harmony}: l={}", hsl.l);
                    assert!(hsl.s >= 10.0, "{harmony}: s={}", hsl.s);
                }
            }
        }
    }

    #[test]
    fn names_parse() {
        for harmony in HarmonyType::ALL {
            assert_eq!(harmony.name().parse::<HarmonyType>(), Ok(harmony));
        }
        assert_eq!(
            "Split_Complementary".parse::<HarmonyType>(),
            Ok(HarmonyType::SplitComplementary)
        );
        assert!("monochrome".parse::<HarmonyType>().is_err());
    }
}
