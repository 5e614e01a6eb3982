//! WCAG contrast reporting and repair.
//!
//! Reporting evaluates a fixed list of semantic foreground/background pairs
//! and classifies each against AA (4.5:1) and AAA (7:1).
//!
//! Repair searches for a new lightness for a text role, holding hue and
//! saturation fixed, until it meets a target ratio against its background.
//! The search is a bounded binary search over a constrained lightness
//! window:
//!
//! - Low-saturation ("muted") colors only move within a narrow window so a
//!   muted gray stays a muted gray.
//! - Saturated colors may use the full `0..=100` range.
//! - On light backgrounds (luminance > 0.5) the search moves darker, on dark
//!   backgrounds it moves lighter.
//!
//! Repair is best effort: if the target is unreachable inside the window
//! the closest value found is returned, and the result is never less
//! legible than the input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::color::{Hex, contrast_ratio, hsl_to_hex};
use crate::palette::{ColorSet, FullPalette};

/// Minimum ratio for WCAG AA, normal text.
pub const AA_RATIO: f64 = 4.5;
/// Minimum ratio for WCAG AAA, normal text.
pub const AAA_RATIO: f64 = 7.0;

/// Outcome of one contrast check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Meets AAA.
    Pass,
    /// Meets AA but not AAA.
    Warn,
    /// Fails AA.
    Fail,
}

impl Severity {
    /// Classifies a ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_RATIO {
            Severity::Pass
        } else if ratio >= AA_RATIO {
            Severity::Warn
        } else {
            Severity::Fail
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Pass => "pass",
            Severity::Warn => "warn",
            Severity::Fail => "fail",
        })
    }
}

/// One evaluated foreground/background pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    pub foreground: Hex,
    pub background: Hex,
    pub ratio: f64,
    pub aa_compliant: bool,
    pub aaa_compliant: bool,
    pub label: String,
    pub severity: Severity,
}

impl ContrastCheck {
    /// Evaluates one pair.
    pub fn evaluate(foreground: Hex, background: Hex, label: impl Into<String>) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            aa_compliant: ratio >= AA_RATIO,
            aaa_compliant: ratio >= AAA_RATIO,
            label: label.into(),
            severity: Severity::from_ratio(ratio),
        }
    }
}

/// Failure counts per standard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationCount {
    pub aa: usize,
    pub aaa: usize,
}

/// Compliance level to repair toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastTarget {
    #[default]
    Aa,
    Aaa,
}

impl ContrastTarget {
    /// The numeric ratio for this target.
    pub const fn ratio(self) -> f64 {
        match self {
            ContrastTarget::Aa => AA_RATIO,
            ContrastTarget::Aaa => AAA_RATIO,
        }
    }
}

impl fmt::Display for ContrastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContrastTarget::Aa => "aa",
            ContrastTarget::Aaa => "aaa",
        })
    }
}

impl FromStr for ContrastTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aa" => Ok(ContrastTarget::Aa),
            "aaa" => Ok(ContrastTarget::Aaa),
            other => Err(format!("unknown contrast target: {other}")),
        }
    }
}

/// Tuning constants for the repair search.
///
/// The muted windows are empirical; they are exposed so a product can
/// adjust them without touching the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepairTuning {
    /// Saturation (percent) below which a color counts as muted.
    pub muted_saturation: f64,
    /// Lightness window for muted colors on light backgrounds.
    pub muted_window_light_bg: (f64, f64),
    /// Lightness window for muted colors on dark backgrounds.
    pub muted_window_dark_bg: (f64, f64),
    /// Binary search iterations.
    pub iterations: u32,
}

impl Default for RepairTuning {
    fn default() -> Self {
        Self {
            muted_saturation: 20.0,
            muted_window_light_bg: (40.0, 70.0),
            muted_window_dark_bg: (30.0, 60.0),
            iterations: 20,
        }
    }
}

/// Pairs checked by [`check_palette_contrast`], in report order.
const PAIRS: &[(&str, fn(&FullPalette) -> (Hex, Hex))] = &[
    ("Body text on background", |p| (p.text, p.background)),
    ("Body text on surface", |p| (p.text, p.surface)),
    ("Body text on alternate surface", |p| (p.text, p.surface_alt)),
    ("Muted text on background", |p| (p.text_muted, p.background)),
    ("Muted text on surface", |p| (p.text_muted, p.surface)),
    ("Text on primary", |p| (p.on_primary, p.primary)),
    ("Text on secondary", |p| (p.on_secondary, p.secondary)),
    ("Text on accent", |p| (p.on_accent, p.accent)),
];

/// Evaluates every semantic pair of a palette.
pub fn check_palette_contrast(palette: &FullPalette) -> Vec<ContrastCheck> {
    PAIRS
        .iter()
        .map(|(label, pick)| {
            let (fg, bg) = pick(palette);
            ContrastCheck::evaluate(fg, bg, *label)
        })
        .collect()
}

/// Counts AA and AAA failures.
pub fn count_violations(checks: &[ContrastCheck]) -> ViolationCount {
    checks.iter().fold(ViolationCount::default(), |mut acc, check| {
        if !check.aa_compliant {
            acc.aa += 1;
        }
        if !check.aaa_compliant {
            acc.aaa += 1;
        }
        acc
    })
}

/// Repairs the text color of a base palette toward `target`.
///
/// Only `text` is adjusted, against `background`. Uses
/// [`RepairTuning::default`].
pub fn fix_contrast_to_target(colors: &ColorSet, target: ContrastTarget) -> ColorSet {
    fix_contrast_with(colors, target, &RepairTuning::default())
}

/// [`fix_contrast_to_target`] with explicit tuning.
pub fn fix_contrast_with(colors: &ColorSet, target: ContrastTarget, tuning: &RepairTuning) -> ColorSet {
    ColorSet {
        text: repair_foreground(colors.text, colors.background, target.ratio(), tuning),
        ..*colors
    }
}

/// Repairs every text role of a full palette.
///
/// Body text is checked against the background and both surfaces, muted
/// text against the background and the surface, and each on-color against
/// its role color. A role only changes when no reported pair it takes part
/// in loses contrast.
pub fn fix_palette_contrast(
    palette: &FullPalette,
    target: ContrastTarget,
    tuning: &RepairTuning,
) -> FullPalette {
    let ratio = target.ratio();
    let fixed = FullPalette {
        text: repair_role(
            palette.text,
            &[palette.background, palette.surface, palette.surface_alt],
            ratio,
            tuning,
        ),
        text_muted: repair_role(
            palette.text_muted,
            &[palette.background, palette.surface],
            ratio,
            tuning,
        ),
        on_primary: repair_foreground(palette.on_primary, palette.primary, ratio, tuning),
        on_secondary: repair_foreground(palette.on_secondary, palette.secondary, ratio, tuning),
        on_accent: repair_foreground(palette.on_accent, palette.accent, ratio, tuning),
        ..*palette
    };
    debug!(
        contrast.target = %target,
        contrast.violations_before = count_violations(&check_palette_contrast(palette)).aa,
        contrast.violations_after = count_violations(&check_palette_contrast(&fixed)).aa,
        "Repaired palette contrast"
    );
    fixed
}

/// Repairs one foreground shown on several backgrounds.
///
/// Candidates are the repair chained across every background and the repair
/// against each background alone. A candidate that lowers the ratio on any
/// background is discarded; of the rest, the one passing on the most
/// backgrounds wins, earlier candidates first. Falls back to `fg`.
fn repair_role(fg: Hex, backgrounds: &[Hex], target: f64, tuning: &RepairTuning) -> Hex {
    let before: Vec<f64> = backgrounds.iter().map(|bg| contrast_ratio(fg, *bg)).collect();
    let passing = |color: Hex| {
        backgrounds
            .iter()
            .filter(|bg| contrast_ratio(color, **bg) >= target)
            .count()
    };
    let keeps_every_pair = |color: Hex| {
        backgrounds
            .iter()
            .zip(&before)
            .all(|(bg, ratio)| contrast_ratio(color, *bg) >= *ratio)
    };

    let chained = backgrounds
        .iter()
        .fold(fg, |color, bg| repair_foreground(color, *bg, target, tuning));
    let single = backgrounds
        .iter()
        .map(|bg| repair_foreground(fg, *bg, target, tuning));

    let mut best = fg;
    let mut best_passing = passing(fg);
    for candidate in std::iter::once(chained).chain(single) {
        if !keeps_every_pair(candidate) {
            trace!(
                contrast.fg = %fg,
                contrast.candidate = %candidate,
                "Repair candidate lowers a pair"
            );
            continue;
        }
        let count = passing(candidate);
        if count > best_passing {
            best = candidate;
            best_passing = count;
        }
    }
    if best_passing < backgrounds.len() {
        warn!(
            contrast.fg = %fg,
            contrast.result = %best,
            contrast.target = target,
            contrast.passing = best_passing,
            contrast.backgrounds = backgrounds.len(),
            "Contrast target not met on every background"
        );
    }
    best
}

/// Finds a lightness for `fg` that meets `target` against `bg`.
///
/// Returns `fg` unchanged when it already complies, and never returns a
/// color with lower contrast than `fg`.
pub fn repair_foreground(fg: Hex, bg: Hex, target: f64, tuning: &RepairTuning) -> Hex {
    let original = contrast_ratio(fg, bg);
    if original >= target {
        return fg;
    }

    let hsl = fg.to_hsl();
    let light_bg = bg.is_light();
    let (win_lo, win_hi) = if hsl.s < tuning.muted_saturation {
        if light_bg {
            tuning.muted_window_light_bg
        } else {
            tuning.muted_window_dark_bg
        }
    } else {
        (0.0, 100.0)
    };
    let start = hsl.l.clamp(win_lo, win_hi);
    let candidate = |l: f64| hsl_to_hex(hsl.h, hsl.s, l);

    // Light background: darker text gains contrast, so search [win_lo, start]
    // for the lightest value that still meets the target. Dark background is
    // the mirror image over [start, win_hi].
    let (mut lo, mut hi) = if light_bg {
        (win_lo, start)
    } else {
        (start, win_hi)
    };
    let extreme = if light_bg { lo } else { hi };

    let mut best = candidate(extreme);
    if contrast_ratio(best, bg) < target {
        warn!(
            contrast.fg = %fg,
            contrast.bg = %bg,
            contrast.target = target,
            contrast.best = contrast_ratio(best, bg),
            "Contrast target unreachable inside lightness window"
        );
        return if contrast_ratio(best, bg) > original { best } else { fg };
    }

    for step in 0..tuning.iterations {
        let mid = f64::midpoint(lo, hi);
        let tried = candidate(mid);
        let ratio = contrast_ratio(tried, bg);
        trace!(step, lightness = mid, ratio, "repair step");
        if ratio >= target {
            best = tried;
            // Meets the target: move back toward the original lightness.
            if light_bg {
                lo = mid;
            } else {
                hi = mid;
            }
        } else if light_bg {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    if contrast_ratio(best, bg) > original { best } else { fg }
}
