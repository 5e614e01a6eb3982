//! Typographic tokens and the hierarchy optimizer.
//!
//! [`optimize_typography`] runs a fixed pipeline over a caller-supplied set
//! of tokens. After every step the structural hierarchy is re-settled, so
//! no later step can observe (or return) a broken hierarchy:
//!
//! - `heading.size` is at least two steps above `body.size`
//! - `subheading.size` is exactly one step below `heading.size`
//! - `heading.weight` is at least 200 above `body.weight`
//! - `accent.weight` never exceeds `heading.weight`
//!
//! Per-vibe stylistic rules live in one table ([`typography_rule`]) rather
//! than being scattered through the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::palette::ColorSet;
use crate::seed::{jitter, pick, roll};
use crate::vibe::VibePreset;

/// Minimum weight gap between heading and body.
pub const MIN_WEIGHT_GAP: u16 = 200;
/// Minimum size gap (in scale steps) between heading and body.
pub const MIN_SIZE_GAP: usize = 2;

const WEIGHT_MIN: u16 = 100;
const WEIGHT_MAX: u16 = 900;
const BODY_WEIGHT_FLOOR: u16 = 300;
const ACCENT_WEIGHT_CEILING: u16 = 700;
const LOW_CONTRAST_BODY_WEIGHT_CAP: u16 = 600;
const LOW_CONTRAST_LIGHTNESS_GAP: f64 = 40.0;
const LOW_SATURATION: f64 = 40.0;
const TREND_BIAS_PROBABILITY: f64 = 0.25;
const WEIGHT_JITTER: f64 = 0.1;

/// Ordinal type scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeSize {
    #[serde(rename = "xs")]
    Xs,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl TypeSize {
    /// Every size, smallest first.
    pub const ALL: [TypeSize; 6] = [
        TypeSize::Xs,
        TypeSize::Sm,
        TypeSize::Md,
        TypeSize::Lg,
        TypeSize::Xl,
        TypeSize::Xxl,
    ];

    /// Position on the scale, `0` for `xs`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The size at `index`, saturating at the largest size.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Moves up `steps`, saturating at `2xl`.
    pub fn step_up(self, steps: usize) -> Self {
        Self::from_index(self.index().saturating_add(steps))
    }

    /// Moves down `steps`, saturating at `xs`.
    pub fn step_down(self, steps: usize) -> Self {
        Self::from_index(self.index().saturating_sub(steps))
    }

    /// Font size in rem.
    pub const fn rem(self) -> f64 {
        match self {
            TypeSize::Xs => 0.75,
            TypeSize::Sm => 0.875,
            TypeSize::Md => 1.0,
            TypeSize::Lg => 1.25,
            TypeSize::Xl => 1.5,
            TypeSize::Xxl => 2.0,
        }
    }

    /// Scale name as used in tokens.
    pub const fn name(self) -> &'static str {
        match self {
            TypeSize::Xs => "xs",
            TypeSize::Sm => "sm",
            TypeSize::Md => "md",
            TypeSize::Lg => "lg",
            TypeSize::Xl => "xl",
            TypeSize::Xxl => "2xl",
        }
    }
}

impl fmt::Display for TypeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for TypeSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.name() == s)
            .ok_or_else(|| format!("unknown type size: {s}"))
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Text transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
}

/// One text style slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: TypeSize,
    /// CSS font weight, conventionally a multiple of 100.
    pub weight: u16,
    #[serde(default)]
    pub style: FontStyle,
    #[serde(default)]
    pub transform: TextTransform,
}

impl TextStyle {
    /// A normal, untransformed style.
    pub const fn new(size: TypeSize, weight: u16) -> Self {
        Self {
            size,
            weight,
            style: FontStyle::Normal,
            transform: TextTransform::None,
        }
    }
}

/// The four typographic slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypographyTokens {
    pub heading: TextStyle,
    pub subheading: TextStyle,
    pub body: TextStyle,
    pub accent: TextStyle,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            heading: TextStyle::new(TypeSize::Xxl, 700),
            subheading: TextStyle::new(TypeSize::Xl, 550),
            body: TextStyle::new(TypeSize::Md, 400),
            accent: TextStyle {
                transform: TextTransform::Uppercase,
                ..TextStyle::new(TypeSize::Sm, 500)
            },
        }
    }
}

impl TypographyTokens {
    /// Returns true when every hierarchy invariant holds.
    pub fn hierarchy_holds(&self) -> bool {
        self.heading.size.index() >= self.body.size.index() + MIN_SIZE_GAP
            && self.subheading.size.index() + 1 == self.heading.size.index()
            && self.heading.weight >= self.body.weight + MIN_WEIGHT_GAP
            && self.accent.weight <= self.heading.weight
    }
}

/// A recommended heading/body weight pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightPair {
    pub heading: u16,
    pub body: u16,
}

/// Externally refreshed trend data the optimizer may lean on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendHints {
    pub recommended_weights: Option<WeightPair>,
}

/// Stylistic overrides for one vibe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypographyRule {
    pub min_heading_weight: Option<u16>,
    pub max_heading_weight: Option<u16>,
    pub max_body_weight: Option<u16>,
    pub min_heading_size: Option<TypeSize>,
    /// Probability (by seeded roll) of italic heading and subheading.
    pub italic_chance: f64,
    pub uppercase_heading: bool,
    pub uppercase_accent: bool,
}

const NEUTRAL: TypographyRule = TypographyRule {
    min_heading_weight: None,
    max_heading_weight: None,
    max_body_weight: None,
    min_heading_size: None,
    italic_chance: 0.0,
    uppercase_heading: false,
    uppercase_accent: false,
};

const RULES: &[(&str, TypographyRule)] = &[
    (
        "brutalist",
        TypographyRule {
            min_heading_weight: Some(700),
            min_heading_size: Some(TypeSize::Xl),
            uppercase_heading: true,
            ..NEUTRAL
        },
    ),
    (
        "luxury",
        TypographyRule {
            italic_chance: 0.5,
            max_heading_weight: Some(700),
            ..NEUTRAL
        },
    ),
    (
        "minimal",
        TypographyRule {
            max_heading_weight: Some(600),
            max_body_weight: Some(500),
            ..NEUTRAL
        },
    ),
    (
        "playful",
        TypographyRule {
            min_heading_weight: Some(600),
            uppercase_accent: true,
            ..NEUTRAL
        },
    ),
    (
        "retro",
        TypographyRule {
            uppercase_heading: true,
            italic_chance: 0.2,
            ..NEUTRAL
        },
    ),
    (
        "cyberpunk",
        TypographyRule {
            min_heading_weight: Some(600),
            min_heading_size: Some(TypeSize::Xl),
            uppercase_heading: true,
            uppercase_accent: true,
            ..NEUTRAL
        },
    ),
];

/// Looks up the stylistic rule for a vibe id; unknown ids get no overrides.
pub fn typography_rule(vibe_id: &str) -> TypographyRule {
    RULES
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(vibe_id))
        .map_or(NEUTRAL, |(_, rule)| *rule)
}

/// Weight limits in force for one optimization run.
#[derive(Debug, Clone, Copy)]
struct WeightBounds {
    heading_min: u16,
    heading_max: u16,
    body_max: u16,
}

impl WeightBounds {
    fn from_rule(rule: &TypographyRule) -> Self {
        // The heading ceiling must leave room for the body floor plus the gap.
        let heading_max = rule
            .max_heading_weight
            .unwrap_or(WEIGHT_MAX)
            .clamp(BODY_WEIGHT_FLOOR + MIN_WEIGHT_GAP, WEIGHT_MAX);
        Self {
            heading_min: rule.min_heading_weight.unwrap_or(WEIGHT_MIN).min(heading_max),
            heading_max,
            body_max: rule.max_body_weight.unwrap_or(WEIGHT_MAX),
        }
    }
}

/// Draws a starting token set for a vibe.
///
/// The result is not yet hierarchy-checked; pass it through
/// [`optimize_typography`].
pub fn seed_typography(vibe: &VibePreset, seed: f64) -> TypographyTokens {
    const HEADING_SIZES: [TypeSize; 3] = [TypeSize::Lg, TypeSize::Xl, TypeSize::Xxl];
    const BODY_SIZES: [TypeSize; 2] = [TypeSize::Sm, TypeSize::Md];
    const HEADING_WEIGHTS: [u16; 4] = [500, 600, 700, 800];
    const BODY_WEIGHTS: [u16; 3] = [300, 400, 500];
    const ACCENT_WEIGHTS: [u16; 3] = [400, 500, 600];

    let heading_size = *pick(&HEADING_SIZES, seed * 1.21).unwrap_or(&TypeSize::Xl);
    let heading = TextStyle::new(
        heading_size,
        *pick(&HEADING_WEIGHTS, seed * 1.43).unwrap_or(&700),
    );
    let body = TextStyle::new(
        *pick(&BODY_SIZES, seed * 1.67).unwrap_or(&TypeSize::Md),
        *pick(&BODY_WEIGHTS, seed * 1.89).unwrap_or(&400),
    );
    let accent_transform = if vibe.is_dark_ui {
        TextTransform::Uppercase
    } else {
        TextTransform::None
    };

    TypographyTokens {
        heading,
        subheading: TextStyle::new(heading_size.step_down(1), heading.weight),
        body,
        accent: TextStyle {
            transform: accent_transform,
            ..TextStyle::new(TypeSize::Sm, *pick(&ACCENT_WEIGHTS, seed * 2.11).unwrap_or(&500))
        },
    }
}

/// Optimizes typographic tokens for a vibe and palette.
///
/// `seed` is the style-variation seed; every random choice (italic roll,
/// trend-bias roll, weight jitter) derives from it, so the output is fully
/// replayable.
pub fn optimize_typography(
    current: &TypographyTokens,
    vibe: &VibePreset,
    colors: &ColorSet,
    trend_hints: Option<&TrendHints>,
    seed: f64,
) -> TypographyTokens {
    let rule = typography_rule(&vibe.id);
    let bounds = WeightBounds::from_rule(&rule);
    let mut t = *current;
    for style in [&mut t.heading, &mut t.subheading, &mut t.body, &mut t.accent] {
        style.weight = style.weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    }

    // Steps 1-5: structural hierarchy.
    settle(&mut t, bounds);

    // Step 6: low palette contrast gets a stronger body.
    let text_l = colors.text.to_hsl().l;
    let bg_l = colors.background.to_hsl().l;
    if (text_l - bg_l).abs() < LOW_CONTRAST_LIGHTNESS_GAP {
        if t.body.size < TypeSize::Md {
            t.body.size = TypeSize::Md;
        }
        if t.body.weight < LOW_CONTRAST_BODY_WEIGHT_CAP {
            t.body.weight = (t.body.weight + 100)
                .min(LOW_CONTRAST_BODY_WEIGHT_CAP)
                .min(bounds.body_max);
        }
        debug!(typography.body = ?t.body, "Compensated low palette contrast");
        settle(&mut t, bounds);
    }

    // Step 7: vibe rules.
    apply_rule(&mut t, &rule, seed);
    settle(&mut t, bounds);

    // Step 8: trend bias.
    if let Some(pair) = trend_hints.and_then(|h| h.recommended_weights) {
        if roll(TREND_BIAS_PROBABILITY, seed * 5.3) {
            debug!(trend.heading = pair.heading, trend.body = pair.body, "Applied trend weights");
            t.heading.weight = pair.heading.clamp(WEIGHT_MIN, WEIGHT_MAX);
            t.body.weight = pair.body.clamp(WEIGHT_MIN, WEIGHT_MAX);
            settle(&mut t, bounds);
        }
    }

    // Step 9: weight stands in where color is weak.
    let avg_sat = f64::midpoint(colors.primary.to_hsl().s, colors.secondary.to_hsl().s);
    if avg_sat < LOW_SATURATION {
        t.heading.weight = (t.heading.weight + 100).min(bounds.heading_max);
        settle(&mut t, bounds);
    }

    // Step 10: jitter, then restore the weight hierarchy.
    for (style, salt) in [
        (&mut t.heading, 6.1),
        (&mut t.subheading, 6.7),
        (&mut t.body, 7.3),
        (&mut t.accent, 7.9),
    ] {
        style.weight = jitter_weight(style.weight, seed * salt);
    }
    restore_weights(&mut t, bounds);

    debug!(
        vibe.id = %vibe.id,
        typography.heading = ?t.heading,
        typography.body = ?t.body,
        "Optimized typography"
    );
    t
}

/// Applies steps 1-5 of the pipeline.
fn settle(t: &mut TypographyTokens, bounds: WeightBounds) {
    repair_sizes(t);
    t.subheading.size = t.heading.size.step_down(1);
    repair_weights(t, bounds);
    t.subheading.weight = midpoint_weight(t.body.weight, t.heading.weight).min(t.heading.weight - 100);
    t.accent.weight = t
        .accent
        .weight
        .min(t.heading.weight.min(ACCENT_WEIGHT_CEILING));
}

fn repair_sizes(t: &mut TypographyTokens) {
    let heading = t.heading.size.index();
    let body = t.body.size.index();
    if heading >= body + MIN_SIZE_GAP {
        return;
    }
    let wanted = body + MIN_SIZE_GAP;
    if wanted < TypeSize::ALL.len() {
        t.heading.size = TypeSize::from_index(wanted);
    } else {
        t.heading.size = TypeSize::Xxl;
        t.body.size = TypeSize::Xxl.step_down(MIN_SIZE_GAP);
    }
}

fn repair_weights(t: &mut TypographyTokens, bounds: WeightBounds) {
    t.heading.weight = t.heading.weight.clamp(bounds.heading_min, bounds.heading_max);
    t.body.weight = t.body.weight.min(bounds.body_max);
    if t.heading.weight.saturating_sub(t.body.weight) >= MIN_WEIGHT_GAP {
        return;
    }
    let wanted = t.body.weight + MIN_WEIGHT_GAP;
    if wanted <= bounds.heading_max {
        t.heading.weight = wanted;
    } else {
        t.heading.weight = bounds.heading_max;
        t.body.weight = (bounds.heading_max - MIN_WEIGHT_GAP).max(BODY_WEIGHT_FLOOR);
    }
}

fn apply_rule(t: &mut TypographyTokens, rule: &TypographyRule, seed: f64) {
    if let Some(min) = rule.min_heading_weight {
        t.heading.weight = t.heading.weight.max(min);
    }
    if let Some(max) = rule.max_heading_weight {
        t.heading.weight = t.heading.weight.min(max);
    }
    if let Some(max) = rule.max_body_weight {
        t.body.weight = t.body.weight.min(max);
    }
    if let Some(min) = rule.min_heading_size {
        t.heading.size = t.heading.size.max(min);
    }
    if rule.italic_chance > 0.0 && roll(rule.italic_chance, seed * 3.7) {
        t.heading.style = FontStyle::Italic;
        t.subheading.style = FontStyle::Italic;
    }
    if rule.uppercase_heading {
        t.heading.transform = TextTransform::Uppercase;
    }
    if rule.uppercase_accent {
        t.accent.transform = TextTransform::Uppercase;
    }
}

/// Final pass after jitter: only clamps, never re-derives.
fn restore_weights(t: &mut TypographyTokens, bounds: WeightBounds) {
    t.heading.weight = t.heading.weight.clamp(bounds.heading_min, bounds.heading_max);
    t.body.weight = t.body.weight.min(bounds.body_max);
    if t.heading.weight.saturating_sub(t.body.weight) < MIN_WEIGHT_GAP {
        let wanted = t.body.weight + MIN_WEIGHT_GAP;
        if wanted <= bounds.heading_max {
            t.heading.weight = wanted;
        } else {
            t.heading.weight = bounds.heading_max;
            t.body.weight = bounds.heading_max - MIN_WEIGHT_GAP;
        }
    }
    t.subheading.weight = t.subheading.weight.min(t.heading.weight - 100);
    t.accent.weight = t.accent.weight.min(t.heading.weight);
}

fn midpoint_weight(a: u16, b: u16) -> u16 {
    u16::midpoint(a, b)
}

/// Applies ±10% jitter, rounded to a multiple of 10.
fn jitter_weight(weight: u16, seed: f64) -> u16 {
    let jittered = f64::from(weight) * (1.0 + jitter(WEIGHT_JITTER, seed));
    let rounded = (jittered / 10.0).round() * 10.0;
    (rounded as u16).clamp(WEIGHT_MIN, WEIGHT_MAX)
}
