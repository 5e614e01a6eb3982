//! One-call design generation.
//!
//! [`generate_design`] composes every generator: base or harmony palette,
//! full palette derivation, optional contrast repair, the contrast report,
//! typography, and component shapes. What the caller may use is decided by
//! an explicit [`Capabilities`] value rather than any process-wide tier
//! switch; requests beyond it degrade to the nearest allowed behavior.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::contrast_ratio;
use crate::contrast::{
    ContrastCheck, ContrastTarget, RepairTuning, ViolationCount, check_palette_contrast,
    count_violations, fix_palette_contrast,
};
use crate::error::TokenExportError;
use crate::harmony::{HarmonyOptions, HarmonyType, generate_harmony};
use crate::palette::{
    ColorLocks, ColorSet, FullPalette, background_for, derive_full_palette, generate_base_palette,
    pick_text_color,
};
use crate::seed::random_in_range;
use crate::shape::{ComponentShapes, pick_component_shapes};
use crate::typography::{TrendHints, TypographyTokens, optimize_typography, seed_typography};
use crate::vibe::VibePreset;

/// Features the caller has unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Capabilities {
    /// Harmony palettes (otherwise only the base per-vibe flow).
    pub harmony_palettes: bool,
    /// Repair toward AAA (otherwise AA is the strongest target).
    pub aaa_repair: bool,
    /// Let trend hints bias typography.
    pub trend_bias: bool,
}

impl Capabilities {
    /// Only the base flow.
    pub const BASIC: Capabilities = Capabilities {
        harmony_palettes: false,
        aaa_repair: false,
        trend_bias: false,
    };

    /// Everything unlocked.
    pub const ALL: Capabilities = Capabilities {
        harmony_palettes: true,
        aaa_repair: true,
        trend_bias: true,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::BASIC
    }
}

/// How the palette is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode", content = "harmony")]
pub enum PaletteMode {
    /// Per-vibe base generation with locks.
    #[default]
    Base,
    /// Harmony generation around a drawn base hue.
    Harmony(HarmonyType),
}

/// Everything needed to replay a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub vibe: VibePreset,
    pub seed: f64,
    /// Seed for typographic variation; defaults to `seed`.
    #[serde(default)]
    pub style_seed: Option<f64>,
    #[serde(default)]
    pub mode: PaletteMode,
    #[serde(default)]
    pub locks: ColorLocks,
    #[serde(default)]
    pub previous: Option<ColorSet>,
    #[serde(default)]
    pub contrast_target: Option<ContrastTarget>,
    #[serde(default)]
    pub typography: Option<TypographyTokens>,
    #[serde(default)]
    pub trend_hints: Option<TrendHints>,
    #[serde(default)]
    pub repair: RepairTuning,
    #[serde(default)]
    pub harmony: HarmonyOptions,
}

impl DesignRequest {
    /// A request with defaults for everything but the vibe and seed.
    pub fn new(vibe: VibePreset, seed: f64) -> Self {
        Self {
            vibe,
            seed,
            style_seed: None,
            mode: PaletteMode::Base,
            locks: ColorLocks::NONE,
            previous: None,
            contrast_target: None,
            typography: None,
            trend_hints: None,
            repair: RepairTuning::default(),
            harmony: HarmonyOptions::default(),
        }
    }

    /// Sets the palette mode.
    pub fn with_mode(mut self, mode: PaletteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the previous palette and locks.
    pub fn with_locks(mut self, previous: ColorSet, locks: ColorLocks) -> Self {
        self.previous = Some(previous);
        self.locks = locks;
        self
    }

    /// Requests contrast repair.
    pub fn with_contrast_target(mut self, target: ContrastTarget) -> Self {
        self.contrast_target = Some(target);
        self
    }

    /// Sets the typographic style seed.
    pub fn with_style_seed(mut self, seed: f64) -> Self {
        self.style_seed = Some(seed);
        self
    }

    /// Supplies starting typography.
    pub fn with_typography(mut self, tokens: TypographyTokens) -> Self {
        self.typography = Some(tokens);
        self
    }

    /// Supplies trend hints.
    pub fn with_trend_hints(mut self, hints: TrendHints) -> Self {
        self.trend_hints = Some(hints);
        self
    }
}

/// The complete token output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub vibe: String,
    pub seed: f64,
    pub palette: FullPalette,
    pub contrast: Vec<ContrastCheck>,
    pub violations: ViolationCount,
    pub typography: TypographyTokens,
    pub shapes: ComponentShapes,
}

impl DesignTokens {
    /// Serializes to pretty JSON.
    ///
    /// # Errors
    /// Returns [`TokenExportError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TokenExportError> {
        serde_json::to_string_pretty(self).map_err(TokenExportError::Json)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    /// Returns [`TokenExportError`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, TokenExportError> {
        toml::to_string_pretty(self).map_err(TokenExportError::Toml)
    }
}

/// Generates a harmony-mode base palette for a vibe.
///
/// The base hue/saturation/lightness are drawn exactly as the base flow
/// draws its primary; background and text follow the base flow too. Locks
/// apply the same way.
pub fn generate_harmony_palette(
    vibe: &VibePreset,
    harmony: HarmonyType,
    seed: f64,
    prev: Option<&ColorSet>,
    locks: &ColorLocks,
    options: &HarmonyOptions,
) -> ColorSet {
    let (hue_min, hue_max) = vibe.hue_range();
    let hue = random_in_range(hue_min, hue_max, seed * 0.9);
    let saturation = random_in_range(vibe.primary_sat_range.0, vibe.primary_sat_range.1, seed * 1.1);
    let lightness = random_in_range(
        vibe.primary_light_range.0,
        vibe.primary_light_range.1,
        seed * 1.3,
    );
    let colors = generate_harmony(hue, saturation, lightness, harmony, seed, options);
    let background = background_for(vibe);

    let mut set = ColorSet {
        primary: colors.primary,
        secondary: colors.secondary,
        accent: colors.accent,
        background,
        text: pick_text_color(background),
    };
    if let Some(prev) = prev {
        locks.apply(&mut set, prev);
    }
    set
}

/// Generates a complete design from one request.
pub fn generate_design(request: &DesignRequest, caps: &Capabilities) -> DesignTokens {
    let vibe = &request.vibe;
    let prev = request.previous.as_ref();

    let base = match request.mode {
        PaletteMode::Harmony(harmony) if caps.harmony_palettes => generate_harmony_palette(
            vibe,
            harmony,
            request.seed,
            prev,
            &request.locks,
            &request.harmony,
        ),
        PaletteMode::Harmony(harmony) => {
            warn!(harmony = %harmony, "Harmony palettes not enabled; using base palette");
            generate_base_palette(vibe, request.seed, prev, &request.locks)
        }
        PaletteMode::Base => generate_base_palette(vibe, request.seed, prev, &request.locks),
    };

    let mut palette = derive_full_palette(&base);
    if let Some(target) = request.contrast_target {
        let target = if target == ContrastTarget::Aaa && !caps.aaa_repair {
            warn!("AAA repair not enabled; repairing to AA");
            ContrastTarget::Aa
        } else {
            target
        };
        palette = fix_palette_contrast(&palette, target, &request.repair);
    }

    let contrast = check_palette_contrast(&palette);
    let violations = count_violations(&contrast);

    let style_seed = request.style_seed.unwrap_or(request.seed);
    let current = request
        .typography
        .unwrap_or_else(|| seed_typography(vibe, style_seed));
    let hints = if caps.trend_bias {
        request.trend_hints.as_ref()
    } else {
        if request.trend_hints.is_some() {
            warn!("Trend bias not enabled; ignoring trend hints");
        }
        None
    };
    let typography = optimize_typography(&current, vibe, &palette.base(), hints, style_seed);
    let shapes = pick_component_shapes(vibe, request.seed);

    debug!(
        vibe.id = %vibe.id,
        design.seed = request.seed,
        design.body_contrast = contrast_ratio(palette.text, palette.background),
        design.aa_violations = violations.aa,
        "Generated design"
    );

    DesignTokens {
        vibe: vibe.id.clone(),
        seed: request.seed,
        palette,
        contrast,
        violations,
        typography,
        shapes,
    }
}
