#![forbid(unsafe_code)]
// Allow these clippy lints for color math and token tables
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::suboptimal_flops)]

//! # Vibeforge
//!
//! A generative design-token engine. Given a vibe preset and a numeric seed
//! it deterministically derives:
//!
//! - **Palettes**: five base colors per vibe, or a harmony around one hue
//! - **Contrast reports**: WCAG AA/AAA checks for every semantic pair, with
//!   best-effort lightness repair
//! - **Typography**: heading/subheading/body/accent tokens that always keep
//!   their size and weight hierarchy
//! - **Shapes**: radius, shadow, and border tokens per component class
//!
//! Every generator is a pure function of its inputs. The same seed always
//! produces the same tokens, so a saved design only needs its seed.
//!
//! ## Quick start
//!
//! ```rust
//! use vibeforge::{ColorLocks, ContrastTarget, VibeCatalog};
//! use vibeforge::{check_palette_contrast, derive_full_palette, fix_contrast_to_target,
//!     generate_base_palette};
//!
//! let catalog = VibeCatalog::builtin();
//! let vibe = catalog.get("brutalist").unwrap();
//!
//! let colors = generate_base_palette(vibe, 0.4217, None, &ColorLocks::NONE);
//! let colors = fix_contrast_to_target(&colors, ContrastTarget::Aa);
//!
//! let report = check_palette_contrast(&derive_full_palette(&colors));
//! assert!(report[0].aa_compliant);
//! ```
//!
//! ## Whole designs
//!
//! ```rust
//! use vibeforge::{Capabilities, DesignRequest, VibeCatalog, generate_design};
//!
//! let vibe = VibeCatalog::builtin().get("luxury").unwrap().clone();
//! let design = generate_design(&DesignRequest::new(vibe, 0.1), &Capabilities::BASIC);
//! assert!(design.typography.hierarchy_holds());
//! ```

pub mod builtin;
pub mod color;
pub mod contrast;
pub mod design;
pub mod error;
pub mod harmony;
pub mod palette;
pub mod seed;
pub mod shape;
pub mod typography;
pub mod vibe;

pub use color::{Hex, Hsl, contrast_ratio, hex_to_hsl, hsl_to_hex, relative_luminance};
pub use contrast::{
    ContrastCheck, ContrastTarget, RepairTuning, Severity, ViolationCount, check_palette_contrast,
    count_violations, fix_contrast_to_target, fix_contrast_with, fix_palette_contrast,
};
pub use design::{
    Capabilities, DesignRequest, DesignTokens, PaletteMode, generate_design,
    generate_harmony_palette,
};
pub use error::{CatalogLoadError, ColorParseError, PresetValidationError, TokenExportError};
pub use harmony::{HarmonyColors, HarmonyOptions, HarmonyType, generate_harmony};
pub use palette::{
    ColorKey, ColorLocks, ColorSet, FullPalette, derive_full_palette, generate_base_palette,
};
pub use seed::{random_in_range, seeded_unit};
pub use shape::{ComponentShapes, ShapeToken, pick_component_shapes};
pub use typography::{
    FontStyle, TextStyle, TextTransform, TrendHints, TypeSize, TypographyTokens, WeightPair,
    optimize_typography, seed_typography,
};
pub use vibe::{VibeCatalog, VibePreset};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::{Hex, contrast_ratio};
    pub use crate::contrast::{ContrastTarget, check_palette_contrast, fix_contrast_to_target};
    pub use crate::design::{Capabilities, DesignRequest, generate_design};
    pub use crate::palette::{ColorLocks, ColorSet, derive_full_palette, generate_base_palette};
    pub use crate::typography::optimize_typography;
    pub use crate::vibe::{VibeCatalog, VibePreset};
}
