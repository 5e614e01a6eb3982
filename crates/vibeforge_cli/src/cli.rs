//! Command-line interface for `vibeforge`.
//!
//! Defines the CLI contract using clap derive macros.
//!
//! # Examples
//!
//! ```bash
//! # List the available vibes
//! vibeforge vibes
//!
//! # Generate a brutalist palette, repaired to AA
//! vibeforge palette --vibe brutalist --seed 0.42 --fix aa
//!
//! # Everything at once, as TOML
//! vibeforge design --vibe luxury --seed 0.1 --format toml
//!
//! # Fail CI when a stored palette has AA violations
//! vibeforge contrast --palette palette.json --strict
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use vibeforge::{ColorKey, ContrastTarget, HarmonyType};

/// Vibeforge - seeded design tokens from a vibe.
///
/// Generates palettes, WCAG contrast reports, typography, and component
/// shapes. The same vibe and seed always produce the same output.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vibeforge",
    author,
    version,
    about = "Seeded design tokens: palettes, contrast repair, typography, shapes",
    long_about = "Generates design tokens from a vibe preset and a numeric seed. \
                  Output is deterministic, so a saved seed replays the same design."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "VIBEFORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to a vibe catalog (JSON or TOML) replacing the builtin vibes
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Unlock every capability (harmony palettes, AAA repair, trend bias)
    #[arg(long, global = true)]
    pub unlock_all: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the vibes in the catalog
    Vibes,

    /// Generate a base palette for a vibe
    Palette(PaletteArgs),

    /// Generate a harmony palette
    Harmony(HarmonyArgs),

    /// Report (and optionally repair) palette contrast
    Contrast(ContrastArgs),

    /// Optimize typography tokens for a vibe
    Typography(TypographyArgs),

    /// Pick component shapes for a vibe
    Shapes(GenerateArgs),

    /// Generate a complete design
    Design(DesignArgs),
}

/// Vibe and seed selection shared by every generator.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Vibe id from the catalog
    #[arg(long, env = "VIBEFORGE_VIBE")]
    pub vibe: Option<String>,

    /// Generation seed (any finite number)
    #[arg(long, short = 's', env = "VIBEFORGE_SEED", allow_negative_numbers = true)]
    pub seed: Option<f64>,
}

/// Arguments for `palette`.
#[derive(Args, Debug, Clone)]
pub struct PaletteArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Repair text contrast toward a target
    #[arg(long)]
    pub fix: Option<ContrastTarget>,

    /// Emit the full derived palette instead of the five base colors
    #[arg(long)]
    pub full: bool,

    /// Previous palette (JSON or TOML) to take locked colors from
    #[arg(long, requires = "lock")]
    pub previous: Option<PathBuf>,

    /// Colors to keep from the previous palette
    #[arg(long, value_delimiter = ',', value_parser = parse_color_key, requires = "previous")]
    pub lock: Vec<ColorKey>,
}

/// Arguments for `harmony`.
#[derive(Args, Debug, Clone)]
pub struct HarmonyArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Harmony scheme
    #[arg(long, short = 't', default_value = "analogous")]
    pub harmony: HarmonyType,

    /// Base hue in degrees; drawn from the vibe when omitted
    #[arg(long, allow_negative_numbers = true, requires = "saturation")]
    pub hue: Option<f64>,

    /// Base saturation in percent
    #[arg(long, requires = "lightness")]
    pub saturation: Option<f64>,

    /// Base lightness in percent
    #[arg(long, requires = "hue")]
    pub lightness: Option<f64>,
}

/// Arguments for `contrast`.
#[derive(Args, Debug, Clone)]
pub struct ContrastArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Palette file (JSON or TOML) to check instead of a generated one
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Repair every text role toward a target before reporting
    #[arg(long)]
    pub fix: Option<ContrastTarget>,

    /// Exit with status 2 if any AA violation remains
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `typography`.
#[derive(Args, Debug, Clone)]
pub struct TypographyArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Seed for typographic variation (defaults to the generation seed)
    #[arg(long, allow_negative_numbers = true)]
    pub style_seed: Option<f64>,

    /// Current tokens (JSON or TOML) to optimize instead of seeded ones
    #[arg(long)]
    pub tokens: Option<PathBuf>,

    /// Trend-recommended heading weight
    #[arg(long, requires = "trend_body")]
    pub trend_heading: Option<u16>,

    /// Trend-recommended body weight
    #[arg(long, requires = "trend_heading")]
    pub trend_body: Option<u16>,
}

/// Arguments for `design`.
#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Use a harmony palette instead of the base palette
    #[arg(long)]
    pub harmony: Option<HarmonyType>,

    /// Repair contrast toward a target
    #[arg(long)]
    pub fix: Option<ContrastTarget>,

    /// Seed for typographic variation (defaults to the generation seed)
    #[arg(long, allow_negative_numbers = true)]
    pub style_seed: Option<f64>,

    /// Previous palette (JSON or TOML) to take locked colors from
    #[arg(long, requires = "lock")]
    pub previous: Option<PathBuf>,

    /// Colors to keep from the previous palette
    #[arg(long, value_delimiter = ',', value_parser = parse_color_key, requires = "previous")]
    pub lock: Vec<ColorKey>,

    /// Trend-recommended heading weight
    #[arg(long, requires = "trend_body")]
    pub trend_heading: Option<u16>,

    /// Trend-recommended body weight
    #[arg(long, requires = "trend_heading")]
    pub trend_body: Option<u16>,
}

/// Output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// TOML
    Toml,
}

fn parse_color_key(s: &str) -> Result<ColorKey, String> {
    ColorKey::from_name(s).ok_or_else(|| {
        let names: Vec<_> = ColorKey::ALL.iter().map(|k| k.name()).collect();
        format!("unknown color '{s}' (expected one of: {})", names.join(", "))
    })
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    #[cfg(test)]
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// The generation arguments of the chosen subcommand, if any.
    pub const fn generate_args(&self) -> Option<&GenerateArgs> {
        match &self.command {
            Command::Vibes => None,
            Command::Palette(args) => Some(&args.generate),
            Command::Harmony(args) => Some(&args.generate),
            Command::Contrast(args) => Some(&args.generate),
            Command::Typography(args) => Some(&args.generate),
            Command::Shapes(args) => Some(args),
            Command::Design(args) => Some(&args.generate),
        }
    }
}
