#![forbid(unsafe_code)]

//! # Vibeforge CLI
//!
//! Command-line front end for the `vibeforge` design-token engine.
//!
//! ## Usage
//!
//! ```bash
//! vibeforge vibes                                  # List vibes
//! vibeforge palette --vibe retro --seed 0.3        # Base palette
//! vibeforge harmony --harmony triadic --vibe retro # Harmony palette
//! vibeforge contrast --palette colors.json --fix aa --strict
//! vibeforge design --vibe luxury --format json     # Everything
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the `-v` level.

mod cli;
mod config;
mod render;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vibeforge::{
    Capabilities, ColorKey, ColorLocks, ColorSet, ContrastTarget, DesignRequest, PaletteMode,
    TrendHints, TypographyTokens, VibeCatalog, VibePreset, WeightPair, check_palette_contrast,
    count_violations, derive_full_palette, fix_contrast_with, fix_palette_contrast,
    generate_base_palette, generate_design, generate_harmony, generate_harmony_palette,
    optimize_typography, pick_component_shapes, seed_typography,
};

use cli::{
    Cli, Command, ContrastArgs, DesignArgs, HarmonyArgs, OutputFormat, PaletteArgs, TypographyArgs,
};
use config::Config;
use render::ContrastReport;

/// Exit status when `contrast --strict` finds AA violations.
const STRICT_FAILURE: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = Config::from_cli(&cli)?;
    debug!(?config, "Resolved configuration");

    let catalog = load_catalog(&config)?;
    let (output, status) = run(&cli.command, &catalog, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").context("Failed to write output")?;
    }
    Ok(status)
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::log_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(config: &Config) -> Result<VibeCatalog> {
    match &config.catalog {
        Some(path) => {
            let catalog = VibeCatalog::from_file(path)
                .with_context(|| format!("Failed to load vibe catalog {}", path.display()))?;
            info!(
                catalog.path = %path.display(),
                catalog.len = catalog.len(),
                "Loaded vibe catalog"
            );
            Ok(catalog)
        }
        None => Ok(VibeCatalog::builtin()),
    }
}

/// Reads a JSON or TOML data file, chosen by extension.
fn load_data<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in {what} {}", path.display())),
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Invalid TOML in {what} {}", path.display())),
        _ => bail!(
            "Unsupported {what} format: {} (expected .json or .toml)",
            path.display()
        ),
    }
}

fn find_vibe<'a>(catalog: &'a VibeCatalog, config: &Config) -> Result<&'a VibePreset> {
    catalog.get(&config.vibe).with_context(|| {
        format!(
            "Unknown vibe '{}' (available: {})",
            config.vibe,
            catalog.ids().collect::<Vec<_>>().join(", ")
        )
    })
}

fn locks_from(keys: &[ColorKey]) -> ColorLocks {
    keys.iter().fold(ColorLocks::NONE, |locks, key| locks.lock(*key))
}

fn load_previous(path: Option<&Path>) -> Result<Option<ColorSet>> {
    path.map(|p| load_data(p, "previous palette")).transpose()
}

fn trend_hints(heading: Option<u16>, body: Option<u16>) -> Option<TrendHints> {
    heading.zip(body).map(|(heading, body)| TrendHints {
        recommended_weights: Some(WeightPair { heading, body }),
    })
}

/// Downgrades AAA to AA when AAA repair is not unlocked.
fn allowed_target(target: ContrastTarget, caps: &Capabilities) -> ContrastTarget {
    if target == ContrastTarget::Aaa && !caps.aaa_repair {
        warn!("AAA repair not enabled; repairing to AA");
        ContrastTarget::Aa
    } else {
        target
    }
}

fn run(command: &Command, catalog: &VibeCatalog, config: &Config) -> Result<(String, ExitCode)> {
    let output = match command {
        Command::Vibes => render::emit(catalog, config.format, render::vibes)?,
        Command::Palette(args) => palette(args, catalog, config)?,
        Command::Harmony(args) => harmony(args, catalog, config)?,
        Command::Contrast(args) => return contrast(args, catalog, config),
        Command::Typography(args) => typography(args, catalog, config)?,
        Command::Shapes(_) => {
            let vibe = find_vibe(catalog, config)?;
            let shapes = pick_component_shapes(vibe, config.seed);
            render::emit(&shapes, config.format, render::shapes)?
        }
        Command::Design(args) => design(args, catalog, config)?,
    };
    Ok((output, ExitCode::SUCCESS))
}

fn palette(args: &PaletteArgs, catalog: &VibeCatalog, config: &Config) -> Result<String> {
    let vibe = find_vibe(catalog, config)?;
    let previous = load_previous(args.previous.as_deref())?;
    let mut colors = generate_base_palette(
        vibe,
        config.seed,
        previous.as_ref(),
        &locks_from(&args.lock),
    );
    if let Some(target) = args.fix {
        let target = allowed_target(target, &config.capabilities);
        colors = fix_contrast_with(&colors, target, &config.repair);
    }

    if args.full {
        render::emit(&derive_full_palette(&colors), config.format, render::full_palette)
    } else {
        render::emit(&colors, config.format, render::color_set)
    }
}

fn harmony(args: &HarmonyArgs, catalog: &VibeCatalog, config: &Config) -> Result<String> {
    if let (Some(hue), Some(saturation), Some(lightness)) =
        (args.hue, args.saturation, args.lightness)
    {
        let colors = generate_harmony(
            hue,
            saturation,
            lightness,
            args.harmony,
            config.seed,
            &config.harmony,
        );
        return render::emit(&colors, config.format, render::harmony);
    }

    let vibe = find_vibe(catalog, config)?;
    let colors = generate_harmony_palette(
        vibe,
        args.harmony,
        config.seed,
        None,
        &ColorLocks::NONE,
        &config.harmony,
    );
    render::emit(&colors, config.format, render::color_set)
}

fn contrast(
    args: &ContrastArgs,
    catalog: &VibeCatalog,
    config: &Config,
) -> Result<(String, ExitCode)> {
    let colors: ColorSet = match &args.palette {
        Some(path) => load_data(path, "palette")?,
        None => {
            let vibe = find_vibe(catalog, config)?;
            generate_base_palette(vibe, config.seed, None, &ColorLocks::NONE)
        }
    };
    let mut palette = derive_full_palette(&colors);
    if let Some(target) = args.fix {
        let target = allowed_target(target, &config.capabilities);
        palette = fix_palette_contrast(&palette, target, &config.repair);
    }

    let checks = check_palette_contrast(&palette);
    let violations = count_violations(&checks);
    let report = ContrastReport { checks, violations };
    let output = render::emit(&report, config.format, render::contrast)?;

    let status = if args.strict && violations.aa > 0 {
        warn!(contrast.aa_violations = violations.aa, "AA violations remain");
        ExitCode::from(STRICT_FAILURE)
    } else {
        ExitCode::SUCCESS
    };
    Ok((output, status))
}

fn typography(args: &TypographyArgs, catalog: &VibeCatalog, config: &Config) -> Result<String> {
    let vibe = find_vibe(catalog, config)?;
    let style_seed = args.style_seed.unwrap_or(config.seed);
    let current: TypographyTokens = match &args.tokens {
        Some(path) => load_data(path, "typography tokens")?,
        None => seed_typography(vibe, style_seed),
    };
    let colors = generate_base_palette(vibe, config.seed, None, &ColorLocks::NONE);

    let hints = trend_hints(args.trend_heading, args.trend_body);
    let hints = match hints {
        Some(_) if !config.capabilities.trend_bias => {
            warn!("Trend bias not enabled; ignoring trend hints");
            None
        }
        hints => hints,
    };

    let tokens = optimize_typography(&current, vibe, &colors, hints.as_ref(), style_seed);
    render::emit(&tokens, config.format, render::typography)
}

fn design(args: &DesignArgs, catalog: &VibeCatalog, config: &Config) -> Result<String> {
    let vibe = find_vibe(catalog, config)?;
    let mut request = DesignRequest::new(vibe.clone(), config.seed);
    request.mode = args.harmony.map_or(PaletteMode::Base, PaletteMode::Harmony);
    request.contrast_target = args.fix;
    request.style_seed = args.style_seed;
    request.previous = load_previous(args.previous.as_deref())?;
    request.locks = locks_from(&args.lock);
    request.trend_hints = trend_hints(args.trend_heading, args.trend_body);
    request.repair = config.repair;
    request.harmony = config.harmony;

    let tokens = generate_design(&request, &config.capabilities);
    info!(
        vibe.id = %tokens.vibe,
        design.aa_violations = tokens.violations.aa,
        "Generated design"
    );

    let output = match config.format {
        OutputFormat::Text => render::design(&tokens),
        OutputFormat::Json => tokens.to_json()?,
        OutputFormat::Toml => tokens.to_toml()?,
    };
    Ok(output)
}
