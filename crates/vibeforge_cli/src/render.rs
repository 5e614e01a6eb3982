//! Output rendering for every subcommand.
//!
//! Structured formats serialize the library types directly. The text format
//! is a compact aligned listing meant for terminals.

use std::fmt::Write as _;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use vibeforge::{
    ColorKey, ColorSet, ComponentShapes, ContrastCheck, DesignTokens, FullPalette, HarmonyColors,
    TextStyle, TypographyTokens, VibeCatalog, ViolationCount, contrast_ratio,
};

use crate::cli::OutputFormat;

/// A contrast report as emitted by `contrast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    pub checks: Vec<ContrastCheck>,
    pub violations: ViolationCount,
}

/// Serializes `value` in a structured format, or renders it with `text`.
///
/// # Errors
///
/// Returns an error if JSON or TOML serialization fails.
pub fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Toml => {
            toml::to_string_pretty(value).context("Failed to serialize output as TOML")
        }
    }
}

pub fn vibes(catalog: &VibeCatalog) -> String {
    let mut out = String::new();
    for vibe in catalog {
        let (hue_min, hue_max) = vibe.hue_range();
        let _ = writeln!(
            out,
            "{:<12} {:<12} hue {:>4.0}..{:<4.0} {}",
            vibe.id,
            vibe.name,
            hue_min,
            hue_max,
            if vibe.is_dark_ui { "dark" } else { "light" }
        );
    }
    out
}

pub fn color_set(colors: &ColorSet) -> String {
    let mut out = String::new();
    for key in ColorKey::ALL {
        let _ = writeln!(out, "{:<14} {}", key.name(), colors.get(key));
    }
    let _ = writeln!(
        out,
        "{:<14} {:.2}:1",
        "contrast",
        contrast_ratio(colors.text, colors.background)
    );
    out
}

pub fn full_palette(palette: &FullPalette) -> String {
    let rows = [
        ("primary", palette.primary),
        ("secondary", palette.secondary),
        ("accent", palette.accent),
        ("background", palette.background),
        ("text", palette.text),
        ("onPrimary", palette.on_primary),
        ("onSecondary", palette.on_secondary),
        ("onAccent", palette.on_accent),
        ("surface", palette.surface),
        ("surfaceAlt", palette.surface_alt),
        ("textMuted", palette.text_muted),
        ("borderSubtle", palette.border_subtle),
        ("borderStrong", palette.border_strong),
    ];
    let mut out = String::new();
    for (name, color) in rows {
        let _ = writeln!(out, "{name:<14} {color}");
    }
    out
}

pub fn harmony(colors: &HarmonyColors) -> String {
    let mut out = String::new();
    for (name, color) in [
        ("primary", colors.primary),
        ("secondary", colors.secondary),
        ("accent", colors.accent),
    ] {
        let hsl = color.to_hsl();
        let _ = writeln!(
            out,
            "{name:<10} {color}  hsl({:.0}, {:.0}%, {:.0}%)",
            hsl.h, hsl.s, hsl.l
        );
    }
    out
}

pub fn contrast(report: &ContrastReport) -> String {
    let mut out = String::new();
    for check in &report.checks {
        let _ = writeln!(
            out,
            "{:<32} {} on {}  {:>5.2}:1  {}",
            check.label, check.foreground, check.background, check.ratio, check.severity
        );
    }
    let _ = writeln!(
        out,
        "AA violations: {}, AAA violations: {}",
        report.violations.aa, report.violations.aaa
    );
    out
}

fn style_row(out: &mut String, slot: &str, style: &TextStyle) {
    let _ = writeln!(
        out,
        "{slot:<11} {:<4} {:>5.3}rem  {:>3}  {:?} {:?}",
        style.size,
        style.size.rem(),
        style.weight,
        style.style,
        style.transform
    );
}

pub fn typography(tokens: &TypographyTokens) -> String {
    let mut out = String::new();
    style_row(&mut out, "heading", &tokens.heading);
    style_row(&mut out, "subheading", &tokens.subheading);
    style_row(&mut out, "body", &tokens.body);
    style_row(&mut out, "accent", &tokens.accent);
    out
}

pub fn shapes(shapes: &ComponentShapes) -> String {
    let mut out = String::new();
    for (class, token) in [
        ("buttonPrimary", &shapes.button_primary),
        ("buttonSecondary", &shapes.button_secondary),
        ("card", &shapes.card),
    ] {
        let _ = writeln!(
            out,
            "{class:<16} radius {:<7} border {:<10} shadow {}",
            token.radius, token.border, token.shadow
        );
    }
    out
}

pub fn design(tokens: &DesignTokens) -> String {
    let report = ContrastReport {
        checks: tokens.contrast.clone(),
        violations: tokens.violations,
    };
    format!(
        "vibe {} seed {}\n\n[palette]\n{}\n[contrast]\n{}\n[typography]\n{}\n[shapes]\n{}",
        tokens.vibe,
        tokens.seed,
        full_palette(&tokens.palette),
        contrast(&report),
        typography(&tokens.typography),
        shapes(&tokens.shapes),
    )
}
