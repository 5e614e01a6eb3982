//! Builtin vibe presets.

use crate::vibe::VibePreset;

struct PresetRow {
    id: &'static str,
    name: &'static str,
    hue: f64,
    hue_range: Option<(f64, f64)>,
    sat: (f64, f64),
    light: (f64, f64),
    bg: f64,
    dark: bool,
}

const PRESETS: &[PresetRow] = &[
    PresetRow {
        id: "minimal",
        name: "Minimal",
        hue: 220.0,
        hue_range: None,
        sat: (5.0, 25.0),
        light: (25.0, 45.0),
        bg: 98.0,
        dark: false,
    },
    PresetRow {
        id: "brutalist",
        name: "Brutalist",
        hue: 0.0,
        hue_range: Some((-10.0, 15.0)),
        sat: (80.0, 100.0),
        light: (45.0, 55.0),
        bg: 96.0,
        dark: false,
    },
    PresetRow {
        id: "luxury",
        name: "Luxury",
        hue: 45.0,
        hue_range: Some((35.0, 55.0)),
        sat: (45.0, 70.0),
        light: (40.0, 55.0),
        bg: 8.0,
        dark: true,
    },
    PresetRow {
        id: "playful",
        name: "Playful",
        hue: 310.0,
        hue_range: Some((280.0, 345.0)),
        sat: (70.0, 95.0),
        light: (55.0, 68.0),
        bg: 97.0,
        dark: false,
    },
    PresetRow {
        id: "corporate",
        name: "Corporate",
        hue: 215.0,
        hue_range: None,
        sat: (55.0, 80.0),
        light: (35.0, 50.0),
        bg: 98.0,
        dark: false,
    },
    PresetRow {
        id: "retro",
        name: "Retro",
        hue: 25.0,
        hue_range: None,
        sat: (55.0, 80.0),
        light: (45.0, 60.0),
        bg: 92.0,
        dark: false,
    },
    PresetRow {
        id: "cyberpunk",
        name: "Cyberpunk",
        hue: 290.0,
        hue_range: Some((260.0, 330.0)),
        sat: (85.0, 100.0),
        light: (50.0, 65.0),
        bg: 6.0,
        dark: true,
    },
    PresetRow {
        id: "organic",
        name: "Organic",
        hue: 110.0,
        hue_range: None,
        sat: (25.0, 50.0),
        light: (30.0, 45.0),
        bg: 95.0,
        dark: false,
    },
];

/// Returns the builtin presets in display order.
pub fn presets() -> Vec<VibePreset> {
    PRESETS
        .iter()
        .map(|p| VibePreset {
            id: p.id.to_string(),
            name: p.name.to_string(),
            primary_hue: p.hue,
            primary_hue_range: p.hue_range,
            primary_sat_range: p.sat,
            primary_light_range: p.light,
            bg_lightness: p.bg,
            is_dark_ui: p.dark,
        })
        .collect()
}

/// Returns one builtin preset by id.
pub fn preset(id: &str) -> Option<VibePreset> {
    presets().into_iter().find(|p| p.id.eq_ignore_ascii_case(id))
}
