//! Component shape tokens (radius, shadow, border).
//!
//! Each vibe has candidate lists per property; [`pick_component_shapes`]
//! draws from them with the seeded generator, one seed derivative per
//! element class and property.

use serde::{Deserialize, Serialize};

use crate::seed::pick;
use crate::vibe::VibePreset;

/// Radius/shadow/border for one element class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeToken {
    pub radius: String,
    pub shadow: String,
    pub border: String,
}

/// Shapes for every element class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentShapes {
    pub button_primary: ShapeToken,
    pub button_secondary: ShapeToken,
    pub card: ShapeToken,
}

/// Candidate values for one vibe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCandidates {
    pub radius: &'static [&'static str],
    pub shadow: &'static [&'static str],
    pub border: &'static [&'static str],
}

const NEUTRAL: ShapeCandidates = ShapeCandidates {
    radius: &["4px", "6px", "8px"],
    shadow: &["none", "0 1px 2px rgba(0,0,0,0.08)", "0 2px 6px rgba(0,0,0,0.10)"],
    border: &["none", "1px solid"],
};

const CANDIDATES: &[(&str, ShapeCandidates)] = &[
    (
        "minimal",
        ShapeCandidates {
            radius: &["0px", "2px", "4px"],
            shadow: &["none"],
            border: &["none", "1px solid"],
        },
    ),
    (
        "brutalist",
        ShapeCandidates {
            radius: &["0px"],
            shadow: &["4px 4px 0 #000", "6px 6px 0 #000", "none"],
            border: &["2px solid", "3px solid", "4px solid"],
        },
    ),
    (
        "luxury",
        ShapeCandidates {
            radius: &["0px", "2px"],
            shadow: &["0 10px 30px rgba(0,0,0,0.35)", "0 4px 16px rgba(0,0,0,0.25)"],
            border: &["1px solid", "none"],
        },
    ),
    (
        "playful",
        ShapeCandidates {
            radius: &["12px", "16px", "9999px"],
            shadow: &["0 4px 0 rgba(0,0,0,0.15)", "0 6px 14px rgba(0,0,0,0.12)"],
            border: &["none", "2px solid"],
        },
    ),
    (
        "corporate",
        ShapeCandidates {
            radius: &["4px", "6px"],
            shadow: &["0 1px 3px rgba(0,0,0,0.12)", "0 1px 2px rgba(0,0,0,0.06)"],
            border: &["1px solid", "none"],
        },
    ),
    (
        "retro",
        ShapeCandidates {
            radius: &["2px", "8px", "12px"],
            shadow: &["3px 3px 0 rgba(0,0,0,0.8)", "none"],
            border: &["2px solid", "2px dashed"],
        },
    ),
    (
        "cyberpunk",
        ShapeCandidates {
            radius: &["0px", "2px"],
            shadow: &["0 0 12px currentColor", "0 0 24px currentColor", "none"],
            border: &["1px solid", "2px solid"],
        },
    ),
    (
        "organic",
        ShapeCandidates {
            radius: &["12px", "18px", "24px"],
            shadow: &["0 8px 24px rgba(0,0,0,0.08)", "none"],
            border: &["none"],
        },
    ),
];

/// Looks up shape candidates for a vibe id; unknown ids get neutral ones.
pub fn shape_candidates(vibe_id: &str) -> ShapeCandidates {
    CANDIDATES
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(vibe_id))
        .map_or(NEUTRAL, |(_, c)| *c)
}

/// Picks radius/shadow/border for each element class.
pub fn pick_component_shapes(vibe: &VibePreset, seed: f64) -> ComponentShapes {
    let candidates = shape_candidates(&vibe.id);
    let draw = |salt: f64| {
        let choose = |options: &[&str], k: f64| {
            pick(options, seed * (salt + k))
                .copied()
                .unwrap_or("none")
                .to_string()
        };
        ShapeToken {
            radius: choose(candidates.radius, 0.11),
            shadow: choose(candidates.shadow, 0.23),
            border: choose(candidates.border, 0.37),
        }
    };

    ComponentShapes {
        button_primary: draw(1.0),
        button_secondary: draw(2.0),
        card: draw(3.0),
    }
}
