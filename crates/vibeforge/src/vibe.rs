//! Vibe presets and the catalog that holds them.
//!
//! A vibe is configuration, not behavior: numeric hue/saturation/lightness
//! ranges plus a dark/light flag. Catalogs can come from the builtin table
//! or be loaded from JSON/TOML supplied by the caller.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin;
use crate::error::{CatalogLoadError, PresetValidationError};

/// A named creative style preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibePreset {
    /// Stable identifier, also the key for per-vibe rule tables.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Anchor hue in degrees.
    pub primary_hue: f64,
    /// Explicit hue window; defaults to `primary_hue ± 30`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_hue_range: Option<(f64, f64)>,
    /// Saturation window for the primary color, in percent.
    pub primary_sat_range: (f64, f64),
    /// Lightness window for the primary color, in percent.
    pub primary_light_range: (f64, f64),
    /// Background lightness, in percent.
    pub bg_lightness: f64,
    /// Whether the vibe renders on a dark UI.
    #[serde(default)]
    pub is_dark_ui: bool,
}

impl VibePreset {
    /// Returns the hue window used for the primary draw.
    pub fn hue_range(&self) -> (f64, f64) {
        self.primary_hue_range
            .unwrap_or((self.primary_hue - 30.0, self.primary_hue + 30.0))
    }

    /// Checks that every range is ordered and within bounds.
    ///
    /// Hue ranges may extend past 0/360 since hues wrap; only ordering is
    /// checked for them.
    ///
    /// # Errors
    /// Returns the first [`PresetValidationError`] found.
    pub fn validate(&self) -> Result<(), PresetValidationError> {
        if self.id.trim().is_empty() {
            return Err(PresetValidationError::EmptyId);
        }
        self.check_bounds("primaryHue", self.primary_hue, 0.0, 360.0)?;
        if let Some((min, max)) = self.primary_hue_range {
            self.check_order("primaryHueRange", min, max)?;
        }
        for (field, (min, max)) in [
            ("primarySatRange", self.primary_sat_range),
            ("primaryLightRange", self.primary_light_range),
        ] {
            self.check_order(field, min, max)?;
            self.check_bounds(field, min, 0.0, 100.0)?;
            self.check_bounds(field, max, 0.0, 100.0)?;
        }
        self.check_bounds("bgLightness", self.bg_lightness, 0.0, 100.0)
    }

    fn check_order(&self, field: &'static str, min: f64, max: f64) -> Result<(), PresetValidationError> {
        if min > max || !min.is_finite() || !max.is_finite() {
            return Err(PresetValidationError::InvertedRange {
                id: self.id.clone(),
                field,
                min,
                max,
            });
        }
        Ok(())
    }

    fn check_bounds(
        &self,
        field: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    ) -> Result<(), PresetValidationError> {
        if !(lo..=hi).contains(&value) {
            return Err(PresetValidationError::OutOfBounds {
                id: self.id.clone(),
                field,
                value,
                lo,
                hi,
            });
        }
        Ok(())
    }
}

/// An ordered collection of vibes with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeCatalog {
    vibes: Vec<VibePreset>,
}

impl VibeCatalog {
    /// Builds a catalog, validating every preset and id uniqueness.
    ///
    /// # Errors
    /// Returns [`PresetValidationError`] on the first invalid preset.
    pub fn new(vibes: Vec<VibePreset>) -> Result<Self, PresetValidationError> {
        let catalog = Self { vibes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The builtin catalog.
    pub fn builtin() -> Self {
        Self {
            vibes: builtin::presets(),
        }
    }

    /// Looks up a vibe by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&VibePreset> {
        self.vibes.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }

    /// Iterates over vibe ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vibes.iter().map(|v| v.id.as_str())
    }

    /// Iterates over the presets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &VibePreset> {
        self.vibes.iter()
    }

    /// Number of vibes.
    pub fn len(&self) -> usize {
        self.vibes.len()
    }

    /// Returns true when the catalog holds no vibes.
    pub fn is_empty(&self) -> bool {
        self.vibes.is_empty()
    }

    /// Validates every preset and id uniqueness.
    ///
    /// # Errors
    /// Returns the first [`PresetValidationError`] found.
    pub fn validate(&self) -> Result<(), PresetValidationError> {
        if self.vibes.is_empty() {
            return Err(PresetValidationError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for vibe in &self.vibes {
            vibe.validate()?;
            if !seen.insert(vibe.id.to_ascii_lowercase()) {
                return Err(PresetValidationError::DuplicateId(vibe.id.clone()));
            }
        }
        Ok(())
    }

    /// Loads a catalog from JSON.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError`] if parsing or validation fails.
    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        debug!(catalog.len = catalog.len(), "Loaded vibe catalog from JSON");
        Ok(catalog)
    }

    /// Loads a catalog from TOML (`[[vibes]]` tables).
    ///
    /// # Errors
    /// Returns [`CatalogLoadError`] if parsing or validation fails.
    pub fn from_toml(toml: &str) -> Result<Self, CatalogLoadError> {
        let catalog: Self = toml::from_str(toml)?;
        catalog.validate()?;
        debug!(catalog.len = catalog.len(), "Loaded vibe catalog from TOML");
        Ok(catalog)
    }

    /// Loads a catalog from a `.json` or `.toml` file.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError`] if reading, parsing, or validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            Some(ext) => Err(CatalogLoadError::UnsupportedFormat(ext.into())),
            None => Err(CatalogLoadError::UnsupportedFormat("unknown".into())),
        }
    }
}

impl Default for VibeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a VibeCatalog {
    type Item = &'a VibePreset;
    type IntoIter = std::slice::Iter<'a, VibePreset>;

    fn into_iter(self) -> Self::IntoIter {
        self.vibes.iter()
    }
}
