//! Error types.
//!
//! Generation, repair, and optimization never fail: they degrade toward a
//! best-effort result. Errors only exist at the data boundary, when parsing
//! colors or loading and exporting configuration.

use thiserror::Error;

/// Error parsing a hex color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color value is empty")]
    Empty,
    #[error("Invalid hex length {len} in '{input}' (expected 3 or 6 digits)")]
    InvalidLength { input: String, len: usize },
    #[error("Invalid hex digit '{digit}' in '{input}'")]
    InvalidDigit { input: String, digit: char },
}

/// Error validating a vibe preset or catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetValidationError {
    #[error("Vibe id cannot be empty")]
    EmptyId,
    #[error("Vibe '{id}': {field} range [{min}, {max}] is inverted")]
    InvertedRange {
        id: String,
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Vibe '{id}': {field} value {value} is outside [{lo}, {hi}]")]
    OutOfBounds {
        id: String,
        field: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    },
    #[error("Duplicate vibe id '{0}'")]
    DuplicateId(String),
    #[error("Vibe catalog is empty")]
    EmptyCatalog,
}

/// Error loading a vibe catalog.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(#[from] PresetValidationError),
}

/// Error exporting generated tokens.
#[derive(Error, Debug)]
pub enum TokenExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
