//! Runtime configuration for `vibeforge`.
//!
//! [`Config`] is the single source of truth for runtime settings, independent
//! of where they came from. Values merge in increasing precedence:
//!
//! 1. Built-in defaults
//! 2. The TOML config file (`--config` / `VIBEFORGE_CONFIG`)
//! 3. Command-line flags and their environment variables
//!
//! # Examples
//!
//! ```toml
//! vibe = "luxury"
//! seed = 0.4217
//! format = "json"
//! catalog = "vibes.toml"
//!
//! [capabilities]
//! harmonyPalettes = true
//! aaaRepair = true
//!
//! [repair]
//! mutedWindowLightBg = [35.0, 65.0]
//! iterations = 24
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vibeforge::{Capabilities, HarmonyOptions, RepairTuning};

use crate::cli::{Cli, OutputFormat};

/// Vibe used when none is configured.
pub const DEFAULT_VIBE: &str = "minimal";

/// Seed used when none is configured.
pub const DEFAULT_SEED: f64 = 0.5;

/// The on-disk config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub vibe: Option<String>,
    pub seed: Option<f64>,
    pub format: Option<OutputFormat>,
    /// Relative paths resolve against the config file's directory.
    pub catalog: Option<PathBuf>,
    pub capabilities: Option<Capabilities>,
    pub repair: Option<RepairTuning>,
    pub harmony: Option<HarmonyOptions>,
}

impl FileConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        Ok(config)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Vibe id to generate for.
    pub vibe: String,
    /// Generation seed.
    pub seed: f64,
    /// Output format.
    pub format: OutputFormat,
    /// External vibe catalog; the builtin catalog when `None`.
    pub catalog: Option<PathBuf>,
    /// Unlocked capabilities.
    pub capabilities: Capabilities,
    /// Contrast repair tuning.
    pub repair: RepairTuning,
    /// Harmony variation spans.
    pub harmony: HarmonyOptions,
    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vibe: DEFAULT_VIBE.to_string(),
            seed: DEFAULT_SEED,
            format: OutputFormat::Text,
            catalog: None,
            capabilities: Capabilities::BASIC,
            repair: RepairTuning::default(),
            harmony: HarmonyOptions::default(),
            verbosity: 0,
        }
    }
}

impl Config {
    /// Resolves configuration from CLI arguments, reading the config file
    /// if one was given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be loaded or the
    /// resulting seed is not finite.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, cli)
    }

    /// Merges a parsed config file with CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeed`] if the resulting seed is not
    /// finite.
    pub fn merge(file: FileConfig, cli: &Cli) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let generate = cli.generate_args();

        let vibe = generate
            .and_then(|g| g.vibe.clone())
            .or(file.vibe)
            .unwrap_or(defaults.vibe);
        let seed = generate
            .and_then(|g| g.seed)
            .or(file.seed)
            .unwrap_or(defaults.seed);
        if !seed.is_finite() {
            return Err(ConfigError::InvalidSeed(seed));
        }

        let capabilities = if cli.unlock_all {
            Capabilities::ALL
        } else {
            file.capabilities.unwrap_or(defaults.capabilities)
        };

        Ok(Self {
            vibe,
            seed,
            format: cli.format.or(file.format).unwrap_or(defaults.format),
            catalog: cli.catalog.clone().or(file.catalog),
            capabilities,
            repair: file.repair.unwrap_or(defaults.repair),
            harmony: file.harmony.unwrap_or(defaults.harmony),
            verbosity: cli.verbose,
        })
    }
}

/// The default log filter for a `-v` count.
pub const fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Seed is NaN or infinite.
    #[error("Seed must be a finite number, got {0}")]
    InvalidSeed(f64),
}
