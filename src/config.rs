//! YAML configuration file support for codeprint.
//!
//! All stage settings live in one YAML document. Every section and field is
//! optional and falls back to the stage defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # codeprint configuration
//! version: "1.0"
//! name: "course-assignments"
//!
//! canonical:
//!   version: 1
//!   # defaults to perceptual.k when omitted
//!   tail_margin: 4
//!   # opt-in; when true operators such as `*` are never rewritten
//!   identifiers_only: false
//!
//! perceptual:
//!   version: 1
//!   k: 4
//!   w: 8
//!   hash_bits: 32
//!   keep_lookup: false
//!   include_intermediates: false
//!
//! matcher:
//!   version: 1
//!   threshold: 0.8
//!   symbols: "digits"
//!   use_parallel: true
//! ```

use std::fs;
use std::path::Path;

use canonical::CanonicalizeConfig;
use matcher::{MatchConfig, SymbolMode};
use perceptual::PerceptualConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PipelineConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CodeprintConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub perceptual: PerceptualYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,
}

impl CodeprintConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: CodeprintConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the format version and every stage section.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.matcher.validate_symbols()?;

        self.to_pipeline_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    /// Stage configs described by this file.
    ///
    /// An unset `canonical.tail_margin` follows `perceptual.k`. An unknown
    /// `matcher.symbols` value falls back to the default mode; [`validate`]
    /// rejects it.
    ///
    /// [`validate`]: CodeprintConfig::validate
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            canonical: self.canonical.to_config(self.perceptual.k),
            perceptual: self.perceptual.to_config(),
            matcher: self.matcher.to_config(),
        }
    }
}

impl Default for CodeprintConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            perceptual: PerceptualYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
        }
    }
}

/// Canonicalization stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub tail_margin: Option<usize>,

    #[serde(default)]
    pub identifiers_only: bool,
}

impl CanonicalYamlConfig {
    fn to_config(&self, k: usize) -> CanonicalizeConfig {
        CanonicalizeConfig {
            version: self.version,
            tail_margin: self.tail_margin.unwrap_or(k),
            identifiers_only: self.identifiers_only,
        }
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tail_margin: None,
            identifiers_only: false,
        }
    }
}

/// Fingerprinting stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptualYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_w")]
    pub w: usize,

    #[serde(default = "default_hash_bits")]
    pub hash_bits: u32,

    #[serde(default)]
    pub keep_lookup: bool,

    #[serde(default = "true_value")]
    pub include_intermediates: bool,
}

impl PerceptualYamlConfig {
    fn to_config(&self) -> PerceptualConfig {
        PerceptualConfig {
            version: self.version,
            k: self.k,
            w: self.w,
            hash_bits: self.hash_bits,
            keep_lookup: self.keep_lookup,
            include_intermediates: self.include_intermediates,
        }
    }
}

impl Default for PerceptualYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: default_k(),
            w: default_w(),
            hash_bits: default_hash_bits(),
            keep_lookup: false,
            include_intermediates: true,
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// `digits` or `hashes`
    #[serde(default = "default_symbols")]
    pub symbols: String,

    #[serde(default = "true_value")]
    pub use_parallel: bool,
}

impl MatchYamlConfig {
    fn to_config(&self) -> MatchConfig {
        MatchConfig {
            version: self.version,
            threshold: self.threshold,
            symbols: self.symbols.parse().unwrap_or_default(),
            use_parallel: self.use_parallel,
        }
    }

    fn validate_symbols(&self) -> Result<(), ConfigLoadError> {
        self.symbols
            .parse::<SymbolMode>()
            .map(|_| ())
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            threshold: default_threshold(),
            symbols: default_symbols(),
            use_parallel: true,
        }
    }
}

// Helper functions for serde defaults
fn default_format_version() -> String {
    "1.0".to_string()
}
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_k() -> usize {
    4
}
fn default_w() -> usize {
    4
}
fn default_hash_bits() -> u32 {
    32
}
fn default_threshold() -> f64 {
    0.8
}
fn default_symbols() -> String {
    "digits".to_string()
}
