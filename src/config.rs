//! Configuration management and validation.
//!
//! Provides the immutable rule set injected into the field validator, the
//! parser settings for delimited input, and layered loading
//! (defaults -> JSON file -> environment -> CLI overrides).

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DATE_FORMAT, DEFAULT_DATE_FORMAT_LABEL,
    DEFAULT_DELIMITER, DEFAULT_EXCHANGES, DEFAULT_MAX_PRICE_SCALE, DEFAULT_PRODUCT_TYPES,
    ENV_EXCHANGES, ENV_PRODUCT_TYPES,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Business rules applied to every record
///
/// Built once and never mutated afterwards; validators share it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Accepted exchanges, compared case-insensitively after trimming
    pub exchanges: Vec<String>,

    /// Accepted product types, compared case-insensitively after trimming
    pub product_types: Vec<String>,

    /// Canonical trade date pattern in chrono syntax
    pub date_format: String,

    /// Human-readable form of `date_format` used in messages
    pub date_format_label: String,

    /// Maximum digits after the decimal point of a price
    pub max_price_scale: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            exchanges: DEFAULT_EXCHANGES.iter().map(|s| s.to_string()).collect(),
            product_types: DEFAULT_PRODUCT_TYPES.iter().map(|s| s.to_string()).collect(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            date_format_label: DEFAULT_DATE_FORMAT_LABEL.to_string(),
            max_price_scale: DEFAULT_MAX_PRICE_SCALE,
        }
    }
}

impl ValidationRules {
    /// Replace the exchange allow-list
    pub fn with_exchanges<I, S>(mut self, exchanges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exchanges = exchanges.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the product type allow-list
    pub fn with_product_types<I, S>(mut self, product_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_types = product_types.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the maximum price scale
    pub fn with_max_price_scale(mut self, scale: u32) -> Self {
        self.max_price_scale = scale;
        self
    }

    /// Check the rule set for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_allow_list("exchanges", &self.exchanges)?;
        validate_allow_list("product_types", &self.product_types)?;

        if self.date_format.trim().is_empty() {
            return Err(Error::configuration("date_format must not be empty"));
        }
        if self.date_format_label.trim().is_empty() {
            return Err(Error::configuration("date_format_label must not be empty"));
        }

        Ok(())
    }
}

fn validate_allow_list(name: &str, entries: &[String]) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::configuration(format!("{} must not be empty", name)));
    }
    if let Some(position) = entries.iter().position(|entry| entry.trim().is_empty()) {
        return Err(Error::configuration(format!(
            "{} contains a blank entry at position {}",
            name,
            position + 1
        )));
    }
    Ok(())
}

/// Settings for the delimited-text reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Field delimiter; must be a single ASCII character
    pub delimiter: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ParserConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::configuration(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }

    /// Check the parser settings
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte().map(|_| ())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule set injected into the field validator
    pub rules: ValidationRules,

    /// Delimited input settings
    pub parser: ParserConfig,
}

impl Config {
    /// Default configuration file location (`<config dir>/pricing-validator/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a configuration file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration using layered approach (defaults -> file -> env)
    ///
    /// An explicit `config_file` must exist; otherwise the default location is
    /// used when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply allow-list overrides from the environment
    ///
    /// `lookup` abstracts `std::env::var` so overrides can be exercised without
    /// touching process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_EXCHANGES) {
            self.rules.exchanges = split_list(&value);
        }
        if let Some(value) = lookup(ENV_PRODUCT_TYPES) {
            self.rules.product_types = split_list(&value);
        }
    }

    /// Validate the full configuration
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.parser.validate()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
