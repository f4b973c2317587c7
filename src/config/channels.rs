//! Channel preset configuration loading from config.toml
//!
//! This module provides the category name and the channel presets used when
//! provisioning a guild. Operators can override the defaults by shipping a
//! `config.toml` next to the binary; without one, the built-in presets
//! (steam / steam-aaa / gog / gog-aaa) are used.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default name of the category that holds all deal channels.
pub const DEFAULT_CATEGORY: &str = "game-deals";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelsConfig {
    /// Name of the category the deal channels are created under
    #[serde(default = "default_category")]
    pub category: String,
    /// Channel presets to provision for every guild
    pub channels: Vec<ChannelPreset>,
}

/// Configuration for a single deal channel
#[derive(Debug, Deserialize, Clone)]
pub struct ChannelPreset {
    /// Name of the text channel
    pub name: String,
    /// Exclusive lower bound of the retail price band
    pub min_retail_price: f64,
    /// Inclusive upper bound of the retail price band
    pub max_retail_price: f64,
    /// Store slug the channel carries deals for ("steam" or "gog")
    pub store: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        let band = |name: &str, min: f64, max: f64, store: &str| ChannelPreset {
            name: name.to_string(),
            min_retail_price: min,
            max_retail_price: max,
            store: store.to_string(),
        };
        Self {
            category: default_category(),
            channels: vec![
                band("steam-deals", 0.0, 29.0, "steam"),
                band("steam-aaa-deals", 29.0, 1000.0, "steam"),
                band("gog-deals", 0.0, 29.0, "gog"),
                band("gog-aaa-deals", 29.0, 1000.0, "gog"),
            ],
        }
    }
}

/// Loads channel configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ChannelsConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads channel configuration from the default location (./config.toml),
/// falling back to the built-in presets when the file does not exist.
///
/// A present but unparsable file is still an error: silently ignoring a typo
/// in an operator-provided config would be worse than refusing to start.
pub fn load_or_default() -> Result<ChannelsConfig> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(ChannelsConfig::default())
    }
}
