//! Configuration management for `BargainBuddy`.

/// Deals API settings loaded from environment variables
pub mod api;

/// Channel preset configuration loading from config.toml
pub mod channels;

/// Database configuration and connection management
pub mod database;

use crate::errors::Result;

/// Application settings shared with the bot context.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Deals API endpoint and scheduled batch sizes
    pub api: api::ApiSettings,
    /// Category name and channel presets used for guild provisioning
    pub channels: channels::ChannelsConfig,
}

impl AppSettings {
    /// Assembles the full application configuration from the environment and
    /// an optional `config.toml`.
    pub fn load() -> Result<Self> {
        Ok(Self {
            api: api::ApiSettings::from_env(),
            channels: channels::load_or_default()?,
        })
    }
}
